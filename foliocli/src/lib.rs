pub use crate::app::FolioCliApp;
pub use crate::console::{Console, RouteRecorder, ToastQueue};

pub mod render {
    use folio_core::core::catalog::{self, display_key};
    use folio_core::{BlogListView, BlogPostView, MarkdownRenderer, PostPage, Section, Toast, ToastKind};
    use std::io::{self, Write};

    pub fn print_list(out: &mut dyn Write, view: &BlogListView) -> io::Result<()> {
        writeln!(out, "=== Blogs ===")?;
        if view.is_empty() {
            writeln!(out, "{}", BlogListView::EMPTY_MESSAGE)?;
            return Ok(());
        }
        for card in view.cards() {
            let post = &card.post;
            writeln!(out, "{:>2}. {}  [id {}]", card.number, post.title, post.id)?;
            writeln!(out, "    {} • {}", post.category, post.date)?;
            if !post.excerpt.is_empty() {
                writeln!(out, "    {}", post.excerpt)?;
            }
            if !post.tags.is_empty() {
                writeln!(out, "    tags: {}", post.tags.join(", "))?;
            }
        }
        Ok(())
    }

    pub fn print_post(out: &mut dyn Write, page: &PostPage, renderer: &dyn MarkdownRenderer) -> io::Result<()> {
        let post = &page.post;
        writeln!(out, "=== {} ===", page.document_title())?;
        writeln!(out, "{}", post.title)?;
        writeln!(out, "{} • {} • {}", page.author_name(), post.date, post.category)?;
        if !post.tags.is_empty() {
            writeln!(out, "tags: {}", post.tags.join(", "))?;
        }
        writeln!(out, "hero: {}", post.hero_image_url())?;
        if let Some(url) = &post.code_url {
            writeln!(out, "code: {}", url)?;
        }
        if let Some(url) = &post.live_url {
            writeln!(out, "live: {}", url)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", renderer.render(&post.content))?;
        writeln!(out)?;
        writeln!(out, "--- Comments ({}) ---", page.comments.len())?;
        if page.comments.is_empty() {
            writeln!(out, "{}", BlogPostView::NO_COMMENTS_MESSAGE)?;
        }
        for comment in &page.comments {
            writeln!(out, "[{}] {}", comment.date.format("%Y-%m-%d %H:%M:%S UTC"), comment.text)?;
        }
        Ok(())
    }

    pub fn print_toast(out: &mut dyn Write, toast: &Toast) -> io::Result<()> {
        let tag = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        };
        match toast.undo {
            Some(id) => writeln!(out, "[{}] {} (undo: `u`, or `foliocli undo {}`)", tag, toast.message, id),
            None => writeln!(out, "[{}] {}", tag, toast.message),
        }
    }

    pub fn print_section(out: &mut dyn Write, section: Section) -> io::Result<()> {
        writeln!(out, "=== {} ===", section.title())?;
        match section {
            Section::Skills => {
                for category in catalog::skills() {
                    let names: Vec<&str> = category.skills.iter().map(|skill| skill.name).collect();
                    writeln!(out, "{}: {}", category.title, names.join(", "))?;
                }
            }
            Section::Experience => {
                for (index, experience) in catalog::experiences().iter().enumerate() {
                    writeln!(
                        out,
                        "{}. {} @ {} ({})",
                        display_key(experience.id, index) + 1,
                        experience.role,
                        experience.company,
                        experience.date
                    )?;
                    for line in experience.desc {
                        writeln!(out, "   - {}", line)?;
                    }
                    writeln!(out, "   skills: {}", experience.skills.join(", "))?;
                }
            }
            Section::Work => {
                for (index, project) in catalog::projects().iter().enumerate() {
                    writeln!(out, "{}. {}", display_key(project.id, index) + 1, project.title)?;
                    writeln!(out, "   {}", project.description)?;
                    writeln!(out, "   tags: {}", project.tags.join(", "))?;
                    writeln!(out, "   code: {}", project.github)?;
                    writeln!(out, "   live: {}", project.webapp)?;
                }
            }
            Section::Education => {
                for (index, entry) in catalog::education().iter().enumerate() {
                    writeln!(
                        out,
                        "{}. {}, {} ({}), grade {}",
                        display_key(entry.id, index) + 1,
                        entry.degree,
                        entry.school,
                        entry.date,
                        entry.grade
                    )?;
                    writeln!(out, "   {}", entry.desc)?;
                }
            }
        }
        Ok(())
    }
}

mod console {
    use folio_core::{Confirm, Navigator, Notifier, Route, Toast};
    use std::io::{self, BufRead, Write};

    /// Line-based terminal I/O.
    pub struct Console<R, W> {
        pub input: R,
        pub output: W,
        /// Answer every confirmation with yes.
        pub assume_yes: bool,
    }

    impl<R: BufRead, W: Write> Console<R, W> {
        pub fn new(input: R, output: W) -> Self {
            Self {
                input,
                output,
                assume_yes: false,
            }
        }

        /// One trimmed line, or `None` at end of input.
        pub fn read_line(&mut self) -> io::Result<Option<String>> {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
        }

        pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
            self.read_line()
        }

        /// Lines up to a lone `.`; `None` at end of input.
        pub fn read_block(&mut self) -> io::Result<Option<String>> {
            let mut lines = Vec::new();
            loop {
                match self.read_line()? {
                    Some(line) if line == "." => return Ok(Some(lines.join("\n"))),
                    Some(line) => lines.push(line),
                    None if lines.is_empty() => return Ok(None),
                    None => return Ok(Some(lines.join("\n"))),
                }
            }
        }
    }

    impl<R: BufRead, W: Write> Confirm for Console<R, W> {
        fn confirm(&mut self, prompt: &str) -> bool {
            if self.assume_yes {
                return true;
            }
            match self.prompt(&format!("{} [y/N]: ", prompt)) {
                Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
                _ => false,
            }
        }
    }

    /// Toasts waiting to be printed.
    #[derive(Default)]
    pub struct ToastQueue {
        pub pending: Vec<Toast>,
    }

    impl ToastQueue {
        pub fn drain(&mut self) -> Vec<Toast> {
            std::mem::take(&mut self.pending)
        }
    }

    impl Notifier for ToastQueue {
        fn notify(&mut self, toast: &Toast) {
            self.pending.push(toast.clone());
        }
    }

    /// Remembers where a view asked to go next.
    #[derive(Default)]
    pub struct RouteRecorder {
        pub next: Option<Route>,
    }

    impl RouteRecorder {
        pub fn take(&mut self) -> Option<Route> {
            self.next.take()
        }
    }

    impl Navigator for RouteRecorder {
        fn navigate(&mut self, route: &Route) {
            self.next = Some(route.clone());
        }
    }
}

mod app {
    use anyhow::Result;
    use folio_core::*;
    use std::io::{self, BufRead, StdinLock, Stdout, Write};

    use crate::console::{Console, RouteRecorder, ToastQueue};
    use crate::render;

    /// Form answer that empties a field.
    const CLEAR_FIELD: &str = "-";

    pub struct FolioCliApp<R, W> {
        blog: Blog<FileStore>,
        console: Console<R, W>,
        toasts: ToastQueue,
        router: RouteRecorder,
        route: Route,
        list: Option<BlogListView>,
    }

    impl FolioCliApp<StdinLock<'static>, Stdout> {
        pub fn new(config: &Config) -> Result<Self> {
            Ok(Self::with_io(config, io::stdin().lock(), io::stdout()))
        }
    }

    impl<R: BufRead, W: Write> FolioCliApp<R, W> {
        pub fn with_io(config: &Config, input: R, output: W) -> Self {
            Self {
                blog: Blog::from_config(FileStore::open(config), config),
                console: Console::new(input, output),
                toasts: ToastQueue::default(),
                router: RouteRecorder::default(),
                route: Route::Home,
                list: None,
            }
        }

        pub fn start_at(mut self, route: Route) -> Self {
            self.route = route;
            self
        }

        pub fn route(&self) -> &Route {
            &self.route
        }

        pub fn into_output(self) -> W {
            self.console.output
        }

        pub fn run(&mut self) -> Result<()> {
            loop {
                let next = match self.route.clone() {
                    Route::Home => self.home_screen()?,
                    Route::Blogs => self.blogs_screen()?,
                    Route::NewBlog => self.new_blog_screen()?,
                    Route::Post(id) => self.post_screen(id)?,
                    Route::EditPost(id) => self.edit_screen(id)?,
                };
                match next {
                    Some(route) => self.go(route),
                    None => break,
                }
            }
            writeln!(self.console.output, "Exiting Folio...")?;
            Ok(())
        }

        fn go(&mut self, route: Route) {
            if route != Route::Blogs {
                self.list = None;
            }
            log::debug!("navigate: {} -> {}", self.route, route);
            self.route = route;
        }

        fn flush_toasts(&mut self) -> io::Result<()> {
            for toast in self.toasts.drain() {
                render::print_toast(&mut self.console.output, &toast)?;
            }
            Ok(())
        }

        fn home_screen(&mut self) -> Result<Option<Route>> {
            let out = &mut self.console.output;
            writeln!(out, "\n=== Folio ===")?;
            writeln!(out, "1. Blogs")?;
            for (index, section) in Section::ALL.iter().enumerate() {
                writeln!(out, "{}. {}", index + 2, section.title())?;
            }
            writeln!(out, "q. Exit")?;

            let Some(choice) = self.console.prompt("\nSelect an option: ")? else {
                return Ok(None);
            };
            match choice.trim() {
                "1" => Ok(Some(Route::Blogs)),
                "q" => Ok(None),
                other => {
                    let section = other
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(2))
                        .and_then(|index| Section::ALL.get(index).copied());
                    match section {
                        Some(section) => render::print_section(&mut self.console.output, section)?,
                        None => writeln!(self.console.output, "Invalid option.")?,
                    }
                    Ok(Some(Route::Home))
                }
            }
        }

        fn blogs_screen(&mut self) -> Result<Option<Route>> {
            match self.list.as_mut() {
                Some(list) => list.reload(&self.blog),
                None => self.list = Some(BlogListView::mount(&self.blog)),
            }
            let Some(list) = self.list.as_mut() else {
                return Ok(Some(Route::Home));
            };

            writeln!(self.console.output)?;
            render::print_list(&mut self.console.output, list)?;
            writeln!(self.console.output)?;
            write!(self.console.output, "r <n>. Read  e <n>. Edit  d <n>. Delete  n. New")?;
            if list.pending_undo().is_some() {
                write!(self.console.output, "  u. Undo")?;
            }
            writeln!(self.console.output, "  h. Home  q. Exit")?;

            let Some(line) = self.console.prompt("\nSelect an option: ")? else {
                return Ok(None);
            };
            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or_default();
            let target = parts
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| list.posts.get(index))
                .map(|post| post.id);

            match (command, target) {
                ("r", Some(id)) => Ok(Some(Route::Post(id))),
                ("e", Some(id)) => Ok(Some(Route::EditPost(id))),
                ("d", Some(id)) => {
                    list.delete(&mut self.blog, id, &mut self.console, &mut self.toasts);
                    self.flush_toasts()?;
                    Ok(Some(Route::Blogs))
                }
                ("u", _) => {
                    if !list.undo(&mut self.blog) {
                        writeln!(self.console.output, "Nothing to undo.")?;
                    }
                    Ok(Some(Route::Blogs))
                }
                ("n", _) => Ok(Some(Route::NewBlog)),
                ("h", _) => Ok(Some(Route::Home)),
                ("q", _) => Ok(None),
                _ => {
                    writeln!(self.console.output, "Invalid option.")?;
                    Ok(Some(Route::Blogs))
                }
            }
        }

        fn post_screen(&mut self, id: PostId) -> Result<Option<Route>> {
            let mut view = BlogPostView::mount(&self.blog, id);
            writeln!(self.console.output)?;
            let Some(page) = view.page() else {
                writeln!(self.console.output, "{}", BlogPostView::NOT_FOUND_MESSAGE)?;
                return Ok(self.console.prompt("Press enter to go back to blogs")?.map(|_| Route::Blogs));
            };
            render::print_post(&mut self.console.output, page, &DefaultServiceProvider)?;
            writeln!(self.console.output, "\nc. Comment  e. Edit  d. Delete  b. Back  q. Exit")?;

            let Some(choice) = self.console.prompt("\nSelect an option: ")? else {
                return Ok(None);
            };
            match choice.trim() {
                "c" => {
                    let Some(text) = self.console.prompt("Comment: ")? else {
                        return Ok(None);
                    };
                    match view.submit_comment(&mut self.blog, &text, &mut self.toasts) {
                        Ok(comment) => log::debug!("post_screen: Posted comment {} on {}", comment.id, id),
                        Err(e) => log::debug!("post_screen: Comment on {} rejected: {}", id, e),
                    }
                    self.flush_toasts()?;
                    Ok(Some(Route::Post(id)))
                }
                "e" => Ok(Some(Route::EditPost(id))),
                "d" => {
                    view.delete(&mut self.blog, &mut self.console, &mut self.toasts, &mut self.router);
                    self.flush_toasts()?;
                    Ok(Some(self.router.take().unwrap_or(Route::Post(id))))
                }
                "b" => Ok(Some(Route::Blogs)),
                "q" => Ok(None),
                _ => {
                    writeln!(self.console.output, "Invalid option.")?;
                    Ok(Some(Route::Post(id)))
                }
            }
        }

        fn new_blog_screen(&mut self) -> Result<Option<Route>> {
            let mut view = NewBlogView::new();
            writeln!(self.console.output, "\n=== New blog ===")?;
            if !self.fill_form(&mut view.form)? {
                return Ok(None);
            }
            writeln!(self.console.output, "\n--- Preview ---")?;
            let preview = DefaultServiceProvider.render(view.preview());
            writeln!(self.console.output, "{}", preview)?;

            if !self.console.confirm("Publish") {
                return Ok(Some(Route::Blogs));
            }
            match view.publish(&mut self.blog, &mut self.toasts, &mut self.router) {
                Ok(_) => {
                    self.flush_toasts()?;
                    Ok(Some(self.router.take().unwrap_or(Route::Blogs)))
                }
                Err(e) => {
                    writeln!(self.console.output, "Cannot publish: {}", e)?;
                    Ok(Some(Route::NewBlog))
                }
            }
        }

        fn edit_screen(&mut self, id: PostId) -> Result<Option<Route>> {
            let Some(mut view) = EditBlogView::mount(&self.blog, id) else {
                writeln!(self.console.output, "\n{}", EditBlogView::NOT_FOUND_MESSAGE)?;
                return Ok(Some(Route::Blogs));
            };
            writeln!(self.console.output, "\n=== Edit blog {} ({} • {}) ===", id, view.author, view.date)?;
            if !self.fill_form(&mut view.form)? {
                return Ok(None);
            }
            match view.save(&mut self.blog, &mut self.router) {
                Ok(_) => Ok(Some(self.router.take().unwrap_or(Route::Post(id)))),
                Err(e) => {
                    writeln!(self.console.output, "Cannot save: {}", e)?;
                    Ok(Some(Route::EditPost(id)))
                }
            }
        }

        /// Asks for every field; an empty answer keeps the shown value and
        /// `-` clears it. Returns false at end of input.
        fn fill_form(&mut self, form: &mut PostForm) -> Result<bool> {
            let fields: [(&str, &mut String); 7] = [
                ("Title", &mut form.title),
                ("Category", &mut form.category),
                ("Tags (comma separated)", &mut form.tags),
                ("Hero image URL", &mut form.hero_image),
                ("Live demo URL", &mut form.live_url),
                ("Code repo URL", &mut form.code_url),
                ("Short excerpt", &mut form.excerpt),
            ];
            for (label, value) in fields {
                let Some(answer) = self.console.prompt(&format!("{} [{}]: ", label, value))? else {
                    return Ok(false);
                };
                match answer.trim() {
                    "" => {}
                    CLEAR_FIELD => value.clear(),
                    _ => value.clone_from(&answer),
                }
            }

            writeln!(
                self.console.output,
                "Content in Markdown, end with a single '.' line ({} chars now, empty keeps it, `-` clears it):",
                form.content.len()
            )?;
            let Some(content) = self.console.read_block()? else {
                return Ok(false);
            };
            match content.trim() {
                "" => {}
                CLEAR_FIELD => form.content.clear(),
                _ => form.content.clone_from(&content),
            }
            Ok(true)
        }
    }

}
