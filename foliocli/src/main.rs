use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_core::*;
use foliocli::render;
use foliocli::{Console, FolioCliApp, RouteRecorder, ToastQueue};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foliocli")]
#[command(about = "Folio - portfolio and local-first blog in the terminal")]
#[command(version)]
struct Cli {
    /// Directory holding the local blog state
    #[arg(long, global = true, env = "FOLIO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List every visible post
    List,
    /// Show one post with its comments
    Show { id: PostId },
    /// Publish a new post
    New(NewArgs),
    /// Edit a post; fields left out keep their value
    Edit {
        id: PostId,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a post and its comments
    Delete {
        id: PostId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Bring back a deleted post
    Undo { id: PostId },
    /// Comment on a post
    Comment { id: PostId, text: String },
    /// Print the portfolio, or one section of it
    Portfolio { section: Option<SectionArg> },
    /// Forget every local post, tombstone and comment
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct NewArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    excerpt: String,
    #[arg(long, default_value = "General")]
    category: String,
    /// Markdown body
    #[arg(long, default_value = "")]
    content: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long, default_value = "")]
    hero_image: String,
    #[arg(long, default_value = "")]
    code_url: String,
    #[arg(long, default_value = "")]
    live_url: String,
}

impl NewArgs {
    fn into_form(self) -> PostForm {
        PostForm {
            title: self.title,
            category: self.category,
            excerpt: self.excerpt,
            content: self.content,
            tags: self.tags,
            hero_image: self.hero_image,
            code_url: self.code_url,
            live_url: self.live_url,
        }
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    excerpt: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    hero_image: Option<String>,
    #[arg(long)]
    code_url: Option<String>,
    #[arg(long)]
    live_url: Option<String>,
}

impl EditArgs {
    fn apply(self, form: &mut PostForm) {
        let updates = [
            (self.title, &mut form.title),
            (self.excerpt, &mut form.excerpt),
            (self.category, &mut form.category),
            (self.content, &mut form.content),
            (self.tags, &mut form.tags),
            (self.hero_image, &mut form.hero_image),
            (self.code_url, &mut form.code_url),
            (self.live_url, &mut form.live_url),
        ];
        for (update, field) in updates {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Skills,
    Experience,
    Work,
    Education,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Skills => Section::Skills,
            SectionArg::Experience => Section::Experience,
            SectionArg::Work => Section::Work,
            SectionArg::Education => Section::Education,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match cli.data_dir {
        Some(dir) => Config::with_data_dir(dir)?,
        None => Config::new()?,
    };
    log::debug!("Using data directory {}", config.data_dir.display());

    let Some(command) = cli.command else {
        let mut app = FolioCliApp::new(&config)?;
        return app.run();
    };

    let mut blog = Blog::from_config(FileStore::open(&config), &config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List => {
            render::print_list(&mut out, &BlogListView::mount(&blog))?;
        }
        Command::Show { id } => match BlogPostView::mount(&blog, id).page() {
            Some(page) => render::print_post(&mut out, page, &DefaultServiceProvider)?,
            None => writeln!(out, "{}", BlogPostView::NOT_FOUND_MESSAGE)?,
        },
        Command::New(args) => {
            let view = NewBlogView {
                form: args.into_form(),
            };
            let mut toasts = ToastQueue::default();
            let post = view
                .publish(&mut blog, &mut toasts, &mut RouteRecorder::default())
                .context("Cannot publish")?;
            print_toasts(&mut out, &mut toasts)?;
            writeln!(out, "Published post {} ({})", post.id, Route::Post(post.id))?;
        }
        Command::Edit { id, fields } => {
            let Some(mut view) = EditBlogView::mount(&blog, id) else {
                bail!("{}", EditBlogView::NOT_FOUND_MESSAGE);
            };
            fields.apply(&mut view.form);
            let post = view
                .save(&mut blog, &mut RouteRecorder::default())
                .context("Cannot save")?;
            writeln!(out, "Saved post {} ({})", post.id, Route::Post(post.id))?;
        }
        Command::Delete { id, yes } => {
            let mut view = BlogPostView::mount(&blog, id);
            if view.page().is_none() {
                writeln!(out, "{}", BlogPostView::NOT_FOUND_MESSAGE)?;
                return Ok(());
            }
            let mut console = Console::new(io::stdin().lock(), io::stdout());
            console.assume_yes = yes;
            let mut toasts = ToastQueue::default();
            if view.delete(&mut blog, &mut console, &mut toasts, &mut RouteRecorder::default()) {
                for toast in toasts.drain() {
                    render::print_toast(&mut out, &toast.with_undo(id))?;
                }
            } else {
                writeln!(out, "Kept post {}", id)?;
            }
        }
        Command::Undo { id } => {
            if blog.undo_delete(id) {
                writeln!(out, "Restored post {}", id)?;
            } else if is_demo_post(id) {
                writeln!(out, "Nothing to restore for {}", id)?;
            } else {
                writeln!(out, "Post {} was written locally; deleting it removed it for good", id)?;
            }
        }
        Command::Comment { id, text } => {
            let mut view = BlogPostView::mount(&blog, id);
            if view.page().is_none() {
                bail!("{}", BlogPostView::NOT_FOUND_MESSAGE);
            }
            let mut toasts = ToastQueue::default();
            let result = view.submit_comment(&mut blog, &text, &mut toasts);
            print_toasts(&mut out, &mut toasts)?;
            result.context("Comment was not posted")?;
        }
        Command::Portfolio { section } => {
            let sections: Vec<Section> = match section {
                Some(section) => vec![section.into()],
                None => Section::ALL.to_vec(),
            };
            for section in sections {
                render::print_section(&mut out, section)?;
            }
        }
        Command::Reset { yes } => {
            let mut console = Console::new(io::stdin().lock(), io::stdout());
            console.assume_yes = yes;
            if console.confirm("Forget every local post, deletion and comment?") {
                blog.reset();
                writeln!(out, "Local blog state cleared")?;
            }
        }
    }

    Ok(())
}

fn print_toasts(out: &mut dyn Write, toasts: &mut ToastQueue) -> io::Result<()> {
    for toast in toasts.drain() {
        render::print_toast(out, &toast)?;
    }
    Ok(())
}
