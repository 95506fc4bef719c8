use chrono::NaiveDate;
use log::info;
use std::fmt;
use std::time::{Duration, Instant};

use crate::core::blog::Blog;
use crate::core::error::BlogError;
use crate::core::models::{Comment, Post, PostForm, PostId};
use crate::core::storage::KeyValueStore;
use crate::services::{Clock, Confirm, Navigator, Notifier};

pub const DELETE_UNDO_TTL: Duration = Duration::from_millis(4000);
pub const COMMENT_POSTED_TTL: Duration = Duration::from_millis(3000);
pub const VALIDATION_TTL: Duration = Duration::from_millis(2200);
pub const DELETED_TTL: Duration = Duration::from_millis(700);
pub const PUBLISHED_TTL: Duration = Duration::from_millis(2000);

/// Pages of the site, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blogs,
    NewBlog,
    Post(PostId),
    EditPost(PostId),
}

impl Route {
    /// Unknown paths land on the home page.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["blogs"] => Route::Blogs,
            ["blogs", "new"] => Route::NewBlog,
            ["blog", id] => id.parse().map(Route::Post).unwrap_or(Route::Home),
            ["blogs", id, "edit"] => id.parse().map(Route::EditPost).unwrap_or(Route::Home),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blogs => "/blogs".to_string(),
            Route::NewBlog => "/blogs/new".to_string(),
            Route::Post(id) => format!("/blog/{}", id),
            Route::EditPost(id) => format!("/blogs/{}/edit", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub ttl: Duration,
    /// Set when the toast offers to undo a delete of this id.
    pub undo: Option<PostId>,
    shown_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            ttl,
            undo: None,
            shown_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(ToastKind::Success, message, ttl)
    }

    pub fn info(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(ToastKind::Info, message, ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(ToastKind::Error, message, ttl)
    }

    pub fn with_undo(mut self, id: PostId) -> Self {
        self.undo = Some(id);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

/// A post card on the list page.
#[derive(Debug, Clone)]
pub struct BlogCard {
    /// 1-based position shown on the card.
    pub number: usize,
    pub post: Post,
    pub hero_image: String,
}

/// `/blogs`: every visible post, with delete and undo.
pub struct BlogListView {
    pub posts: Vec<Post>,
    pub toast: Option<Toast>,
}

impl BlogListView {
    pub const EMPTY_MESSAGE: &'static str = "No blogs to show.";

    pub fn mount<S: KeyValueStore, C: Clock>(blog: &Blog<S, C>) -> Self {
        Self {
            posts: blog.visible_posts(),
            toast: None,
        }
    }

    pub fn reload<S: KeyValueStore, C: Clock>(&mut self, blog: &Blog<S, C>) {
        self.posts = blog.visible_posts();
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn cards(&self) -> Vec<BlogCard> {
        self.posts
            .iter()
            .enumerate()
            .map(|(index, post)| BlogCard {
                number: index + 1,
                hero_image: post.hero_image_url(),
                post: post.clone(),
            })
            .collect()
    }

    /// Asks first; on yes deletes, reloads and offers undo for a few seconds.
    pub fn delete<S: KeyValueStore, C: Clock>(
        &mut self,
        blog: &mut Blog<S, C>,
        id: PostId,
        confirm: &mut dyn Confirm,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let title = match self.posts.iter().find(|post| post.id == id) {
            Some(post) => post.title.clone(),
            None => return false,
        };
        if !confirm.confirm(&format!("Delete \"{}\"?", title)) {
            return false;
        }

        blog.delete_post(id);
        self.reload(blog);
        let toast = Toast::info("Blog deleted", DELETE_UNDO_TTL).with_undo(id);
        notifier.notify(&toast);
        self.toast = Some(toast);
        true
    }

    /// The id the live toast can still undo, if any.
    pub fn pending_undo(&self) -> Option<PostId> {
        self.toast
            .as_ref()
            .filter(|toast| !toast.is_expired())
            .and_then(|toast| toast.undo)
    }

    pub fn undo<S: KeyValueStore, C: Clock>(&mut self, blog: &mut Blog<S, C>) -> bool {
        let Some(id) = self.pending_undo() else {
            self.toast = None;
            return false;
        };
        blog.undo_delete(id);
        self.reload(blog);
        self.toast = None;
        true
    }
}

/// `/blog/:id` once the post was found.
pub struct PostPage {
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl PostPage {
    pub fn document_title(&self) -> String {
        format!("{} — Blogs", self.post.title)
    }

    pub fn author_name(&self) -> &str {
        if self.post.author.name.is_empty() {
            "Author"
        } else {
            &self.post.author.name
        }
    }
}

/// `/blog/:id`: one post with its comment thread.
pub enum BlogPostView {
    Found(PostPage),
    /// The id that was asked for.
    NotFound(PostId),
}

impl BlogPostView {
    pub const NOT_FOUND_MESSAGE: &'static str = "Post not found.";
    pub const NO_COMMENTS_MESSAGE: &'static str = "No comments yet — be the first!";
    pub const DELETE_PROMPT: &'static str =
        "Are you sure you want to delete this blog? This action cannot be undone.";

    pub fn mount<S: KeyValueStore, C: Clock>(blog: &Blog<S, C>, id: PostId) -> Self {
        match blog.find_post(id) {
            Some(post) => {
                let comments = blog.comments(id);
                BlogPostView::Found(PostPage { post, comments })
            }
            None => BlogPostView::NotFound(id),
        }
    }

    pub fn page(&self) -> Option<&PostPage> {
        match self {
            BlogPostView::Found(page) => Some(page),
            BlogPostView::NotFound(_) => None,
        }
    }

    pub fn submit_comment<S: KeyValueStore, C: Clock>(
        &mut self,
        blog: &mut Blog<S, C>,
        text: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<Comment, BlogError> {
        let page = match self {
            BlogPostView::Found(page) => page,
            BlogPostView::NotFound(id) => return Err(BlogError::not_found(*id)),
        };
        match blog.post_comment(page.post.id, text) {
            Ok(comment) => {
                page.comments = blog.comments(page.post.id);
                notifier.notify(&Toast::success("Comment posted!", COMMENT_POSTED_TTL));
                Ok(comment)
            }
            Err(e) => {
                notifier.notify(&Toast::error(
                    "Please write something before posting.",
                    VALIDATION_TTL,
                ));
                Err(e)
            }
        }
    }

    /// Asks first; on yes deletes and heads back to the list.
    pub fn delete<S: KeyValueStore, C: Clock>(
        &mut self,
        blog: &mut Blog<S, C>,
        confirm: &mut dyn Confirm,
        notifier: &mut dyn Notifier,
        navigator: &mut dyn Navigator,
    ) -> bool {
        let id = match self {
            BlogPostView::Found(page) => page.post.id,
            BlogPostView::NotFound(_) => return false,
        };
        if !confirm.confirm(Self::DELETE_PROMPT) {
            return false;
        }
        blog.delete_post(id);
        notifier.notify(&Toast::info("Blog deleted", DELETED_TTL));
        *self = BlogPostView::NotFound(id);
        navigator.navigate(&Route::Blogs);
        true
    }
}

/// `/blogs/new`.
pub struct NewBlogView {
    pub form: PostForm,
}

impl Default for NewBlogView {
    fn default() -> Self {
        Self {
            form: PostForm::blank(),
        }
    }
}

impl NewBlogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preview(&self) -> &str {
        self.form.preview_source()
    }

    pub fn publish<S: KeyValueStore, C: Clock>(
        &self,
        blog: &mut Blog<S, C>,
        notifier: &mut dyn Notifier,
        navigator: &mut dyn Navigator,
    ) -> Result<Post, BlogError> {
        let post = blog.create_post(&self.form)?;
        notifier.notify(&Toast::success("Blog Published Successfully!", PUBLISHED_TTL));
        navigator.navigate(&Route::Post(post.id));
        Ok(post)
    }
}

/// `/blogs/:id/edit`, prefilled from the merged record.
pub struct EditBlogView {
    pub id: PostId,
    pub form: PostForm,
    pub author: String,
    pub date: NaiveDate,
    /// Whether the record already lives in the overlay (otherwise saving forks a demo post).
    pub is_local: bool,
}

impl EditBlogView {
    pub const NOT_FOUND_MESSAGE: &'static str = "Blog not found.";

    pub fn mount<S: KeyValueStore, C: Clock>(blog: &Blog<S, C>, id: PostId) -> Option<Self> {
        let post = blog.find_post(id)?;
        let author = if post.author.name.is_empty() {
            "Author".to_string()
        } else {
            post.author.name.clone()
        };
        Some(Self {
            id,
            form: PostForm::from_post(&post),
            author,
            date: post.date,
            is_local: blog.is_in_overlay(id),
        })
    }

    pub fn save<S: KeyValueStore, C: Clock>(
        &self,
        blog: &mut Blog<S, C>,
        navigator: &mut dyn Navigator,
    ) -> Result<Post, BlogError> {
        let post = blog.edit_post(self.id, &self.form)?;
        info!("EditBlogView: saved {} (was local: {})", self.id, self.is_local);
        navigator.navigate(&Route::Post(post.id));
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::services::testing::{Answer, FixedClock, RecordingNavigator, RecordingNotifier};

    const T0: i64 = 1_723_000_000_000;

    #[test]
    fn routes_round_trip_and_fall_back_home() {
        for route in [
            Route::Home,
            Route::Blogs,
            Route::NewBlog,
            Route::Post(PostId::new(3)),
            Route::EditPost(PostId::new(T0)),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::parse("/blog/abc"), Route::Home);
        assert_eq!(Route::parse("/nowhere"), Route::Home);
        assert_eq!(Route::Post(PostId::new(1)).to_string(), "/blog/1");
    }

    #[test]
    fn toast_expires_after_its_ttl() {
        let toast = Toast::info("Blog deleted", DELETE_UNDO_TTL);
        let later = Instant::now() + DELETE_UNDO_TTL + Duration::from_millis(1);
        assert!(!toast.is_expired_at(Instant::now()));
        assert!(toast.is_expired_at(later));
    }

    #[test]
    fn list_numbers_cards_from_one() {
        let blog = Blog::new(MemoryStore::new());
        let view = BlogListView::mount(&blog);
        let cards = view.cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].number, 1);
        assert_eq!(cards[3].number, 4);
        assert_eq!(cards[0].hero_image, "https://picsum.photos/seed/blog-1/800/520");
    }

    #[test]
    fn list_delete_needs_confirmation_and_offers_undo() {
        let mut blog = Blog::new(MemoryStore::new());
        let mut view = BlogListView::mount(&blog);
        let mut notifier = RecordingNotifier::default();

        assert!(!view.delete(&mut blog, PostId::new(2), &mut Answer(false), &mut notifier));
        assert_eq!(view.posts.len(), 4);

        assert!(view.delete(&mut blog, PostId::new(2), &mut Answer(true), &mut notifier));
        assert_eq!(view.posts.len(), 3);
        assert_eq!(notifier.shown, vec!["Blog deleted"]);
        assert_eq!(view.pending_undo(), Some(PostId::new(2)));

        assert!(view.undo(&mut blog));
        assert_eq!(view.posts.len(), 4);
        assert_eq!(view.pending_undo(), None);
        assert!(!view.undo(&mut blog));
    }

    #[test]
    fn expired_toast_no_longer_offers_undo() {
        let mut blog = Blog::new(MemoryStore::new());
        let mut view = BlogListView::mount(&blog);
        view.delete(&mut blog, PostId::new(1), &mut Answer(true), &mut RecordingNotifier::default());
        if let Some(toast) = view.toast.as_mut() {
            toast.ttl = Duration::ZERO;
        }
        assert_eq!(view.pending_undo(), None);
        assert!(!view.undo(&mut blog));
        assert!(blog.find_post(PostId::new(1)).is_none());
    }

    #[test]
    fn detail_view_comments_and_delete() {
        let clock = FixedClock::at(T0);
        let mut blog = Blog::with_clock(MemoryStore::new(), &clock);
        let mut view = BlogPostView::mount(&blog, PostId::new(4));
        let mut notifier = RecordingNotifier::default();
        let mut navigator = RecordingNavigator::default();

        assert!(view.page().unwrap().comments.is_empty());
        assert_eq!(
            view.page().unwrap().document_title(),
            "Monitoring Basics: Prometheus + Grafana — Blogs"
        );

        assert!(view.submit_comment(&mut blog, "   ", &mut notifier).is_err());
        view.submit_comment(&mut blog, "nice post", &mut notifier).unwrap();
        assert_eq!(view.page().unwrap().comments.len(), 1);
        assert_eq!(
            notifier.shown,
            vec!["Please write something before posting.", "Comment posted!"]
        );

        // a fresh mount reads the same thread back from storage
        let remounted = BlogPostView::mount(&blog, PostId::new(4));
        assert_eq!(remounted.page().unwrap().comments[0].text, "nice post");

        assert!(view.delete(&mut blog, &mut Answer(true), &mut notifier, &mut navigator));
        assert_eq!(navigator.visited, vec![Route::Blogs]);
        assert!(matches!(BlogPostView::mount(&blog, PostId::new(4)), BlogPostView::NotFound(_)));
        assert!(blog.comments(PostId::new(4)).is_empty());
    }

    #[test]
    fn commenting_on_a_missing_post_reports_not_found() {
        let mut blog = Blog::new(MemoryStore::new());
        let mut view = BlogPostView::mount(&blog, PostId::new(99));
        let mut notifier = RecordingNotifier::default();

        let err = view.submit_comment(&mut blog, "hello?", &mut notifier).unwrap_err();
        assert!(matches!(err, BlogError::NotFound { id } if id == PostId::new(99)));
        assert!(notifier.shown.is_empty());
        assert!(blog.comments(PostId::new(99)).is_empty());
    }

    #[test]
    fn publish_navigates_to_the_new_post() {
        let clock = FixedClock::at(T0);
        let mut blog = Blog::with_clock(MemoryStore::new(), &clock);
        let mut view = NewBlogView::new();
        let mut navigator = RecordingNavigator::default();
        let mut notifier = RecordingNotifier::default();

        assert!(view.publish(&mut blog, &mut notifier, &mut navigator).is_err());
        assert!(navigator.visited.is_empty());

        view.form.title = "Hello".into();
        view.form.excerpt = "World".into();
        let post = view.publish(&mut blog, &mut notifier, &mut navigator).unwrap();
        assert_eq!(navigator.visited, vec![Route::Post(post.id)]);
        assert_eq!(BlogListView::mount(&blog).posts[0].id, post.id);
    }

    #[test]
    fn edit_view_prefills_and_forks_demo_posts() {
        let mut blog = Blog::new(MemoryStore::new());
        let mut view = EditBlogView::mount(&blog, PostId::new(1)).unwrap();
        assert!(!view.is_local);
        assert_eq!(view.form.tags, "docker, containers, devops");
        assert_eq!(view.author, "Aditya Belsare");

        view.form.title = "Dockerizing, revisited".into();
        let mut navigator = RecordingNavigator::default();
        view.save(&mut blog, &mut navigator).unwrap();
        assert_eq!(navigator.visited, vec![Route::Post(PostId::new(1))]);

        let again = EditBlogView::mount(&blog, PostId::new(1)).unwrap();
        assert!(again.is_local);
        assert_eq!(again.form.title, "Dockerizing, revisited");

        blog.delete_post(PostId::new(1));
        assert!(EditBlogView::mount(&blog, PostId::new(1)).is_none());
    }
}
