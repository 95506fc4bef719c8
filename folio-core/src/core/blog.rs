use log::{error, info};

use crate::core::catalog::demo_posts;
use crate::core::database::{
    load_comments, load_local_posts, load_tombstones, remove_comments, save_comments,
    save_local_posts, save_tombstones, Tombstones,
};
use crate::core::error::{ensure_non_empty, BlogError};
use crate::core::merge::{compute_visible_posts, find_visible_post};
use crate::core::models::{non_empty, Author, Comment, Post, PostForm, PostId};
use crate::core::storage::{Config, KeyValueStore, DEFAULT_AUTHOR};
use crate::services::Clock;
use crate::DefaultServiceProvider;

/// Blog operations over a key-value store.
///
/// Nothing is cached: every read goes back to storage, so two instances over
/// the same store (or the same directory) always agree after a write.
pub struct Blog<S: KeyValueStore, C: Clock = DefaultServiceProvider> {
    store: S,
    clock: C,
    default_author: String,
    last_issued_id: i64,
}

impl<S: KeyValueStore> Blog<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, DefaultServiceProvider)
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        let mut blog = Self::new(store);
        blog.default_author = config.default_author.clone();
        blog
    }
}

impl<S: KeyValueStore, C: Clock> Blog<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            default_author: DEFAULT_AUTHOR.to_string(),
            last_issued_id: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn default_author(&self) -> &str {
        &self.default_author
    }

    pub fn visible_posts(&self) -> Vec<Post> {
        let overlay = load_local_posts(&self.store);
        let tombstones = load_tombstones(&self.store);
        compute_visible_posts(&demo_posts(), &overlay, &tombstones)
    }

    pub fn find_post(&self, id: PostId) -> Option<Post> {
        let overlay = load_local_posts(&self.store);
        let tombstones = load_tombstones(&self.store);
        find_visible_post(&demo_posts(), &overlay, &tombstones, id)
    }

    /// Whether the overlay currently holds a record for this id.
    pub fn is_in_overlay(&self, id: PostId) -> bool {
        load_local_posts(&self.store).iter().any(|post| post.id == id)
    }

    pub fn tombstones(&self) -> Tombstones {
        load_tombstones(&self.store)
    }

    pub fn comments(&self, id: PostId) -> Vec<Comment> {
        load_comments(&self.store, id)
    }

    pub fn create_post(&mut self, form: &PostForm) -> Result<Post, BlogError> {
        ensure_non_empty(&form.title, "title")?;
        ensure_non_empty(&form.excerpt, "excerpt")?;

        let mut overlay = load_local_posts(&self.store);
        let id = self.allocate_id(&overlay);
        let post = Post {
            id,
            title: form.title.trim().to_string(),
            category: form.category.trim().to_string(),
            date: self.clock.now().date_naive(),
            excerpt: form.excerpt.trim().to_string(),
            content: form.content.clone(),
            tags: form.parsed_tags(),
            author: Author::named(self.default_author.clone()),
            hero_image: non_empty(&form.hero_image),
            code_url: non_empty(&form.code_url),
            live_url: non_empty(&form.live_url),
            is_local: true,
        };

        overlay.insert(0, post.clone());
        if let Err(e) = save_local_posts(&self.store, &overlay) {
            error!("create_post: post {} was not persisted: {}", id, e);
        }
        info!("create_post: Created post {} ({:?})", id, post.title);
        Ok(post)
    }

    /// Saves the form over the visible record. A demo post is forked into the
    /// overlay under its own id and shadows the original from then on.
    pub fn edit_post(&mut self, id: PostId, form: &PostForm) -> Result<Post, BlogError> {
        ensure_non_empty(&form.title, "title")?;

        let mut overlay = load_local_posts(&self.store);
        let tombstones = load_tombstones(&self.store);
        let current = find_visible_post(&demo_posts(), &overlay, &tombstones, id)
            .ok_or_else(|| BlogError::not_found(id))?;

        let post = Post {
            id,
            title: form.title.clone(),
            category: form.category.clone(),
            date: current.date,
            excerpt: form.excerpt.clone(),
            content: form.content.clone(),
            tags: form.parsed_tags(),
            author: current.author,
            hero_image: non_empty(&form.hero_image),
            code_url: non_empty(&form.code_url),
            live_url: non_empty(&form.live_url),
            is_local: true,
        };

        match overlay.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = post.clone(),
            None => overlay.insert(0, post.clone()),
        }
        if let Err(e) = save_local_posts(&self.store, &overlay) {
            error!("edit_post: edit of post {} was not persisted: {}", id, e);
        }
        info!("edit_post: Saved post {}", id);
        Ok(post)
    }

    /// Drops the overlay record, tombstones the id and clears its comments.
    /// Running it again changes nothing.
    pub fn delete_post(&mut self, id: PostId) {
        let overlay = load_local_posts(&self.store);
        let remaining: Vec<Post> = overlay.iter().filter(|post| post.id != id).cloned().collect();
        if remaining.len() != overlay.len() {
            if let Err(e) = save_local_posts(&self.store, &remaining) {
                error!("delete_post: Failed to update local posts: {}", e);
            }
        }

        let mut tombstones = load_tombstones(&self.store);
        let inserted = tombstones.insert(id);
        if inserted || tombstones.needs_rewrite() {
            if let Err(e) = save_tombstones(&self.store, &tombstones) {
                error!("delete_post: Failed to record deletion of {}: {}", id, e);
            }
        }

        if let Err(e) = remove_comments(&self.store, id) {
            error!("delete_post: Comments of {} were left behind: {}", id, e);
        }
        info!(
            "delete_post: Deleted post {} (overlay entries removed: {})",
            id,
            overlay.len() - remaining.len()
        );
    }

    /// Lifts the tombstone. Comments and overlay edits erased by the delete
    /// stay gone, so only a demo record can come back. Returns whether the id
    /// is visible afterwards.
    pub fn undo_delete(&mut self, id: PostId) -> bool {
        let mut tombstones = load_tombstones(&self.store);
        if tombstones.remove(id) || tombstones.needs_rewrite() {
            if let Err(e) = save_tombstones(&self.store, &tombstones) {
                error!("undo_delete: Failed to restore {}: {}", id, e);
            }
        }
        let restored = self.find_post(id).is_some();
        info!("undo_delete: Undid delete of {} (visible again: {})", id, restored);
        restored
    }

    pub fn post_comment(&mut self, post_id: PostId, text: &str) -> Result<Comment, BlogError> {
        let text = text.trim();
        ensure_non_empty(text, "comment")?;

        let mut comments = load_comments(&self.store, post_id);
        let now = self.clock.now();
        let last = comments.iter().map(|comment| comment.id).max().unwrap_or(i64::MIN);
        let comment = Comment {
            id: now.timestamp_millis().max(last.saturating_add(1)),
            text: text.to_string(),
            date: now,
        };

        comments.push(comment.clone());
        if let Err(e) = save_comments(&self.store, post_id, &comments) {
            error!("post_comment: Comment on {} was not persisted: {}", post_id, e);
        }
        info!("post_comment: Post {} now has {} comments", post_id, comments.len());
        Ok(comment)
    }

    /// Clears every stored collection, leaving only the demo posts.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear() {
            error!("reset: Failed to clear storage: {}", e);
        }
        info!("reset: Cleared local blog state");
    }

    /// Timestamp in ms, bumped past anything this instance issued and any id
    /// already in the overlay.
    fn allocate_id(&mut self, overlay: &[Post]) -> PostId {
        let mut candidate = self
            .clock
            .now()
            .timestamp_millis()
            .max(self.last_issued_id.saturating_add(1));
        while overlay.iter().any(|post| post.id.get() == candidate) {
            candidate += 1;
        }
        self.last_issued_id = candidate;
        PostId::new(candidate)
    }
}
