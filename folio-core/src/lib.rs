//! Portfolio content and a small local-first blog.
//!
//! Demo posts ship with the crate; posts the user creates or edits live in a
//! key-value store next to a list of deleted ids, and every view merges the
//! three on demand (see [`compute_visible_posts`]).

pub mod core;
pub mod services;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::app::{
    BlogCard, BlogListView, BlogPostView, EditBlogView, NewBlogView, PostPage, Route, Toast, ToastKind,
};
pub use crate::core::blog::Blog;
pub use crate::core::catalog::{demo_posts, is_demo_post, Section};
pub use crate::core::database::{comments_key, Tombstones, DELETED_POSTS_KEY, LOCAL_POSTS_KEY};
pub use crate::core::error::{BlogError, StorageError};
pub use crate::core::merge::{compute_visible_posts, find_visible_post};
pub use crate::core::models::{parse_tags, Author, Comment, Post, PostForm, PostId};
pub use crate::core::storage::{Config, FileStore, KeyValueStore, MemoryStore};
pub use crate::services::{
    Clock, Confirm, DefaultServiceProvider, FileSystemService, MarkdownRenderer, Navigator, Notifier,
    ProjectDirectories,
};
