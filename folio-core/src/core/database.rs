use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::error::StorageError;
use crate::core::models::{Comment, Post, PostId};
use crate::core::storage::KeyValueStore;

pub const LOCAL_POSTS_KEY: &str = "my_blogs_v1";
pub const DELETED_POSTS_KEY: &str = "my_blogs_deleted_v1";
pub const COMMENTS_KEY_PREFIX: &str = "comments_";

pub fn comments_key(id: PostId) -> String {
    format!("{}{}", COMMENTS_KEY_PREFIX, id)
}

/// Whether a storage key belongs to the blog. Stores may be shared with
/// other data, so clearing only ever touches these.
pub fn is_blog_key(key: &str) -> bool {
    key == LOCAL_POSTS_KEY || key == DELETED_POSTS_KEY || key.starts_with(COMMENTS_KEY_PREFIX)
}

/// Ids removed from view, kept as strings in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tombstones {
    ids: Vec<String>,
    needs_rewrite: bool,
}

impl Tombstones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts numbers or strings, dropping duplicates and anything else.
    pub fn from_values(values: Vec<Value>) -> Self {
        let mut tombstones = Self::new();
        for value in values {
            let id = match value {
                Value::String(s) => s,
                Value::Number(n) => {
                    tombstones.needs_rewrite = true;
                    n.to_string()
                }
                _ => {
                    tombstones.needs_rewrite = true;
                    continue;
                }
            };
            if tombstones.ids.contains(&id) {
                tombstones.needs_rewrite = true;
            } else {
                tombstones.ids.push(id);
            }
        }
        tombstones
    }

    pub fn contains(&self, id: PostId) -> bool {
        let key = id.to_string();
        self.ids.iter().any(|stored| *stored == key)
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, id: PostId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Returns false if the id was not present.
    pub fn remove(&mut self, id: PostId) -> bool {
        let key = id.to_string();
        let before = self.ids.len();
        self.ids.retain(|stored| *stored != key);
        self.ids.len() != before
    }

    /// True when the stored form differs from the normalized one.
    pub fn needs_rewrite(&self) -> bool {
        self.needs_rewrite
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<I: Into<PostId>> FromIterator<I> for Tombstones {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut tombstones = Self::new();
        for id in iter {
            tombstones.insert(id.into());
        }
        tombstones
    }
}

fn load_collection<S, T>(store: &S, key: &str) -> Vec<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("load_collection: Failed to read {}: {}", key, e);
            return Vec::new();
        }
    };

    let values = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("load_collection: Ignoring malformed {} ({} bytes): {}", key, raw.len(), e);
            return Vec::new();
        }
    };

    // one bad entry must not hide the rest
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("load_collection: Skipping entry {} of {}: {}", index, key, e);
                None
            }
        })
        .collect()
}

fn save_collection<S, T>(store: &S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let content = serde_json::to_string(items)
        .map_err(|e| StorageError::Unavailable(format!("JSON serialize error: {}", e)))?;
    match store.set(key, &content) {
        Ok(()) => {
            info!("save_collection: Wrote {} entries to {}", items.len(), key);
            Ok(())
        }
        Err(e) => {
            error!("save_collection: Failed to write {}: {}", key, e);
            Err(e)
        }
    }
}

pub fn load_local_posts<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Post> {
    load_collection(store, LOCAL_POSTS_KEY)
}

pub fn save_local_posts<S: KeyValueStore + ?Sized>(store: &S, posts: &[Post]) -> Result<(), StorageError> {
    save_collection(store, LOCAL_POSTS_KEY, posts)
}

pub fn load_tombstones<S: KeyValueStore + ?Sized>(store: &S) -> Tombstones {
    Tombstones::from_values(load_collection(store, DELETED_POSTS_KEY))
}

pub fn save_tombstones<S: KeyValueStore + ?Sized>(store: &S, tombstones: &Tombstones) -> Result<(), StorageError> {
    save_collection(store, DELETED_POSTS_KEY, tombstones.ids())
}

pub fn load_comments<S: KeyValueStore + ?Sized>(store: &S, id: PostId) -> Vec<Comment> {
    load_collection(store, &comments_key(id))
}

pub fn save_comments<S: KeyValueStore + ?Sized>(store: &S, id: PostId, comments: &[Comment]) -> Result<(), StorageError> {
    save_collection(store, &comments_key(id), comments)
}

pub fn remove_comments<S: KeyValueStore + ?Sized>(store: &S, id: PostId) -> Result<(), StorageError> {
    let key = comments_key(id);
    store.remove(&key).map_err(|e| {
        error!("remove_comments: Failed to remove {}: {}", key, e);
        e
    })
}
