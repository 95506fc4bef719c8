use anyhow::{Context, Result};
use log::info;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::database::is_blog_key;
use crate::core::error::StorageError;
use crate::{DefaultServiceProvider, FileSystemService};

pub const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";
pub const AUTHOR_ENV: &str = "FOLIO_AUTHOR";
pub const DEFAULT_AUTHOR: &str = "You";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_author: String,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::new_with_service(&DefaultServiceProvider)
    }

    /// `FOLIO_DATA_DIR` wins over the platform data directory.
    pub fn new_with_service<S: FileSystemService>(service: &S) -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => service
                .get_project_dirs()
                .context("Failed to get project directories")?
                .data_dir()
                .clone(),
        };
        Self::with_data_dir(data_dir)
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        #[cfg(not(target_arch = "wasm32"))]
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let default_author = std::env::var(AUTHOR_ENV)
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        info!("Config created with data_dir: {:?}", data_dir);
        Ok(Config {
            data_dir,
            default_author,
        })
    }
}

/// Flat string key-value storage, the shape of a browser's `localStorage`.
///
/// Values are opaque text; the typed layer on top decides the encoding.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    /// Removes the blog's keys and nothing else.
    fn clear(&self) -> Result<(), StorageError>;
}

/// One file per key inside the data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(config: &Config) -> Self {
        Self::at(&config.data_dir)
    }

    pub fn at(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
            let owned = path.file_stem().and_then(|stem| stem.to_str()).map(is_blog_key).unwrap_or(false);
            if is_json && owned {
                fs::remove_file(&path)?;
            }
        }
        info!("FileStore: Cleared blog keys in {}", self.dir.display());
        Ok(())
    }
}

/// In-process store. Clones share the same entries, so a second service built
/// from a clone sees what the first one wrote, like a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().retain(|key, _| !is_blog_key(key));
        Ok(())
    }
}

pub fn sanitize_key(key: &str) -> String {
    let sanitized = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect::<String>();

    // Limit file name length to avoid filesystem issues
    if sanitized.len() > 100 {
        sanitized.chars().take(100).collect()
    } else {
        sanitized
    }
}
