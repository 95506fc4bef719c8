// Service traits and default implementations for dependency injection
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::core::app::{Route, Toast};

/// Service trait for file system operations
pub trait FileSystemService {
    /// Get project directories for the application
    fn get_project_dirs(&self) -> Result<ProjectDirectories>;
}

/// Source of "now" for ids, comment timestamps and post dates
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Moves the user to another view
pub trait Navigator {
    fn navigate(&mut self, route: &Route);
}

/// Shows a dismissable message for the toast's lifetime
pub trait Notifier {
    fn notify(&mut self, toast: &Toast);
}

/// Blocking yes/no decision
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Turns post content into something displayable
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Project directories abstraction
pub struct ProjectDirectories {
    pub data_dir: PathBuf,
}

impl ProjectDirectories {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

/// Default implementation backed by the platform
pub struct DefaultServiceProvider;

impl FileSystemService for DefaultServiceProvider {
    fn get_project_dirs(&self) -> Result<ProjectDirectories> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(ProjectDirectories::new(PathBuf::from("/tmp/folio")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let dirs = directories::ProjectDirs::from("com", "folio", "folio")
                .ok_or_else(|| anyhow::anyhow!("Failed to get project directories"))?;
            Ok(ProjectDirectories::new(dirs.data_dir().to_path_buf()))
        }
    }
}

impl Clock for DefaultServiceProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hands the markdown through untouched; terminals show the source as-is.
impl MarkdownRenderer for DefaultServiceProvider {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}
