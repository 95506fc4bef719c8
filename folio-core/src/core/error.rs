use thiserror::Error;

use crate::core::models::PostId;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("`{field}` must not be empty")]
    Validation { field: &'static str },
    #[error("post {id} not found")]
    NotFound { id: PostId },
}

impl BlogError {
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    pub fn not_found(id: PostId) -> Self {
        Self::NotFound { id }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), BlogError> {
    if value.trim().is_empty() {
        Err(BlogError::validation(field))
    } else {
        Ok(())
    }
}
