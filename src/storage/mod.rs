//! Storage module for persisting crawled pages
//!
//! This module handles everything the crawler writes to disk:
//! - Creating the `<domain>/` and `<domain>/files/` directories
//! - Escaping URLs into flat, collision-free filenames
//! - Appending `(url, path)` rows to `index.csv`

mod escape;
mod mirror;

pub use escape::{escape_filename, ESCAPE_CHAR};
pub use mirror::{MirrorStorage, FILES_DIR_NAME, INDEX_FILE_NAME};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open index {path}: {source}")]
    OpenIndex {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write index row: {0}")]
    Index(#[from] csv::Error),

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage is closed")]
    Closed,
}

impl StorageError {
    /// Returns true if the error only affects a single page
    ///
    /// A page whose file cannot be written is lost, but the rest of the mirror
    /// is still consistent. Every other storage error leaves the index unable
    /// to describe the mirror.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Self::WriteFile { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
