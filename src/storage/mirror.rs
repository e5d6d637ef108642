//! On-disk mirror of a crawled domain
//!
//! Layout, rooted at a directory named after the domain of record:
//!
//! ```text
//! <domain>/
//!     index.csv    original_url,stored_file_path  (no header, visit order)
//!     files/       one flat file per visited URL
//! ```
//!
//! Mapping URL paths onto directory paths breaks down as soon as a site has
//! both `/home` and `/home/a.html`, so files are kept flat and the index
//! records where each URL went.

use crate::storage::escape::escape_filename;
use crate::storage::{StorageError, StorageResult};
use crate::url::CrawlUrl;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Name of the index file inside the mirror directory
pub const INDEX_FILE_NAME: &str = "index.csv";

/// Name of the directory holding stored files
pub const FILES_DIR_NAME: &str = "files";

/// Writes fetched pages and their index rows for one crawl
pub struct MirrorStorage {
    base_dir: PathBuf,
    files_dir: PathBuf,
    index_path: PathBuf,

    /// `None` once closed
    index: Option<csv::Writer<File>>,

    /// Filenames handed out so far, mapped to the URL that owns each one
    claimed: HashMap<String, String>,
}

impl MirrorStorage {
    /// Creates the mirror directories and opens a fresh index
    ///
    /// # Arguments
    ///
    /// * `root_dir` - Parent directory for the mirror. `None` places the
    ///   `<domain>/` directory relative to the working directory.
    /// * `domain` - The domain of record; names the mirror directory
    ///
    /// Existing directories are reused. An existing index is truncated.
    pub fn new(root_dir: Option<&Path>, domain: &str) -> StorageResult<Self> {
        let base_dir = match root_dir {
            Some(root) => root.join(domain),
            None => PathBuf::from(domain),
        };
        let files_dir = base_dir.join(FILES_DIR_NAME);
        let index_path = base_dir.join(INDEX_FILE_NAME);

        fs::create_dir_all(&files_dir).map_err(|source| StorageError::CreateDir {
            path: files_dir.clone(),
            source,
        })?;

        let file = File::create(&index_path).map_err(|source| StorageError::OpenIndex {
            path: index_path.clone(),
            source,
        })?;
        let index = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        tracing::debug!("Mirror directory ready at {}", base_dir.display());

        Ok(Self {
            base_dir,
            files_dir,
            index_path,
            index: Some(index),
            claimed: HashMap::new(),
        })
    }

    /// The `<domain>/` directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The flat directory holding stored files
    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// Path of `index.csv`
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Returns the file a URL is (or would be) stored at
    ///
    /// The name is the escaped URL unless that name already belongs to a
    /// different URL in this crawl, in which case `~N` is appended with the
    /// smallest free N. Does not claim the name.
    pub fn path_for(&self, url: &CrawlUrl) -> PathBuf {
        self.files_dir.join(self.filename_for(url))
    }

    fn filename_for(&self, url: &CrawlUrl) -> String {
        let escaped = escape_filename(url.url());
        let is_free = |name: &str| match self.claimed.get(name) {
            Some(owner) => owner == url.url(),
            None => true,
        };

        if is_free(&escaped) {
            return escaped;
        }

        (1u64..)
            .map(|n| format!("{}~{}", escaped, n))
            .find(|candidate| is_free(candidate))
            .unwrap_or(escaped)
    }

    /// Stores a fetched page
    ///
    /// Appends the `(url, path)` row to the index and flushes it, then writes
    /// `content` to the page's file, replacing anything already there.
    ///
    /// The row goes out before the bytes. If the file write fails, the row
    /// stays in the index and names a file that does not exist.
    ///
    /// # Errors
    ///
    /// * `StorageError::Index` - the index row could not be written
    /// * `StorageError::WriteFile` - the page file could not be written. The
    ///   index row has already been recorded at that point.
    /// * `StorageError::Closed` - `close()` was already called
    pub fn save(&mut self, url: &CrawlUrl, content: &[u8]) -> StorageResult<PathBuf> {
        let filename = self.filename_for(url);
        let path = self.files_dir.join(&filename);

        let index = self.index.as_mut().ok_or(StorageError::Closed)?;
        let path_str = path.to_string_lossy();
        index.write_record([url.url(), &*path_str])?;
        index.flush().map_err(csv::Error::from)?;

        self.claimed.insert(filename, url.url().to_string());

        fs::write(&path, content).map_err(|source| StorageError::WriteFile {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Flushes buffered index rows
    pub fn flush(&mut self) -> StorageResult<()> {
        if let Some(index) = self.index.as_mut() {
            index.flush().map_err(csv::Error::from)?;
        }
        Ok(())
    }

    /// Flushes and releases the index file handle
    ///
    /// Calling `close` more than once is harmless.
    pub fn close(&mut self) -> StorageResult<()> {
        if let Some(mut index) = self.index.take() {
            index.flush().map_err(csv::Error::from)?;
        }
        Ok(())
    }

    /// Returns true once `close()` has been called
    pub fn is_closed(&self) -> bool {
        self.index.is_none()
    }

    /// Number of pages stored so far
    pub fn stored_count(&self) -> usize {
        self.claimed.len()
    }
}
