//! Directory-backed file store.

use std::path::PathBuf;

use bytes::Bytes;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;

use crate::filename;

/// One stored file as seen by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileEntry {
    /// Stored name, unique within the storage root.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Local filesystem store wrapping a single directory.
///
/// All operations go straight to disk; there is no caching layer. Stored
/// names are produced by [`filename::unique_name`], and every lookup is
/// validated to stay inside the root.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Root directory for all stored files.
    root: PathBuf,
    /// Maximum accepted upload size in bytes.
    max_upload_size_bytes: u64,
}

impl LocalStore {
    /// Create a new store rooted at the given directory, creating it if
    /// necessary.
    pub async fn new(root_dir: &str, max_upload_size_bytes: u64) -> AppResult<Self> {
        let root = PathBuf::from(root_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            max_upload_size_bytes,
        })
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    /// Resolve a stored name to its path inside the root.
    ///
    /// Rejects anything that is not a plain file name. Stored names we
    /// issued always pass; this guards direct user input on download and
    /// delete routes.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(AppError::validation(format!("Invalid file name: {name:?}")));
        }
        Ok(self.root.join(name))
    }

    /// Write uploaded bytes under a fresh unique name; never overwrites.
    ///
    /// Returns the stored name. Uploads beyond the configured maximum are
    /// rejected before anything touches disk.
    pub async fn save(&self, data: Bytes, requested_name: &str) -> AppResult<String> {
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::payload_too_large(format!(
                "File too large. Max size is {} MB",
                self.max_upload_size_bytes / (1024 * 1024)
            )));
        }

        let stored_name = filename::unique_name(requested_name)?;
        let path = self.resolve(&stored_name)?;

        // The random suffix makes a collision cryptographically improbable;
        // this check turns the residual case into an error instead of an
        // overwrite.
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AppError::conflict(format!(
                "Stored name already taken: {stored_name}"
            )));
        }

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {stored_name}"),
                e,
            )
        })?;

        debug!(name = %stored_name, bytes = data.len(), "Stored uploaded file");
        Ok(stored_name)
    }

    /// Whether a stored file currently exists.
    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Open a stored file for streaming download.
    pub async fn open(&self, name: &str) -> AppResult<ReaderStream<fs::File>> {
        let path = self.resolve(name)?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {name}"), e)
            }
        })?;
        Ok(ReaderStream::new(file))
    }

    /// Read a stored file fully into memory.
    pub async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let path = self.resolve(name)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read file: {name}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Permanently remove a stored file. There is no trash or undo.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.resolve(name)?;
        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {name}"),
                    e,
                )
            }
        })?;

        debug!(name, "Deleted stored file");
        Ok(())
    }

    /// Enumerate stored files, recomputed from the directory on each call.
    ///
    /// Sorted by name for display stability; callers must not depend on
    /// any particular order.
    pub async fn list(&self) -> AppResult<Vec<FileEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list storage root: {}", self.root.display()),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;
            if !meta.is_file() {
                continue;
            }
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                size_bytes: meta.len(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
