//! # sharebox-storage
//!
//! Filesystem storage for Sharebox: a directory-backed store for uploaded
//! files and the collision-resistant filename derivation used on upload.

pub mod filename;
pub mod local;

pub use local::{FileEntry, LocalStore};
