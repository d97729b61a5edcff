//! Note vault access for the bookmark tables.
//!
//! Paths are vault-relative and `/`-separated, the way the host note
//! application addresses files. [`FsVault`] maps them onto a directory on
//! disk; [`MemoryVault`] keeps everything in memory for tests.
//!
//! # Usage
//!
//! ```no_run
//! use bookmark_vault::vault::{FsVault, VaultTrait};
//!
//! let vault = FsVault::open("/home/me/notes").expect("failed to open vault");
//! let files = vault.list_files().expect("failed to list vault");
//! ```

pub mod fs_vault;
pub mod memory;

pub use fs_vault::FsVault;
pub use memory::MemoryVault;

use crate::types::errors::VaultError;

/// Virtual file system exposed by the host note application.
pub trait VaultTrait {
    fn read(&self, path: &str) -> Result<String, VaultError>;
    /// Creates or fully replaces the file at `path`.
    fn write(&self, path: &str, content: &str) -> Result<(), VaultError>;
    fn exists(&self, path: &str) -> bool;
    /// Every file in the vault, sorted by path.
    fn list_files(&self) -> Result<Vec<String>, VaultError>;
    fn create_folder(&self, path: &str) -> Result<(), VaultError>;
}

/// Normalizes a vault path: backslashes become `/`, empty and `.` segments are
/// dropped, and leading/trailing separators are removed.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins a folder and a file name into a normalized vault path.
pub fn join_path(folder: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", folder, name))
}

/// Markdown documents located under `folder`, in enumeration order.
pub fn list_markdown_files<V: VaultTrait + ?Sized>(
    vault: &V,
    folder: &str,
) -> Result<Vec<String>, VaultError> {
    let folder = normalize_path(folder);
    let prefix = if folder.is_empty() {
        String::new()
    } else {
        format!("{}/", folder)
    };
    Ok(vault
        .list_files()?
        .into_iter()
        .filter(|path| path.starts_with(&prefix) && path.ends_with(".md"))
        .collect())
}
