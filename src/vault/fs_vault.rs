//! On-disk vault rooted at a directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{normalize_path, VaultTrait};
use crate::types::errors::VaultError;

/// Vault backed by a directory tree on the local file system.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Opens the vault rooted at `root`, creating the directory if it is missing.
    ///
    /// # Errors
    /// Returns `VaultError::Io` if the root directory cannot be created.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, VaultError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            VaultError::Io(format!("Failed to create vault root {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    /// Returns the directory this vault is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in normalize_path(path).split('/').filter(|s| !s.is_empty()) {
            full.push(segment);
        }
        full
    }

    fn collect_files(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), VaultError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| VaultError::Io(format!("Failed to list {}: {}", dir.display(), e)))?;
        for entry in entries {
            let entry = entry.map_err(|e| VaultError::Io(e.to_string()))?;
            let path = entry.path();
            if path.is_dir() {
                self.collect_files(&path, out)?;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                let segments: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                out.push(segments.join("/"));
            }
        }
        Ok(())
    }
}

impl VaultTrait for FsVault {
    fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(VaultError::NotFound(normalize_path(path)));
        }
        fs::read_to_string(&full)
            .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", full.display(), e)))
    }

    fn write(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&full, content)
            .map_err(|e| VaultError::Io(format!("Failed to write {}: {}", full.display(), e)))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn list_files(&self) -> Result<Vec<String>, VaultError> {
        let mut files = Vec::new();
        self.collect_files(&self.root, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn create_folder(&self, path: &str) -> Result<(), VaultError> {
        let full = self.resolve(path);
        fs::create_dir_all(&full)
            .map_err(|e| VaultError::Io(format!("Failed to create {}: {}", full.display(), e)))
    }
}
