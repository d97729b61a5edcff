//! In-memory vault, discarded when dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use super::{normalize_path, VaultTrait};
use crate::types::errors::VaultError;

/// Vault holding files in a sorted map. Useful for testing.
#[derive(Default)]
pub struct MemoryVault {
    files: Mutex<BTreeMap<String, String>>,
    folders: Mutex<BTreeSet<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VaultTrait for MemoryVault {
    fn read(&self, path: &str) -> Result<String, VaultError> {
        let path = normalize_path(path);
        let files = self
            .files
            .lock()
            .map_err(|_| VaultError::Io("vault lock poisoned".to_string()))?;
        files.get(&path).cloned().ok_or(VaultError::NotFound(path))
    }

    fn write(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| VaultError::Io("vault lock poisoned".to_string()))?;
        files.insert(normalize_path(path), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let in_files = self
            .files
            .lock()
            .map(|f| f.contains_key(&path))
            .unwrap_or(false);
        in_files
            || self
                .folders
                .lock()
                .map(|f| f.contains(&path))
                .unwrap_or(false)
    }

    fn list_files(&self) -> Result<Vec<String>, VaultError> {
        let files = self
            .files
            .lock()
            .map_err(|_| VaultError::Io("vault lock poisoned".to_string()))?;
        Ok(files.keys().cloned().collect())
    }

    fn create_folder(&self, path: &str) -> Result<(), VaultError> {
        let mut folders = self
            .folders
            .lock()
            .map_err(|_| VaultError::Io("vault lock poisoned".to_string()))?;
        folders.insert(normalize_path(path));
        Ok(())
    }
}
