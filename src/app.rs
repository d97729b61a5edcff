//! App Core for Bookmark Vault.
//!
//! Central struct holding the vault, the settings engine and the page fetcher.
//! Managers borrow these with a lifetime and are created on demand per command.

use std::error::Error;

use tokio_util::sync::CancellationToken;

use crate::managers::accessibility_checker::AccessibilityChecker;
use crate::managers::cleanup_manager::{CleanupManager, CleanupManagerTrait};
use crate::managers::import_manager::{ImportManager, ImportManagerTrait};
use crate::managers::table_sync::count_bookmarks;
use crate::services::page_fetcher::HttpFetcher;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{CheckError, CleanupError, ImportError, VaultError};
use crate::types::report::{CheckReport, CleanupReport, ImportSummary};
use crate::vault::{list_markdown_files, FsVault, VaultTrait};

/// Central application struct.
pub struct App {
    pub vault: FsVault,
    pub settings_engine: SettingsEngine,
    pub fetcher: HttpFetcher,
}

impl App {
    /// Opens the vault at `vault_root` and loads settings from `settings_path`,
    /// or from the platform config directory when `None`.
    pub fn new(vault_root: &str, settings_path: Option<String>) -> Result<Self, Box<dyn Error>> {
        let vault = FsVault::open(vault_root)?;

        let mut settings_engine = SettingsEngine::new(settings_path);
        settings_engine.load()?;

        let fetcher = HttpFetcher::new()?;

        Ok(Self {
            vault,
            settings_engine,
            fetcher,
        })
    }

    pub fn import_html(&self, html: &str) -> Result<ImportSummary, ImportError> {
        ImportManager::new(&self.vault, self.settings_engine.get_settings()).import_html(html)
    }

    pub fn cleanup(
        &self,
        selection: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Result<CleanupReport, CleanupError> {
        CleanupManager::new(&self.vault, self.settings_engine.get_settings())
            .cleanup(selection, cancel)
    }

    pub async fn check(
        &self,
        selection: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Result<CheckReport, CheckError> {
        AccessibilityChecker::new(&self.vault, &self.fetcher, self.settings_engine.get_settings())
            .check(selection, cancel)
            .await
    }

    /// Markdown documents in the output folder with their bookmark counts.
    pub fn bookmark_counts(&self) -> Result<Vec<(String, usize)>, VaultError> {
        let folder = &self.settings_engine.get_settings().output_folder_path;
        list_markdown_files(&self.vault, folder)?
            .into_iter()
            .map(|path| -> Result<(String, usize), VaultError> {
                let count = count_bookmarks(&self.vault.read(&path)?);
                Ok((path, count))
            })
            .collect()
    }
}
