//! Import Manager for the bookmark vault.
//!
//! Runs the import workflow: extract links from a bookmarks export, classify
//! and tag them, deduplicate, then append the bookmarks that are not yet
//! stored to their category documents.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::managers::table_sync::TableSync;
use crate::services::categorizer::categorize;
use crate::services::deduplicator::deduplicate;
use crate::services::link_extractor::extract_links;
use crate::services::tag_extractor::extract_tags;
use crate::types::bookmark::{BookmarkRecord, RawLink};
use crate::types::errors::ImportError;
use crate::types::report::ImportSummary;
use crate::types::settings::PluginSettings;
use crate::vault::VaultTrait;

/// Trait defining the import workflow.
pub trait ImportManagerTrait {
    fn import_html(&self, html: &str) -> Result<ImportSummary, ImportError>;
}

/// Import workflow over a vault.
pub struct ImportManager<'a, V: VaultTrait> {
    vault: &'a V,
    settings: &'a PluginSettings,
}

impl<'a, V: VaultTrait> ImportManager<'a, V> {
    pub fn new(vault: &'a V, settings: &'a PluginSettings) -> Self {
        Self { vault, settings }
    }
}

/// Classifies and tags extracted links.
pub fn build_records(links: Vec<RawLink>) -> Vec<BookmarkRecord> {
    links
        .into_iter()
        .map(|link| {
            let classification = categorize(&link.title, &link.url);
            let mut record = BookmarkRecord::new(&link.title, &link.url);
            record.tags = extract_tags(&record.title, &record.url);
            record.add_date = link.add_date;
            record.last_modified = link.last_modified;
            record.description = link.description;
            record.category = classification.category;
            record.subcategory = classification.subcategory;
            record
        })
        .collect()
}

/// Groups records by category, then by section name, both sorted by name.
pub fn group_by_section(
    records: Vec<BookmarkRecord>,
) -> BTreeMap<String, BTreeMap<String, Vec<BookmarkRecord>>> {
    let mut groups: BTreeMap<String, BTreeMap<String, Vec<BookmarkRecord>>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.category.clone())
            .or_default()
            .entry(record.section_name().to_string())
            .or_default()
            .push(record);
    }
    groups
}

impl<'a, V: VaultTrait> ImportManagerTrait for ImportManager<'a, V> {
    /// Imports a bookmarks export.
    ///
    /// Only bookmarks whose URL is absent from their target section are
    /// appended, sorted by title. Running the same import twice adds nothing
    /// the second time.
    fn import_html(&self, html: &str) -> Result<ImportSummary, ImportError> {
        let links = extract_links(html)?;
        if links.is_empty() {
            return Err(ImportError::NoValidLinks);
        }

        let records = deduplicate(build_records(links));
        let mut summary = ImportSummary {
            processed: records.len(),
            ..ImportSummary::default()
        };

        let sync = TableSync::new(self.vault, &self.settings.output_folder_path);
        for (category, sections) in group_by_section(records) {
            for (section, bookmarks) in sections {
                let existing = sync.existing_urls(&category, &section)?;
                let total = bookmarks.len();
                let mut fresh: Vec<BookmarkRecord> = bookmarks
                    .into_iter()
                    .filter(|b| !existing.contains(&b.url))
                    .collect();
                summary.skipped_existing += total - fresh.len();

                if fresh.is_empty() {
                    debug!(category = %category, section = %section, "nothing new to add");
                    continue;
                }

                fresh.sort_by_cached_key(|b| b.title.to_lowercase());
                let path = sync.append(&category, &section, &fresh)?;
                summary.added += fresh.len();
                if !summary.files_written.contains(&path) {
                    summary.files_written.push(path);
                }
            }
        }

        info!(
            processed = summary.processed,
            added = summary.added,
            skipped = summary.skipped_existing,
            "import completed"
        );
        Ok(summary)
    }
}
