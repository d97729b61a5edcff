//! Cleanup Manager for the bookmark vault.
//!
//! Removes duplicate rows from already written documents. Each section is
//! deduplicated on its own; the same URL may legitimately live in two sections.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::managers::table_sync::{
    count_bookmarks, is_header_line, is_separator_line, parse_bookmark_row, section_heading,
    split_sections, table_header, TableRow,
};
use crate::services::deduplicator::deduplicate;
use crate::types::bookmark::BookmarkRecord;
use crate::types::errors::CleanupError;
use crate::types::report::CleanupReport;
use crate::types::settings::PluginSettings;
use crate::vault::{list_markdown_files, VaultTrait};

/// Result of deduplicating one document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCleanup {
    pub content: String,
    pub rows: usize,
    pub removed: usize,
}

/// Rewrites a document with every section deduplicated.
///
/// Each section becomes its heading, a fresh table header and the surviving
/// rows. Lines in the section that are not bookmark rows (notes, malformed
/// rows) are kept verbatim after the table. The preamble is kept as-is.
pub fn dedup_document(content: &str) -> DocumentCleanup {
    let mut rows = 0usize;
    let mut removed = 0usize;
    let mut parts: Vec<String> = Vec::new();

    for unit in split_sections(content) {
        let Some(heading) = unit.first().and_then(|l| section_heading(l)) else {
            let preamble = unit.join("\n");
            let preamble = preamble.trim_end();
            if !preamble.is_empty() {
                parts.push(preamble.to_string());
            }
            continue;
        };

        let mut records: Vec<BookmarkRecord> = Vec::new();
        let mut extras: Vec<&str> = Vec::new();
        for line in unit.iter().skip(1) {
            if line.trim().is_empty() || is_header_line(line) || is_separator_line(line) {
                continue;
            }
            match parse_bookmark_row(line).and_then(|row| row.to_record()) {
                Some(record) => records.push(record),
                None => extras.push(line),
            }
        }

        let before = records.len();
        let unique = deduplicate(records);
        rows += before;
        removed += before - unique.len();

        let mut section = format!("## {}\n\n{}", heading, table_header());
        for record in &unique {
            section.push_str(&TableRow::from_record(record).to_line());
            section.push('\n');
        }
        if !extras.is_empty() {
            section.push('\n');
            section.push_str(&extras.join("\n"));
            section.push('\n');
        }
        parts.push(section.trim_end().to_string());
    }

    let mut content = parts.join("\n\n");
    content.push('\n');
    DocumentCleanup {
        content,
        rows,
        removed,
    }
}

/// Trait defining the duplicate cleanup pass.
pub trait CleanupManagerTrait {
    fn cleanup(
        &self,
        selection: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Result<CleanupReport, CleanupError>;
}

/// Duplicate cleanup over the documents in the output folder.
pub struct CleanupManager<'a, V: VaultTrait> {
    vault: &'a V,
    settings: &'a PluginSettings,
}

impl<'a, V: VaultTrait> CleanupManager<'a, V> {
    pub fn new(vault: &'a V, settings: &'a PluginSettings) -> Self {
        Self { vault, settings }
    }

    /// Documents to process: the explicit selection, or every Markdown file
    /// under the output folder.
    fn target_files(&self, selection: Option<&[String]>) -> Result<Vec<String>, CleanupError> {
        match selection {
            Some(files) => Ok(files.to_vec()),
            None => Ok(list_markdown_files(
                self.vault,
                &self.settings.output_folder_path,
            )?),
        }
    }
}

impl<'a, V: VaultTrait> CleanupManagerTrait for CleanupManager<'a, V> {
    /// Deduplicates each selected document in enumeration order.
    ///
    /// Cancellation is checked before each document and again before its
    /// write. Documents already rewritten stay rewritten.
    fn cleanup(
        &self,
        selection: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Result<CleanupReport, CleanupError> {
        let files = self.target_files(selection)?;

        let mut total = 0usize;
        for file in &files {
            total += count_bookmarks(&self.vault.read(file)?);
        }
        if total == 0 {
            return Err(CleanupError::NoBookmarks);
        }

        let mut report = CleanupReport::default();
        for file in &files {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let content = self.vault.read(file)?;
            let outcome = dedup_document(&content);
            report.processed += outcome.rows;
            report.duplicates_removed += outcome.removed;

            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            if outcome.content != content {
                self.vault.write(file, &outcome.content)?;
                report.files_rewritten.push(file.clone());
            }
        }

        if report.cancelled {
            warn!(
                processed = report.processed,
                files = report.files_rewritten.len(),
                "duplicate cleanup cancelled"
            );
        } else {
            info!(
                processed = report.processed,
                removed = report.duplicates_removed,
                "duplicate cleanup complete"
            );
        }
        Ok(report)
    }
}
