//! Accessibility Checker for the bookmark vault.
//!
//! Re-fetches every stored bookmark, one at a time, and rewrites its row with
//! the outcome. Successful fetches also contribute page keywords as tags and
//! fill in an empty description.

use chrono::{Local, NaiveDate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::managers::table_sync::{
    count_bookmarks, format_cell, header_line, is_header_line, is_separator_line,
    parse_bookmark_row, separator_line, TableRow,
};
use crate::services::page_fetcher::PageFetcher;
use crate::types::bookmark::{LinkStatus, PageMeta};
use crate::types::errors::CheckError;
use crate::types::report::{CheckFailure, CheckReport};
use crate::types::settings::PluginSettings;
use crate::vault::{list_markdown_files, VaultTrait};

/// Row rewrite after a successful fetch: tags are the union of stored and
/// fetched tags, the stored description wins unless empty.
pub fn mark_accessible(row: &TableRow, meta: &PageMeta, today: &str) -> TableRow {
    let mut tags: Vec<String> = row.tags().into_iter().map(str::to_string).collect();
    for tag in &meta.tags {
        let tag = format_cell(tag);
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let mut updated = row.clone();
    updated.cells[TableRow::TAGS] = tags.join(" ");
    if updated.cells[TableRow::DESCRIPTION].is_empty() {
        updated.cells[TableRow::DESCRIPTION] = format_cell(&meta.description);
    }
    updated.cells[TableRow::LAST_CHECK] = today.to_string();
    updated.cells[TableRow::STATUS] = LinkStatus::Accessible.as_cell().to_string();
    updated
}

/// Row rewrite after a failed fetch: only Last Check and Status change.
pub fn mark_inaccessible(row: &TableRow, today: &str) -> TableRow {
    let mut updated = row.clone();
    updated.cells[TableRow::LAST_CHECK] = today.to_string();
    updated.cells[TableRow::STATUS] = LinkStatus::Inaccessible.as_cell().to_string();
    updated
}

/// Sequential accessibility pass over the documents in the output folder.
pub struct AccessibilityChecker<'a, V: VaultTrait, F: PageFetcher> {
    vault: &'a V,
    fetcher: &'a F,
    settings: &'a PluginSettings,
    today: NaiveDate,
}

impl<'a, V: VaultTrait, F: PageFetcher> AccessibilityChecker<'a, V, F> {
    pub fn new(vault: &'a V, fetcher: &'a F, settings: &'a PluginSettings) -> Self {
        Self {
            vault,
            fetcher,
            settings,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date written to the Last Check column.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Runs the pass over `selection`, or every Markdown file under the
    /// output folder when `None`.
    ///
    /// Documents are processed in enumeration order and rows top to bottom.
    /// Consecutive fetches are separated by the configured delay, floored at
    /// [`MIN_CHECK_DELAY_MS`](crate::types::settings::MIN_CHECK_DELAY_MS). Cancellation is honored
    /// between rows; rows already checked in the current document are written
    /// before returning, and earlier documents stay written. Fetch failures
    /// never abort the pass; they are collected in the report.
    pub async fn check(
        &self,
        selection: Option<&[String]>,
        cancel: &CancellationToken,
    ) -> Result<CheckReport, CheckError> {
        if !self.settings.check_accessibility {
            return Err(CheckError::Disabled);
        }

        let files = match selection {
            Some(files) => files.to_vec(),
            None => list_markdown_files(self.vault, &self.settings.output_folder_path)?,
        };

        let mut total = 0usize;
        for file in &files {
            total += count_bookmarks(&self.vault.read(file)?);
        }
        if total == 0 {
            return Err(CheckError::NoBookmarks);
        }
        info!(bookmarks = total, files = files.len(), "starting accessibility check");

        let today = self.today.format("%Y-%m-%d").to_string();
        let delay = self.settings.check_delay();
        let mut report = CheckReport::default();

        for file in &files {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let content = self.vault.read(file)?;
            let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

            let mut i = 0;
            while i < lines.len() {
                if is_header_line(&lines[i]) {
                    lines[i] = header_line();
                    if lines.get(i + 1).map(|l| is_separator_line(l)).unwrap_or(false) {
                        lines[i + 1] = separator_line();
                        i += 1;
                    }
                    i += 1;
                    continue;
                }

                let Some(row) = parse_bookmark_row(&lines[i]) else {
                    i += 1;
                    continue;
                };
                if report.checked() > 0 && !cancel.is_cancelled() {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = cancel.cancelled() => {}
                    }
                }
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    break;
                }

                let url = row.url().unwrap_or_default();
                let updated = match self.fetcher.fetch_meta(&url).await {
                    Ok(meta) => {
                        debug!(url = %url, title = %meta.title, "bookmark accessible");
                        report.accessible += 1;
                        mark_accessible(&row, &meta, &today)
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "bookmark inaccessible");
                        report.inaccessible += 1;
                        report.errors.push(CheckFailure {
                            url: url.clone(),
                            error: e.to_string(),
                        });
                        mark_inaccessible(&row, &today)
                    }
                };
                lines[i] = updated.to_line();
                i += 1;
            }

            let updated = lines.join("\n");
            if updated != content {
                self.vault.write(file, &updated)?;
                report.files_rewritten.push(file.clone());
            }
            if report.cancelled {
                break;
            }
        }

        for failure in &report.errors {
            debug!(url = %failure.url, error = %failure.error, "check failure");
        }
        if report.cancelled {
            warn!(checked = report.checked(), "accessibility check cancelled");
        } else {
            info!(
                accessible = report.accessible,
                inaccessible = report.inaccessible,
                "accessibility check complete"
            );
        }
        Ok(report)
    }
}
