//! Table Synchronizer for the bookmark vault.
//!
//! Owns the Markdown encoding of bookmarks: one document per category
//! (`<Category>.md`), one `## ` section per subcategory, and a fixed 7-column
//! table inside each section. Every write replaces the whole document.
//!
//! ```text
//! # News Bookmarks
//!
//! ## Technology
//!
//! | Title | URL | Tags | Added | Description | Last Check | Status |
//! |------|------|------|------|------|------|------|
//! | Tech Today | [🔗](https://example.com/news/tech) | #example #news | 2021-01-01 |  |  |  |
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::services::link_extractor::is_web_url;
use crate::types::bookmark::{BookmarkRecord, LinkStatus};
use crate::types::errors::VaultError;
use crate::vault::{join_path, VaultTrait};

/// Column titles, in order.
pub const TABLE_COLUMNS: [&str; 7] = [
    "Title",
    "URL",
    "Tags",
    "Added",
    "Description",
    "Last Check",
    "Status",
];

/// Header row of a bookmark table.
pub fn header_line() -> String {
    format!("| {} |", TABLE_COLUMNS.join(" | "))
}

/// Separator row of a bookmark table.
pub fn separator_line() -> String {
    format!("|{}|", vec!["------"; TABLE_COLUMNS.len()].join("|"))
}

/// Header and separator rows, newline-terminated.
pub fn table_header() -> String {
    format!("{}\n{}\n", header_line(), separator_line())
}

/// Escapes `|`, folds newlines into spaces and trims.
pub fn format_cell(content: &str) -> String {
    content
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Reverses the pipe escaping applied by [`format_cell`].
pub fn unescape_cell(cell: &str) -> String {
    cell.replace("\\|", "|")
}

/// The link-icon anchor stored in the URL column. Pipes in the URL are
/// escaped so the row keeps seven cells.
pub fn link_cell(url: &str) -> String {
    format!("[🔗]({})", url.replace('|', "\\|"))
}

/// Extracts the URL from the first link-icon anchor in `text`.
///
/// One level of balanced parentheses is allowed inside the URL, so
/// `https://en.wikipedia.org/wiki/Rust_(programming_language)` survives.
pub fn extract_link(text: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"\[🔗\]\((https?://(?:[^()\s]|\([^()\s]*\))+)\)").expect("link anchor regex")
    });
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape_cell(m.as_str()))
}

/// Reads a URL cell holding exactly one link-icon anchor.
fn anchor_cell_url(cell: &str) -> Option<String> {
    let inner = cell.strip_prefix("[🔗](")?.strip_suffix(')')?;
    let url = unescape_cell(inner);
    if is_web_url(&url) && !url.chars().any(char::is_whitespace) {
        Some(url)
    } else {
        None
    }
}

/// Formats a record as one table row (no trailing newline).
pub fn format_row(record: &BookmarkRecord) -> String {
    TableRow::from_record(record).to_line()
}

/// Title of the `## ` section a line opens, if any.
pub fn section_heading(line: &str) -> Option<&str> {
    line.strip_prefix("## ").map(str::trim)
}

/// Returns true for a bookmark table header row (any column set starting with Title).
pub fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with("| Title |")
}

/// Returns true for a Markdown table separator row.
pub fn is_separator_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("|-")
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Splits a table line into trimmed raw cells, honoring `\|` escapes.
///
/// Returns `None` if the line does not start with `|`.
pub fn split_cells(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let rest = line.strip_prefix('|')?;

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('\\');
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }
    Some(cells)
}

/// A data row of a bookmark table, cells kept in their stored (escaped) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 7],
}

impl TableRow {
    pub const TITLE: usize = 0;
    pub const URL: usize = 1;
    pub const TAGS: usize = 2;
    pub const ADDED: usize = 3;
    pub const DESCRIPTION: usize = 4;
    pub const LAST_CHECK: usize = 5;
    pub const STATUS: usize = 6;

    /// Parses a data row. Header, separator and rows without exactly seven
    /// cells yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        if is_header_line(line) || is_separator_line(line) {
            return None;
        }
        let cells: [String; 7] = split_cells(line)?.try_into().ok()?;
        Some(Self { cells })
    }

    pub fn from_record(record: &BookmarkRecord) -> Self {
        Self {
            cells: [
                format_cell(&record.title),
                link_cell(&record.url),
                format_cell(&record.tags.join(" ")),
                format_cell(&record.add_date),
                format_cell(&record.description),
                format_cell(&record.last_check),
                record.status.as_cell().to_string(),
            ],
        }
    }

    /// URL from the link-icon anchor, if the URL cell holds a well-formed one.
    /// The whole cell is tried first so any parentheses in the URL are kept.
    pub fn url(&self) -> Option<String> {
        let cell = &self.cells[Self::URL];
        anchor_cell_url(cell).or_else(|| extract_link(cell))
    }

    /// Stored tags, split on whitespace.
    pub fn tags(&self) -> Vec<&str> {
        self.cells[Self::TAGS].split_whitespace().collect()
    }

    /// Converts back into a record. Rows without a link anchor yield `None`.
    pub fn to_record(&self) -> Option<BookmarkRecord> {
        let url = self.url()?;
        let mut record = BookmarkRecord::new(&unescape_cell(&self.cells[Self::TITLE]), &url);
        for tag in unescape_cell(&self.cells[Self::TAGS]).split_whitespace() {
            record.add_tag(tag);
        }
        record.add_date = unescape_cell(&self.cells[Self::ADDED]);
        record.description = unescape_cell(&self.cells[Self::DESCRIPTION]);
        record.last_check = unescape_cell(&self.cells[Self::LAST_CHECK]);
        record.status = LinkStatus::from_cell(&self.cells[Self::STATUS]);
        Some(record)
    }

    pub fn to_line(&self) -> String {
        format!("| {} |", self.cells.join(" | "))
    }
}

/// Parses a line as a bookmark row: a well-formed table row with a link anchor.
pub fn parse_bookmark_row(line: &str) -> Option<TableRow> {
    TableRow::parse(line).filter(|row| row.url().is_some())
}

/// Counts the bookmark rows in a document.
pub fn count_bookmarks(content: &str) -> usize {
    content
        .lines()
        .filter(|line| parse_bookmark_row(line).is_some())
        .count()
}

/// URLs already stored in the section named `subcategory`.
pub fn existing_urls(content: &str, subcategory: &str) -> HashSet<String> {
    let mut urls = HashSet::new();
    let mut in_section = false;
    for line in content.lines() {
        if let Some(heading) = section_heading(line) {
            in_section = heading == subcategory;
            continue;
        }
        if !in_section {
            continue;
        }
        // Rows with the wrong cell count are still scanned as plain text.
        let url = match TableRow::parse(line) {
            Some(row) => row.url(),
            None => extract_link(line),
        };
        if let Some(url) = url {
            urls.insert(url);
        }
    }
    urls
}

/// Splits a document into units: the preamble before the first `## ` heading
/// (omitted when the document opens with a heading), then one unit per section
/// running up to the next heading. Joining the units with `\n` restores the text.
pub fn split_sections(content: &str) -> Vec<Vec<String>> {
    let mut units: Vec<Vec<String>> = vec![Vec::new()];
    for line in content.split('\n') {
        if section_heading(line).is_some() {
            units.push(Vec::new());
        }
        if let Some(unit) = units.last_mut() {
            unit.push(line.to_string());
        }
    }
    if units.len() > 1 && units[0].is_empty() {
        units.remove(0);
    }
    units
}

/// A fresh document for `category` holding one section.
pub fn new_document(category: &str, subcategory: &str, records: &[BookmarkRecord]) -> String {
    let mut content = format!("# {} Bookmarks\n\n## {}\n\n{}", category, subcategory, table_header());
    for record in records {
        content.push_str(&format_row(record));
        content.push('\n');
    }
    content
}

/// Merges `records` into the document text, returning the new full text.
///
/// The caller must already have removed records whose URL is present in the
/// target section; no duplicate check happens here. Other sections are left
/// byte-for-byte untouched.
pub fn merge_into_document(
    existing: Option<&str>,
    category: &str,
    subcategory: &str,
    records: &[BookmarkRecord],
) -> String {
    let existing = match existing {
        Some(text) if !text.trim().is_empty() => text,
        _ => return new_document(category, subcategory, records),
    };

    let mut units = split_sections(existing);
    let target = units
        .iter()
        .position(|unit| unit.first().and_then(|l| section_heading(l)) == Some(subcategory));

    match target {
        Some(idx) => {
            append_rows(&mut units[idx], records);
            units
                .iter()
                .map(|unit| unit.join("\n"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        None => {
            let mut content = existing.trim_end_matches(['\n', '\r']).to_string();
            content.push_str(&format!("\n\n## {}\n\n{}", subcategory, table_header()));
            for record in records {
                content.push_str(&format_row(record));
                content.push('\n');
            }
            content
        }
    }
}

/// Appends rows after the last table line of a section unit, restoring the
/// table header first if the section lost it.
fn append_rows(unit: &mut Vec<String>, records: &[BookmarkRecord]) {
    if !unit.iter().any(|l| is_header_line(l)) {
        match unit.iter().position(|l| l.trim_start().starts_with('|')) {
            Some(first_row) => {
                unit.insert(first_row, separator_line());
                unit.insert(first_row, header_line());
            }
            None => {
                unit.insert(1, separator_line());
                unit.insert(1, header_line());
                unit.insert(1, String::new());
            }
        }
    }

    let last_table_line = unit
        .iter()
        .rposition(|l| l.trim_start().starts_with('|'))
        .unwrap_or(0);
    for (offset, record) in records.iter().enumerate() {
        unit.insert(last_table_line + 1 + offset, format_row(record));
    }

    // Sections end with a newline.
    if unit.last().map(|l| !l.is_empty()).unwrap_or(true) {
        unit.push(String::new());
    }
}

/// Reads and writes category documents under the configured output folder.
pub struct TableSync<'a, V: VaultTrait> {
    vault: &'a V,
    output_folder: String,
}

impl<'a, V: VaultTrait> TableSync<'a, V> {
    pub fn new(vault: &'a V, output_folder: &str) -> Self {
        Self {
            vault,
            output_folder: output_folder.to_string(),
        }
    }

    /// Vault path of the document for `category`.
    pub fn document_path(&self, category: &str) -> String {
        join_path(&self.output_folder, &format!("{}.md", category))
    }

    /// Full-document scan of the URLs stored in one section. A missing
    /// document has none.
    pub fn existing_urls(
        &self,
        category: &str,
        subcategory: &str,
    ) -> Result<HashSet<String>, VaultError> {
        let path = self.document_path(category);
        if !self.vault.exists(&path) {
            return Ok(HashSet::new());
        }
        let content = self.vault.read(&path)?;
        Ok(existing_urls(&content, subcategory))
    }

    /// Appends `records` to the section, creating the document or section as
    /// needed, and overwrites the document. Returns the document path.
    pub fn append(
        &self,
        category: &str,
        subcategory: &str,
        records: &[BookmarkRecord],
    ) -> Result<String, VaultError> {
        if !self.vault.exists(&self.output_folder) {
            self.vault.create_folder(&self.output_folder)?;
        }

        let path = self.document_path(category);
        let existing = if self.vault.exists(&path) {
            Some(self.vault.read(&path)?)
        } else {
            None
        };

        let content = merge_into_document(existing.as_deref(), category, subcategory, records);
        self.vault.write(&path, &content)?;
        debug!(path = %path, section = subcategory, rows = records.len(), "appended bookmark rows");
        Ok(path)
    }
}
