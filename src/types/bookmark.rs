use serde::{Deserialize, Serialize};

/// Title used when an anchor carries no text.
pub const UNTITLED: &str = "Untitled";

/// Category assigned when no rule matches.
pub const DEFAULT_CATEGORY: &str = "General";

/// Section name used for bookmarks without a subcategory.
pub const DEFAULT_SUBCATEGORY: &str = "General";

/// One anchor pulled out of a browser bookmarks export, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLink {
    pub url: String,
    pub title: String,
    /// `YYYY-MM-DD`, or empty when the export had no usable timestamp.
    pub add_date: String,
    pub last_modified: String,
    pub description: String,
}

/// Liveness of a bookmark as recorded by the last accessibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkStatus {
    #[default]
    Untested,
    Accessible,
    Inaccessible,
}

impl LinkStatus {
    /// Text stored in the Status column.
    pub fn as_cell(&self) -> &'static str {
        match self {
            LinkStatus::Untested => "",
            LinkStatus::Accessible => "✅",
            LinkStatus::Inaccessible => "❌",
        }
    }

    /// Reads a Status cell. Unknown markers count as untested.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "✅" => LinkStatus::Accessible,
            "❌" => LinkStatus::Inaccessible,
            _ => LinkStatus::Untested,
        }
    }
}

/// One imported or stored favorite.
///
/// `url` is the identity key. Tags keep insertion order and never repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub add_date: String,
    pub last_modified: String,
    pub description: String,
    /// Date of the last accessibility pass that touched this row.
    pub last_check: String,
    pub status: LinkStatus,
    pub category: String,
    pub subcategory: String,
}

impl BookmarkRecord {
    /// Creates an untested record with no tags or classification.
    pub fn new(title: &str, url: &str) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            url: url.to_string(),
            tags: Vec::new(),
            add_date: String::new(),
            last_modified: String::new(),
            description: String::new(),
            last_check: String::new(),
            status: LinkStatus::Untested,
            category: DEFAULT_CATEGORY.to_string(),
            subcategory: String::new(),
        }
    }

    /// Adds a tag unless it is already present.
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Section this record is stored under; an empty subcategory maps to `"General"`.
    pub fn section_name(&self) -> &str {
        if self.subcategory.is_empty() {
            DEFAULT_SUBCATEGORY
        } else {
            &self.subcategory
        }
    }
}

/// Outcome of classifying a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: String,
    /// Empty means the caller files the bookmark under the `"General"` section.
    pub subcategory: String,
}

impl Default for CategoryResult {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            subcategory: String::new(),
        }
    }
}

/// Metadata scraped from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Keyword tags, each prefixed with `#`.
    pub tags: Vec<String>,
}
