use serde::{Deserialize, Serialize};

/// Counts produced by one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Distinct bookmarks left after deduplicating the export.
    pub processed: usize,
    /// Rows appended to the vault.
    pub added: usize,
    /// Bookmarks whose URL already existed in their target section.
    pub skipped_existing: usize,
    /// Documents created or rewritten, in write order.
    pub files_written: Vec<String>,
}

/// A URL that failed its accessibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub url: String,
    pub error: String,
}

/// Result of an accessibility pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub accessible: usize,
    pub inaccessible: usize,
    pub errors: Vec<CheckFailure>,
    pub files_rewritten: Vec<String>,
    /// Set when the pass stopped early on request; counts cover the rows done so far.
    pub cancelled: bool,
}

impl CheckReport {
    pub fn checked(&self) -> usize {
        self.accessible + self.inaccessible
    }
}

/// Result of a duplicate cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Bookmark rows read from the processed documents.
    pub processed: usize,
    pub duplicates_removed: usize,
    pub files_rewritten: Vec<String>,
    pub cancelled: bool,
}
