// Bookmark vault shared type definitions
// Each submodule defines types used across the workflows.

pub mod bookmark;
pub mod errors;
pub mod report;
pub mod settings;
