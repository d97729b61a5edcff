// Bookmark vault workflows
// Managers run stateful operations over the vault: table sync, import, duplicate cleanup, accessibility checks.

pub mod accessibility_checker;
pub mod cleanup_manager;
pub mod import_manager;
pub mod table_sync;
