//! Bookmark Vault: turns browser bookmark exports into categorized Markdown
//! tables inside a note vault.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
pub mod vault;
