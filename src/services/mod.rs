// Bookmark vault services
// Services provide the stateless transformations: link extraction, categorization, tagging,
// deduplication, page fetching, and settings persistence.

pub mod categorizer;
pub mod deduplicator;
pub mod link_extractor;
pub mod page_fetcher;
pub mod settings_engine;
pub mod tag_extractor;
