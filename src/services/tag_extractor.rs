//! Tag Extractor.
//!
//! Derives hashtag labels for a bookmark from its domain and from well-known
//! keywords in its title.

use tracing::debug;
use url::Url;

/// Title keywords that become tags when present.
pub const COMMON_KEYWORDS: &[&str] = &[
    "tutorial",
    "guide",
    "review",
    "documentation",
    "api",
    "tool",
    "news",
    "update",
    "tips",
    "tricks",
    "how-to",
    "reference",
    "blog",
    "opinion",
    "article",
    "resource",
    "project",
    "code",
];

/// Returns the tags for a bookmark, without duplicates, in insertion order.
///
/// The domain tag is the second-to-last label of the host (`sub.example.com`
/// gives `#example`). An unparseable URL contributes no domain tag.
pub fn extract_tags(title: &str, url: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    if let Some(label) = domain_label(url) {
        push(format!("#{}", label));
    }

    let lower_title = title.to_lowercase();
    for keyword in COMMON_KEYWORDS {
        if lower_title.contains(keyword) {
            push(format!("#{}", keyword));
        }
    }

    tags
}

/// Second-to-last host label, lower-cased.
fn domain_label(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(url, error = %e, "no domain tag for unparseable url");
            return None;
        }
    };
    let host = parsed.host_str()?;
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    let label = labels[labels.len() - 2].to_lowercase();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}
