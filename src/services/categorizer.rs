//! Categorizer.
//!
//! Maps a bookmark's title and URL onto a (category, subcategory) pair using
//! an ordered rule table. Rules are tried top to bottom and the first rule
//! whose keywords appear in the title or URL wins.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::bookmark::CategoryResult;

/// How a matched rule picks its subcategory.
#[derive(Clone, Copy)]
pub enum SubcategoryRule {
    /// Ordered (subcategory, keywords) pairs; the first pair with a keyword hit wins.
    Keywords(&'static [(&'static str, &'static [&'static str])]),
    /// Derives the subcategory from the URL.
    Extract(fn(&str) -> String),
}

/// One row of the classification table.
#[derive(Clone, Copy)]
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    pub subcategories: SubcategoryRule,
}

/// The classification table, in evaluation order.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: "News",
        keywords: &["news"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Technology", &["tech"]),
            ("Business", &["business"]),
            ("Sports", &["sports", "sport"]),
            ("Politics", &["politics", "government"]),
        ]),
    },
    CategoryRule {
        category: "Reference",
        keywords: &["wiki", "wikipedia"],
        subcategories: SubcategoryRule::Extract(wiki_category),
    },
    CategoryRule {
        category: "Blogs",
        keywords: &["blog"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Technology", &["tech", "programming"]),
            ("Business", &["business", "economics"]),
            ("Sports", &["sports", "sport"]),
            ("Politics", &["politics", "government"]),
        ]),
    },
    CategoryRule {
        category: "Social Media",
        keywords: &["social", "media"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Social", &["social", "community"]),
            ("Media", &["media", "news"]),
        ]),
    },
    CategoryRule {
        category: "Travel",
        keywords: &["travel", "tourism"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Food", &["food", "recipes"]),
            ("Travel", &["travel", "tourism"]),
        ]),
    },
    CategoryRule {
        category: "Entertainment",
        keywords: &["movies", "music", "games"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Movies", &["movies", "films", "cinema"]),
            ("Music", &["music", "songs"]),
            ("Gaming", &["games", "gaming"]),
        ]),
    },
    CategoryRule {
        category: "Health & Wellness",
        keywords: &["health", "wellness", "fitness", "medicine"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Fitness", &["fitness", "exercise", "workout"]),
            ("Medicine", &["medicine", "medical"]),
            ("Nutrition", &["nutrition", "diet"]),
        ]),
    },
    CategoryRule {
        category: "Education",
        keywords: &["learn", "education", "tutorials"],
        subcategories: SubcategoryRule::Keywords(&[
            ("Tutorials", &["tutorial", "how-to"]),
            ("Courses", &["course", "class"]),
        ]),
    },
];

/// Classifies a bookmark. Falls back to `"General"` with an empty subcategory.
pub fn categorize(title: &str, url: &str) -> CategoryResult {
    let lower_title = title.to_lowercase();
    let lower_url = url.to_lowercase();
    let hits = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| lower_title.contains(k) || lower_url.contains(k))
    };

    let Some(rule) = CATEGORY_RULES.iter().find(|rule| hits(rule.keywords)) else {
        return CategoryResult::default();
    };

    let subcategory = match rule.subcategories {
        SubcategoryRule::Keywords(pairs) => pairs
            .iter()
            .find(|(_, keywords)| hits(*keywords))
            .map(|(name, _)| name.to_string())
            .unwrap_or_default(),
        SubcategoryRule::Extract(extract) => extract(url),
    };

    CategoryResult {
        category: rule.category.to_string(),
        subcategory,
    }
}

/// Subcategory for wiki links: the segment after `/wiki/Category:`, with
/// underscores turned into spaces and anything after a `/` dropped.
pub fn wiki_category(url: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"(?i)/wiki/Category:([^?#]+)").expect("wiki category regex"));

    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            let name = m.as_str().replace('_', " ");
            name.split('/').next().unwrap_or_default().trim().to_string()
        })
        .unwrap_or_default()
}
