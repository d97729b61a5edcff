//! Unit tests for tag extraction.

use bookmark_vault::services::tag_extractor::extract_tags;

#[test]
fn test_domain_tag_comes_first_then_keywords() {
    let tags = extract_tags("How to guide", "https://sub.example.com/page");
    assert_eq!(tags, vec!["#example", "#guide"]);
}

#[test]
fn test_keywords_follow_table_order() {
    let tags = extract_tags("Code review: an API tutorial", "https://docs.rs");
    assert_eq!(tags, vec!["#docs", "#tutorial", "#review", "#api", "#code"]);
}

#[test]
fn test_domain_tag_is_lowercased() {
    let tags = extract_tags("Home", "https://WWW.GitHub.COM/");
    assert_eq!(tags, vec!["#github"]);
}

#[test]
fn test_tags_never_repeat() {
    let tags = extract_tags("News about news", "https://news.com");
    assert_eq!(tags, vec!["#news"]);
}

#[test]
fn test_unparseable_url_contributes_no_domain_tag() {
    assert_eq!(extract_tags("A blog", "not a url"), vec!["#blog"]);
    assert!(extract_tags("Home", "http://localhost:8080").is_empty());
}

#[test]
fn test_second_level_public_suffix_uses_literal_label() {
    let tags = extract_tags("Home", "https://www.bbc.co.uk");
    assert_eq!(tags, vec!["#co"]);
}
