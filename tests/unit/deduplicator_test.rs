//! Unit tests for URL-based deduplication.

use bookmark_vault::services::deduplicator::deduplicate;
use bookmark_vault::types::bookmark::BookmarkRecord;

fn record(title: &str, url: &str, add_date: &str, tags: &[&str]) -> BookmarkRecord {
    let mut r = BookmarkRecord::new(title, url);
    r.add_date = add_date.to_string();
    for tag in tags {
        r.add_tag(tag);
    }
    r
}

#[test]
fn test_latest_date_wins_and_tags_merge() {
    let records = vec![
        record("Old", "https://x.com", "2020-01-01", &["#a"]),
        record("New", "https://x.com", "2021-01-01", &["#b"]),
    ];

    let result = deduplicate(records);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "New");
    assert_eq!(result[0].add_date, "2021-01-01");
    assert_eq!(result[0].tags, vec!["#a", "#b"]);
}

#[test]
fn test_ties_keep_first_record() {
    let records = vec![
        record("First", "https://x.com", "2021-05-05", &[]),
        record("Second", "https://x.com", "2021-05-05", &[]),
    ];
    assert_eq!(deduplicate(records)[0].title, "First");
}

#[test]
fn test_undated_records_rank_lowest() {
    let records = vec![
        record("Undated", "https://x.com", "", &["#u"]),
        record("Dated", "https://x.com", "2019-01-01", &["#d"]),
        record("Garbage", "https://x.com", "last week", &[]),
    ];
    let result = deduplicate(records);
    assert_eq!(result[0].title, "Dated");
    assert_eq!(result[0].tags, vec!["#u", "#d"]);
}

#[test]
fn test_groups_keep_first_appearance_order() {
    let records = vec![
        record("B", "https://b.com", "", &[]),
        record("A", "https://a.com", "", &[]),
        record("B again", "https://b.com", "2022-01-01", &[]),
    ];
    let urls: Vec<String> = deduplicate(records).into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["https://b.com", "https://a.com"]);
}

#[test]
fn test_urls_differing_in_case_are_distinct() {
    let records = vec![
        record("Lower", "https://x.com/page", "", &[]),
        record("Upper", "https://x.com/PAGE", "", &[]),
    ];
    assert_eq!(deduplicate(records).len(), 2);
}

#[test]
fn test_empty_input() {
    assert!(deduplicate(Vec::new()).is_empty());
}
