//! Property-based tests for URL deduplication.

use std::collections::HashSet;

use bookmark_vault::services::deduplicator::{deduplicate, parse_date};
use bookmark_vault::types::bookmark::BookmarkRecord;
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = BookmarkRecord> {
    (
        0usize..6,
        "[A-Za-z]{1,10}",
        proptest::option::of((2000i32..2030, 1u32..13, 1u32..29)),
        prop::collection::vec("#[a-z]{1,4}", 0..4),
    )
        .prop_map(|(host, title, date, tags)| {
            let mut record = BookmarkRecord::new(&title, &format!("https://site{}.com", host));
            record.add_date = date
                .map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
                .unwrap_or_default();
            for tag in &tags {
                record.add_tag(tag);
            }
            record
        })
}

// **Property: Deduplication yields unique URLs with merged tags**
//
// *For any* list of records, the output SHALL contain each input URL exactly
// once, each survivor SHALL carry every tag seen for its URL, and no
// discarded record of the same URL SHALL have a strictly later date.
proptest! {
    #[test]
    fn dedup_unique_urls_and_tag_union(records in prop::collection::vec(arb_record(), 0..30)) {
        let result = deduplicate(records.clone());

        let input_urls: HashSet<&str> = records.iter().map(|r| r.url.as_str()).collect();
        let output_urls: Vec<&str> = result.iter().map(|r| r.url.as_str()).collect();
        prop_assert_eq!(output_urls.len(), input_urls.len());
        prop_assert_eq!(output_urls.iter().copied().collect::<HashSet<_>>(), input_urls);

        for survivor in &result {
            let group: Vec<&BookmarkRecord> =
                records.iter().filter(|r| r.url == survivor.url).collect();
            for member in &group {
                for tag in &member.tags {
                    prop_assert!(survivor.tags.contains(tag));
                }
                prop_assert!(parse_date(&member.add_date) <= parse_date(&survivor.add_date));
            }
            let unique: HashSet<&String> = survivor.tags.iter().collect();
            prop_assert_eq!(unique.len(), survivor.tags.len());
        }
    }

    #[test]
    fn dedup_is_idempotent(records in prop::collection::vec(arb_record(), 0..30)) {
        let once = deduplicate(records);
        let twice = deduplicate(once.clone());
        prop_assert_eq!(twice, once);
    }
}
