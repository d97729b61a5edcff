//! Deduplicator.
//!
//! Collapses records that share a URL into one canonical record.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::bookmark::BookmarkRecord;

/// Returns one record per distinct `url`.
///
/// Within a group the record with the latest `add_date` is kept; empty or
/// unparseable dates rank lowest and ties keep the first record encountered.
/// The survivor's tags are replaced by the union of the group's tags, in
/// encounter order. Groups are emitted in order of first appearance.
pub fn deduplicate(records: Vec<BookmarkRecord>) -> Vec<BookmarkRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<BookmarkRecord>> = Vec::new();

    for record in records {
        match index.get(&record.url) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(record.url.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups.into_iter().filter_map(merge_group).collect()
}

fn merge_group(group: Vec<BookmarkRecord>) -> Option<BookmarkRecord> {
    let mut tags: Vec<String> = Vec::new();
    for tag in group.iter().flat_map(|r| r.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    let mut newest: Option<(Option<NaiveDate>, BookmarkRecord)> = None;
    for record in group {
        let date = parse_date(&record.add_date);
        let is_newer = match &newest {
            Some((best, _)) => date > *best,
            None => true,
        };
        if is_newer {
            newest = Some((date, record));
        }
    }

    newest.map(|(_, mut record)| {
        record.tags = tags;
        record
    })
}

/// Parses a `YYYY-MM-DD` date; anything else is treated as missing.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
