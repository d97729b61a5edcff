//! Link Extractor.
//!
//! Turns a browser bookmarks export (Netscape bookmark file format) into a
//! flat list of [`RawLink`]s. Folder structure in the export is ignored; every
//! anchor in document order becomes a candidate.

use chrono::DateTime;
use scraper::{Html, Selector};
use tracing::debug;

use crate::types::bookmark::{RawLink, UNTITLED};
use crate::types::errors::ImportError;

/// Extracts every http(s) anchor from the export markup.
///
/// Anchors without an `href`, or whose `href` does not begin with `http://`
/// or `https://`, are skipped. An export with anchors but no qualifying link
/// yields an empty list.
///
/// # Errors
/// Returns `ImportError::EmptyInput` when the markup contains no anchors at all.
pub fn extract_links(html: &str) -> Result<Vec<RawLink>, ImportError> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("anchor selector");

    let mut anchor_count = 0usize;
    let mut links = Vec::new();

    for element in document.select(&anchors) {
        anchor_count += 1;
        let attrs = element.value();

        let Some(href) = attrs.attr("href").map(str::trim) else {
            continue;
        };
        if !is_web_url(href) {
            debug!(href, "skipping non-http bookmark");
            continue;
        }

        let text = element.text().collect::<String>();
        let title = collapse_whitespace(&text);

        links.push(RawLink {
            url: href.to_string(),
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title
            },
            add_date: epoch_to_date(attrs.attr("add_date")),
            last_modified: epoch_to_date(attrs.attr("last_modified")),
            description: attrs
                .attr("description")
                .map(collapse_whitespace)
                .unwrap_or_default(),
        });
    }

    if anchor_count == 0 {
        return Err(ImportError::EmptyInput);
    }

    debug!(anchors = anchor_count, links = links.len(), "parsed bookmark export");
    Ok(links)
}

/// Returns true if `url` uses the http or https scheme.
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Converts a Unix-epoch-seconds attribute into `YYYY-MM-DD` (UTC).
/// Missing or unparseable values become an empty string.
pub fn epoch_to_date(value: Option<&str>) -> String {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
