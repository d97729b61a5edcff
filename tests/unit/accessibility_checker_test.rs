//! Integration-level tests for the accessibility pass, using a stub fetcher
//! so no network access is needed.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bookmark_vault::managers::accessibility_checker::AccessibilityChecker;
use bookmark_vault::managers::table_sync::{parse_bookmark_row, TableRow};
use bookmark_vault::services::page_fetcher::PageFetcher;
use bookmark_vault::types::bookmark::PageMeta;
use bookmark_vault::types::errors::{CheckError, FetchError};
use bookmark_vault::types::settings::{PluginSettings, MIN_CHECK_DELAY_MS};
use bookmark_vault::vault::{MemoryVault, VaultTrait};
use chrono::NaiveDate;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

const HEADER: &str = "| Title | URL | Tags | Added | Description | Last Check | Status |\n|------|------|------|------|------|------|------|\n";

/// Serves canned metadata; unknown URLs fail like an unreachable host.
/// Optionally cancels a token once a number of fetches have happened.
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<String, PageMeta>,
    calls: Mutex<Vec<String>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl StubFetcher {
    fn with_page(mut self, url: &str, meta: PageMeta) -> Self {
        self.pages.insert(url.to_string(), meta);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_meta(&self, url: &str) -> Result<PageMeta, FetchError> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(url.to_string());
            calls.len()
        };
        if let Some((limit, token)) = &self.cancel_after {
            if count >= *limit {
                token.cancel();
            }
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Network("connection refused".to_string()))
    }
}

fn settings() -> PluginSettings {
    PluginSettings {
        output_folder_path: "Favorites".to_string(),
        check_accessibility: true,
        check_delay_ms: 0,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn document() -> String {
    format!(
        "# News Bookmarks\n\n## Technology\n\n{HEADER}\
| Live | [🔗](https://live.example.com) | #example | 2021-01-01 |  |  |  |\n\
| Dead | [🔗](https://dead.example.com) | #example | 2021-01-02 | old notes | 2023-01-01 | ✅ |\n"
    )
}

fn rows(content: &str) -> Vec<TableRow> {
    content.lines().filter_map(parse_bookmark_row).collect()
}

fn live_meta() -> PageMeta {
    PageMeta {
        title: "Live site".to_string(),
        description: "Fresh | description".to_string(),
        tags: vec!["#example".to_string(), "#rust".to_string()],
    }
}

#[tokio::test(start_paused = true)]
async fn test_check_updates_rows_with_outcome() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    let fetcher = StubFetcher::default().with_page("https://live.example.com", live_meta());
    let settings = settings();

    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.accessible, 1);
    assert_eq!(report.inaccessible, 1);
    assert_eq!(report.checked(), 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, "https://dead.example.com");
    assert!(report.errors[0].error.contains("connection refused"));
    assert_eq!(report.files_rewritten, vec!["Favorites/News.md".to_string()]);
    assert!(!report.cancelled);

    let content = vault.read("Favorites/News.md").unwrap();
    let rows = rows(&content);
    assert_eq!(
        rows[0].to_line(),
        r"| Live | [🔗](https://live.example.com) | #example #rust | 2021-01-01 | Fresh \| description | 2024-05-01 | ✅ |"
    );
    assert_eq!(
        rows[1].to_line(),
        "| Dead | [🔗](https://dead.example.com) | #example | 2021-01-02 | old notes | 2024-05-01 | ❌ |"
    );
}

#[tokio::test(start_paused = true)]
async fn test_rows_are_checked_in_document_order() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    vault.write("Favorites/Blogs.md", &format!(
        "## General\n\n{HEADER}| B | [🔗](https://blog.example.com) |  |  |  |  |  |\n"
    )).unwrap();
    let fetcher = StubFetcher::default();
    let settings = settings();

    AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        fetcher.calls(),
        vec![
            "https://blog.example.com".to_string(),
            "https://live.example.com".to_string(),
            "https://dead.example.com".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_outdated_header_is_normalized() {
    let vault = MemoryVault::new();
    vault
        .write(
            "Favorites/General.md",
            "## General\n\n| Title | URL | Tags | Added |\n|---|---|---|---|\n| A | [🔗](https://a.example.com) |  |  |  |  |  |\n",
        )
        .unwrap();
    let fetcher = StubFetcher::default().with_page("https://a.example.com", PageMeta::default());
    let settings = settings();

    AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &CancellationToken::new())
        .await
        .unwrap();

    let content = vault.read("Favorites/General.md").unwrap();
    assert!(content.starts_with(&format!("## General\n\n{HEADER}")));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_keeps_completed_rows() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    let cancel = CancellationToken::new();
    let fetcher = StubFetcher {
        cancel_after: Some((1, cancel.clone())),
        ..StubFetcher::default()
    }
    .with_page("https://live.example.com", live_meta());
    let settings = settings();

    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.checked(), 1);
    assert_eq!(fetcher.calls().len(), 1);

    let rows = rows(&vault.read("Favorites/News.md").unwrap());
    assert_eq!(rows[0].cells[TableRow::STATUS], "✅");
    assert_eq!(rows[1].cells[TableRow::LAST_CHECK], "2023-01-01");
}

#[tokio::test(start_paused = true)]
async fn test_selection_limits_documents() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    vault.write("Favorites/Other.md", &document()).unwrap();
    let fetcher = StubFetcher::default();
    let settings = settings();

    let selection = vec!["Favorites/Other.md".to_string()];
    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(Some(selection.as_slice()), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.files_rewritten, selection);
    assert_eq!(vault.read("Favorites/News.md").unwrap(), document());
}

#[tokio::test(start_paused = true)]
async fn test_disabled_and_empty_are_errors() {
    let vault = MemoryVault::new();
    let fetcher = StubFetcher::default();

    let disabled = PluginSettings {
        check_accessibility: false,
        ..settings()
    };
    let result = AccessibilityChecker::new(&vault, &fetcher, &disabled)
        .check(None, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(CheckError::Disabled)));

    vault.write("Favorites/Empty.md", "# Empty\n").unwrap();
    let settings = settings();
    let result = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .check(None, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(CheckError::NoBookmarks)));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_checks_are_spaced_by_configured_delay() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    vault.write("Favorites/Blogs.md", &format!(
        "## General\n\n{HEADER}| B | [🔗](https://blog.example.com) |  |  |  |  |  |\n"
    )).unwrap();
    let fetcher = StubFetcher::default();
    let settings = PluginSettings {
        check_delay_ms: 1000,
        ..settings()
    };

    let started = Instant::now();
    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &CancellationToken::new())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(report.checked(), 3);
    assert!(elapsed >= Duration::from_millis(2 * 1000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3 * 1000), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_zero_delay_is_raised_to_minimum() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    let fetcher = StubFetcher::default();
    let settings = settings();
    assert_eq!(settings.check_delay_ms, 0);

    let started = Instant::now();
    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.checked(), 2);
    assert!(started.elapsed() >= Duration::from_millis(MIN_CHECK_DELAY_MS));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_delay_stops_before_next_fetch() {
    let vault = MemoryVault::new();
    vault.write("Favorites/News.md", &document()).unwrap();
    let fetcher = StubFetcher::default();
    let settings = PluginSettings {
        check_delay_ms: 60_000,
        ..settings()
    };
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let report = AccessibilityChecker::new(&vault, &fetcher, &settings)
        .with_today(today())
        .check(None, &cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(fetcher.calls(), vec!["https://live.example.com".to_string()]);
    assert!(started.elapsed() < Duration::from_millis(60_000));
}
