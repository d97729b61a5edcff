//! Page fetching for the accessibility pass.
//!
//! [`PageFetcher`] is the single network primitive the workflows depend on.
//! [`HttpFetcher`] implements it with `reqwest`; tests substitute stubs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::types::bookmark::PageMeta;
use crate::types::errors::FetchError;

/// Fetches a page and returns the metadata the bookmark tables care about.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_meta(&self, url: &str) -> Result<PageMeta, FetchError>;
}

/// HTTP fetcher backed by a shared `reqwest::Client`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Default per-request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(concat!("bookmark-vault/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_meta(&self, url: &str) -> Result<PageMeta, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(parse_page_meta(&body))
    }
}

/// Reads `<title>`, the description (`meta[name=description]`, falling back to
/// `og:description`) and `meta[name=keywords]` from a page.
///
/// Keywords are comma-split and trimmed; each becomes a `#` tag with inner
/// whitespace replaced by `-` so that tags stay space-separable.
pub fn parse_page_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);
    let title_sel = Selector::parse("title").expect("title selector");
    let desc_sel = Selector::parse(r#"meta[name="description"]"#).expect("description selector");
    let og_sel = Selector::parse(r#"meta[property="og:description"]"#).expect("og selector");
    let keywords_sel = Selector::parse(r#"meta[name="keywords"]"#).expect("keywords selector");

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let content_of = |sel: &Selector| {
        document
            .select(sel)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|c| !c.is_empty())
            .map(str::to_string)
    };
    let description = content_of(&desc_sel)
        .or_else(|| content_of(&og_sel))
        .unwrap_or_default();

    let mut tags: Vec<String> = Vec::new();
    for content in document
        .select(&keywords_sel)
        .filter_map(|el| el.value().attr("content"))
    {
        for keyword in content.split(',') {
            let keyword = keyword.split_whitespace().collect::<Vec<_>>().join("-");
            if keyword.is_empty() || keyword == "#" {
                continue;
            }
            let tag = if keyword.starts_with('#') {
                keyword
            } else {
                format!("#{}", keyword)
            };
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    PageMeta {
        title,
        description,
        tags,
    }
}
