//! Seed provider that scrapes keyword text from a trending/ranking page.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use goldkey_shared::{GoldkeyError, Result, SeedKeyword, Source};

use crate::SeedProvider;
use crate::http;

/// Scrapes the text of every element matching a CSS selector.
#[derive(Debug)]
pub struct HtmlSeedProvider {
    client: Client,
    url: Url,
    selector: Selector,
    source: Source,
}

impl HtmlSeedProvider {
    /// Fails with `Config` on an invalid URL or selector.
    pub fn new(url: &str, selector: &str, source: Source, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| GoldkeyError::config(format!("invalid source URL '{url}': {e}")))?;
        let selector = Selector::parse(selector)
            .map_err(|e| GoldkeyError::config(format!("invalid selector '{selector}': {e}")))?;

        Ok(Self {
            client: http::build_client(timeout)?,
            url,
            selector,
            source,
        })
    }
}

impl SeedProvider for HtmlSeedProvider {
    fn name(&self) -> &str {
        "html"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    fn collect(&self) -> Result<Vec<SeedKeyword>> {
        let body = http::send_text(self.url.as_str(), self.client.get(self.url.clone()))?;
        let keywords = extract_keywords(&body, &self.selector);
        debug!(count = keywords.len(), "scraped seed keywords");

        Ok(keywords
            .into_iter()
            .map(|k| SeedKeyword::new(k, self.source))
            .collect())
    }
}

/// Text of each matching element with inner whitespace collapsed. Empty matches are dropped.
pub fn extract_keywords(html: &str, selector: &Selector) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(selector)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect()
}
