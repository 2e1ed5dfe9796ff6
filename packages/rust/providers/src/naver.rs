//! Naver open search API adapters.
//!
//! - Blog search `total` is the competition proxy (document count).
//! - Shopping search product titles are a seed source.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use goldkey_shared::{AppConfig, GoldkeyError, NaverConfig, Result, SeedKeyword, Source, read_credential};

use crate::http::{self, Count};
use crate::{DocumentCountProvider, SeedProvider};

const BLOG_PATH: &str = "v1/search/blog.json";
const SHOP_PATH: &str = "v1/search/shop.json";

/// Naver caps `display` at 100.
const MAX_DISPLAY: u32 = 100;

/// Client id/secret pair for the open search API.
#[derive(Clone)]
pub struct NaverCredentials {
    client_id: String,
    client_secret: String,
}

impl NaverCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read both values from the env vars named in config.
    pub fn from_env(config: &NaverConfig) -> Option<Self> {
        let id = read_credential(&config.client_id_env)?;
        let secret = read_credential(&config.client_secret_env)?;
        Some(Self::new(id, secret))
    }
}

impl std::fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// NaverSearchClient
// ---------------------------------------------------------------------------

/// Blocking client for the Naver open search endpoints.
#[derive(Debug, Clone)]
pub struct NaverSearchClient {
    client: Client,
    base_url: Url,
    credentials: Option<NaverCredentials>,
}

impl NaverSearchClient {
    /// Create a client. Without credentials every call fails with `ProviderUnavailable`.
    pub fn new(
        base_url: &str,
        credentials: Option<NaverCredentials>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::parse_base_url(base_url)?,
            credentials,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.naver.base_url,
            NaverCredentials::from_env(&config.naver),
            Duration::from_secs(config.defaults.timeout_secs),
        )
    }

    fn get(&self, path: &str, query: &str, display: u32) -> Result<Value> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            GoldkeyError::unavailable("naver-search", "client id/secret not configured")
        })?;

        let url = http::endpoint(&self.base_url, path)?;
        let display = display.clamp(1, MAX_DISPLAY).to_string();
        let request = self
            .client
            .get(url)
            .header("X-Naver-Client-Id", &credentials.client_id)
            .header("X-Naver-Client-Secret", &credentials.client_secret)
            .query(&[("query", query), ("display", display.as_str())]);

        http::send_json(path, request)
    }

    /// Total number of blog posts matching `query`.
    #[instrument(skip(self))]
    pub fn blog_total(&self, query: &str) -> Result<u64> {
        let body = self.get(BLOG_PATH, query, 1)?;
        let total = body
            .get("total")
            .and_then(http::parse_count)
            .ok_or_else(|| GoldkeyError::malformed(format!("{BLOG_PATH}: missing numeric 'total'")))?;

        match total {
            Count::Exact(n) => Ok(n),
            Count::Suppressed => Err(GoldkeyError::malformed(format!(
                "{BLOG_PATH}: suppressed 'total'"
            ))),
        }
    }

    /// Product titles for `query`, with highlight markup removed.
    #[instrument(skip(self))]
    pub fn shopping_titles(&self, query: &str, display_count: u32) -> Result<Vec<String>> {
        let body = self.get(SHOP_PATH, query, display_count)?;
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| GoldkeyError::malformed(format!("{SHOP_PATH}: missing 'items'")))?;

        let titles: Vec<String> = items
            .iter()
            .filter_map(|item| item.get("title").and_then(Value::as_str))
            .map(clean_title)
            .filter(|t| !t.is_empty())
            .collect();

        debug!(count = titles.len(), "shopping titles fetched");
        Ok(titles)
    }
}

impl DocumentCountProvider for NaverSearchClient {
    fn name(&self) -> &str {
        "naver-blog"
    }

    fn document_count(&self, keyword: &str) -> Result<u64> {
        self.blog_total(keyword)
    }
}

// ---------------------------------------------------------------------------
// NaverShoppingSeeds
// ---------------------------------------------------------------------------

/// Seeds from shopping search results for a fixed list of category queries.
#[derive(Debug, Clone)]
pub struct NaverShoppingSeeds {
    search: NaverSearchClient,
    source: Source,
    queries: Vec<String>,
    display: u32,
}

impl NaverShoppingSeeds {
    pub fn new(search: NaverSearchClient, source: Source, queries: Vec<String>, display: u32) -> Self {
        Self {
            search,
            source,
            queries,
            display,
        }
    }
}

impl SeedProvider for NaverShoppingSeeds {
    fn name(&self) -> &str {
        "naver-shopping"
    }

    fn collect(&self) -> Result<Vec<SeedKeyword>> {
        let mut seeds = Vec::new();
        for query in &self.queries {
            let titles = self.search.shopping_titles(query, self.display)?;
            seeds.extend(titles.into_iter().map(|t| SeedKeyword::new(t, self.source)));
        }
        Ok(seeds)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strip `<b>` highlight tags and decode the few entities the API emits.
fn clean_title(raw: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid regex"));

    let stripped = TAG_RE.replace_all(raw, "");
    stripped
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
