//! Provider ports and their HTTP/HTML adapters.
//!
//! The pipeline talks to external data only through the traits defined here.
//! Every trait is synchronous and object-safe so the pipeline can hold
//! `Box<dyn ...>` values and tests can substitute in-memory fakes.

pub mod html;
pub mod http;
pub mod keyword_tool;
pub mod naver;
pub mod static_list;

use std::time::Duration;

use goldkey_shared::{AppConfig, Result, SeedKeyword, SourceConfig};
use tracing::warn;

pub use html::HtmlSeedProvider;
pub use keyword_tool::{KeywordToolClient, KeywordToolCredentials};
pub use naver::{NaverCredentials, NaverSearchClient, NaverShoppingSeeds};
pub use static_list::StaticSeedProvider;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// A source of raw seed keywords (shopping rankings, trending pages, ...).
pub trait SeedProvider: Send + Sync {
    /// Human-readable provider name for tracing.
    fn name(&self) -> &str;

    /// Fetch the current seed list. May be empty.
    fn collect(&self) -> Result<Vec<SeedKeyword>>;
}

/// Related-keyword lookup used by the expansion stage.
pub trait RelatedKeywordProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Pacing key. Ports served by one upstream service return the same key
    /// so their calls are spaced as a single stream.
    fn backend(&self) -> &str {
        self.name()
    }

    /// Related keywords for `keyword`, most relevant first.
    fn lookup(&self, keyword: &str) -> Result<Vec<String>>;
}

/// Monthly search volume lookup.
pub trait SearchVolumeProvider: Send + Sync {
    fn name(&self) -> &str;

    fn backend(&self) -> &str {
        self.name()
    }

    fn search_volume(&self, keyword: &str) -> Result<u64>;
}

/// Indexed document count lookup (competition proxy).
pub trait DocumentCountProvider: Send + Sync {
    fn name(&self) -> &str;

    fn backend(&self) -> &str {
        self.name()
    }

    fn document_count(&self, keyword: &str) -> Result<u64>;
}

/// Optional cost-per-click lookup.
pub trait CpcProvider: Send + Sync {
    fn name(&self) -> &str;

    fn backend(&self) -> &str {
        self.name()
    }

    fn cost_per_click(&self, keyword: &str) -> Result<u64>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Build seed providers from `[[sources]]`, in config order.
///
/// A source that cannot be constructed (bad selector, bad URL) is skipped
/// with a warning; the rest still run.
pub fn build_seed_providers(config: &AppConfig) -> Vec<Box<dyn SeedProvider>> {
    let timeout = Duration::from_secs(config.defaults.timeout_secs);
    let mut providers: Vec<Box<dyn SeedProvider>> = Vec::with_capacity(config.sources.len());

    for (index, source) in config.sources.iter().enumerate() {
        match build_one(config, source, timeout) {
            Ok(provider) => providers.push(provider),
            Err(e) => warn!(index, kind = source.kind(), error = %e, "skipping seed source"),
        }
    }

    providers
}

fn build_one(
    config: &AppConfig,
    source: &SourceConfig,
    timeout: Duration,
) -> Result<Box<dyn SeedProvider>> {
    let provider: Box<dyn SeedProvider> = match source {
        SourceConfig::NaverShopping {
            source,
            queries,
            display,
        } => Box::new(NaverShoppingSeeds::new(
            NaverSearchClient::from_config(config)?,
            *source,
            queries.clone(),
            *display,
        )),
        SourceConfig::Html {
            source,
            url,
            selector,
        } => Box::new(HtmlSeedProvider::new(url, selector, *source, timeout)?),
        SourceConfig::Static { source, keywords } => {
            Box::new(StaticSeedProvider::new(*source, keywords.clone()))
        }
    };
    Ok(provider)
}
