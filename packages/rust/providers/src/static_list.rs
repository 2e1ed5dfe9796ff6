//! Fixed keyword list seed provider.

use goldkey_shared::{Result, SeedKeyword, Source};

use crate::SeedProvider;

/// Emits the configured keywords as-is. Never fails.
#[derive(Debug, Clone)]
pub struct StaticSeedProvider {
    source: Source,
    keywords: Vec<String>,
}

impl StaticSeedProvider {
    pub fn new(source: Source, keywords: Vec<String>) -> Self {
        Self { source, keywords }
    }
}

impl SeedProvider for StaticSeedProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn collect(&self) -> Result<Vec<SeedKeyword>> {
        Ok(self
            .keywords
            .iter()
            .map(|k| SeedKeyword::new(k.clone(), self.source))
            .collect())
    }
}
