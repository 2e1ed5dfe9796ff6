//! In-memory provider doubles for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use goldkey_providers::{
    CpcProvider, DocumentCountProvider, RelatedKeywordProvider, SearchVolumeProvider, SeedProvider,
};
use goldkey_shared::{GoldkeyError, Result, SeedKeyword, Source};

use crate::normalize::canonicalize;

pub struct FakeSeeds {
    pub keywords: Vec<SeedKeyword>,
    pub fail: bool,
}

impl FakeSeeds {
    pub fn new(source: Source, keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| SeedKeyword::new(*k, source)).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            keywords: Vec::new(),
            fail: true,
        }
    }
}

impl SeedProvider for FakeSeeds {
    fn name(&self) -> &str {
        "fake-seeds"
    }

    fn collect(&self) -> Result<Vec<SeedKeyword>> {
        if self.fail {
            return Err(GoldkeyError::unavailable("fake-seeds", "no credentials"));
        }
        Ok(self.keywords.clone())
    }
}

/// Related keywords keyed by canonical form. Records every lookup.
#[derive(Default)]
pub struct FakeRelated {
    pub related: HashMap<String, Vec<String>>,
    pub failing: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRelated {
    pub fn with(mut self, keyword: &str, related: &[&str]) -> Self {
        self.related.insert(
            canonicalize(keyword),
            related.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn failing_on(mut self, keyword: &str) -> Self {
        self.failing.insert(canonicalize(keyword));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RelatedKeywordProvider for FakeRelated {
    fn name(&self) -> &str {
        "fake-related"
    }

    fn lookup(&self, keyword: &str) -> Result<Vec<String>> {
        let key = canonicalize(keyword);
        self.calls.lock().unwrap().push(key.clone());
        if self.failing.contains(&key) {
            return Err(GoldkeyError::ProviderTimeout("fake-related".into()));
        }
        Ok(self.related.get(&key).cloned().unwrap_or_default())
    }
}

/// Numeric lookups keyed by canonical form; unknown keys return `default`.
pub struct FakeCounts {
    pub values: HashMap<String, u64>,
    pub failing: HashSet<String>,
    pub default: u64,
}

impl FakeCounts {
    pub fn new(default: u64) -> Self {
        Self {
            values: HashMap::new(),
            failing: HashSet::new(),
            default,
        }
    }

    pub fn with(mut self, keyword: &str, value: u64) -> Self {
        self.values.insert(canonicalize(keyword), value);
        self
    }

    pub fn failing_on(mut self, keyword: &str) -> Self {
        self.failing.insert(canonicalize(keyword));
        self
    }

    fn get(&self, keyword: &str) -> Result<u64> {
        let key = canonicalize(keyword);
        if self.failing.contains(&key) {
            return Err(GoldkeyError::malformed(format!("suppressed value for {key}")));
        }
        Ok(self.values.get(&key).copied().unwrap_or(self.default))
    }
}

impl SearchVolumeProvider for FakeCounts {
    fn name(&self) -> &str {
        "fake-volume"
    }

    fn search_volume(&self, keyword: &str) -> Result<u64> {
        self.get(keyword)
    }
}

impl DocumentCountProvider for FakeCounts {
    fn name(&self) -> &str {
        "fake-documents"
    }

    fn document_count(&self, keyword: &str) -> Result<u64> {
        self.get(keyword)
    }
}

impl CpcProvider for FakeCounts {
    fn name(&self) -> &str {
        "fake-cpc"
    }

    fn cost_per_click(&self, keyword: &str) -> Result<u64> {
        self.get(keyword)
    }
}

/// One service answering related, volume, and CPC lookups under a single
/// backend key. Clones share the call log.
#[derive(Clone)]
pub struct FakeTool {
    pub volume: u64,
    pub cpc: u64,
    pub related: Vec<String>,
    log: Arc<Mutex<Vec<(&'static str, Instant)>>>,
}

impl FakeTool {
    pub fn new(volume: u64, cpc: u64) -> Self {
        Self {
            volume,
            cpc,
            related: Vec::new(),
            log: Arc::default(),
        }
    }

    pub fn with_related(mut self, related: &[&str]) -> Self {
        self.related = related.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Port name and timestamp of every call, in order.
    pub fn calls(&self) -> Vec<(&'static str, Instant)> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, port: &'static str) {
        self.log.lock().unwrap().push((port, Instant::now()));
    }
}

impl RelatedKeywordProvider for FakeTool {
    fn name(&self) -> &str {
        "fake-tool"
    }

    fn lookup(&self, _keyword: &str) -> Result<Vec<String>> {
        self.record("related");
        Ok(self.related.clone())
    }
}

impl SearchVolumeProvider for FakeTool {
    fn name(&self) -> &str {
        "fake-tool"
    }

    fn search_volume(&self, _keyword: &str) -> Result<u64> {
        self.record("volume");
        Ok(self.volume)
    }
}

impl CpcProvider for FakeTool {
    fn name(&self) -> &str {
        "fake-tool-cpc"
    }

    fn backend(&self) -> &str {
        "fake-tool"
    }

    fn cost_per_click(&self, _keyword: &str) -> Result<u64> {
        self.record("cpc");
        Ok(self.cpc)
    }
}
