//! Metrics enrichment: search volume, document count, and optional CPC.
//!
//! Each lookup is independently fail-open:
//!
//! | Lookup         | On failure |
//! |----------------|------------|
//! | search volume  | `0`        |
//! | document count | `1`        |
//! | cost per click | absent     |
//!
//! A raw document count of `0` is also coerced to `1`.

use tracing::{debug, warn};

use goldkey_providers::{CpcProvider, DocumentCountProvider, SearchVolumeProvider};
use goldkey_shared::{Candidate, Metrics};

use crate::pacing::Pacers;

/// Fetches metrics for one candidate at a time, pacing each backend.
pub struct MetricsEnricher<'a> {
    volume: &'a dyn SearchVolumeProvider,
    documents: &'a dyn DocumentCountProvider,
    cpc: Option<&'a dyn CpcProvider>,
    pacers: &'a mut Pacers,
}

impl<'a> MetricsEnricher<'a> {
    pub fn new(
        volume: &'a dyn SearchVolumeProvider,
        documents: &'a dyn DocumentCountProvider,
        cpc: Option<&'a dyn CpcProvider>,
        pacers: &'a mut Pacers,
    ) -> Self {
        Self {
            volume,
            documents,
            cpc,
            pacers,
        }
    }

    pub fn enrich(&mut self, candidate: &Candidate) -> Metrics {
        let keyword = candidate.text.as_str();

        self.pacers.wait(self.volume.backend());
        let search_volume = match self.volume.search_volume(keyword) {
            Ok(v) => v,
            Err(e) => {
                warn!(provider = self.volume.name(), keyword, error = %e, "search volume unavailable, using 0");
                0
            }
        };

        self.pacers.wait(self.documents.backend());
        let document_count = match self.documents.document_count(keyword) {
            Ok(d) => d.max(1),
            Err(e) => {
                warn!(provider = self.documents.name(), keyword, error = %e, "document count unavailable, using 1");
                1
            }
        };

        let cost_per_click = match self.cpc {
            Some(provider) => {
                self.pacers.wait(provider.backend());
                match provider.cost_per_click(keyword) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        warn!(provider = provider.name(), keyword, error = %e, "cpc unavailable");
                        None
                    }
                }
            }
            None => None,
        };

        debug!(keyword, search_volume, document_count, ?cost_per_click, "enriched");
        Metrics {
            search_volume,
            document_count,
            cost_per_click,
        }
    }
}
