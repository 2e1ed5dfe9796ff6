//! One-hop related-keyword expansion.

use tracing::{debug, warn};

use goldkey_providers::RelatedKeywordProvider;
use goldkey_shared::{Candidate, Origin};

use crate::normalize::{self, SeenSet};
use crate::pacing::Pacers;

/// Related keywords taken per seed.
pub const DEFAULT_EXPANSION_LIMIT: usize = 3;

/// Expands seeds through a related-keyword provider.
pub struct Expander<'a> {
    provider: &'a dyn RelatedKeywordProvider,
    limit: usize,
    pacers: &'a mut Pacers,
}

impl<'a> Expander<'a> {
    pub fn new(provider: &'a dyn RelatedKeywordProvider, limit: usize, pacers: &'a mut Pacers) -> Self {
        Self {
            provider,
            limit,
            pacers,
        }
    }

    /// Related candidates for `seed`, at most `limit` of them.
    ///
    /// The provider's first `limit` results are taken, then passed through the
    /// dedup gate, so duplicates reduce the count rather than being backfilled.
    /// Results inherit the seed's source. Provider failure yields nothing.
    pub fn expand(&mut self, seed: &Candidate, seen: &mut SeenSet) -> Vec<Candidate> {
        if seed.origin != Origin::Seed || self.limit == 0 {
            return Vec::new();
        }

        self.pacers.wait(self.provider.backend());
        let related = match self.provider.lookup(&seed.text) {
            Ok(related) => related,
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    keyword = %seed.text,
                    error = %e,
                    "related keyword lookup failed"
                );
                return Vec::new();
            }
        };

        let normalized = related
            .iter()
            .take(self.limit)
            .filter_map(|text| normalize::normalize(text, seed.source, Origin::Related));
        let admitted = normalize::dedup(normalized, seen);

        debug!(keyword = %seed.text, returned = related.len(), admitted = admitted.len(), "expanded");
        admitted
    }
}
