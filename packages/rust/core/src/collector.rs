//! Seed collection across all configured providers.

use tracing::{error, info, instrument, warn};

use goldkey_providers::SeedProvider;
use goldkey_shared::{Candidate, Origin, SeedKeyword};

use crate::normalize::{self, SeenSet};

/// Collect raw seeds from every provider in registration order.
///
/// A failing provider contributes nothing and is logged; collection never fails.
#[instrument(skip_all, fields(providers = providers.len()))]
pub fn collect_seeds(providers: &[Box<dyn SeedProvider>]) -> Vec<SeedKeyword> {
    let mut seeds = Vec::new();

    for provider in providers {
        match provider.collect() {
            Ok(batch) => {
                info!(provider = provider.name(), count = batch.len(), "collected seeds");
                seeds.extend(batch);
            }
            Err(e) if e.is_provider_failure() => {
                warn!(provider = provider.name(), error = %e, "seed provider failed, skipping");
            }
            Err(e) => {
                error!(provider = provider.name(), error = %e, "seed provider error, skipping");
            }
        }
    }

    seeds
}

/// Normalize raw seeds and admit the ones not yet in `seen`.
pub fn seed_candidates(seeds: Vec<SeedKeyword>, seen: &mut SeenSet) -> Vec<Candidate> {
    let normalized = seeds
        .into_iter()
        .filter_map(|s| normalize::normalize(&s.text, s.source, Origin::Seed));
    normalize::dedup(normalized, seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSeeds;
    use goldkey_shared::Source;

    #[test]
    fn failing_provider_is_skipped() {
        let providers: Vec<Box<dyn SeedProvider>> = vec![
            Box::new(FakeSeeds::new(Source::Naver, &["텐트", "캠핑 의자"])),
            Box::new(FakeSeeds::failing()),
            Box::new(FakeSeeds::new(Source::Coupang, &["제습기"])),
        ];

        let seeds = collect_seeds(&providers);
        let texts: Vec<&str> = seeds.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["텐트", "캠핑 의자", "제습기"]);
    }

    #[test]
    fn no_providers_yield_no_seeds() {
        assert!(collect_seeds(&[]).is_empty());
    }

    #[test]
    fn seed_candidates_normalize_and_dedup() {
        let seeds = vec![
            SeedKeyword::new("캠핑 의자 경량 접이식", Source::Coupang),
            SeedKeyword::new("  ", Source::Coupang),
            SeedKeyword::new("캠핑의자경량", Source::Naver),
            SeedKeyword::new("텐트", Source::Naver),
        ];
        let mut seen = SeenSet::new();
        let candidates = seed_candidates(seeds, &mut seen);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "캠핑 의자 경량");
        assert_eq!(candidates[0].source, Source::Coupang);
        assert!(candidates.iter().all(|c| c.origin == Origin::Seed));
    }
}
