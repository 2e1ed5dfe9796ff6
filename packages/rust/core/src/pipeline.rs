//! End-to-end run: collect → dedup → expand → enrich → score → rank.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument};

use goldkey_providers::{
    CpcProvider, DocumentCountProvider, RelatedKeywordProvider, SearchVolumeProvider, SeedProvider,
};
use goldkey_shared::{Candidate, Origin, PipelineConfig, ReportDataset};

use crate::assembler;
use crate::collector;
use crate::enrichment::MetricsEnricher;
use crate::expansion::Expander;
use crate::normalize::SeenSet;
use crate::pacing::Pacers;
use crate::scoring;

/// Every collaborator the pipeline talks to.
pub struct Providers {
    /// Queried in order; order decides which duplicate wins.
    pub seeds: Vec<Box<dyn SeedProvider>>,
    pub related: Box<dyn RelatedKeywordProvider>,
    pub volume: Box<dyn SearchVolumeProvider>,
    pub documents: Box<dyn DocumentCountProvider>,
    pub cpc: Option<Box<dyn CpcProvider>>,
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub dataset: ReportDataset,
    /// Seed candidates that survived dedup.
    pub seed_count: usize,
    /// Related candidates admitted by expansion.
    pub related_count: usize,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each candidate's metrics are fetched.
    fn candidate_enriched(&self, keyword: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn candidate_enriched(&self, _keyword: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the keyword pipeline.
///
/// Every provider failure degrades to defaults, so a run always produces a
/// dataset (possibly empty).
#[instrument(skip_all, fields(seed_providers = providers.seeds.len(), expand = config.expand))]
pub fn run(
    config: &PipelineConfig,
    providers: &Providers,
    progress: &dyn ProgressReporter,
) -> RunResult {
    let start = Instant::now();
    info!("starting keyword pipeline");

    let mut seen = SeenSet::new();
    let mut pacers = Pacers::new(config.request_delay);

    // --- Phase 1: Seeds ---
    progress.phase("Collecting seed keywords");
    let raw = collector::collect_seeds(&providers.seeds);
    let seeds = collector::seed_candidates(raw, &mut seen);
    info!(seeds = seeds.len(), "seed candidates after dedup");

    // --- Phase 2: Expansion ---
    let mut pool: Vec<Candidate> = Vec::with_capacity(seeds.len() * (config.expansion_limit + 1));
    let seed_count = seeds.len();
    if config.expand {
        progress.phase("Expanding related keywords");
        let mut expander = Expander::new(
            &*providers.related,
            config.expansion_limit,
            &mut pacers,
        );
        for seed in seeds {
            let related = expander.expand(&seed, &mut seen);
            pool.push(seed);
            pool.extend(related);
        }
    } else {
        pool.extend(seeds);
    }
    let related_count = pool.iter().filter(|c| c.origin == Origin::Related).count();
    info!(related = related_count, total = pool.len(), "candidate pool ready");

    // --- Phase 3: Enrichment + scoring ---
    progress.phase("Fetching keyword metrics");
    let mut enricher = MetricsEnricher::new(
        &*providers.volume,
        &*providers.documents,
        providers.cpc.as_deref(),
        &mut pacers,
    );
    let total = pool.len();
    let scored: Vec<_> = pool
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| {
            let metrics = enricher.enrich(&candidate);
            progress.candidate_enriched(&candidate.text, i + 1, total);
            scoring::score_candidate(candidate, metrics, &config.scoring)
        })
        .collect();

    // --- Phase 4: Ranking ---
    progress.phase("Ranking keywords");
    let dataset = assembler::assemble(scored, config.scoring.tie_break, Utc::now());

    let result = RunResult {
        dataset,
        seed_count,
        related_count,
        elapsed: start.elapsed(),
    };

    info!(
        run = %result.dataset.run_id(),
        keywords = result.dataset.summary().total,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "pipeline complete"
    );
    progress.done(&result);
    result
}
