//! Ranking and run-level aggregates.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use goldkey_shared::{
    BLUE_OCEAN_MAX, EFFICIENCY_SENTINEL, Grade, RED_OCEAN_MIN, ReportDataset, ReportSummary,
    ScoredCandidate, TieBreak,
};

use crate::scoring;

/// Sort by score descending, breaking ties per `tie_break`. Stable.
pub fn rank(entries: &mut [ScoredCandidate], tie_break: TieBreak) {
    entries.sort_by(|a, b| {
        let by_score = b.score.total_cmp(&a.score);
        match tie_break {
            TieBreak::ScoreOnly => by_score,
            TieBreak::VolumeThenKeyword => by_score
                .then_with(|| b.metrics.search_volume.cmp(&a.metrics.search_volume))
                .then_with(|| a.candidate.canonical.cmp(&b.candidate.canonical)),
        }
    });
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    scoring::round_to(sum / count as f64, 2)
}

/// Aggregate counts and means over ranked entries.
pub fn summarize(entries: &[ScoredCandidate]) -> ReportSummary {
    let mut summary = ReportSummary {
        total: entries.len(),
        ..ReportSummary::default()
    };

    let mut volume_sum = 0.0;
    let mut efficiency_sum = 0.0;
    let mut efficiency_count = 0usize;

    for entry in entries {
        match entry.grade {
            Grade::Diamond => summary.diamond += 1,
            Grade::Gold => summary.gold += 1,
            Grade::Silver => summary.silver += 1,
            Grade::Normal => summary.normal += 1,
        }

        if entry.efficiency < BLUE_OCEAN_MAX {
            summary.blue_ocean += 1;
        } else if entry.efficiency > RED_OCEAN_MIN {
            summary.red_ocean += 1;
        }

        volume_sum += entry.metrics.search_volume as f64;
        if entry.efficiency != EFFICIENCY_SENTINEL {
            efficiency_sum += entry.efficiency;
            efficiency_count += 1;
        }
    }

    summary.average_volume = mean(volume_sum, entries.len());
    summary.average_efficiency = mean(efficiency_sum, efficiency_count);
    summary
}

/// Rank scored candidates and wrap them with aggregates into a dataset.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn assemble(
    mut entries: Vec<ScoredCandidate>,
    tie_break: TieBreak,
    generated_at: DateTime<Utc>,
) -> ReportDataset {
    rank(&mut entries, tie_break);
    let summary = summarize(&entries);

    info!(
        total = summary.total,
        diamond = summary.diamond,
        gold = summary.gold,
        blue_ocean = summary.blue_ocean,
        "assembled dataset"
    );

    ReportDataset::new(generated_at, entries, summary)
}

/// `true` if `entries` is non-increasing in score.
pub fn is_ranked(entries: &[ScoredCandidate]) -> bool {
    entries
        .windows(2)
        .all(|w| w[0].score.total_cmp(&w[1].score) != Ordering::Less)
}
