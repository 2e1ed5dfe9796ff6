//! Golden score, efficiency, and grade tiers.
//!
//! The score rewards demand (capped at 60 points for 5,000 monthly searches)
//! and low competition (up to 40 bonus points), then adjusts by how many
//! documents exist per search:
//!
//! 1. `volume == 0` scores `0` with efficiency [`EFFICIENCY_SENTINEL`].
//! 2. `demand = min(volume / 5000 * 60, 60)`.
//! 3. Bonus `+40 / +30 / +10 / +0` for fewer than `1k / 5k / 10k / more` documents.
//! 4. More than 50,000 documents caps the score at 20; otherwise efficiency
//!    above 2 halves it, above 1 multiplies by 0.8, and anything lower adds 10.
//! 5. Round to one decimal, ties to even.
//!
//! The final `+10` can push the score past 100. [`ScoringConfig::clamp_score`]
//! caps it when enabled.

use goldkey_shared::{Candidate, EFFICIENCY_SENTINEL, Grade, Metrics, ScoredCandidate, ScoringConfig};

const DEMAND_SATURATION: f64 = 5_000.0;
const DEMAND_WEIGHT: f64 = 60.0;

const SATURATED_DOCUMENTS: u64 = 50_000;
const SATURATED_CAP: f64 = 20.0;
const MAX_SCORE: f64 = 100.0;

const DIAMOND_MIN: f64 = 60.0;
const GOLD_MIN: f64 = 40.0;
const SILVER_MIN: f64 = 20.0;

/// Competition bonus by document count.
fn competition_bonus(documents: u64) -> f64 {
    match documents {
        0..1_000 => 40.0,
        1_000..5_000 => 30.0,
        5_000..10_000 => 10.0,
        _ => 0.0,
    }
}

/// Round to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Golden score for a volume/document pair, rounded to one decimal. Unclamped.
pub fn golden_score(volume: u64, documents: u64) -> f64 {
    if volume == 0 {
        return 0.0;
    }
    let documents = documents.max(1);

    let demand = (volume as f64 / DEMAND_SATURATION * DEMAND_WEIGHT).min(DEMAND_WEIGHT);
    let mut score = demand + competition_bonus(documents);
    let efficiency = documents as f64 / volume as f64;

    if documents > SATURATED_DOCUMENTS {
        score = score.min(SATURATED_CAP);
    } else if efficiency > 2.0 {
        score *= 0.5;
    } else if efficiency > 1.0 {
        score *= 0.8;
    } else {
        score += 10.0;
    }

    round_to(score, 1)
}

/// Documents per search, rounded to two decimals, or the sentinel for zero volume.
pub fn reported_efficiency(volume: u64, documents: u64) -> f64 {
    if volume == 0 {
        return EFFICIENCY_SENTINEL;
    }
    round_to(documents.max(1) as f64 / volume as f64, 2)
}

/// `(score, reported efficiency)` for one pair.
pub fn score(volume: u64, documents: u64) -> (f64, f64) {
    (golden_score(volume, documents), reported_efficiency(volume, documents))
}

/// Grade tier for a score. Lower bounds are inclusive.
pub fn grade_for(score: f64) -> Grade {
    if score >= DIAMOND_MIN {
        Grade::Diamond
    } else if score >= GOLD_MIN {
        Grade::Gold
    } else if score >= SILVER_MIN {
        Grade::Silver
    } else {
        Grade::Normal
    }
}

/// Score a candidate under the configured policy.
pub fn score_candidate(candidate: Candidate, metrics: Metrics, policy: &ScoringConfig) -> ScoredCandidate {
    let (raw, efficiency) = score(metrics.search_volume, metrics.document_count);
    let value = if policy.clamp_score { raw.min(MAX_SCORE) } else { raw };

    ScoredCandidate {
        candidate,
        metrics,
        score: value,
        efficiency,
        grade: grade_for(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldkey_shared::{Origin, Source};

    fn candidate() -> Candidate {
        Candidate {
            text: "캠핑 의자".into(),
            canonical: "캠핑의자".into(),
            source: Source::Naver,
            origin: Origin::Seed,
        }
    }

    fn metrics(volume: u64, documents: u64) -> Metrics {
        Metrics {
            search_volume: volume,
            document_count: documents,
            cost_per_click: None,
        }
    }

    #[test]
    fn high_demand_low_competition() {
        assert_eq!(score(20_000, 800), (110.0, 0.04));
        assert_eq!(grade_for(110.0), Grade::Diamond);
    }

    #[test]
    fn saturated_documents_cap_at_twenty() {
        assert_eq!(score(10_000, 60_000), (20.0, 6.0));
        assert_eq!(grade_for(20.0), Grade::Silver);
    }

    #[test]
    fn zero_volume_scores_zero() {
        assert_eq!(score(0, 5_000), (0.0, EFFICIENCY_SENTINEL));
        assert_eq!(score(0, 0), (0.0, 999.99));
        assert_eq!(grade_for(0.0), Grade::Normal);
    }

    #[test]
    fn zero_documents_treated_as_one() {
        assert_eq!(score(5_000, 0), score(5_000, 1));
        assert_eq!(reported_efficiency(4, 0), 0.25);
    }

    #[test]
    fn efficiency_bands_adjust_score() {
        // demand 12, bonus 30, efficiency 2.5 -> halved
        assert_eq!(golden_score(1_000, 2_500), 21.0);
        // demand 12, bonus 30, efficiency 1.5 -> x0.8
        assert_eq!(golden_score(1_000, 1_500), 33.6);
        // demand 12, bonus 40, efficiency 0.5 -> +10
        assert_eq!(golden_score(1_000, 500), 62.0);
        // exactly 2.0 is not above 2
        assert_eq!(golden_score(1_000, 2_000), 33.6);
    }

    #[test]
    fn efficiency_ties_round_to_even() {
        assert_eq!(reported_efficiency(8_000, 1_000), 0.12);
        assert_eq!(reported_efficiency(8_000, 5_000), 0.62);
        assert_eq!(reported_efficiency(8_000, 3_000), 0.38);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
    }

    #[test]
    fn competition_bonus_boundaries() {
        assert_eq!(competition_bonus(0), 40.0);
        assert_eq!(competition_bonus(999), 40.0);
        assert_eq!(competition_bonus(1_000), 30.0);
        assert_eq!(competition_bonus(4_999), 30.0);
        assert_eq!(competition_bonus(5_000), 10.0);
        assert_eq!(competition_bonus(9_999), 10.0);
        assert_eq!(competition_bonus(10_000), 0.0);
    }

    #[test]
    fn fifty_thousand_documents_is_not_saturated() {
        // demand 60, bonus 0, efficiency 0.5 -> +10
        assert_eq!(golden_score(100_000, 50_000), 70.0);
        assert_eq!(golden_score(100_000, 50_001), 20.0);
    }

    #[test]
    fn grade_boundaries_are_inclusive() {
        assert_eq!(grade_for(60.0), Grade::Diamond);
        assert_eq!(grade_for(59.9), Grade::Gold);
        assert_eq!(grade_for(60.1), Grade::Diamond);
        assert_eq!(grade_for(40.0), Grade::Gold);
        assert_eq!(grade_for(39.9), Grade::Silver);
        assert_eq!(grade_for(40.1), Grade::Gold);
        assert_eq!(grade_for(20.0), Grade::Silver);
        assert_eq!(grade_for(19.9), Grade::Normal);
        assert_eq!(grade_for(20.1), Grade::Silver);
    }

    #[test]
    fn score_is_deterministic() {
        for (v, d) in [(1, 1), (3_333, 7_777), (123_456, 654), (17, 49_999)] {
            assert_eq!(score(v, d).0.to_bits(), score(v, d).0.to_bits());
        }
    }

    #[test]
    fn clamp_policy_caps_at_hundred() {
        let unclamped = score_candidate(candidate(), metrics(20_000, 800), &ScoringConfig::default());
        assert_eq!(unclamped.score, 110.0);

        let policy = ScoringConfig {
            clamp_score: true,
            ..ScoringConfig::default()
        };
        let clamped = score_candidate(candidate(), metrics(20_000, 800), &policy);
        assert_eq!(clamped.score, 100.0);
        assert_eq!(clamped.grade, Grade::Diamond);
        assert_eq!(clamped.efficiency, 0.04);
    }

    #[test]
    fn scored_candidate_keeps_metrics() {
        let scored = score_candidate(candidate(), metrics(0, 5_000), &ScoringConfig::default());
        assert_eq!(scored.score, 0.0);
        assert_eq!(scored.efficiency, 999.99);
        assert_eq!(scored.grade, Grade::Normal);
        assert_eq!(scored.metrics.document_count, 5_000);
    }
}
