//! Core domain types for the keyword pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reported efficiency when a keyword has no measurable search volume.
pub const EFFICIENCY_SENTINEL: f64 = 999.99;

/// Efficiency below this is a blue ocean.
pub const BLUE_OCEAN_MAX: f64 = 1.0;

/// Efficiency above this is a red ocean.
pub const RED_OCEAN_MIN: f64 = 5.0;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one pipeline run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Where a seed keyword originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Naver,
    Coupang,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Naver => "NAVER",
            Self::Coupang => "COUPANG",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a candidate came straight from a collector or from expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    Seed,
    Related,
}

// ---------------------------------------------------------------------------
// Candidates and metrics
// ---------------------------------------------------------------------------

/// Raw keyword emitted by a seed provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKeyword {
    pub text: String,
    pub source: Source,
}

impl SeedKeyword {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// A normalized keyword under consideration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Display keyword, already truncated to its first three tokens.
    pub text: String,
    /// Whitespace-free identity key. Unique within a run.
    pub canonical: String,
    /// Provenance of the originating seed (inherited by related keywords).
    pub source: Source,
    pub origin: Origin,
}

/// Demand and competition figures attached after enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    /// Monthly search volume; `0` when unknown or unavailable.
    pub search_volume: u64,
    /// Indexed document count; always `>= 1` once normalized.
    pub document_count: u64,
    /// Cost per click, when a CPC provider answered.
    pub cost_per_click: Option<u64>,
}

// ---------------------------------------------------------------------------
// Scoring output
// ---------------------------------------------------------------------------

/// Grade tier derived from the golden score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Diamond,
    Gold,
    Silver,
    Normal,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diamond => "DIAMOND",
            Self::Gold => "GOLD",
            Self::Silver => "SILVER",
            Self::Normal => "NORMAL",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate with its metrics and derived score fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub metrics: Metrics,
    pub score: f64,
    /// Reported efficiency (2 decimals, or [`EFFICIENCY_SENTINEL`]).
    pub efficiency: f64,
    pub grade: Grade,
}

impl ScoredCandidate {
    /// The stable record handed to rendering and persistence.
    pub fn to_record(&self) -> KeywordRecord {
        KeywordRecord {
            source: self.candidate.source,
            keyword: self.candidate.text.clone(),
            golden_score: self.score,
            grade: self.grade,
            search_volume: self.metrics.search_volume,
            blog_count: self.metrics.document_count,
            efficiency: self.efficiency,
        }
    }
}

/// One keyword row as written to `data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub source: Source,
    pub keyword: String,
    pub golden_score: f64,
    pub grade: Grade,
    pub search_volume: u64,
    pub blog_count: u64,
    pub efficiency: f64,
}

// ---------------------------------------------------------------------------
// ReportDataset
// ---------------------------------------------------------------------------

/// Run-level aggregates over the ranked keywords.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub diamond: usize,
    pub gold: usize,
    pub silver: usize,
    pub normal: usize,
    /// Keywords with efficiency below [`BLUE_OCEAN_MAX`].
    pub blue_ocean: usize,
    /// Keywords with efficiency above [`RED_OCEAN_MIN`], the no-volume sentinel included.
    pub red_ocean: usize,
    pub average_volume: f64,
    /// Mean efficiency, ignoring the no-volume sentinel.
    pub average_efficiency: f64,
}

/// The ranked, scored output of one run. Read-only once assembled.
#[derive(Debug, Clone)]
pub struct ReportDataset {
    run_id: RunId,
    generated_at: DateTime<Utc>,
    entries: Vec<ScoredCandidate>,
    summary: ReportSummary,
}

impl ReportDataset {
    pub fn new(
        generated_at: DateTime<Utc>,
        entries: Vec<ScoredCandidate>,
        summary: ReportSummary,
    ) -> Self {
        Self {
            run_id: RunId::new(),
            generated_at,
            entries,
            summary,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn entries(&self) -> &[ScoredCandidate] {
        &self.entries
    }

    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in ranked order.
    pub fn records(&self) -> Vec<KeywordRecord> {
        self.entries.iter().map(ScoredCandidate::to_record).collect()
    }
}
