//! Shared types, error model, and configuration for goldkey.
//!
//! This crate is the foundation depended on by all other goldkey crates.
//! It provides:
//! - [`GoldkeyError`]: the unified error type
//! - Domain types ([`Candidate`], [`Metrics`], [`ScoredCandidate`], [`ReportDataset`])
//! - Configuration ([`AppConfig`], [`PipelineConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, KeywordToolConfig, NaverConfig, PipelineConfig, ScoringConfig,
    SourceConfig, TieBreak, config_dir, config_file_path, init_config, load_config,
    load_config_from, read_credential,
};
pub use error::{GoldkeyError, Result};
pub use types::{
    BLUE_OCEAN_MAX, Candidate, EFFICIENCY_SENTINEL, Grade, KeywordRecord, Metrics, Origin, ReportDataset,
    RED_OCEAN_MIN, ReportSummary, RunId, ScoredCandidate, SeedKeyword, Source,
};
