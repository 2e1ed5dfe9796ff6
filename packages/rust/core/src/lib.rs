//! Keyword discovery pipeline for goldkey.
//!
//! Seeds are collected, normalized and deduplicated, expanded one hop,
//! enriched with demand/competition metrics, scored, and ranked into a
//! [`goldkey_shared::ReportDataset`].

pub mod assembler;
pub mod collector;
pub mod enrichment;
pub mod expansion;
pub mod normalize;
pub mod pacing;
pub mod pipeline;
pub mod scoring;

#[cfg(test)]
pub(crate) mod testing;
