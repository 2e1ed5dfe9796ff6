//! `data.json` report document for a ranked keyword dataset.
//!
//! The document carries the stable keyword records plus run aggregates and
//! two prose summaries. HTML rendering and archives live outside this crate.

pub mod summary;

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use goldkey_shared::{GoldkeyError, KeywordRecord, ReportDataset, ReportSummary, Result, RunId};

pub use summary::{group_thousands, keyword_review, seo_summary};

/// Report file name inside the output directory.
pub const REPORT_FILE_NAME: &str = "data.json";

/// Reports are stamped in Korea Standard Time.
const KST_OFFSET_SECS: i32 = 9 * 3600;

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("valid KST offset")
}

/// The serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// RFC 3339 timestamp with a `+09:00` offset.
    pub generated_at: DateTime<FixedOffset>,
    pub run_id: RunId,
    pub summary: ReportSummary,
    pub seo_summary: String,
    pub keyword_review: String,
    pub keywords: Vec<KeywordRecord>,
}

/// Build the report document for `dataset`.
pub fn build_document(dataset: &ReportDataset) -> ReportDocument {
    let generated_at = dataset.generated_at().with_timezone(&kst());
    let date = generated_at.format("%Y년 %m월 %d일").to_string();
    let keywords = dataset.records();

    ReportDocument {
        generated_at,
        run_id: dataset.run_id().clone(),
        summary: dataset.summary().clone(),
        seo_summary: seo_summary(&keywords, &date),
        keyword_review: keyword_review(&keywords),
        keywords,
    }
}

/// Write `doc` as pretty-printed `data.json` under `dir`, creating `dir` if needed.
///
/// The file is written to a temp name and renamed into place, so readers
/// never see a partial report. Returns the final path.
#[instrument(skip_all, fields(dir = %dir.display(), keywords = doc.keywords.len()))]
pub fn write_report(dir: &Path, doc: &ReportDocument) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| GoldkeyError::io(dir, e))?;

    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| GoldkeyError::validation(format!("JSON serialization failed: {e}")))?;

    let target = dir.join(REPORT_FILE_NAME);
    let temp = dir.join(format!(".{REPORT_FILE_NAME}.tmp"));

    std::fs::write(&temp, json).map_err(|e| GoldkeyError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| GoldkeyError::io(&target, e))?;

    info!(path = %target.display(), "wrote report");
    Ok(target)
}
