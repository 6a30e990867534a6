//! Per-row audit log and batch statistics
//!
//! One `RowAuditLog` accumulates per input row; `BatchSummary` aggregates
//! the run. Counts always satisfy
//! `imported + imported_with_issues + failed == total_rows`.

use super::{NormalizedRow, RawLeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome classification of one processed row
///
/// `Failed` is driven solely by an unrecovered processing failure (store
/// rejection, chunk abort). Recoverable required-field substitutions land in
/// the row's `errors` list but still import with defaults, so a non-empty
/// `errors` list alone never means `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    /// Clean import, nothing to report
    Imported,
    /// Imported, but fixes were applied or warnings raised
    ImportedWithIssues,
    /// Processing failed; the lead was not persisted
    Failed,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Imported => "Imported",
            RowStatus::ImportedWithIssues => "ImportedWithIssues",
            RowStatus::Failed => "Failed",
        }
    }
}

/// Audit trail for one input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowAuditLog {
    /// 1-based position in the input batch
    pub row_number: usize,
    pub status: RowStatus,
    /// Automatic non-destructive corrections made to field values
    pub fixes_applied: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    /// The raw record verbatim
    pub original_data: RawLeadRecord,
    /// Normalized lead plus derived assignment; absent when the row never
    /// reached normalization (chunk-level failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_data: Option<NormalizedRow>,
}

/// Per-field issue aggregate across a whole batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIssueTally {
    /// Total detected problems for this field
    pub count: usize,
    /// First example messages, insertion order, never pruned once added
    pub samples: Vec<String>,
}

impl FieldIssueTally {
    /// Sample messages retained per field
    pub const MAX_SAMPLES: usize = 5;

    pub fn record(&mut self, message: &str) {
        self.count += 1;
        if self.samples.len() < Self::MAX_SAMPLES {
            self.samples.push(message.to_string());
        }
    }
}

/// Field name → issue tally, ordered for deterministic reports
pub type FieldIssueMap = BTreeMap<String, FieldIssueTally>;

/// Record one problem against a field name
pub fn record_field_issue(issues: &mut FieldIssueMap, field: &str, message: &str) {
    issues.entry(field.to_string()).or_default().record(message);
}

/// Fold a chunk's tally into the batch tally, preserving the sample cap
/// and insertion order
pub fn merge_field_issues(into: &mut FieldIssueMap, from: FieldIssueMap) {
    for (field, tally) in from {
        let entry = into.entry(field).or_default();
        entry.count += tally.count;
        for sample in tally.samples {
            if entry.samples.len() < FieldIssueTally::MAX_SAMPLES {
                entry.samples.push(sample);
            }
        }
    }
}

/// Aggregate statistics for one import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub imported_with_issues: usize,
    pub failed: usize,
    /// Wall-clock duration of the run in milliseconds
    pub processing_time_ms: u64,
    pub total_chunks: usize,
    pub successful_chunks: usize,
    pub failed_chunks: usize,
    pub field_issues: FieldIssueMap,
}

impl BatchSummary {
    pub fn display_string(&self) -> String {
        format!(
            "{} rows: {} imported, {} with issues, {} failed ({} chunks, {} ms)",
            self.total_rows,
            self.imported,
            self.imported_with_issues,
            self.failed,
            self.total_chunks,
            self.processing_time_ms
        )
    }
}

/// The two downloadable report artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadableReports {
    /// Tabular audit log (CSV text)
    pub validation_log: String,
    /// Line-delimited JSON normalized payload
    pub normalized_payload: String,
}

/// Full response of one pipeline run
///
/// `success` is unconditionally true: partial failure is represented in the
/// summary and per-row log, never as a top-level failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub success: bool,
    pub batch_summary: BatchSummary,
    pub validation_log: Vec<RowAuditLog>,
    pub downloadable_reports: DownloadableReports,
}
