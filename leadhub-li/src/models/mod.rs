//! Importer data model: raw records, audit log, batch summary

pub mod audit;
pub mod normalized;

use std::collections::BTreeMap;

pub use audit::{
    merge_field_issues, record_field_issue, BatchSummary, DownloadableReports, FieldIssueMap,
    FieldIssueTally, ImportOutcome, RowAuditLog, RowStatus,
};
pub use normalized::{NormalizedLead, NormalizedRow};

/// One raw lead exactly as received from the input source.
///
/// An ordered map of field name to string value with no shape guarantees;
/// any field may be missing or malformed. The record normalizer is the only
/// boundary that converts this into a typed value.
pub type RawLeadRecord = BTreeMap<String, String>;
