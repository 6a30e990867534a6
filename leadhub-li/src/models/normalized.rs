//! Canonical lead representation produced by the record normalizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The validated, canonical form of one raw lead record.
///
/// Every field that failed strict validation has a corresponding entry in
/// the row's audit log; normalization never silently drops information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLead {
    /// Non-empty; generated from the current time when absent
    pub uid: String,
    /// Non-empty; sentinel default when absent (recorded as an error)
    pub name: String,
    /// Stage explicitly present in the input, if any (kept verbatim)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stage_requested: Option<String>,
    /// Defaults to the import time when absent or unparseable
    pub lead_created_date: DateTime<Utc>,
    /// Canonical `"<year>-<Season>"`, e.g. "2025-Fall"
    pub intake: Option<String>,
    /// ISO-3166 alpha-2 when recognized, else the original string
    pub country: Option<String>,
    /// Digits and a leading `+` only
    pub phone: Option<String>,
    /// Lowercase, trimmed; dropped when not RFC-shaped
    pub email: Option<String>,
    pub source: Option<String>,
    pub passport_status: Option<String>,
    pub remarks_text: Option<String>,
    pub counsellor_name_hint: Option<String>,
}

/// Normalized lead merged with the derived assignment, as exported in the
/// audit log and the normalized-payload report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRow {
    #[serde(flatten)]
    pub lead: NormalizedLead,
    /// Assigned counselor, when the rule engine found one
    pub counselor_id: Option<i64>,
    /// Final stage: the requested stage verbatim, or the derived sentinel
    pub current_stage: String,
}
