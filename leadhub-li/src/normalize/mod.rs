//! Record validation and normalization
//!
//! `normalize_record` is the single boundary that turns an untyped
//! `RawLeadRecord` into a typed `NormalizedLead`. All "is this field present
//! and non-blank" branching lives here; the per-field normalizers in the
//! submodules are pure functions over one raw value.
//!
//! Nothing in this module fails for missing or malformed input data. Bad
//! values are substituted or dropped with a matching entry in the row log,
//! so downstream stages always see a complete lead.

pub mod country;
pub mod date;
pub mod email;
pub mod intake;
pub mod phone;

use crate::models::{record_field_issue, FieldIssueMap, NormalizedLead, RawLeadRecord};
use chrono::Utc;

/// Sentinel substituted for a missing required name
pub const DEFAULT_NAME: &str = "Unknown Student";

/// Working log for one row, folded into the row's `RowAuditLog` afterwards
#[derive(Debug, Default, Clone)]
pub struct RowLog {
    pub fixes_applied: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl RowLog {
    /// Record an automatic, non-destructive correction
    pub fn fix(&mut self, message: impl Into<String>) {
        self.fixes_applied.push(message.into());
    }

    /// Record a warning and tally it against the field
    pub fn warn_field(&mut self, issues: &mut FieldIssueMap, field: &str, message: String) {
        record_field_issue(issues, field, &message);
        self.warnings.push(message);
    }

    /// Record a recoverable error and tally it against the field
    pub fn error_field(&mut self, issues: &mut FieldIssueMap, field: &str, message: String) {
        record_field_issue(issues, field, &message);
        self.errors.push(message);
    }
}

/// Raw field value, untrimmed, treated as absent when blank
pub(crate) fn raw_field<'a>(record: &'a RawLeadRecord, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// First present non-blank value among aliases, checked in order
pub(crate) fn first_raw_field<'a>(record: &'a RawLeadRecord, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| raw_field(record, key))
}

fn passthrough(record: &RawLeadRecord, keys: &[&str]) -> Option<String> {
    first_raw_field(record, keys).map(|value| value.trim().to_string())
}

/// Normalize one raw record into a `NormalizedLead`, appending every fix,
/// warning, and recoverable error to `log` and the batch tally
pub fn normalize_record(
    record: &RawLeadRecord,
    log: &mut RowLog,
    issues: &mut FieldIssueMap,
) -> NormalizedLead {
    let uid = match raw_field(record, "uid") {
        Some(value) => value.trim().to_string(),
        None => {
            let generated = format!("LEAD-{}", Utc::now().timestamp_millis());
            log.fix(format!("uid missing, generated '{}'", generated));
            generated
        }
    };

    // The alias field wins over the generic one when both are present
    let name = match first_raw_field(record, &["studentName", "name"]) {
        Some(value) => value.trim().to_string(),
        None => {
            log.error_field(issues, "name", "Missing required field 'name'".to_string());
            log.fix(format!("name defaulted to '{}'", DEFAULT_NAME));
            DEFAULT_NAME.to_string()
        }
    };

    // An explicit stage is honored verbatim later; absence is recoverable
    // and leaves derivation to the rule engine
    let current_stage_requested = match raw_field(record, "currentStage") {
        Some(value) => Some(value.trim().to_string()),
        None => {
            log.error_field(
                issues,
                "currentStage",
                "Missing required field 'currentStage'".to_string(),
            );
            log.fix("currentStage defaulted to 'Yet to Assign'");
            None
        }
    };

    let lead_created_date =
        date::normalize_lead_created_date(raw_field(record, "leadCreatedDate"), log, issues);
    let intake = intake::normalize_intake(raw_field(record, "intake"), log, issues);
    let country = country::normalize_country(raw_field(record, "country"), log, issues);
    let phone = phone::normalize_phone(first_raw_field(record, &["mobileNumber", "phone"]), log, issues);
    let email = email::normalize_email(raw_field(record, "email"), log, issues);

    NormalizedLead {
        uid,
        name,
        current_stage_requested,
        lead_created_date,
        intake,
        country,
        phone,
        email,
        source: passthrough(record, &["source"]),
        passport_status: passthrough(record, &["passportStatus"]),
        remarks_text: passthrough(record, &["remarksText", "remarks"]),
        counsellor_name_hint: passthrough(record, &["counsellorNameHint", "counsellor", "counselor"]),
    }
}
