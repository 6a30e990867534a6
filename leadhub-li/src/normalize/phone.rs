//! Phone normalization
//!
//! Keeps digits and a leading `+` only. Short numbers are flagged with a
//! warning but still returned; the lead is reachable through other fields.

use super::RowLog;
use crate::models::FieldIssueMap;

const FIELD: &str = "mobileNumber";
const MIN_DIGITS: usize = 10;

/// Strip formatting from a phone number
pub fn normalize_phone(
    raw: Option<&str>,
    log: &mut RowLog,
    issues: &mut FieldIssueMap,
) -> Option<String> {
    let trimmed = raw?.trim();

    let mut cleaned = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        cleaned.push('+');
    }
    cleaned.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));

    if cleaned != trimmed {
        log.fix(format!("Cleaned phone '{}' to '{}'", trimmed, cleaned));
    }

    let digit_count = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < MIN_DIGITS {
        log.warn_field(
            issues,
            FIELD,
            format!("Phone '{}' has fewer than {} digits", cleaned, MIN_DIGITS),
        );
    }

    Some(cleaned)
}
