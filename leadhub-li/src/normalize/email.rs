//! Email normalization
//!
//! Lowercases and trims, then checks a simple `local@domain.tld` shape.
//! Invalid addresses are dropped to null with a warning; email is optional
//! and never blocks a row.

use super::RowLog;
use crate::models::FieldIssueMap;
use once_cell::sync::Lazy;
use regex::Regex;

const FIELD: &str = "email";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

/// Normalize an email address, dropping it when not RFC-shaped
pub fn normalize_email(
    raw: Option<&str>,
    log: &mut RowLog,
    issues: &mut FieldIssueMap,
) -> Option<String> {
    let raw = raw?;
    let cleaned = raw.trim().to_lowercase();

    if !EMAIL_RE.is_match(&cleaned) {
        log.warn_field(
            issues,
            FIELD,
            format!("Invalid email '{}', dropped", raw.trim()),
        );
        return None;
    }

    if cleaned != raw {
        log.fix(format!("Normalized email '{}' to '{}'", raw, cleaned));
    }
    Some(cleaned)
}
