//! Lead creation date normalization
//!
//! Accepts ISO timestamps directly, rewrites the common regional formats
//! (`DD/MM/YYYY`, `DD-MM-YYYY`, `YYYYMMDD`), and falls back to the import
//! time when nothing parses. A row is never failed over a date.

use super::RowLog;
use crate::models::FieldIssueMap;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const FIELD: &str = "leadCreatedDate";

/// Normalize the lead creation date, defaulting to "now" when absent or
/// unparseable
pub fn normalize_lead_created_date(
    raw: Option<&str>,
    log: &mut RowLog,
    issues: &mut FieldIssueMap,
) -> DateTime<Utc> {
    let raw = match raw {
        Some(value) => value.trim(),
        None => {
            log.fix("leadCreatedDate missing, defaulted to import time");
            return Utc::now();
        }
    };

    if let Some(parsed) = parse_direct(raw) {
        return parsed;
    }

    if let Some(parsed) = parse_rewritten(raw) {
        log.fix(format!(
            "Reformatted leadCreatedDate '{}' to '{}'",
            raw,
            parsed.format("%Y-%m-%d")
        ));
        return parsed;
    }

    log.warn_field(
        issues,
        FIELD,
        format!("Unparseable date '{}', defaulted to import time", raw),
    );
    log.fix("leadCreatedDate defaulted to import time");
    Utc::now()
}

/// Direct parse tier: RFC 3339 first, then the bare ISO shapes
fn parse_direct(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Rewrite tier, tried in order; first format that parses wins
fn parse_rewritten(value: &str) -> Option<DateTime<Utc>> {
    for format in ["%d/%m/%Y", "%d-%m-%Y", "%Y%m%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_iso_date_parses_directly_without_logs() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        let parsed = normalize_lead_created_date(Some("2024-12-31"), &mut log, &mut issues);

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap());
        assert!(log.fixes_applied.is_empty());
        assert!(log.warnings.is_empty());
    }

    #[test]
    fn test_rfc3339_timestamp_parses_directly() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        let parsed =
            normalize_lead_created_date(Some("2024-06-01T09:30:00Z"), &mut log, &mut issues);

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap());
        assert!(log.fixes_applied.is_empty());
    }

    #[test]
    fn test_day_first_slash_format_is_rewritten_with_fix() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        let parsed = normalize_lead_created_date(Some("31/12/2024"), &mut log, &mut issues);

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap());
        assert_eq!(log.fixes_applied.len(), 1);
        assert!(log.fixes_applied[0].contains("2024-12-31"));
        assert!(log.warnings.is_empty());
    }

    #[test]
    fn test_compact_format_is_rewritten() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        let parsed = normalize_lead_created_date(Some("20240615"), &mut log, &mut issues);

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
        assert_eq!(log.fixes_applied.len(), 1);
    }

    #[test]
    fn test_garbage_defaults_to_now_with_warning_fix_and_tally() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        let parsed = normalize_lead_created_date(Some("next tuesday"), &mut log, &mut issues);

        assert_eq!(parsed.year(), Utc::now().year());
        assert_eq!(log.warnings.len(), 1);
        assert!(log.warnings[0].contains("next tuesday"));
        assert_eq!(log.fixes_applied.len(), 1);
        assert_eq!(issues[FIELD].count, 1);
    }

    #[test]
    fn test_missing_defaults_to_now_with_fix_only() {
        let mut log = RowLog::default();
        let mut issues = FieldIssueMap::new();

        normalize_lead_created_date(None, &mut log, &mut issues);

        assert_eq!(log.fixes_applied.len(), 1);
        assert!(log.warnings.is_empty());
        assert!(issues.is_empty());
    }
}
