//! Intake term normalization
//!
//! Canonical form is `"<4-digit-year>-<Season>"`, e.g. "2025-Fall". The
//! year is pulled from anywhere in the input; the season comes from the
//! first keyword found as a substring. Missing parts are defaulted (next
//! calendar year, Fall) with fixes logged.

use super::RowLog;
use crate::models::FieldIssueMap;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("year pattern"));

/// Keyword table, matched first-hit as a substring of the lowercased input
const SEASON_KEYWORDS: &[(&str, &str)] = &[
    ("fall", "Fall"),
    ("autumn", "Fall"),
    ("sep", "Fall"),
    ("september", "Fall"),
    ("spring", "Spring"),
    ("jan", "Spring"),
    ("january", "Spring"),
    ("summer", "Summer"),
    ("may", "Summer"),
    ("jun", "Summer"),
    ("winter", "Winter"),
    ("dec", "Winter"),
    ("december", "Winter"),
];

/// Normalize an intake term to `"<year>-<Season>"`
pub fn normalize_intake(
    raw: Option<&str>,
    log: &mut RowLog,
    _issues: &mut FieldIssueMap,
) -> Option<String> {
    let trimmed = raw?.trim();
    let lowered = trimmed.to_lowercase();

    let year = match YEAR_RE.find(&lowered) {
        Some(found) => found.as_str().to_string(),
        None => {
            let next_year = (Utc::now().year() + 1).to_string();
            log.fix(format!(
                "Intake '{}' has no year, assumed {}",
                trimmed, next_year
            ));
            next_year
        }
    };

    let season = match SEASON_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
    {
        Some((_, season)) => season,
        None => {
            log.fix(format!("Intake '{}' has no season, assumed Fall", trimmed));
            "Fall"
        }
    };

    let normalized = format!("{}-{}", year, season);
    if normalized != trimmed {
        log.fix(format!("Normalized intake '{}' to '{}'", trimmed, normalized));
    }
    Some(normalized)
}
