//! Country normalization
//!
//! Maps the common names and abbreviations seen in lead sheets to ISO-3166
//! alpha-2 codes. Unknown countries are preserved as given with a warning,
//! never rejected.

use super::RowLog;
use crate::models::FieldIssueMap;

const FIELD: &str = "country";

/// Alias lookup over the lowercased, trimmed input
fn alias_to_iso(value: &str) -> Option<&'static str> {
    let code = match value {
        "us" | "usa" | "u.s." | "u.s.a." | "united states" | "united states of america"
        | "america" => "US",
        "uk" | "u.k." | "gb" | "united kingdom" | "great britain" | "britain" | "england" => "GB",
        "de" | "germany" | "deutschland" => "DE",
        "fr" | "france" => "FR",
        "in" | "india" => "IN",
        "cn" | "china" => "CN",
        "ca" | "canada" => "CA",
        "au" | "australia" => "AU",
        "jp" | "japan" => "JP",
        "kr" | "korea" | "south korea" => "KR",
        "br" | "brazil" => "BR",
        "mx" | "mexico" => "MX",
        "ru" | "russia" => "RU",
        _ => return None,
    };
    Some(code)
}

/// Normalize a country name to its ISO-2 code when recognized
pub fn normalize_country(
    raw: Option<&str>,
    log: &mut RowLog,
    issues: &mut FieldIssueMap,
) -> Option<String> {
    let trimmed = raw?.trim();
    let lowered = trimmed.to_lowercase();

    match alias_to_iso(&lowered) {
        Some(code) => {
            if code != trimmed {
                log.fix(format!("Normalized country '{}' to '{}'", trimmed, code));
            }
            Some(code.to_string())
        }
        None => {
            log.warn_field(
                issues,
                FIELD,
                format!("Unrecognized country '{}', kept as given", trimmed),
            );
            Some(trimmed.to_string())
        }
    }
}
