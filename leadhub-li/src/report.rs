//! Downloadable report artifacts
//!
//! Two formats per run: a tabular CSV audit log and a line-delimited JSON
//! normalized-payload export. JSONL is deliberate: huge batches can be
//! consumed line by line downstream without loading the whole export.

use crate::models::{DownloadableReports, RowAuditLog};
use serde_json::json;

/// Render the validation log as CSV text.
///
/// Multi-value cells are joined with "; " and every cell is wrapped in
/// double quotes. Embedded quotes are not escaped beyond the wrapping; a
/// known limitation kept for compatibility with the existing consumers.
pub fn validation_log_csv(entries: &[RowAuditLog]) -> String {
    let mut out = String::new();
    push_csv_row(
        &mut out,
        ["Row Number", "Status", "Fixes Applied", "Warnings", "Errors"],
    );

    for entry in entries {
        push_csv_row(
            &mut out,
            [
                entry.row_number.to_string().as_str(),
                entry.status.as_str(),
                entry.fixes_applied.join("; ").as_str(),
                entry.warnings.join("; ").as_str(),
                entry.errors.join("; ").as_str(),
            ],
        );
    }

    out
}

fn push_csv_row(out: &mut String, cells: [&str; 5]) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        out.push_str(cell);
        out.push('"');
    }
    out.push('\n');
}

/// Render the normalized-payload export: one JSON object per line for every
/// entry that carries normalized data
pub fn normalized_payload_jsonl(entries: &[RowAuditLog]) -> String {
    let mut out = String::new();
    for entry in entries {
        if let Some(normalized) = &entry.normalized_data {
            let line = json!({
                "rowNumber": entry.row_number,
                "status": entry.status,
                "normalizedData": normalized,
            });
            out.push_str(&line.to_string());
            out.push('\n');
        }
    }
    out
}

/// Build both artifacts for one run
pub fn build_reports(entries: &[RowAuditLog]) -> DownloadableReports {
    DownloadableReports {
        validation_log: validation_log_csv(entries),
        normalized_payload: normalized_payload_jsonl(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedLead, NormalizedRow, RawLeadRecord, RowStatus};
    use chrono::{TimeZone, Utc};

    fn entry(row_number: usize, status: RowStatus, with_data: bool) -> RowAuditLog {
        let normalized_data = with_data.then(|| NormalizedRow {
            lead: NormalizedLead {
                uid: format!("LEAD-{}", row_number),
                name: "Asha Rao".to_string(),
                current_stage_requested: None,
                lead_created_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                intake: Some("2025-Fall".to_string()),
                country: Some("IN".to_string()),
                phone: None,
                email: None,
                source: None,
                passport_status: None,
                remarks_text: None,
                counsellor_name_hint: None,
            },
            counselor_id: Some(1),
            current_stage: "Ready to Contact".to_string(),
        });

        RowAuditLog {
            row_number,
            status,
            fixes_applied: vec!["fix one".to_string(), "fix two".to_string()],
            warnings: vec!["careful".to_string()],
            errors: vec![],
            original_data: RawLeadRecord::new(),
            normalized_data,
        }
    }

    #[test]
    fn test_csv_has_header_quoted_cells_and_joined_values() {
        let csv = validation_log_csv(&[entry(1, RowStatus::ImportedWithIssues, true)]);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"Row Number\",\"Status\",\"Fixes Applied\",\"Warnings\",\"Errors\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"1\",\"ImportedWithIssues\",\"fix one; fix two\",\"careful\",\"\""
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_has_one_data_row_per_entry() {
        let entries = vec![
            entry(1, RowStatus::Imported, true),
            entry(2, RowStatus::Failed, false),
            entry(3, RowStatus::Imported, true),
        ];
        let csv = validation_log_csv(&entries);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_jsonl_includes_only_entries_with_normalized_data() {
        let entries = vec![
            entry(1, RowStatus::Imported, true),
            entry(2, RowStatus::Failed, false),
            entry(3, RowStatus::ImportedWithIssues, true),
        ];
        let jsonl = normalized_payload_jsonl(&entries);

        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["rowNumber"], 1);
        assert_eq!(first["status"], "Imported");
        assert_eq!(first["normalizedData"]["uid"], "LEAD-1");
        assert_eq!(first["normalizedData"]["currentStage"], "Ready to Contact");
        assert_eq!(first["normalizedData"]["counselorId"], 1);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["rowNumber"], 3);
    }

    #[test]
    fn test_each_line_is_standalone_json_not_an_array() {
        let jsonl = normalized_payload_jsonl(&[
            entry(1, RowStatus::Imported, true),
            entry(2, RowStatus::Imported, true),
        ]);
        assert!(!jsonl.trim_start().starts_with('['));
        for line in jsonl.lines() {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }
}
