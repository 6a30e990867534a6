//! CSV upload boundary
//!
//! Turns an uploaded lead sheet into raw records for the pipeline. Header
//! names are mapped through a fixed alias table; unknown headers are kept,
//! lowercased. Blank cells are omitted so downstream absence handling
//! applies, and ragged rows are tolerated.

use crate::error::ImportError;
use crate::models::RawLeadRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Map one CSV header to its record field name
fn field_name(header: &str) -> String {
    match header.trim() {
        "Student Name" => "studentName".to_string(),
        "Lead Created Date" => "leadCreatedDate".to_string(),
        "MobileNumber" => "mobileNumber".to_string(),
        "Current Stage" => "currentStage".to_string(),
        "Passport Status" => "passportStatus".to_string(),
        other => other.to_lowercase(),
    }
}

/// Read raw lead records from a CSV file
pub fn read_raw_leads_from_path(path: &Path) -> Result<Vec<RawLeadRecord>, ImportError> {
    let file = File::open(path)?;
    read_raw_leads(file)
}

/// Read raw lead records from any CSV source with a header row
pub fn read_raw_leads<R: Read>(reader: R) -> Result<Vec<RawLeadRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let fields: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(field_name)
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut record = RawLeadRecord::new();
        for (field, value) in fields.iter().zip(row.iter()) {
            if !value.trim().is_empty() {
                record.insert(field.clone(), value.to_string());
            }
        }
        records.push(record);
    }

    Ok(records)
}
