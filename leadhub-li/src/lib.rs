//! leadhub-li - Lead Importer
//!
//! **Module Identity:**
//! - Name: leadhub-li (Lead Importer)
//! - Role: bulk ingestion of CSV-like lead batches into the LeadHub database
//!
//! Responsible for normalizing messy lead records (dates, intake terms,
//! countries, phone numbers, emails), applying counselor-assignment and
//! stage-derivation rules, persisting leads with their remarks and stage
//! history, and producing a per-row audit trail with downloadable reports.
//!
//! The pipeline never fails a whole batch: bad rows are isolated at row
//! scope, unexpected aborts at chunk scope, and everything is reported
//! through the returned batch summary.

pub mod config;
pub mod csv_input;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod store;

pub use error::ImportError;
pub use pipeline::{run_import, ImportOptions};
