//! Importer error types
//!
//! The pipeline entry point rejects only structurally invalid input; all
//! data-level failure is reported through the batch summary instead.

use thiserror::Error;

/// Errors surfaced by the importer outside the per-row audit trail
#[derive(Error, Debug)]
pub enum ImportError {
    /// Chunk size of zero would make the batch loop undefined
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// CSV boundary failed to parse the uploaded file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure reading input or writing report artifacts
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
