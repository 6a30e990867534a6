//! # LeadHub Common Library
//!
//! Shared code for the LeadHub services including:
//! - Database models and schema initialization
//! - The pipeline stage vocabulary
//! - Common error types

pub mod db;
pub mod error;
pub mod stage;

pub use error::{Error, Result};
pub use stage::PipelineStage;
