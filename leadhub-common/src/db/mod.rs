//! Database layer: models and schema initialization

#[cfg(feature = "sqlx")]
pub mod init;
pub mod models;
