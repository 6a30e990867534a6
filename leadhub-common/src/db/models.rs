//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a CRM user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Counselor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Counselor => "counselor",
        }
    }

    /// Parse the database representation; unknown text maps to Counselor
    /// so a roster row with a bad role never aborts a roster load.
    pub fn parse(value: &str) -> UserRole {
        match value.trim().to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            _ => UserRole::Counselor,
        }
    }
}

/// CRM user (administrator or counselor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

/// Fields for a lead row to be inserted by the importer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub intake: Option<String>,
    pub source: Option<String>,
    pub passport_status: Option<String>,
    pub counselor_id: Option<i64>,
    pub current_stage: String,
    pub lead_created_date: DateTime<Utc>,
}

/// Fields for a remark attached to a lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRemark {
    pub lead_id: i64,
    pub author_id: Option<i64>,
    pub body: String,
    /// Provenance tag, e.g. "bulk-import" for pipeline-created remarks
    pub origin: String,
}

/// Fields for one stage transition record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStageHistory {
    pub lead_id: i64,
    /// None for the initial transition of a freshly imported lead
    pub from_stage: Option<String>,
    pub to_stage: String,
    pub changed_by: Option<i64>,
    pub changed_at: DateTime<Utc>,
}
