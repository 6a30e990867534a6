//! Persistence store contract and its SQLite implementation
//!
//! The pipeline only ever talks to `LeadStore`, so batch processing is
//! testable against in-memory doubles and deployable against SQLite. Every
//! method is fallible; the orchestrator catches failures at row scope.

use async_trait::async_trait;
use leadhub_common::db::models::{NewLead, NewRemark, NewStageHistory, User, UserRole};
use leadhub_common::Result;
use sqlx::{Row, SqlitePool};

/// Store operations the import pipeline depends on
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Full user roster in stable id order
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Insert a lead, returning its store-assigned id
    async fn create_lead(&self, lead: &NewLead) -> Result<i64>;

    /// Insert a remark attached to a lead
    async fn create_remark(&self, remark: &NewRemark) -> Result<i64>;

    /// Insert one stage transition record
    async fn create_stage_history(&self, entry: &NewStageHistory) -> Result<i64>;
}

/// SQLite-backed store over the shared LeadHub schema
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for SqliteStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, role
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .into_iter()
            .map(|row| {
                let role: String = row.get("role");
                User {
                    id: row.get("id"),
                    name: row.get("name"),
                    email: row.get("email"),
                    role: UserRole::parse(&role),
                }
            })
            .collect();

        Ok(users)
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO leads (
                uid, name, email, phone, country, intake, source,
                passport_status, counselor_id, current_stage, lead_created_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lead.uid)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.country)
        .bind(&lead.intake)
        .bind(&lead.source)
        .bind(&lead.passport_status)
        .bind(lead.counselor_id)
        .bind(&lead.current_stage)
        .bind(lead.lead_created_date.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn create_remark(&self, remark: &NewRemark) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO remarks (lead_id, author_id, body, origin)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(remark.lead_id)
        .bind(remark.author_id)
        .bind(&remark.body)
        .bind(&remark.origin)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn create_stage_history(&self, entry: &NewStageHistory) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO stage_history (lead_id, from_stage, to_stage, changed_by, changed_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.lead_id)
        .bind(&entry.from_stage)
        .bind(&entry.to_stage)
        .bind(entry.changed_by)
        .bind(entry.changed_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
