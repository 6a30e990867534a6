//! Business rule engine: counselor assignment and stage derivation
//!
//! The counselor roster is snapshotted once per run into an immutable
//! `CounselorContext` and threaded as a parameter; the run never re-queries
//! mid-batch, so roster edits during an import are not reflected in it.

use crate::config::AssignmentRules;
use crate::models::NormalizedLead;
use crate::store::LeadStore;
use leadhub_common::db::models::{User, UserRole};
use leadhub_common::{PipelineStage, Result};

/// Immutable per-run snapshot of the assignable users
#[derive(Debug, Clone, Default)]
pub struct CounselorContext {
    /// Batch actor for remarks and stage history, when one was found
    pub manager_id: Option<i64>,
    /// Counselor-role users in roster order; order decides first-match wins
    pub counselors: Vec<User>,
    /// Fallback assignee for hints that match nobody
    pub default_counselor_id: Option<i64>,
}

impl CounselorContext {
    /// Empty context: no manager, no roster, no fallback. Used when the
    /// roster lookup fails; assignment then degrades to unassigned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the roster from the store
    pub async fn load(store: &dyn LeadStore, rules: &AssignmentRules) -> Result<Self> {
        let users = store.list_users().await?;

        let manager_marker = rules.manager_marker.to_lowercase();
        let manager_id = users
            .iter()
            .find(|user| {
                user.role == UserRole::Admin || user.name.to_lowercase().contains(&manager_marker)
            })
            .map(|user| user.id);

        let default_marker = rules.default_counselor_marker.to_lowercase();
        let default_counselor_id = users
            .iter()
            .find(|user| user.name.to_lowercase().contains(&default_marker))
            .map(|user| user.id);

        let counselors = users
            .into_iter()
            .filter(|user| user.role == UserRole::Counselor)
            .collect();

        Ok(Self {
            manager_id,
            counselors,
            default_counselor_id,
        })
    }
}

/// Derived assignment for one normalized lead
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub counselor_id: Option<i64>,
    /// Final stage text: the requested stage verbatim, or the derived
    /// sentinel
    pub current_stage: String,
}

/// Derive counselor assignment and initial stage for one lead.
///
/// Hint matching is bidirectional substring containment against each
/// counselor name, lowercased; the first roster match wins. A hint that
/// matches nobody falls back to the default counselor; no hint means no
/// assignment is attempted.
pub fn derive_assignment(lead: &NormalizedLead, context: &CounselorContext) -> Assignment {
    let counselor_id = match &lead.counsellor_name_hint {
        Some(hint) => {
            let hint = hint.to_lowercase();
            context
                .counselors
                .iter()
                .find(|counselor| {
                    let name = counselor.name.to_lowercase();
                    hint.contains(&name) || name.contains(&hint)
                })
                .map(|counselor| counselor.id)
                .or(context.default_counselor_id)
        }
        None => None,
    };

    // An explicitly requested stage is honored verbatim as a
    // backward-compatibility escape hatch, even when it names no canonical
    // stage.
    let current_stage = match &lead.current_stage_requested {
        Some(requested) => requested.clone(),
        None if counselor_id.is_some() => {
            // TODO: confirm with product whether assigned leads should start
            // at Contacted; today both branches begin at Ready to Contact.
            PipelineStage::ReadyToContact.as_str().to_string()
        }
        None => PipelineStage::ReadyToContact.as_str().to_string(),
    };

    Assignment {
        counselor_id,
        current_stage,
    }
}
