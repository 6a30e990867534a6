//! Lead pipeline stage vocabulary
//!
//! A lead progresses through 18 ordered stages from first contact to
//! commission received. Two stages act as sentinels for the import
//! pipeline: `YetToAssign` (no counselor engagement yet) and
//! `ReadyToContact` (the derived initial stage for imported leads).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered lead pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineStage {
    /// No counselor engagement yet (unassigned sentinel)
    #[serde(rename = "Yet to Assign")]
    YetToAssign,
    /// Imported and queued for first outreach (derived-stage sentinel)
    #[serde(rename = "Ready to Contact")]
    ReadyToContact,
    /// First outreach made
    #[serde(rename = "Contacted")]
    Contacted,
    /// Awaiting a scheduled follow-up
    #[serde(rename = "Follow Up")]
    FollowUp,
    /// In active counselling sessions
    #[serde(rename = "Counselling")]
    Counselling,
    /// Lead confirmed interest in proceeding
    #[serde(rename = "Interested")]
    Interested,
    /// Waiting on transcripts, passport, or test scores
    #[serde(rename = "Documents Pending")]
    DocumentsPending,
    /// Building the university shortlist
    #[serde(rename = "University Shortlist")]
    UniversityShortlist,
    /// Applications being prepared
    #[serde(rename = "Application In Progress")]
    ApplicationInProgress,
    /// Applications submitted to universities
    #[serde(rename = "Application Submitted")]
    ApplicationSubmitted,
    /// At least one admission offer received
    #[serde(rename = "Offer Received")]
    OfferReceived,
    /// Lead accepted an offer
    #[serde(rename = "Offer Accepted")]
    OfferAccepted,
    /// Gathering visa paperwork
    #[serde(rename = "Visa Preparation")]
    VisaPreparation,
    /// Visa application lodged
    #[serde(rename = "Visa Applied")]
    VisaApplied,
    /// Visa granted
    #[serde(rename = "Visa Approved")]
    VisaApproved,
    /// Enrolled at the institution
    #[serde(rename = "Enrolled")]
    Enrolled,
    /// Commission invoiced, awaiting payment
    #[serde(rename = "Commission Pending")]
    CommissionPending,
    /// Commission received, pipeline complete
    #[serde(rename = "Commission Received")]
    CommissionReceived,
}

impl PipelineStage {
    /// All stages in pipeline order
    pub const ALL: [PipelineStage; 18] = [
        PipelineStage::YetToAssign,
        PipelineStage::ReadyToContact,
        PipelineStage::Contacted,
        PipelineStage::FollowUp,
        PipelineStage::Counselling,
        PipelineStage::Interested,
        PipelineStage::DocumentsPending,
        PipelineStage::UniversityShortlist,
        PipelineStage::ApplicationInProgress,
        PipelineStage::ApplicationSubmitted,
        PipelineStage::OfferReceived,
        PipelineStage::OfferAccepted,
        PipelineStage::VisaPreparation,
        PipelineStage::VisaApplied,
        PipelineStage::VisaApproved,
        PipelineStage::Enrolled,
        PipelineStage::CommissionPending,
        PipelineStage::CommissionReceived,
    ];

    /// Display name as stored in the database and shown in the UI
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::YetToAssign => "Yet to Assign",
            PipelineStage::ReadyToContact => "Ready to Contact",
            PipelineStage::Contacted => "Contacted",
            PipelineStage::FollowUp => "Follow Up",
            PipelineStage::Counselling => "Counselling",
            PipelineStage::Interested => "Interested",
            PipelineStage::DocumentsPending => "Documents Pending",
            PipelineStage::UniversityShortlist => "University Shortlist",
            PipelineStage::ApplicationInProgress => "Application In Progress",
            PipelineStage::ApplicationSubmitted => "Application Submitted",
            PipelineStage::OfferReceived => "Offer Received",
            PipelineStage::OfferAccepted => "Offer Accepted",
            PipelineStage::VisaPreparation => "Visa Preparation",
            PipelineStage::VisaApplied => "Visa Applied",
            PipelineStage::VisaApproved => "Visa Approved",
            PipelineStage::Enrolled => "Enrolled",
            PipelineStage::CommissionPending => "Commission Pending",
            PipelineStage::CommissionReceived => "Commission Received",
        }
    }

    /// Parse a display name back to a stage (trimmed, case-insensitive).
    ///
    /// Returns None for text that names no canonical stage; callers that
    /// honor free-text stage requests keep the original string in that case.
    pub fn parse(value: &str) -> Option<PipelineStage> {
        let wanted = value.trim();
        PipelineStage::ALL
            .iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(wanted))
            .copied()
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
