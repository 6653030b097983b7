use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UnknownVariant;

/// Review state of an imported lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    PendingReview,
    AddedToCrm,
    Rejected,
    Duplicate,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::PendingReview => "pending_review",
            LeadStatus::AddedToCrm => "added_to_crm",
            LeadStatus::Rejected => "rejected",
            LeadStatus::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_review" => Ok(LeadStatus::PendingReview),
            "added_to_crm" => Ok(LeadStatus::AddedToCrm),
            "rejected" => Ok(LeadStatus::Rejected),
            "duplicate" => Ok(LeadStatus::Duplicate),
            other => Err(UnknownVariant::new("lead status", other)),
        }
    }
}

/// A person record sourced from People Data Labs, awaiting review.
///
/// `raw_data` holds the PDL person payload as returned by the search API
/// (skills, experience, profiles, emails, ...). The typed columns are the
/// fields the matcher reads directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lead {
    pub id: i64,
    pub full_name: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub emails: Vec<String>,
    pub linkedin_url: Option<String>,
    #[ts(type = "Record<string, unknown>")]
    pub raw_data: serde_json::Value,
    pub status: LeadStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateLeadRequest {
    pub full_name: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    pub linkedin_url: Option<String>,
    #[ts(type = "Record<string, unknown> | null")]
    pub raw_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
}
