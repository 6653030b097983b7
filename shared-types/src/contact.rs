use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    CLevel,
    Vp,
    Director,
    Senior,
    Mid,
    Entry,
}

impl SeniorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::CLevel => "c_level",
            SeniorityLevel::Vp => "vp",
            SeniorityLevel::Director => "director",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Entry => "entry",
        }
    }
}

impl std::fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SeniorityLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c_level" => Ok(SeniorityLevel::CLevel),
            "vp" => Ok(SeniorityLevel::Vp),
            "director" => Ok(SeniorityLevel::Director),
            "senior" => Ok(SeniorityLevel::Senior),
            "mid" => Ok(SeniorityLevel::Mid),
            "entry" => Ok(SeniorityLevel::Entry),
            other => Err(UnknownVariant::new("seniority level", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    /// Name of the linked company, joined in on read
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    #[ts(type = "Record<string, unknown>")]
    pub custom_fields: serde_json::Map<String, serde_json::Value>,
    pub notes: Option<String>,
    pub seniority_level: Option<SeniorityLevel>,
    pub lead_score: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export)]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub seniority_level: Option<SeniorityLevel>,
    pub lead_score: Option<i32>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}
