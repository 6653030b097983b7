use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UnknownVariant;

/// Headcount bucket, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Startup => "startup",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
            CompanySize::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CompanySize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(CompanySize::Startup),
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            "enterprise" => Ok(CompanySize::Enterprise),
            other => Err(UnknownVariant::new("company size", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub website: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Column values for a company that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
pub struct NewCompany {
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub website: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}
