use serde::{Deserialize, Serialize};

pub mod company;
pub mod contact;
pub mod enrichment;
pub mod lead;
pub mod matching;

pub use company::{CompaniesResponse, Company, CompanySize, NewCompany};
pub use contact::{
    Contact, ContactsResponse, CreateContactRequest, SeniorityLevel, UpdateContactRequest,
};
pub use enrichment::{EnrichContactRequest, EnrichmentResult};
pub use lead::{CreateLeadRequest, Lead, LeadStatus, LeadsResponse};
pub use matching::{ContactMatchesResponse, LeadMatchesResponse, MatchResult};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A database string that does not name any variant of a stored enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
