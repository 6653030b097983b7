use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Contact, Lead};

/// One scored candidate. `score` is always within 0..=100.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResult<T> {
    pub entity: T,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Contacts that look like the same person as `lead`, best first
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LeadMatchesResponse {
    pub lead: Lead,
    pub matches: Vec<MatchResult<Contact>>,
}

/// Pending leads that look like the same person as `contact`, best first
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ContactMatchesResponse {
    pub contact: Contact,
    pub matches: Vec<MatchResult<Lead>>,
}
