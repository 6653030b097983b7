use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Contact;

/// Field names use the camelCase wire names (`phone`, `jobTitle`,
/// `socialProfiles`, ...). Unknown names are logged and ignored.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct EnrichContactRequest {
    pub lead_id: i64,
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct EnrichmentResult {
    pub contact: Contact,
    pub enrichment_log: Vec<String>,
    /// Number of fields requested
    pub fields_enriched: usize,
    /// Number of fields actually written
    pub fields_applied: usize,
    pub company_created: bool,
}
