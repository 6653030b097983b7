//! Lead Matching Crate
//!
//! Pure scoring and enrichment logic for pairing People Data Labs leads with
//! CRM contacts. Nothing here touches storage; the API crate loads records,
//! calls into this crate and persists the outcome.
//!
//! # Modules
//!
//! - `names` / `similarity` / `scoring`: name variations, Levenshtein ratio
//!   and the weighted 0-100 match score with its reasons
//! - `ranking`: threshold, ordering and truncation of scored candidates
//! - `fields` / `enrichment`: the enrichable field table and the
//!   non-destructive merge plan
//! - `company` / `seniority`: values derived from lead data
//!
//! # Example
//!
//! ```rust,ignore
//! use lead_matching::{FactorBreakdown, LeadProfile};
//!
//! let profile = LeadProfile::from_lead(&lead);
//! let breakdown = FactorBreakdown::compare(&profile, &contact);
//! println!("{} {:?}", breakdown.score(), breakdown.reasons());
//! ```

pub mod company;
pub mod enrichment;
pub mod fields;
pub mod names;
pub mod pdl;
pub mod ranking;
pub mod scoring;
pub mod seniority;
pub mod similarity;

pub use company::{bucket_company_size, domain_from_website, lead_company_name, CompanyMetadata};
pub use enrichment::{append_audit_note, plan_enrichment, CompanyRequest, ContactChanges, EnrichmentPlan};
pub use fields::{ContactColumn, EnrichmentField, FieldTarget, UnknownField};
pub use names::extract_name_variations;
pub use ranking::{rank_candidates, MatchOptions};
pub use scoring::{linkedin_slug, match_score, FactorBreakdown, LeadProfile};
pub use seniority::classify_seniority;
pub use similarity::{name_match, string_similarity};
