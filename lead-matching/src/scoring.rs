use regex::Regex;
use shared_types::{Contact, Lead};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::names::extract_name_variations;
use crate::similarity::{name_match, string_similarity};

pub const NAME_WEIGHT: f64 = 40.0;
pub const EMAIL_WEIGHT: f64 = 25.0;
pub const LINKEDIN_WEIGHT: f64 = 20.0;
pub const TITLE_WEIGHT: f64 = 10.0;
pub const COMPANY_WEIGHT: f64 = 5.0;

/// Sum of all factor weights. A factor missing data on either side still
/// counts here, so sparse records score lower.
pub const TOTAL_WEIGHT: f64 =
    NAME_WEIGHT + EMAIL_WEIGHT + LINKEDIN_WEIGHT + TITLE_WEIGHT + COMPANY_WEIGHT;

const STRONG_NAME_THRESHOLD: f64 = 0.8;
const PARTIAL_NAME_THRESHOLD: f64 = 0.6;
const SIMILAR_TITLE_THRESHOLD: f64 = 0.7;
const SIMILAR_COMPANY_THRESHOLD: f64 = 0.8;

fn re_linkedin_profile() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)linkedin\.com/in/([^/?#\s]+)").unwrap())
}

/// Profile slug after `linkedin.com/in/`, lower-cased.
pub fn linkedin_slug(url: &str) -> Option<String> {
    re_linkedin_profile()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// The lead side of a comparison, normalized once so it can be scored
/// against many contacts.
#[derive(Debug, Clone)]
pub struct LeadProfile {
    pub name_variations: BTreeSet<String>,
    pub emails: Vec<String>,
    pub linkedin_slug: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

impl LeadProfile {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name_variations: extract_name_variations(&lead.full_name),
            emails: lead
                .emails
                .iter()
                .filter_map(|e| normalize(Some(e)))
                .collect(),
            linkedin_slug: lead.linkedin_url.as_deref().and_then(linkedin_slug),
            job_title: normalize(lead.job_title.as_deref()),
            company_name: normalize(lead.company_name.as_deref()),
        }
    }
}

/// Per-factor outcome of comparing one lead with one contact. `None` means
/// one side had no data for that factor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorBreakdown {
    pub name: Option<f64>,
    pub email: Option<bool>,
    pub linkedin: Option<bool>,
    pub title: Option<f64>,
    pub company: Option<f64>,
}

impl FactorBreakdown {
    pub fn compare(lead: &LeadProfile, contact: &Contact) -> Self {
        let has_contact_name =
            !contact.first_name.trim().is_empty() || !contact.last_name.trim().is_empty();
        let name = if !lead.name_variations.is_empty() && has_contact_name {
            Some(name_match(
                &lead.name_variations,
                &contact.first_name,
                &contact.last_name,
            ))
        } else {
            None
        };

        let email = match normalize(contact.email.as_deref()) {
            Some(contact_email) if !lead.emails.is_empty() => {
                Some(lead.emails.iter().any(|e| *e == contact_email))
            }
            _ => None,
        };

        let contact_slug = contact.linkedin_url.as_deref().and_then(linkedin_slug);
        let linkedin = match (&lead.linkedin_slug, contact_slug) {
            (Some(lead_slug), Some(contact_slug)) => Some(*lead_slug == contact_slug),
            _ => None,
        };

        let title = match (&lead.job_title, normalize(contact.job_title.as_deref())) {
            (Some(lead_title), Some(contact_title)) => {
                Some(string_similarity(lead_title, &contact_title))
            }
            _ => None,
        };

        let company = match (&lead.company_name, normalize(contact.company_name.as_deref())) {
            (Some(lead_company), Some(contact_company)) => {
                Some(string_similarity(lead_company, &contact_company))
            }
            _ => None,
        };

        Self {
            name,
            email,
            linkedin,
            title,
            company,
        }
    }

    fn weighted_sum(&self) -> f64 {
        let flag = |hit: Option<bool>| if hit == Some(true) { 1.0 } else { 0.0 };

        self.name.unwrap_or(0.0) * NAME_WEIGHT
            + flag(self.email) * EMAIL_WEIGHT
            + flag(self.linkedin) * LINKEDIN_WEIGHT
            + self.title.unwrap_or(0.0) * TITLE_WEIGHT
            + self.company.unwrap_or(0.0) * COMPANY_WEIGHT
    }

    /// Integer score in `0..=100`.
    pub fn score(&self) -> u8 {
        let score = (self.weighted_sum() / TOTAL_WEIGHT * 100.0).round();
        score.clamp(0.0, 100.0) as u8
    }

    /// Human-readable explanation of the factors that stood out.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        match self.name {
            Some(n) if n > STRONG_NAME_THRESHOLD => reasons.push("strong name match".to_string()),
            Some(n) if n > PARTIAL_NAME_THRESHOLD => {
                reasons.push("partial name match".to_string())
            }
            _ => {}
        }
        if self.email == Some(true) {
            reasons.push("same email address".to_string());
        }
        if self.linkedin == Some(true) {
            reasons.push("same LinkedIn profile".to_string());
        }
        if self.title.is_some_and(|t| t > SIMILAR_TITLE_THRESHOLD) {
            reasons.push("similar job title".to_string());
        }
        if self.company.is_some_and(|c| c > SIMILAR_COMPANY_THRESHOLD) {
            reasons.push("same or similar company".to_string());
        }

        reasons
    }
}

/// Likelihood in `0..=100` that `lead` and `contact` are the same person.
pub fn match_score(lead: &Lead, contact: &Contact) -> u8 {
    FactorBreakdown::compare(&LeadProfile::from_lead(lead), contact).score()
}
