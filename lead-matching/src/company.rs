use serde_json::Value;
use shared_types::{CompanySize, Lead, NewCompany};
use url::Url;

use crate::pdl::{current_company, raw_str};

/// Size patterns checked largest first, so `"1001-5000"` is not read as
/// the `"1-10"` bucket.
const SIZE_BUCKETS: &[(&[&str], CompanySize)] = &[
    (&["enterprise", "10001", "5001"], CompanySize::Enterprise),
    (&["large", "1001"], CompanySize::Large),
    (&["medium", "mid-size", "201", "501"], CompanySize::Medium),
    (&["small", "11-50", "51-200"], CompanySize::Small),
    (&["startup", "self-employed", "1-10"], CompanySize::Startup),
];

/// Map a free-text headcount descriptor (`"51-200"`, `"10001+"`,
/// `"Enterprise"`) onto the ordinal size set.
pub fn bucket_company_size(descriptor: &str) -> Option<CompanySize> {
    let descriptor = descriptor.trim().to_lowercase();
    if descriptor.is_empty() {
        return None;
    }

    SIZE_BUCKETS
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| descriptor.contains(p)))
        .map(|(_, size)| *size)
}

/// Bare host of a website, without `www.`. `None` when it cannot be parsed.
pub fn domain_from_website(website: &str) -> Option<String> {
    let website = website.trim();
    if website.is_empty() {
        return None;
    }

    let with_scheme = if website.contains("://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    };

    let url = Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Best-effort company details taken from a lead
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyMetadata {
    pub industry: Option<String>,
    pub website: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
}

impl CompanyMetadata {
    /// Reads the flat `job_company_*` keys first and falls back to the
    /// company object of the most recent experience entry.
    pub fn from_lead(lead: &Lead) -> Self {
        let raw = &lead.raw_data;
        let experience_company = current_company(raw);

        let pick = |flat_key: &str, nested_keys: &[&str]| -> Option<String> {
            raw_str(raw, flat_key)
                .or_else(|| {
                    experience_company.and_then(|c: &Value| {
                        nested_keys.iter().find_map(|key| raw_str(c, key))
                    })
                })
                .map(str::to_string)
        };

        Self {
            industry: pick("job_company_industry", &["industry"])
                .or_else(|| raw_str(raw, "industry").map(str::to_string)),
            website: pick("job_company_website", &["website"]),
            size: pick("job_company_size", &["size"]),
            description: pick("job_company_description", &["description", "summary"]),
            linkedin_url: pick("job_company_linkedin_url", &["linkedin_url"]),
        }
    }

    pub fn into_new_company(self, name: &str) -> NewCompany {
        let domain = self.website.as_deref().and_then(domain_from_website);
        let size = self.size.as_deref().and_then(bucket_company_size);

        NewCompany {
            name: name.trim().to_string(),
            industry: self.industry,
            size,
            website: self.website,
            domain,
            description: self.description,
            linkedin_url: self.linkedin_url,
        }
    }
}

/// Company name for a lead: the typed column, then PDL's `job_company_name`,
/// then the most recent experience entry.
pub fn lead_company_name(lead: &Lead) -> Option<String> {
    lead.company_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| raw_str(&lead.raw_data, "job_company_name"))
        .or_else(|| current_company(&lead.raw_data).and_then(|c| raw_str(c, "name")))
        .map(str::to_string)
}
