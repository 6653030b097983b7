use serde_json::{json, Value};
use shared_types::Lead;

use crate::company::lead_company_name;
use crate::pdl::{current_company, raw_array, raw_str};
use crate::seniority::classify_seniority;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown enrichment field: {0}")]
pub struct UnknownField(pub String);

/// A lead attribute that can be copied onto a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrichmentField {
    Phone,
    Email,
    JobTitle,
    LinkedinUrl,
    Skills,
    Education,
    Experience,
    Location,
    Industry,
    CompanyName,
    SeniorityLevel,
    SocialProfiles,
    Certifications,
    Languages,
    Interests,
    PersonalEmails,
    WorkEmails,
    PhoneNumbers,
    Websites,
    GithubUrl,
    TwitterHandle,
    CompanyInfo,
}

/// Contact columns enrichment can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactColumn {
    Phone,
    Email,
    JobTitle,
    LinkedinUrl,
    SeniorityLevel,
    /// The company reference, resolved through the company store
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Column(ContactColumn),
    /// Key inside `Contact::custom_fields`
    CustomField(&'static str),
}

const WEBSITE_NETWORKS: &[&str] = &["website", "personal", "blog", "homepage"];

impl EnrichmentField {
    pub const ALL: [EnrichmentField; 22] = [
        EnrichmentField::Phone,
        EnrichmentField::Email,
        EnrichmentField::JobTitle,
        EnrichmentField::LinkedinUrl,
        EnrichmentField::Skills,
        EnrichmentField::Education,
        EnrichmentField::Experience,
        EnrichmentField::Location,
        EnrichmentField::Industry,
        EnrichmentField::CompanyName,
        EnrichmentField::SeniorityLevel,
        EnrichmentField::SocialProfiles,
        EnrichmentField::Certifications,
        EnrichmentField::Languages,
        EnrichmentField::Interests,
        EnrichmentField::PersonalEmails,
        EnrichmentField::WorkEmails,
        EnrichmentField::PhoneNumbers,
        EnrichmentField::Websites,
        EnrichmentField::GithubUrl,
        EnrichmentField::TwitterHandle,
        EnrichmentField::CompanyInfo,
    ];

    /// Wire name used by API clients
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentField::Phone => "phone",
            EnrichmentField::Email => "email",
            EnrichmentField::JobTitle => "jobTitle",
            EnrichmentField::LinkedinUrl => "linkedinUrl",
            EnrichmentField::Skills => "skills",
            EnrichmentField::Education => "education",
            EnrichmentField::Experience => "experience",
            EnrichmentField::Location => "location",
            EnrichmentField::Industry => "industry",
            EnrichmentField::CompanyName => "companyName",
            EnrichmentField::SeniorityLevel => "seniorityLevel",
            EnrichmentField::SocialProfiles => "socialProfiles",
            EnrichmentField::Certifications => "certifications",
            EnrichmentField::Languages => "languages",
            EnrichmentField::Interests => "interests",
            EnrichmentField::PersonalEmails => "personalEmails",
            EnrichmentField::WorkEmails => "workEmails",
            EnrichmentField::PhoneNumbers => "phoneNumbers",
            EnrichmentField::Websites => "websites",
            EnrichmentField::GithubUrl => "githubUrl",
            EnrichmentField::TwitterHandle => "twitterHandle",
            EnrichmentField::CompanyInfo => "companyInfo",
        }
    }

    pub fn target(&self) -> FieldTarget {
        use ContactColumn as Col;
        use FieldTarget::{Column, CustomField};

        match self {
            EnrichmentField::Phone => Column(Col::Phone),
            EnrichmentField::Email => Column(Col::Email),
            EnrichmentField::JobTitle => Column(Col::JobTitle),
            EnrichmentField::LinkedinUrl => Column(Col::LinkedinUrl),
            EnrichmentField::SeniorityLevel => Column(Col::SeniorityLevel),
            EnrichmentField::CompanyName => Column(Col::Company),
            EnrichmentField::Skills => CustomField("skills"),
            EnrichmentField::Education => CustomField("education"),
            EnrichmentField::Experience => CustomField("experience"),
            EnrichmentField::Location => CustomField("location"),
            EnrichmentField::Industry => CustomField("industry"),
            EnrichmentField::SocialProfiles => CustomField("social_profiles"),
            EnrichmentField::Certifications => CustomField("certifications"),
            EnrichmentField::Languages => CustomField("languages"),
            EnrichmentField::Interests => CustomField("interests"),
            EnrichmentField::PersonalEmails => CustomField("personal_emails"),
            EnrichmentField::WorkEmails => CustomField("work_emails"),
            EnrichmentField::PhoneNumbers => CustomField("phone_numbers"),
            EnrichmentField::Websites => CustomField("websites"),
            EnrichmentField::GithubUrl => CustomField("github_url"),
            EnrichmentField::TwitterHandle => CustomField("twitter_handle"),
            EnrichmentField::CompanyInfo => CustomField("company_info"),
        }
    }

    /// Value the lead offers for this field, or `None` when it has nothing
    /// usable. Never returns an empty string, array or object.
    pub fn extract(&self, lead: &Lead) -> Option<Value> {
        let raw = &lead.raw_data;
        let text = |s: &str| Some(Value::String(s.to_string()));

        let value = match self {
            EnrichmentField::Phone => raw_str(raw, "mobile_phone")
                .or_else(|| first_str(raw, "phone_numbers"))
                .and_then(text),
            EnrichmentField::Email => lead
                .emails
                .iter()
                .map(|e| e.trim())
                .find(|e| !e.is_empty())
                .or_else(|| raw_str(raw, "work_email"))
                .or_else(|| raw_str(raw, "recommended_personal_email"))
                .and_then(text),
            EnrichmentField::JobTitle => non_blank(lead.job_title.as_deref())
                .or_else(|| raw_str(raw, "job_title"))
                .and_then(text),
            EnrichmentField::LinkedinUrl => non_blank(lead.linkedin_url.as_deref())
                .or_else(|| raw_str(raw, "linkedin_url"))
                .and_then(text),
            EnrichmentField::Skills => raw_array(raw, "skills").map(|v| Value::Array(v.clone())),
            EnrichmentField::Education => {
                raw_array(raw, "education").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::Experience => {
                raw_array(raw, "experience").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::Location => raw_str(raw, "location_name")
                .map(str::to_string)
                .or_else(|| compose_location(raw))
                .map(Value::String),
            EnrichmentField::Industry => raw_str(raw, "industry")
                .or_else(|| raw_str(raw, "job_company_industry"))
                .and_then(text),
            EnrichmentField::CompanyName => lead_company_name(lead).map(Value::String),
            EnrichmentField::SeniorityLevel => non_blank(lead.job_title.as_deref())
                .or_else(|| raw_str(raw, "job_title"))
                .map(|title| Value::String(classify_seniority(title).as_str().to_string())),
            EnrichmentField::SocialProfiles => social_profiles(raw),
            EnrichmentField::Certifications => {
                raw_array(raw, "certifications").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::Languages => {
                raw_array(raw, "languages").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::Interests => {
                raw_array(raw, "interests").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::PersonalEmails => {
                let mut emails = typed_emails(raw, &["personal"]);
                extend_unique(&mut emails, string_items(raw, "personal_emails"));
                string_list(emails)
            }
            EnrichmentField::WorkEmails => {
                let mut emails =
                    typed_emails(raw, &["professional", "current_professional", "work"]);
                extend_unique(
                    &mut emails,
                    raw_str(raw, "work_email").map(str::to_string),
                );
                string_list(emails)
            }
            EnrichmentField::PhoneNumbers => {
                raw_array(raw, "phone_numbers").map(|v| Value::Array(v.clone()))
            }
            EnrichmentField::Websites => {
                let mut websites = string_items(raw, "websites");
                extend_unique(
                    &mut websites,
                    profiles(raw)
                        .filter(|(network, _, _)| WEBSITE_NETWORKS.contains(&network.as_str()))
                        .filter_map(|(_, url, _)| url),
                );
                string_list(websites)
            }
            EnrichmentField::GithubUrl => raw_str(raw, "github_url")
                .map(str::to_string)
                .or_else(|| profile_field(raw, "github", |(_, url, _)| url))
                .map(Value::String),
            EnrichmentField::TwitterHandle => raw_str(raw, "twitter_username")
                .map(str::to_string)
                .or_else(|| profile_field(raw, "twitter", |(_, _, username)| username))
                .map(Value::String),
            EnrichmentField::CompanyInfo => current_company(raw).cloned(),
        };

        value.filter(|v| !is_empty_value(v))
    }
}

impl std::fmt::Display for EnrichmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EnrichmentField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnrichmentField::ALL
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Empty string (after trimming), empty array, empty object or null
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Short form of a value for the enrichment log
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(map) => format!("{} fields", map.len()),
        other => other.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn first_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw_array(raw, key)?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn string_items(raw: &Value, key: &str) -> Vec<String> {
    raw_array(raw, key)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn extend_unique(target: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !target.iter().any(|t| t.eq_ignore_ascii_case(&item)) {
            target.push(item);
        }
    }
}

fn string_list(items: Vec<String>) -> Option<Value> {
    if items.is_empty() {
        None
    } else {
        Some(Value::Array(items.into_iter().map(Value::String).collect()))
    }
}

fn compose_location(raw: &Value) -> Option<String> {
    let parts: Vec<&str> = ["location_locality", "location_region", "location_country"]
        .iter()
        .filter_map(|key| raw_str(raw, key))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Addresses from PDL's `emails: [{address, type}]` whose type is one of
/// `types`.
fn typed_emails(raw: &Value, types: &[&str]) -> Vec<String> {
    let mut emails = Vec::new();
    if let Some(items) = raw_array(raw, "emails") {
        for item in items {
            let kind = raw_str(item, "type").map(str::to_lowercase);
            if kind.as_deref().is_some_and(|k| types.contains(&k)) {
                extend_unique(&mut emails, raw_str(item, "address").map(str::to_string));
            }
        }
    }
    emails
}

/// `(network, url, username)` for each entry of PDL's `profiles` list
fn profiles(raw: &Value) -> impl Iterator<Item = (String, Option<String>, Option<String>)> + '_ {
    raw_array(raw, "profiles")
        .into_iter()
        .flatten()
        .map(|p| {
            (
                raw_str(p, "network").unwrap_or("").to_lowercase(),
                raw_str(p, "url").map(str::to_string),
                raw_str(p, "username").map(str::to_string),
            )
        })
}

fn profile_field<F>(raw: &Value, network: &str, pick: F) -> Option<String>
where
    F: Fn((String, Option<String>, Option<String>)) -> Option<String>,
{
    profiles(raw).filter(|(n, _, _)| n == network).find_map(pick)
}

fn social_profiles(raw: &Value) -> Option<Value> {
    let entries: Vec<Value> = profiles(raw)
        .filter(|(network, _, _)| !WEBSITE_NETWORKS.contains(&network.as_str()))
        .filter_map(|(network, url, username)| {
            url.map(|url| json!({ "network": network, "url": url, "username": username }))
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(Value::Array(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lead;

    fn pdl_lead() -> Lead {
        let mut l = lead("Jane Smith");
        l.job_title = Some("VP of Engineering".to_string());
        l.raw_data = json!({
            "mobile_phone": "+1-555-9999",
            "phone_numbers": ["+1-555-0001", "+1-555-0002"],
            "skills": ["rust", "sql"],
            "location_name": "austin, texas, united states",
            "industry": "computer software",
            "emails": [
                {"address": "jane@gmail.com", "type": "personal"},
                {"address": "jane@acme.com", "type": "professional"},
                {"address": "j.smith@acme.com", "type": "current_professional"},
            ],
            "work_email": "jane@acme.com",
            "profiles": [
                {"network": "linkedin", "url": "linkedin.com/in/janesmith", "username": "janesmith"},
                {"network": "github", "url": "github.com/jsmith", "username": "jsmith"},
                {"network": "twitter", "url": "twitter.com/jane", "username": "jane"},
            ],
            "experience": [
                {"company": {"name": "Acme", "size": "51-200"}, "is_primary": true}
            ]
        });
        l
    }

    #[test]
    fn test_parse_wire_names() {
        for field in EnrichmentField::ALL {
            assert_eq!(field.as_str().parse::<EnrichmentField>().unwrap(), field);
        }
        assert_eq!(
            "favouriteColour".parse::<EnrichmentField>(),
            Err(UnknownField("favouriteColour".to_string()))
        );
    }

    #[test]
    fn test_targets() {
        assert_eq!(
            EnrichmentField::Phone.target(),
            FieldTarget::Column(ContactColumn::Phone)
        );
        assert_eq!(
            EnrichmentField::CompanyName.target(),
            FieldTarget::Column(ContactColumn::Company)
        );
        assert_eq!(
            EnrichmentField::SocialProfiles.target(),
            FieldTarget::CustomField("social_profiles")
        );
    }

    #[test]
    fn test_phone_prefers_mobile() {
        let value = EnrichmentField::Phone.extract(&pdl_lead());
        assert_eq!(value, Some(json!("+1-555-9999")));

        let mut l = pdl_lead();
        l.raw_data["mobile_phone"] = Value::Null;
        assert_eq!(
            EnrichmentField::Phone.extract(&l),
            Some(json!("+1-555-0001"))
        );
    }

    #[test]
    fn test_emails_partitioned_by_type() {
        let l = pdl_lead();
        assert_eq!(
            EnrichmentField::PersonalEmails.extract(&l),
            Some(json!(["jane@gmail.com"]))
        );
        assert_eq!(
            EnrichmentField::WorkEmails.extract(&l),
            Some(json!(["jane@acme.com", "j.smith@acme.com"]))
        );
    }

    #[test]
    fn test_derived_fields() {
        let l = pdl_lead();
        assert_eq!(
            EnrichmentField::SeniorityLevel.extract(&l),
            Some(json!("vp"))
        );
        assert_eq!(
            EnrichmentField::GithubUrl.extract(&l),
            Some(json!("github.com/jsmith"))
        );
        assert_eq!(
            EnrichmentField::TwitterHandle.extract(&l),
            Some(json!("jane"))
        );
        assert_eq!(
            EnrichmentField::CompanyInfo.extract(&l),
            Some(json!({"name": "Acme", "size": "51-200"}))
        );
        assert_eq!(
            EnrichmentField::CompanyName.extract(&l),
            Some(json!("Acme"))
        );

        let social = EnrichmentField::SocialProfiles.extract(&l).unwrap();
        assert_eq!(social.as_array().unwrap().len(), 3);
        assert_eq!(social[1]["network"], "github");
    }

    #[test]
    fn test_missing_data_is_none() {
        let l = lead("Jane Smith");
        for field in EnrichmentField::ALL {
            assert_eq!(field.extract(&l), None, "{} should be empty", field);
        }
    }

    #[test]
    fn test_location_composed_from_parts() {
        let mut l = lead("Jane Smith");
        l.raw_data = json!({"location_locality": "austin", "location_country": "united states"});
        assert_eq!(
            EnrichmentField::Location.extract(&l),
            Some(json!("austin, united states"))
        );
    }

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("  ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(["x"])));
    }

    #[test]
    fn test_describe_value() {
        assert_eq!(describe_value(&json!("555-9999")), "555-9999");
        assert_eq!(describe_value(&json!(["a", "b"])), "2 items");
        assert_eq!(describe_value(&json!({"name": "Acme"})), "1 fields");
    }
}
