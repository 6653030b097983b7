use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use shared_types::{Contact, Lead, SeniorityLevel};
use std::collections::HashSet;

use crate::company::CompanyMetadata;
use crate::fields::{describe_value, is_empty_value, ContactColumn, EnrichmentField, FieldTarget};

/// Column values to write onto the contact. `None` leaves a column alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactChanges {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub linkedin_url: Option<String>,
    pub seniority_level: Option<SeniorityLevel>,
}

impl ContactChanges {
    pub fn is_empty(&self) -> bool {
        *self == ContactChanges::default()
    }
}

/// A company the contact should be linked to once it is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRequest {
    pub name: String,
    pub metadata: CompanyMetadata,
}

/// Everything an enrichment run will change, worked out before any write.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentPlan {
    pub changes: ContactChanges,
    /// Custom-field keys to add; existing keys are never listed
    pub custom_fields: Map<String, Value>,
    pub company: Option<CompanyRequest>,
    pub log: Vec<String>,
    pub fields_requested: usize,
    pub fields_applied: usize,
}

impl EnrichmentPlan {
    pub fn has_changes(&self) -> bool {
        self.fields_applied > 0
    }
}

fn column_has_data(contact: &Contact, column: ContactColumn) -> bool {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    match column {
        ContactColumn::Phone => filled(&contact.phone),
        ContactColumn::Email => filled(&contact.email),
        ContactColumn::JobTitle => filled(&contact.job_title),
        ContactColumn::LinkedinUrl => filled(&contact.linkedin_url),
        ContactColumn::SeniorityLevel => contact.seniority_level.is_some(),
        ContactColumn::Company => contact.company_id.is_some(),
    }
}

/// Decide, field by field, what `lead` can fill in on `contact`.
///
/// A target that already holds data is never touched. Unknown field names
/// and repeated names are logged or skipped, never fatal.
pub fn plan_enrichment(contact: &Contact, lead: &Lead, selected_fields: &[String]) -> EnrichmentPlan {
    let mut plan = EnrichmentPlan {
        fields_requested: selected_fields.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for name in selected_fields {
        let name = name.trim();
        let field: EnrichmentField = match name.parse() {
            Ok(field) => field,
            Err(_) => {
                plan.log.push(format!("{}: unknown field, ignored", name));
                continue;
            }
        };
        if !seen.insert(field) {
            continue;
        }

        let target = field.target();
        let has_data = match target {
            FieldTarget::Column(column) => column_has_data(contact, column),
            FieldTarget::CustomField(key) => contact
                .custom_fields
                .get(key)
                .is_some_and(|v| !is_empty_value(v)),
        };
        if has_data {
            plan.log.push(format!("{}: skipped: already has data", field));
            continue;
        }

        let Some(value) = field.extract(lead) else {
            plan.log.push(format!("{}: no data available", field));
            continue;
        };

        let summary = describe_value(&value);
        let text = value.as_str().map(str::to_string);
        match target {
            FieldTarget::Column(ContactColumn::Company) => {
                plan.company = Some(CompanyRequest {
                    name: summary.clone(),
                    metadata: CompanyMetadata::from_lead(lead),
                });
            }
            FieldTarget::Column(ContactColumn::Phone) => plan.changes.phone = text,
            FieldTarget::Column(ContactColumn::Email) => plan.changes.email = text,
            FieldTarget::Column(ContactColumn::JobTitle) => plan.changes.job_title = text,
            FieldTarget::Column(ContactColumn::LinkedinUrl) => plan.changes.linkedin_url = text,
            FieldTarget::Column(ContactColumn::SeniorityLevel) => {
                plan.changes.seniority_level = text.and_then(|t| t.parse().ok());
            }
            FieldTarget::CustomField(key) => {
                plan.custom_fields.insert(key.to_string(), value);
            }
        }

        plan.fields_applied += 1;
        plan.log.push(format!("{}: added: {}", field, summary));
    }

    plan
}

/// Notes with one audit block appended. Existing content is kept verbatim.
pub fn append_audit_note(
    existing: Option<&str>,
    lead_id: i64,
    at: DateTime<Utc>,
    log: &[String],
) -> String {
    let block = format!(
        "[Enrichment {} from lead #{}] {}",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        lead_id,
        log.join(", ")
    );

    match existing {
        Some(notes) if !notes.trim().is_empty() => format!("{}\n\n{}", notes, block),
        Some(notes) => format!("{}{}", notes, block),
        None => block,
    }
}
