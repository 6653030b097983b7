use chrono::Utc;
use lead_matching::{append_audit_note, plan_enrichment};
use rusqlite::TransactionBehavior;
use shared_types::EnrichmentResult;
use tracing::{debug, info};

use crate::database::contacts::{self as contacts_db, ContactPatch};
use crate::database::{leads as leads_db, AsyncDbConnection};
use crate::error::{EngineError, EngineResult};
use crate::services::company_resolver::find_or_create_company;

/// Copy the selected lead fields into a contact without overwriting
/// anything it already holds.
///
/// The company lookup or creation, the column updates and the audit note
/// are written in one transaction; a failure anywhere leaves the contact
/// and the companies table as they were.
pub async fn enrich_contact(
    conn: AsyncDbConnection,
    contact_id: i64,
    lead_id: i64,
    selected_fields: &[String],
) -> EngineResult<EnrichmentResult> {
    if selected_fields.iter().all(|f| f.trim().is_empty()) {
        return Err(EngineError::InvalidInput(
            "at least one field must be selected".to_string(),
        ));
    }

    let mut conn = conn.lock().await?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let contact = contacts_db::get_contact(&tx, contact_id)?
        .ok_or_else(|| EngineError::not_found("contact", contact_id))?;
    let lead =
        leads_db::get_lead(&tx, lead_id)?.ok_or_else(|| EngineError::not_found("lead", lead_id))?;

    let plan = plan_enrichment(&contact, &lead, selected_fields);
    for line in &plan.log {
        debug!("Contact {} from lead {}: {}", contact_id, lead_id, line);
    }

    if !plan.has_changes() {
        info!(
            "Nothing to enrich on contact {} from lead {} ({} fields requested)",
            contact_id, lead_id, plan.fields_requested
        );
        return Ok(EnrichmentResult {
            contact,
            enrichment_log: plan.log,
            fields_enriched: plan.fields_requested,
            fields_applied: 0,
            company_created: false,
        });
    }

    let mut patch = ContactPatch::from(plan.changes);
    let mut company_created = false;

    if let Some(request) = plan.company {
        if let Some(resolved) = find_or_create_company(&tx, &request.name, request.metadata)? {
            patch.company_id = Some(resolved.company.id);
            company_created = resolved.is_new_record;
        }
    }

    if !plan.custom_fields.is_empty() {
        let mut custom_fields = contact.custom_fields.clone();
        custom_fields.extend(plan.custom_fields);
        patch.custom_fields = Some(custom_fields);
    }

    patch.notes = Some(append_audit_note(
        contact.notes.as_deref(),
        lead_id,
        Utc::now(),
        &plan.log,
    ));

    let updated = contacts_db::update_contact(&tx, contact_id, &patch)?;
    tx.commit()?;

    info!(
        "Enriched contact {} from lead {}: {} of {} fields applied{}",
        contact_id,
        lead_id,
        plan.fields_applied,
        plan.fields_requested,
        if company_created { ", company created" } else { "" }
    );

    Ok(EnrichmentResult {
        contact: updated,
        enrichment_log: plan.log,
        fields_enriched: plan.fields_requested,
        fields_applied: plan.fields_applied,
        company_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::companies::list_companies;
    use crate::database::test_support::temp_database;
    use crate::database::Database;
    use serde_json::json;
    use shared_types::{CreateContactRequest, CreateLeadRequest, SeniorityLevel};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    async fn seed(db: &Database, phone: Option<&str>, notes: Option<&str>) -> (i64, i64) {
        let conn = db.async_connection.lock().await.unwrap();
        let contact_id = contacts_db::insert_contact(
            &conn,
            &CreateContactRequest {
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                job_title: None,
                company_id: None,
                email: None,
                phone: phone.map(str::to_string),
                linkedin_url: None,
                notes: notes.map(str::to_string),
            },
        )
        .unwrap();
        let lead_id = leads_db::insert_lead(
            &conn,
            &CreateLeadRequest {
                full_name: "Jane Smith".to_string(),
                job_title: Some("VP of Engineering".to_string()),
                company_name: Some("Acme".to_string()),
                emails: vec!["jane@acme.com".to_string()],
                linkedin_url: None,
                raw_data: Some(json!({
                    "mobile_phone": "555-9999",
                    "skills": ["rust", "sql"],
                    "job_company_website": "www.acme.com",
                    "job_company_size": "1001-5000",
                })),
            },
        )
        .unwrap();
        (contact_id, lead_id)
    }

    async fn company_count(db: &Database) -> usize {
        let conn = db.async_connection.lock().await.unwrap();
        list_companies(&conn, 100).unwrap().len()
    }

    #[tokio::test]
    async fn test_existing_phone_is_not_overwritten() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, Some("555-0100"), None).await;

        let result = enrich_contact(db.async_connection.clone(), contact_id, lead_id, &fields(&["phone"]))
            .await
            .unwrap();

        assert_eq!(result.contact.phone.as_deref(), Some("555-0100"));
        assert_eq!(result.fields_applied, 0);
        assert_eq!(result.enrichment_log, vec!["phone: skipped: already has data"]);
        // no audit note without an applied field
        assert_eq!(result.contact.notes, None);
    }

    #[tokio::test]
    async fn test_empty_phone_is_filled_and_audited() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, None).await;

        let result = enrich_contact(db.async_connection.clone(), contact_id, lead_id, &fields(&["phone"]))
            .await
            .unwrap();

        assert_eq!(result.contact.phone.as_deref(), Some("555-9999"));
        assert_eq!(result.fields_enriched, 1);
        assert_eq!(result.fields_applied, 1);
        let notes = result.contact.notes.unwrap();
        assert!(notes.starts_with("[Enrichment "));
        assert!(notes.ends_with(&format!("from lead #{}] phone: added: 555-9999", lead_id)));
    }

    #[tokio::test]
    async fn test_notes_are_appended() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, Some("Met at RustConf")).await;

        let result = enrich_contact(
            db.async_connection.clone(),
            contact_id,
            lead_id,
            &fields(&["skills", "seniorityLevel"]),
        )
        .await
        .unwrap();

        let contact = result.contact;
        assert_eq!(contact.custom_fields["skills"], json!(["rust", "sql"]));
        assert_eq!(contact.seniority_level, Some(SeniorityLevel::Vp));
        let notes = contact.notes.unwrap();
        assert!(notes.starts_with("Met at RustConf\n\n[Enrichment "));
        assert!(notes.ends_with("skills: added: 2 items, seniorityLevel: added: vp"));
    }

    #[tokio::test]
    async fn test_company_is_created_once() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, None).await;
        let (other_contact_id, _) = seed(&db, None, None).await;

        let first = enrich_contact(
            db.async_connection.clone(),
            contact_id,
            lead_id,
            &fields(&["companyName"]),
        )
        .await
        .unwrap();
        assert!(first.company_created);
        assert_eq!(first.contact.company_name.as_deref(), Some("Acme"));

        let second = enrich_contact(
            db.async_connection.clone(),
            other_contact_id,
            lead_id,
            &fields(&["companyName"]),
        )
        .await
        .unwrap();
        assert!(!second.company_created);
        assert_eq!(second.contact.company_id, first.contact.company_id);
        assert_eq!(company_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_fields_do_not_abort() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, None).await;

        let result = enrich_contact(
            db.async_connection.clone(),
            contact_id,
            lead_id,
            &fields(&["favouriteColour", "phone"]),
        )
        .await
        .unwrap();

        assert_eq!(result.fields_applied, 1);
        assert_eq!(result.enrichment_log[0], "favouriteColour: unknown field, ignored");
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_company() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, None).await;
        {
            let conn = db.async_connection.lock().await.unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_contact_updates BEFORE UPDATE ON contacts
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();
        }

        let err = enrich_contact(
            db.async_connection.clone(),
            contact_id,
            lead_id,
            &fields(&["companyName", "phone"]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EngineError::Database(_)));
        assert_eq!(company_count(&db).await, 0);

        let conn = db.async_connection.lock().await.unwrap();
        let contact = contacts_db::get_contact(&conn, contact_id).unwrap().unwrap();
        assert_eq!(contact.phone, None);
        assert_eq!(contact.company_id, None);
    }

    #[tokio::test]
    async fn test_missing_records_and_empty_selection() {
        let (_dir, db) = temp_database();
        let (contact_id, lead_id) = seed(&db, None, None).await;

        let err = enrich_contact(db.async_connection.clone(), 999, lead_id, &fields(&["phone"]))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "contact", .. }));

        let err = enrich_contact(db.async_connection.clone(), contact_id, 999, &fields(&["phone"]))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "lead", .. }));

        let err = enrich_contact(db.async_connection.clone(), contact_id, lead_id, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
