use lead_matching::{rank_candidates, FactorBreakdown, LeadProfile, MatchOptions};
use shared_types::{Contact, ContactMatchesResponse, LeadMatchesResponse};
use tracing::info;

use crate::database::{contacts as contacts_db, leads as leads_db, AsyncDbConnection};
use crate::error::{EngineError, EngineResult};

/// Contacts that are probably the same person as the given lead
pub async fn find_matches_for_lead(
    conn: AsyncDbConnection,
    lead_id: i64,
    options: &MatchOptions,
) -> EngineResult<LeadMatchesResponse> {
    let conn = conn.lock().await?;

    let lead = leads_db::get_lead(&conn, lead_id)?
        .ok_or_else(|| EngineError::not_found("lead", lead_id))?;
    let contacts = contacts_db::list_contacts(&conn, None)?;
    drop(conn);

    let pool_size = contacts.len();
    let profile = LeadProfile::from_lead(&lead);
    let matches = rank_candidates(contacts, options, |contact| {
        let breakdown = FactorBreakdown::compare(&profile, contact);
        (breakdown.score(), breakdown.reasons())
    });

    info!(
        "Lead {} matched {} of {} contacts",
        lead_id,
        matches.len(),
        pool_size
    );

    Ok(LeadMatchesResponse { lead, matches })
}

/// Pending leads that are probably the same person as `contact`
pub async fn find_matches_for_contact(
    conn: AsyncDbConnection,
    contact: Contact,
    options: &MatchOptions,
) -> EngineResult<ContactMatchesResponse> {
    let leads = {
        let conn = conn.lock().await?;
        leads_db::list_pending_leads(&conn)?
    };

    let pool_size = leads.len();
    let matches = rank_candidates(leads, options, |lead| {
        let breakdown = FactorBreakdown::compare(&LeadProfile::from_lead(lead), &contact);
        (breakdown.score(), breakdown.reasons())
    });

    info!(
        "Contact {} matched {} of {} pending leads",
        contact.id,
        matches.len(),
        pool_size
    );

    Ok(ContactMatchesResponse { contact, matches })
}

pub async fn find_matches_for_contact_id(
    conn: AsyncDbConnection,
    contact_id: i64,
    options: &MatchOptions,
) -> EngineResult<ContactMatchesResponse> {
    let contact = {
        let conn = conn.lock().await?;
        contacts_db::get_contact(&conn, contact_id)?
            .ok_or_else(|| EngineError::not_found("contact", contact_id))?
    };

    find_matches_for_contact(conn, contact, options).await
}
