use lead_matching::ContactChanges;
use rusqlite::{Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use shared_types::{Contact, CreateContactRequest, SeniorityLevel, UpdateContactRequest};

use super::{enum_column, json_column};
use crate::error::{EngineError, EngineResult};

const CONTACT_SELECT: &str = "SELECT c.id, c.first_name, c.last_name, c.job_title, c.company_id,
                                     co.name, c.email, c.phone, c.linkedin_url, c.custom_fields,
                                     c.notes, c.seniority_level, c.lead_score, c.created_at,
                                     c.updated_at
                              FROM contacts c
                              LEFT JOIN companies co ON co.id = c.company_id";

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        job_title: row.get(3)?,
        company_id: row.get(4)?,
        company_name: row.get(5)?,
        email: row.get(6)?,
        phone: row.get(7)?,
        linkedin_url: row.get(8)?,
        custom_fields: json_column(9, row.get(9)?)?,
        notes: row.get(10)?,
        seniority_level: enum_column(11, row.get(11)?)?,
        lead_score: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

/// Column values to overwrite. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub company_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub custom_fields: Option<Map<String, Value>>,
    pub notes: Option<String>,
    pub seniority_level: Option<SeniorityLevel>,
    pub lead_score: Option<i32>,
}

impl From<UpdateContactRequest> for ContactPatch {
    fn from(request: UpdateContactRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            job_title: request.job_title,
            company_id: request.company_id,
            email: request.email,
            phone: request.phone,
            linkedin_url: request.linkedin_url,
            seniority_level: request.seniority_level,
            lead_score: request.lead_score,
            ..Default::default()
        }
    }
}

impl From<ContactChanges> for ContactPatch {
    fn from(changes: ContactChanges) -> Self {
        Self {
            job_title: changes.job_title,
            email: changes.email,
            phone: changes.phone,
            linkedin_url: changes.linkedin_url,
            seniority_level: changes.seniority_level,
            ..Default::default()
        }
    }
}

pub fn get_contact(conn: &Connection, id: i64) -> rusqlite::Result<Option<Contact>> {
    conn.query_row(
        &format!("{} WHERE c.id = ?", CONTACT_SELECT),
        [id],
        row_to_contact,
    )
    .optional()
}

/// All contacts in insertion order, optionally capped at `limit`
pub fn list_contacts(conn: &Connection, limit: Option<usize>) -> rusqlite::Result<Vec<Contact>> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let mut stmt = conn.prepare(&format!("{} ORDER BY c.id ASC LIMIT ?", CONTACT_SELECT))?;

    let contacts = stmt
        .query_map([limit], row_to_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn insert_contact(conn: &Connection, request: &CreateContactRequest) -> rusqlite::Result<i64> {
    let now = chrono::Utc::now().timestamp();

    conn.query_row(
        "INSERT INTO contacts
         (first_name, last_name, job_title, company_id, email, phone, linkedin_url,
          notes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            request.first_name.trim(),
            request.last_name.trim(),
            request.job_title.as_ref(),
            request.company_id,
            request.email.as_ref(),
            request.phone.as_ref(),
            request.linkedin_url.as_ref(),
            request.notes.as_ref(),
            now,
            now
        ],
        |row| row.get(0),
    )
}

/// Apply `patch` and return the stored contact
pub fn update_contact(conn: &Connection, id: i64, patch: &ContactPatch) -> EngineResult<Contact> {
    let now = chrono::Utc::now().timestamp();
    let custom_fields = patch
        .custom_fields
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    let updated = conn.execute(
        "UPDATE contacts SET
            first_name = COALESCE(?1, first_name),
            last_name = COALESCE(?2, last_name),
            job_title = COALESCE(?3, job_title),
            company_id = COALESCE(?4, company_id),
            email = COALESCE(?5, email),
            phone = COALESCE(?6, phone),
            linkedin_url = COALESCE(?7, linkedin_url),
            custom_fields = COALESCE(?8, custom_fields),
            notes = COALESCE(?9, notes),
            seniority_level = COALESCE(?10, seniority_level),
            lead_score = COALESCE(?11, lead_score),
            updated_at = ?12
         WHERE id = ?13",
        rusqlite::params![
            patch.first_name.as_ref(),
            patch.last_name.as_ref(),
            patch.job_title.as_ref(),
            patch.company_id,
            patch.email.as_ref(),
            patch.phone.as_ref(),
            patch.linkedin_url.as_ref(),
            custom_fields,
            patch.notes.as_ref(),
            patch.seniority_level.map(|s| s.as_str()),
            patch.lead_score,
            now,
            id
        ],
    )?;

    if updated == 0 {
        return Err(EngineError::not_found("contact", id));
    }

    get_contact(conn, id)?.ok_or_else(|| EngineError::not_found("contact", id))
}
