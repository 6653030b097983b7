use rusqlite::{Connection, OptionalExtension, Row};
use shared_types::{CreateLeadRequest, Lead, LeadStatus};

use super::{enum_column, json_column};
use crate::error::EngineResult;

const LEAD_SELECT: &str = "SELECT id, full_name, job_title, company_name, emails, linkedin_url,
                                  raw_data, status, created_at, updated_at
                           FROM leads";

fn row_to_lead(row: &Row) -> rusqlite::Result<Lead> {
    let status: Option<LeadStatus> = enum_column(7, row.get(7)?)?;

    Ok(Lead {
        id: row.get(0)?,
        full_name: row.get(1)?,
        job_title: row.get(2)?,
        company_name: row.get(3)?,
        emails: json_column(4, row.get(4)?)?,
        linkedin_url: row.get(5)?,
        raw_data: json_column(6, row.get(6)?)?,
        status: status.unwrap_or(LeadStatus::PendingReview),
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

pub fn get_lead(conn: &Connection, id: i64) -> rusqlite::Result<Option<Lead>> {
    conn.query_row(&format!("{} WHERE id = ?", LEAD_SELECT), [id], row_to_lead)
        .optional()
}

/// Leads still awaiting review, oldest first
pub fn list_pending_leads(conn: &Connection) -> rusqlite::Result<Vec<Lead>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE status = ? ORDER BY id ASC",
        LEAD_SELECT
    ))?;

    let leads = stmt
        .query_map([LeadStatus::PendingReview.as_str()], row_to_lead)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(leads)
}

pub fn list_leads(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<Lead>> {
    let mut stmt = conn.prepare(&format!(
        "{} ORDER BY created_at DESC, id DESC LIMIT ?",
        LEAD_SELECT
    ))?;

    let leads = stmt
        .query_map([limit as i64], row_to_lead)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(leads)
}

pub fn insert_lead(conn: &Connection, request: &CreateLeadRequest) -> EngineResult<i64> {
    let now = chrono::Utc::now().timestamp();
    let emails: Vec<&str> = request
        .emails
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    let raw_data = request
        .raw_data
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    let id: i64 = conn.query_row(
        "INSERT INTO leads
         (full_name, job_title, company_name, emails, linkedin_url, raw_data, status,
          created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            request.full_name.trim(),
            request.job_title.as_ref(),
            request.company_name.as_ref(),
            serde_json::to_string(&emails)?,
            request.linkedin_url.as_ref(),
            serde_json::to_string(&raw_data)?,
            LeadStatus::PendingReview.as_str(),
            now,
            now
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

#[cfg(test)]
pub(crate) fn set_lead_status(conn: &Connection, id: i64, status: LeadStatus) {
    conn.execute(
        "UPDATE leads SET status = ? WHERE id = ?",
        rusqlite::params![status.as_str(), id],
    )
    .unwrap();
}
