use rusqlite::{Connection, OptionalExtension, Row};
use shared_types::{Company, NewCompany};

use super::enum_column;

const COMPANY_COLUMNS: &str = "id, name, industry, size, website, domain, description,
                               linkedin_url, created_at, updated_at";

/// Dedup key for company names: trimmed and lower-cased
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn row_to_company(row: &Row) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
        industry: row.get(2)?,
        size: enum_column(3, row.get(3)?)?,
        website: row.get(4)?,
        domain: row.get(5)?,
        description: row.get(6)?,
        linkedin_url: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

pub fn get_company(conn: &Connection, id: i64) -> rusqlite::Result<Option<Company>> {
    conn.query_row(
        &format!("SELECT {} FROM companies WHERE id = ?", COMPANY_COLUMNS),
        [id],
        row_to_company,
    )
    .optional()
}

pub fn find_company_by_name_case_insensitive(
    conn: &Connection,
    name: &str,
) -> rusqlite::Result<Option<Company>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM companies WHERE normalized_name = ?",
            COMPANY_COLUMNS
        ),
        [normalize_company_name(name)],
        row_to_company,
    )
    .optional()
}

/// Insert `company` unless one with the same normalized name exists.
///
/// Returns the new id, or `None` when the unique index rejected the row.
pub fn insert_company_if_absent(
    conn: &Connection,
    company: &NewCompany,
) -> rusqlite::Result<Option<i64>> {
    let now = chrono::Utc::now().timestamp();

    conn.query_row(
        "INSERT INTO companies
         (name, normalized_name, industry, size, website, domain, description,
          linkedin_url, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(normalized_name) DO NOTHING
         RETURNING id",
        rusqlite::params![
            company.name.trim(),
            normalize_company_name(&company.name),
            company.industry.as_ref(),
            company.size.map(|s| s.as_str()),
            company.website.as_ref(),
            company.domain.as_ref(),
            company.description.as_ref(),
            company.linkedin_url.as_ref(),
            now,
            now
        ],
        |row| row.get(0),
    )
    .optional()
}

pub fn list_companies(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<Company>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM companies ORDER BY created_at DESC, id DESC LIMIT ?",
        COMPANY_COLUMNS
    ))?;

    let companies = stmt
        .query_map([limit as i64], row_to_company)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::migrations::run_migrations;
    use shared_types::CompanySize;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn new_company(name: &str) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            size: Some(CompanySize::Medium),
            website: Some("https://acme.com".to_string()),
            domain: Some("acme.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_get() {
        let conn = conn();
        let id = insert_company_if_absent(&conn, &new_company("  Acme Corp "))
            .unwrap()
            .unwrap();

        let company = get_company(&conn, id).unwrap().unwrap();
        assert_eq!(company.name, "Acme Corp");
        assert_eq!(company.size, Some(CompanySize::Medium));
        assert_eq!(company.domain.as_deref(), Some("acme.com"));

        assert!(get_company(&conn, id + 1).unwrap().is_none());
    }

    #[test]
    fn test_conflicting_name_is_not_inserted() {
        let conn = conn();
        insert_company_if_absent(&conn, &new_company("Acme")).unwrap();

        let second = insert_company_if_absent(&conn, &new_company("ACME ")).unwrap();
        assert_eq!(second, None);
        assert_eq!(list_companies(&conn, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let conn = conn();
        let id = insert_company_if_absent(&conn, &new_company("Acme"))
            .unwrap()
            .unwrap();

        let found = find_company_by_name_case_insensitive(&conn, " aCmE")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert!(find_company_by_name_case_insensitive(&conn, "Globex")
            .unwrap()
            .is_none());
    }
}
