use lead_matching::CompanyMetadata;
use rusqlite::Connection;
use shared_types::Company;
use tracing::{debug, info};

use crate::database::companies as companies_db;
use crate::error::EngineResult;

#[derive(Debug, Clone)]
pub struct ResolvedCompany {
    pub company: Company,
    pub is_new_record: bool,
}

/// Find a company by case-insensitive name, creating it from `metadata`
/// when none exists. Returns `None` for a blank name.
///
/// Creation goes through the unique index on the normalized name, so two
/// callers racing on the same name end up sharing one row.
pub fn find_or_create_company(
    conn: &Connection,
    name: &str,
    metadata: CompanyMetadata,
) -> EngineResult<Option<ResolvedCompany>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(company) = companies_db::find_company_by_name_case_insensitive(conn, name)? {
        debug!("Reusing company {} for name {:?}", company.id, name);
        return Ok(Some(ResolvedCompany {
            company,
            is_new_record: false,
        }));
    }

    create_company(conn, name, metadata).map(Some)
}

/// Insert a company for `name`, or read back the row another writer
/// created under the same normalized name.
fn create_company(
    conn: &Connection,
    name: &str,
    metadata: CompanyMetadata,
) -> EngineResult<ResolvedCompany> {
    let new_company = metadata.into_new_company(name);
    if let Some(id) = companies_db::insert_company_if_absent(conn, &new_company)? {
        let company = companies_db::get_company(conn, id)?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        info!("Created company {} ({})", company.name, company.id);
        return Ok(ResolvedCompany {
            company,
            is_new_record: true,
        });
    }

    debug!("Company {:?} was inserted concurrently, reusing it", name);
    let company = companies_db::find_company_by_name_case_insensitive(conn, name)?
        .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    Ok(ResolvedCompany {
        company,
        is_new_record: false,
    })
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

    fn metadata() -> CompanyMetadata {
        CompanyMetadata {
            industry: Some("computer software".to_string()),
            website: Some("www.acme.com".to_string()),
            size: Some("1001-5000".to_string()),
            description: None,
            linkedin_url: Some("linkedin.com/company/acme".to_string()),
        }
    }

    #[test]
    fn test_blank_name() {
        let conn = conn();
        assert!(find_or_create_company(&conn, "   ", metadata())
            .unwrap()
            .is_none());
        assert!(companies_db::list_companies(&conn, 10).unwrap().is_empty());
    }

    #[test]
    fn test_creates_from_metadata() {
        let conn = conn();
        let resolved = find_or_create_company(&conn, "Acme", metadata())
            .unwrap()
            .unwrap();

        assert!(resolved.is_new_record);
        assert_eq!(resolved.company.name, "Acme");
        assert_eq!(resolved.company.domain.as_deref(), Some("acme.com"));
        assert_eq!(resolved.company.size, Some(CompanySize::Large));
        assert_eq!(
            resolved.company.industry.as_deref(),
            Some("computer software")
        );
    }

    #[test]
    fn test_second_call_reuses_row_regardless_of_case() {
        let conn = conn();
        let first = find_or_create_company(&conn, "Acme", metadata())
            .unwrap()
            .unwrap();
        let second = find_or_create_company(&conn, "ACME", CompanyMetadata::default())
            .unwrap()
            .unwrap();

        assert!(first.is_new_record);
        assert!(!second.is_new_record);
        assert_eq!(first.company.id, second.company.id);
        assert_eq!(companies_db::list_companies(&conn, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_unparseable_website_omits_domain() {
        let conn = conn();
        let metadata = CompanyMetadata {
            website: Some("http://".to_string()),
            ..Default::default()
        };
        let resolved = find_or_create_company(&conn, "Globex", metadata)
            .unwrap()
            .unwrap();

        assert_eq!(resolved.company.website.as_deref(), Some("http://"));
        assert_eq!(resolved.company.domain, None);
    }

    #[test]
    fn test_insert_conflict_returns_existing_row() {
        let conn = conn();
        let existing = find_or_create_company(&conn, "Acme", metadata())
            .unwrap()
            .unwrap();

        // the lookup was skipped, as when another writer wins the race
        let resolved = create_company(&conn, " acme ", CompanyMetadata::default()).unwrap();

        assert!(!resolved.is_new_record);
        assert_eq!(resolved.company.id, existing.company.id);
        assert_eq!(resolved.company.domain.as_deref(), Some("acme.com"));
        assert_eq!(companies_db::list_companies(&conn, 10).unwrap().len(), 1);
    }
}
