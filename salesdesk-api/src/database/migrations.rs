use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Create companies table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR NOT NULL,
            normalized_name VARCHAR NOT NULL UNIQUE,
            industry VARCHAR,
            size VARCHAR CHECK (size IN ('startup', 'small', 'medium', 'large', 'enterprise')),
            website VARCHAR,
            domain VARCHAR,
            description VARCHAR,
            linkedin_url VARCHAR,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_companies_domain ON companies(domain)",
        [],
    )?;

    // Create contacts table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR NOT NULL,
            last_name VARCHAR NOT NULL,
            job_title VARCHAR,
            company_id INTEGER,
            email VARCHAR,
            phone VARCHAR,
            linkedin_url VARCHAR,
            custom_fields VARCHAR NOT NULL DEFAULT '{}',
            notes VARCHAR,
            seniority_level VARCHAR CHECK (seniority_level IN ('c_level', 'vp', 'director', 'senior', 'mid', 'entry')),
            lead_score INTEGER NOT NULL DEFAULT 0,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            FOREIGN KEY (company_id) REFERENCES companies (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_company ON contacts(company_id)",
        [],
    )?;

    // Create leads table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name VARCHAR NOT NULL,
            job_title VARCHAR,
            company_name VARCHAR,
            emails VARCHAR NOT NULL DEFAULT '[]',
            linkedin_url VARCHAR,
            raw_data VARCHAR NOT NULL DEFAULT '{}',
            status VARCHAR NOT NULL DEFAULT 'pending_review' CHECK (status IN ('pending_review', 'added_to_crm', 'rejected', 'duplicate')),
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)",
        [],
    )?;

    Ok(())
}

/// Check whether the schema has been created
pub fn has_schema(conn: &Connection) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('leads', 'contacts', 'companies')",
        [],
        |row| row.get(0),
    )?;
    Ok(count == 3)
}
