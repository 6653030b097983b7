pub mod companies;
pub mod contacts;
pub mod leads;
pub mod migrations;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::EngineResult;

#[derive(Clone)]
pub struct AsyncDbConnection {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl AsyncDbConnection {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn lock(&self) -> EngineResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

pub struct Database {
    pub async_connection: AsyncDbConnection,
}

impl Database {
    /// Open (or create) the database file, run migrations and build the pool
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        // Ensure directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager)?;

        // Migrate before handing out connections so every request sees the schema
        {
            let conn = pool.get()?;
            if !migrations::has_schema(&conn)? {
                tracing::info!("Creating schema in {:?}", db_path);
            }
            migrations::run_migrations(&conn)?;
        }

        Ok(Database {
            async_connection: AsyncDbConnection::new(pool),
        })
    }
}

/// Decode a JSON text column inside a row mapper
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    idx: usize,
    text: String,
) -> rusqlite::Result<T> {
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Decode an enum stored by name inside a row mapper
pub(crate) fn enum_column<T>(idx: usize, text: Option<String>) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.map(|s| {
        s.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// A migrated database in a temporary directory. Keep the `TempDir`
    /// alive for as long as the database is used.
    pub fn temp_database() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("salesdesk.db")).unwrap();
        (dir, db)
    }
}
