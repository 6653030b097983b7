use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::database::Database;

/// Returns the default path of the SalesDesk database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/salesdesk/salesdesk.db`
/// - **Linux**: `~/.local/share/salesdesk/salesdesk.db`
/// - **Windows**: `%LOCALAPPDATA%\salesdesk\salesdesk.db`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("salesdesk").join("salesdesk.db"))
}

/// Open the database at `path`, or at the platform default when `None`
pub fn initialize_database(path: Option<&Path>) -> anyhow::Result<(Arc<Database>, PathBuf)> {
    let db_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_db_path()?,
    };

    let db = Database::new(&db_path)?;
    Ok((Arc::new(db), db_path))
}
