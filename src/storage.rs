//! SQLite connection setup for the todo list
//!
//! Opens the database file, applies connection pragmas, and brings the schema
//! up to date (creating it or migrating a legacy layout).

use crate::error::TodoResult;
use crate::migration;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current value stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

pub(crate) const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        "order" INTEGER NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        completed_at TEXT
    );
"#;

pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Open the database, creating the parent folder and schema as needed
    pub fn open(&self) -> TodoResult<Connection> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            debug!(folder = %parent.display(), "Creating database folder");
            std::fs::create_dir_all(parent)?;
        }

        info!(path = %self.file_path.display(), "Opening todo database");
        let conn = Connection::open(&self.file_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        prepare_schema(&conn)?;
        Ok(conn)
    }
}

/// Open a private in-memory database with the current schema
pub fn open_in_memory() -> TodoResult<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare_schema(&conn)?;
    Ok(conn)
}

pub(crate) fn prepare_schema(conn: &Connection) -> TodoResult<()> {
    if migration::needs_migration(conn)? {
        migration::migrate_legacy(conn)?;
    }
    conn.execute_batch(CREATE_SCHEMA)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
