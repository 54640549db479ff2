// src/infrastructure/database.rs
use crate::domain::DomainError;
use anyhow::{Context, Result};
use rusqlite::{Connection, ErrorCode};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS tags (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    front      TEXT NOT NULL,
    back       TEXT NOT NULL DEFAULT '',
    category   TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS note_tags (
    note_id INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
    tag_id  INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
    PRIMARY KEY (note_id, tag_id)
);

CREATE INDEX IF NOT EXISTS idx_notes_updated_at ON notes(updated_at);
CREATE INDEX IF NOT EXISTS idx_note_tags_tag_id ON note_tags(tag_id);
";

/// Process-wide handle to the SQLite store.
///
/// Opened once at startup; every storage adapter holds a clone. Statements
/// are serialized through the mutex.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = PathBuf::from(path.as_ref());
        debug!(?path, "Opening database");

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create database directory: {}", dir.display())
            })?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Self::init(conn)?;

        info!(?path, "Successfully opened database");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)
            .context("Failed to enable foreign keys")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to apply database schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(format!("database handle poisoned: {}", e)))?;
        f(&mut conn)
    }
}

pub fn storage_error(err: rusqlite::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}

/// UNIQUE and PRIMARY KEY violations become a conflict carrying the
/// user-facing `message`; any other failure keeps the raw store text.
pub fn conflict_or_storage(err: rusqlite::Error, message: &str) -> DomainError {
    if is_unique_violation(&err) {
        DomainError::Conflict(message.to_string())
    } else {
        storage_error(err)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || msg
                    .as_deref()
                    .is_some_and(|m| m.contains("UNIQUE constraint"))
        }
        _ => false,
    }
}

/// Turn a keyword into a `LIKE` pattern that matches it literally.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
