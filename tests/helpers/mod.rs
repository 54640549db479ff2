use anyhow::{Context, Result};
use langlearner::application::{NoteService, TagService};
use langlearner::infrastructure::{Database, SqliteNoteRepository, SqliteTagRepository};
use rusqlite::params;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for working with a temporary on-disk database
#[allow(dead_code)]
pub struct TestDatabase {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
    pub db: Database,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Create an empty database with the schema applied
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;
        let db_path = temp_dir.path().join("data/langlearner.db");
        let db = Database::open(&db_path)?;

        Ok(Self {
            _temp_dir: temp_dir,
            db_path,
            db,
        })
    }

    pub fn tag_service(&self) -> TagService<SqliteTagRepository> {
        TagService::new(SqliteTagRepository::new(self.db.clone()))
    }

    pub fn note_service(&self) -> NoteService<SqliteNoteRepository> {
        NoteService::new(SqliteNoteRepository::new(self.db.clone()))
    }

    /// Insert a note row with explicit timestamps, bypassing the services
    pub fn insert_note(&self, front: &str, back: &str, updated_at: i64) -> Result<i64> {
        let id = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes (front, back, category, created_at, updated_at)
                 VALUES (?1, ?2, '', ?3, ?3)",
                params![front, back, updated_at],
            )
            .map_err(langlearner::infrastructure::database::storage_error)?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(id)
    }

    /// Run a raw statement, e.g. to clear a table between steps
    pub fn exec(&self, sql: &str) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(langlearner::infrastructure::database::storage_error)
        })?;
        Ok(())
    }
}
