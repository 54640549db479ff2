// src/infrastructure/sqlite_note.rs
use crate::application::{ListQuery, NoteRepository};
use crate::domain::{DomainError, Note, Tag};
use crate::infrastructure::database::{like_pattern, storage_error, Database};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, instrument};

/// `notes` table adapter.
///
/// Listings are ordered by `updated_at` descending (newest id first on ties)
/// and come back with their tags loaded from `note_tags`.
#[derive(Debug, Clone)]
pub struct SqliteNoteRepository {
    db: Database,
}

impl SqliteNoteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn load_tags(conn: &Connection, note_id: i64) -> Result<Vec<Tag>, DomainError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT t.id, t.name FROM tags t
             JOIN note_tags nt ON nt.tag_id = t.id
             WHERE nt.note_id = ?1
             ORDER BY t.id",
        )
        .map_err(storage_error)?;

    let tags = stmt
        .query_map(params![note_id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(storage_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(storage_error)?;
    Ok(tags)
}

impl NoteRepository for SqliteNoteRepository {
    #[instrument(level = "debug", skip(self))]
    fn list(&self, query: &ListQuery) -> Result<Vec<Note>, DomainError> {
        let pattern = query.keyword.as_deref().map(like_pattern);
        let limit = query.limit.unwrap_or(-1);

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached(
                    r"SELECT id, front, back, category, created_at, updated_at FROM notes
                      WHERE (?1 IS NULL OR id = ?1)
                        AND (?2 IS NULL
                             OR front LIKE ?2 ESCAPE '\'
                             OR back LIKE ?2 ESCAPE '\')
                      ORDER BY updated_at DESC, id DESC
                      LIMIT ?3 OFFSET ?4",
                )
                .map_err(storage_error)?;

            let mut notes = stmt
                .query_map(params![query.id, pattern, limit, query.offset], |row| {
                    Ok(Note {
                        id: row.get(0)?,
                        front: row.get(1)?,
                        back: row.get(2)?,
                        category: row.get(3)?,
                        tags: Vec::new(),
                        created_at: row.get(4)?,
                        updated_at: row.get(5)?,
                    })
                })
                .map_err(storage_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(storage_error)?;

            for note in &mut notes {
                note.tags = load_tags(conn, note.id)?;
            }

            debug!(count = notes.len(), "Loaded notes");
            Ok(notes)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        let pattern = keyword.map(like_pattern);
        self.db.with_conn(|conn| {
            conn.query_row(
                r"SELECT COUNT(*) FROM notes
                  WHERE (?1 IS NULL
                         OR front LIKE ?1 ESCAPE '\'
                         OR back LIKE ?1 ESCAPE '\')",
                params![pattern],
                |row| row.get(0),
            )
            .map_err(storage_error)
        })
    }

    /// Inserts the row only; associations are written through `set_tags`.
    #[instrument(level = "debug", skip(self))]
    fn create(&self, note: &mut Note) -> Result<(), DomainError> {
        let ts = now();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes (front, back, category, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![note.front, note.back, note.category, ts],
            )
            .map_err(storage_error)?;
            note.id = conn.last_insert_rowid();
            Ok(())
        })?;

        note.created_at = ts;
        note.updated_at = ts;
        note.tags.clear();
        info!(note_id = note.id, "Created note");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn update(&self, note: &Note) -> Result<usize, DomainError> {
        let ts = now();
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE notes SET front = ?2, back = ?3, category = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![note.id, note.front, note.back, note.category, ts],
            )
            .map_err(storage_error)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM notes WHERE id = ?1", params![id])
                .map_err(storage_error)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn set_tags(&self, note_id: i64, tag_ids: &[i64]) -> Result<usize, DomainError> {
        let ts = now();
        self.db.with_conn(|conn| {
            let tx = conn.transaction().map_err(storage_error)?;

            let exists = tx
                .query_row("SELECT 1 FROM notes WHERE id = ?1", params![note_id], |_| {
                    Ok(())
                })
                .optional()
                .map_err(storage_error)?
                .is_some();
            if !exists {
                return Ok(0);
            }

            for &tag_id in tag_ids {
                let known = tx
                    .query_row("SELECT 1 FROM tags WHERE id = ?1", params![tag_id], |_| {
                        Ok(())
                    })
                    .optional()
                    .map_err(storage_error)?
                    .is_some();
                if !known {
                    return Err(DomainError::tag_not_found(tag_id));
                }
            }

            tx.execute("DELETE FROM note_tags WHERE note_id = ?1", params![note_id])
                .map_err(storage_error)?;
            for &tag_id in tag_ids {
                tx.execute(
                    "INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?1, ?2)",
                    params![note_id, tag_id],
                )
                .map_err(storage_error)?;
            }
            tx.execute(
                "UPDATE notes SET updated_at = ?2 WHERE id = ?1",
                params![note_id, ts],
            )
            .map_err(storage_error)?;

            tx.commit().map_err(storage_error)?;
            Ok(1)
        })
    }
}
