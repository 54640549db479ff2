// src/infrastructure/sqlite_tag.rs
use crate::application::{ListQuery, TagRepository};
use crate::constants::TAG_EXISTS_MSG;
use crate::domain::{DomainError, Tag};
use crate::infrastructure::database::{conflict_or_storage, like_pattern, storage_error, Database};
use rusqlite::params;
use tracing::{debug, info, instrument};

/// `tags` table adapter. Rows come back in insertion (id) order.
#[derive(Debug, Clone)]
pub struct SqliteTagRepository {
    db: Database,
}

impl SqliteTagRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl TagRepository for SqliteTagRepository {
    #[instrument(level = "debug", skip(self))]
    fn list(&self, query: &ListQuery) -> Result<Vec<Tag>, DomainError> {
        let pattern = query.keyword.as_deref().map(like_pattern);
        let limit = query.limit.unwrap_or(-1);

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached(
                    r"SELECT id, name FROM tags
                      WHERE (?1 IS NULL OR id = ?1)
                        AND (?2 IS NULL OR name LIKE ?2 ESCAPE '\')
                      ORDER BY id
                      LIMIT ?3 OFFSET ?4",
                )
                .map_err(storage_error)?;

            let tags = stmt
                .query_map(params![query.id, pattern, limit, query.offset], |row| {
                    Ok(Tag {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })
                .map_err(storage_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(storage_error)?;

            debug!(count = tags.len(), "Loaded tags");
            Ok(tags)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        let pattern = keyword.map(like_pattern);
        self.db.with_conn(|conn| {
            conn.query_row(
                r"SELECT COUNT(*) FROM tags WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\')",
                params![pattern],
                |row| row.get(0),
            )
            .map_err(storage_error)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn create(&self, tag: &mut Tag) -> Result<(), DomainError> {
        self.db.with_conn(|conn| {
            conn.execute("INSERT INTO tags (name) VALUES (?1)", params![tag.name])
                .map_err(|e| conflict_or_storage(e, TAG_EXISTS_MSG))?;
            tag.id = conn.last_insert_rowid();
            Ok(())
        })?;

        info!(tag_id = tag.id, name = %tag.name, "Created tag");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn update(&self, tag: &Tag) -> Result<usize, DomainError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE tags SET name = ?2 WHERE id = ?1",
                params![tag.id, tag.name],
            )
            .map_err(|e| conflict_or_storage(e, TAG_EXISTS_MSG))
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM tags WHERE id = ?1", params![id])
                .map_err(storage_error)
        })
    }
}
