// src/infrastructure/memory.rs
use crate::application::repository::matches_keyword;
use crate::application::{ListQuery, NoteRepository, TagRepository};
use crate::constants::TAG_EXISTS_MSG;
use crate::domain::{DomainError, Note, Tag};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct MemoryState {
    tags: Vec<Tag>,
    notes: Vec<Note>,
    /// (note_id, tag_id) pairs, the in-memory `note_tags` table.
    links: Vec<(i64, i64)>,
    last_tag_id: i64,
    last_note_id: i64,
}

/// Shared in-memory store. Cloning shares the same state, so a tag adapter
/// and a note adapter built from one store see each other's rows the way
/// two SQLite adapters sharing a `Database` do.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, DomainError> {
        self.state
            .lock()
            .map_err(|e| DomainError::Storage(format!("memory store poisoned: {}", e)))
    }
}

fn window<T>(rows: impl Iterator<Item = T>, query: &ListQuery) -> Vec<T> {
    let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
    let limit = query
        .limit
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or(usize::MAX);
    rows.skip(offset).take(limit).collect()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTagRepository {
    store: MemoryStore,
}

impl MemoryTagRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl TagRepository for MemoryTagRepository {
    #[instrument(level = "debug", skip(self))]
    fn list(&self, query: &ListQuery) -> Result<Vec<Tag>, DomainError> {
        let state = self.store.lock()?;
        let rows = state
            .tags
            .iter()
            .filter(|t| query.id.map_or(true, |id| t.id == id))
            .filter(|t| {
                query
                    .keyword
                    .as_deref()
                    .map_or(true, |k| matches_keyword(&t.name, k))
            })
            .cloned();
        Ok(window(rows, query))
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        let state = self.store.lock()?;
        let count = state
            .tags
            .iter()
            .filter(|t| keyword.map_or(true, |k| matches_keyword(&t.name, k)))
            .count();
        Ok(count as i64)
    }

    #[instrument(level = "debug", skip(self))]
    fn create(&self, tag: &mut Tag) -> Result<(), DomainError> {
        let mut state = self.store.lock()?;
        if state.tags.iter().any(|t| t.name == tag.name) {
            return Err(DomainError::Conflict(TAG_EXISTS_MSG.to_string()));
        }
        state.last_tag_id += 1;
        tag.id = state.last_tag_id;
        state.tags.push(tag.clone());
        debug!(tag_id = tag.id, "Stored tag in memory");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn update(&self, tag: &Tag) -> Result<usize, DomainError> {
        let mut state = self.store.lock()?;
        if state
            .tags
            .iter()
            .any(|t| t.id != tag.id && t.name == tag.name)
        {
            return Err(DomainError::Conflict(TAG_EXISTS_MSG.to_string()));
        }
        match state.tags.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => {
                *existing = tag.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        let mut state = self.store.lock()?;
        let before = state.tags.len();
        state.tags.retain(|t| t.id != id);
        let removed = before - state.tags.len();
        if removed > 0 {
            state.links.retain(|&(_, tag_id)| tag_id != id);
        }
        Ok(removed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryNoteRepository {
    store: MemoryStore,
}

impl MemoryNoteRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn note_matches(note: &Note, keyword: Option<&str>) -> bool {
    keyword.map_or(true, |k| {
        matches_keyword(&note.front, k) || matches_keyword(&note.back, k)
    })
}

impl NoteRepository for MemoryNoteRepository {
    #[instrument(level = "debug", skip(self))]
    fn list(&self, query: &ListQuery) -> Result<Vec<Note>, DomainError> {
        let state = self.store.lock()?;
        let mut matching: Vec<&Note> = state
            .notes
            .iter()
            .filter(|n| query.id.map_or(true, |id| n.id == id))
            .filter(|n| note_matches(n, query.keyword.as_deref()))
            .collect();
        matching.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let notes = window(matching.into_iter(), query)
            .into_iter()
            .map(|n| {
                let mut note = n.clone();
                let mut tags: Vec<Tag> = state
                    .tags
                    .iter()
                    .filter(|t| state.links.contains(&(n.id, t.id)))
                    .cloned()
                    .collect();
                tags.sort_by_key(|t| t.id);
                note.tags = tags;
                note
            })
            .collect();
        Ok(notes)
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        let state = self.store.lock()?;
        let count = state.notes.iter().filter(|n| note_matches(n, keyword)).count();
        Ok(count as i64)
    }

    #[instrument(level = "debug", skip(self))]
    fn create(&self, note: &mut Note) -> Result<(), DomainError> {
        let mut state = self.store.lock()?;
        state.last_note_id += 1;
        let ts = now();
        note.id = state.last_note_id;
        note.created_at = ts;
        note.updated_at = ts;

        let mut row = note.clone();
        row.tags.clear();
        state.notes.push(row);
        debug!(note_id = note.id, "Stored note in memory");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn update(&self, note: &Note) -> Result<usize, DomainError> {
        let mut state = self.store.lock()?;
        match state.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => {
                existing.front = note.front.clone();
                existing.back = note.back.clone();
                existing.category = note.category.clone();
                existing.updated_at = now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        let mut state = self.store.lock()?;
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        let removed = before - state.notes.len();
        if removed > 0 {
            state.links.retain(|&(note_id, _)| note_id != id);
        }
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    fn set_tags(&self, note_id: i64, tag_ids: &[i64]) -> Result<usize, DomainError> {
        let mut state = self.store.lock()?;
        if !state.notes.iter().any(|n| n.id == note_id) {
            return Ok(0);
        }
        if let Some(&missing) = tag_ids
            .iter()
            .find(|&&id| !state.tags.iter().any(|t| t.id == id))
        {
            return Err(DomainError::tag_not_found(missing));
        }

        state.links.retain(|&(n, _)| n != note_id);
        for &tag_id in tag_ids {
            if !state.links.contains(&(note_id, tag_id)) {
                state.links.push((note_id, tag_id));
            }
        }
        let ts = now();
        if let Some(note) = state.notes.iter_mut().find(|n| n.id == note_id) {
            note.updated_at = ts;
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (MemoryTagRepository, MemoryNoteRepository) {
        let store = MemoryStore::new();
        (
            MemoryTagRepository::new(store.clone()),
            MemoryNoteRepository::new(store),
        )
    }

    #[test]
    fn given_duplicate_name_when_creating_tag_then_returns_conflict() {
        let (tags, _) = repos();
        tags.create(&mut Tag::unsaved("verbs")).expect("first create");

        let result = tags.create(&mut Tag::unsaved("verbs"));

        assert_eq!(result, Err(DomainError::Conflict(TAG_EXISTS_MSG.to_string())));
        assert_eq!(tags.count(None).expect("count"), 1);
    }

    #[test]
    fn given_deleted_tag_when_creating_again_then_id_is_not_reused() {
        let (tags, _) = repos();
        let mut first = Tag::unsaved("a");
        tags.create(&mut first).expect("create");
        tags.delete(first.id).expect("delete");

        let mut second = Tag::unsaved("a");
        tags.create(&mut second).expect("create again");

        assert!(second.id > first.id);
    }

    #[test]
    fn given_window_when_listing_tags_then_applies_offset_and_limit() {
        let (tags, _) = repos();
        for name in ["t1", "t2", "t3", "t4"] {
            tags.create(&mut Tag::unsaved(name)).expect("create");
        }

        let query = ListQuery {
            offset: 1,
            limit: Some(2),
            ..Default::default()
        };
        let names: Vec<String> = tags
            .list(&query)
            .expect("list")
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["t2", "t3"]);
    }

    #[test]
    fn given_linked_tag_when_deleting_tag_then_link_disappears() {
        let (tags, notes) = repos();
        let mut tag = Tag::unsaved("noun");
        tags.create(&mut tag).expect("create tag");
        let mut note = Note::unsaved("Haus");
        notes.create(&mut note).expect("create note");
        notes.set_tags(note.id, &[tag.id]).expect("link");

        tags.delete(tag.id).expect("delete tag");

        let stored = notes.list(&ListQuery::by_id(note.id)).expect("list");
        assert!(stored[0].tags.is_empty());
    }

    #[test]
    fn given_unknown_tag_when_setting_tags_then_returns_not_found() {
        let (_, notes) = repos();
        let mut note = Note::unsaved("Haus");
        notes.create(&mut note).expect("create note");

        let result = notes.set_tags(note.id, &[42]);

        assert_eq!(result, Err(DomainError::tag_not_found(42)));
    }

    #[test]
    fn given_keyword_in_back_when_counting_notes_then_matches() {
        let (_, notes) = repos();
        let mut note = Note::unsaved("Hund");
        note.back = "Dog".to_string();
        notes.create(&mut note).expect("create");

        assert_eq!(notes.count(Some("dog")).expect("count"), 1);
        assert_eq!(notes.count(Some("cat")).expect("count"), 0);
    }
}
