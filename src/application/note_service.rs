// src/application/note_service.rs
use crate::application::repository::keyword_filter;
use crate::application::{ListQuery, NoteRepository};
use crate::constants::{DEFAULT_PAGE_SIZE, NOTE_FRONT_EMPTY_MSG};
use crate::domain::{DomainError, Note, NoteList, PageRequest};
use tracing::{debug, info};

pub struct NoteService<R: NoteRepository> {
    repository: R,
    default_page_size: i64,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_default_page_size(repository, DEFAULT_PAGE_SIZE)
    }

    pub fn with_default_page_size(repository: R, default_page_size: i64) -> Self {
        Self {
            repository,
            default_page_size,
        }
    }

    /// One page of notes, most recently updated first, whose front or back
    /// contains `keyword` (empty: all notes).
    pub fn list(&self, page: i64, page_size: i64, keyword: &str) -> Result<NoteList, DomainError> {
        let request = PageRequest::normalize(page, page_size, self.default_page_size);
        let keyword = keyword_filter(keyword);

        let total = self.repository.count(keyword)?;
        let data = if request.offset() >= total {
            Vec::new()
        } else {
            self.repository.list(&ListQuery::window(keyword, request))?
        };

        debug!(
            page = request.page,
            page_size = request.page_size,
            total,
            returned = data.len(),
            "Listed notes"
        );
        Ok(NoteList::new(total, request, data))
    }

    pub fn get(&self, id: i64) -> Result<Note, DomainError> {
        self.repository
            .list(&ListQuery::by_id(id))?
            .into_iter()
            .next()
            .ok_or(DomainError::note_not_found(id))
    }

    /// Create a note with `front` set; every other field starts empty.
    pub fn create(&self, front: &str) -> Result<Note, DomainError> {
        if front.is_empty() {
            return Err(DomainError::Validation(NOTE_FRONT_EMPTY_MSG.to_string()));
        }

        let mut note = Note::unsaved(front);
        self.repository.create(&mut note)?;
        info!(note_id = note.id, "Note created");
        Ok(note)
    }

    /// Overwrite the note's row with `front` and `back`.
    ///
    /// An empty `back` is written as empty, and `category` is reset: the row
    /// is replaced, not merged. Tag links are kept.
    pub fn update(&self, id: i64, front: &str, back: &str) -> Result<Note, DomainError> {
        if front.is_empty() {
            return Err(DomainError::Validation(NOTE_FRONT_EMPTY_MSG.to_string()));
        }

        let mut note = Note {
            id,
            front: front.to_string(),
            ..Default::default()
        };
        if !back.is_empty() {
            note.back = back.to_string();
        }

        if self.repository.update(&note)? == 0 {
            debug!(note_id = id, "No note to update");
            return Err(DomainError::note_not_found(id));
        }
        info!(note_id = id, "Note updated");
        self.get(id)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        if self.repository.delete(id)? == 0 {
            debug!(note_id = id, "No note to delete");
            return Err(DomainError::note_not_found(id));
        }
        info!(note_id = id, "Note deleted");
        Ok(())
    }

    /// Replace the set of tags attached to a note. Repeated ids count once.
    pub fn set_tags(&self, id: i64, tag_ids: &[i64]) -> Result<Note, DomainError> {
        let mut unique = tag_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        if self.repository.set_tags(id, &unique)? == 0 {
            return Err(DomainError::note_not_found(id));
        }
        info!(note_id = id, tags = ?unique, "Note tags replaced");
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use crate::util::testing::MockNoteRepository;

    #[test]
    fn given_empty_store_when_listing_then_returns_empty_page() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().build());

        // Act
        let list = service.list(1, 2, "").expect("List should succeed");

        // Assert
        assert_eq!(list.total, 0);
        assert_eq!(list.total_pages, 0);
        assert!(list.data.is_empty());
    }

    #[test]
    fn given_keyword_in_back_when_listing_then_includes_note() {
        // Arrange
        let repo = MockNoteRepository::builder()
            .with_note("Hund", "dog")
            .with_note("Katze", "cat")
            .build();
        let service = NoteService::new(repo);

        // Act
        let list = service.list(1, 10, "DOG").expect("List should succeed");

        // Assert
        assert_eq!(list.total, 1);
        assert_eq!(list.data[0].front, "Hund");
    }

    #[test]
    fn given_three_notes_when_listing_pages_then_windows_do_not_overlap() {
        // Arrange
        let repo = MockNoteRepository::builder()
            .with_note("a", "")
            .with_note("b", "")
            .with_note("c", "")
            .build();
        let service = NoteService::new(repo);

        // Act
        let first = service.list(1, 2, "").expect("page 1");
        let second = service.list(2, 2, "").expect("page 2");

        // Assert
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.data.len(), 2);
        assert_eq!(second.data.len(), 1);
        assert!(second.data.iter().all(|n| !first.data.contains(n)));
    }

    #[test]
    fn given_empty_front_when_creating_then_fails_without_storage_call() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().build());

        // Act
        let result = service.create("");

        // Assert
        assert_eq!(
            result,
            Err(DomainError::Validation(NOTE_FRONT_EMPTY_MSG.to_string()))
        );
        assert!(service.repository.calls().is_empty());
    }

    #[test]
    fn given_front_when_creating_then_other_fields_are_empty() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().build());

        // Act
        let note = service.create("hello").expect("Create should succeed");

        // Assert
        assert!(note.id > 0);
        assert_eq!(note.front, "hello");
        assert_eq!(note.back, "");
        assert_eq!(note.category, "");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn given_empty_front_when_updating_then_row_is_unchanged() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().with_note("hello", "world").build());
        let original = service.list(1, 10, "").expect("list").data.remove(0);

        // Act
        let result = service.update(original.id, "", "");

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(service.get(original.id), Ok(original));
    }

    #[test]
    fn given_empty_back_when_updating_then_back_is_not_preserved() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().with_note("hello", "world").build());
        let id = service.list(1, 10, "").expect("list").data[0].id;

        // Act
        let updated = service.update(id, "hi", "").expect("Update should succeed");

        // Assert
        assert_eq!(updated.front, "hi");
        assert_eq!(updated.back, "");
    }

    #[test]
    fn given_back_when_updating_then_applies_it() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().with_note("hello", "world").build());
        let id = service.list(1, 10, "").expect("list").data[0].id;

        // Act
        let updated = service.update(id, "hallo", "Welt").expect("Update should succeed");

        // Assert
        assert_eq!((updated.front.as_str(), updated.back.as_str()), ("hallo", "Welt"));
    }

    #[test]
    fn given_nonexistent_id_when_updating_or_deleting_then_returns_not_found() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().build());

        // Act & Assert
        assert_eq!(service.update(7, "x", "y"), Err(DomainError::note_not_found(7)));
        assert_eq!(service.delete(7), Err(DomainError::note_not_found(7)));
    }

    #[test]
    fn given_tags_when_setting_tags_then_note_carries_them_once() {
        // Arrange
        let repo = MockNoteRepository::builder()
            .with_note("Haus", "house")
            .with_tag("noun")
            .build();
        let service = NoteService::new(repo);
        let id = service.list(1, 10, "").expect("list").data[0].id;

        // Act
        let note = service.set_tags(id, &[1, 1]).expect("Set tags should succeed");

        // Assert
        assert_eq!(note.tags, vec![Tag { id: 1, name: "noun".to_string() }]);
        assert_eq!(
            service.repository.calls(),
            vec!["count", "list", "set_tags", "list"]
        );
    }

    #[test]
    fn given_missing_note_when_setting_tags_then_returns_not_found() {
        // Arrange
        let service = NoteService::new(MockNoteRepository::builder().build());

        // Act
        let result = service.set_tags(3, &[]);

        // Assert
        assert_eq!(result, Err(DomainError::note_not_found(3)));
    }

    #[test]
    fn given_storage_failure_when_listing_then_returns_storage_error() {
        // Arrange
        let repo = MockNoteRepository::builder()
            .with_failure(DomainError::Storage("database is locked".to_string()))
            .build();
        let service = NoteService::new(repo);

        // Act
        let result = service.list(1, 10, "");

        // Assert
        assert_eq!(result, Err(DomainError::Storage("database is locked".to_string())));
    }
}
