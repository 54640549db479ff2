// src/application/repository.rs
use crate::domain::{DomainError, Note, PageRequest, Tag};

/// Row selection handed to a storage adapter.
///
/// `keyword` is matched case-insensitively as a substring; which columns it
/// is matched against is up to the adapter (tag name, note front/back).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub id: Option<i64>,
    pub keyword: Option<String>,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            limit: Some(1),
            ..Default::default()
        }
    }

    /// The window of rows for one page of a keyword listing.
    pub fn window(keyword: Option<&str>, request: PageRequest) -> Self {
        Self {
            id: None,
            keyword: keyword.map(str::to_string),
            offset: request.offset(),
            limit: Some(request.page_size),
        }
    }
}

/// An empty keyword means "no filter".
pub fn keyword_filter(keyword: &str) -> Option<&str> {
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

/// Case-insensitive substring match with the same ASCII folding SQLite's
/// `LIKE` applies, so both storage backends agree on what matches.
pub fn matches_keyword(haystack: &str, keyword: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&keyword.to_ascii_lowercase())
}

pub trait TagRepository {
    /// Tags in insertion order, narrowed by the query.
    fn list(&self, query: &ListQuery) -> Result<Vec<Tag>, DomainError>;

    /// Number of tags whose name matches `keyword` (all tags for `None`).
    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError>;

    /// Insert the tag and write the assigned id back into it.
    /// Fails with `DomainError::Conflict` when the name is taken.
    fn create(&self, tag: &mut Tag) -> Result<(), DomainError>;

    /// Overwrite the row with `tag.id`. Returns the number of rows affected.
    fn update(&self, tag: &Tag) -> Result<usize, DomainError>;

    /// Returns the number of rows affected.
    fn delete(&self, id: i64) -> Result<usize, DomainError>;
}

pub trait NoteRepository {
    /// Notes ordered by `updated_at` descending with their tags loaded.
    fn list(&self, query: &ListQuery) -> Result<Vec<Note>, DomainError>;

    /// Number of notes whose front or back matches `keyword`.
    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError>;

    /// Insert the note, writing back the assigned id and timestamps.
    fn create(&self, note: &mut Note) -> Result<(), DomainError>;

    /// Overwrite every column of the row with `note.id` except `created_at`,
    /// refreshing `updated_at`. Tag associations are left alone.
    fn update(&self, note: &Note) -> Result<usize, DomainError>;

    fn delete(&self, id: i64) -> Result<usize, DomainError>;

    /// Replace the tag set of a note. Returns 0 when the note does not exist
    /// and `DomainError::NotFound` for the first unknown tag id.
    fn set_tags(&self, note_id: i64, tag_ids: &[i64]) -> Result<usize, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_keyword_when_filtering_then_returns_none() {
        assert_eq!(keyword_filter(""), None);
        assert_eq!(keyword_filter("tag"), Some("tag"));
        assert_eq!(keyword_filter(" "), Some(" "));
    }

    #[test]
    fn given_mixed_case_when_matching_then_ignores_ascii_case() {
        assert!(matches_keyword("Hello World", "hello"));
        assert!(matches_keyword("hello", "LL"));
        assert!(!matches_keyword("hello", "world"));
    }

    #[test]
    fn given_page_request_when_building_window_then_uses_offset_and_size() {
        let query = ListQuery::window(Some("x"), PageRequest::normalize(3, 5, 10));

        assert_eq!(query.offset, 10);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.keyword.as_deref(), Some("x"));
        assert_eq!(query.id, None);
    }
}
