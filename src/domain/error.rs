// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty or a paging argument was unusable.
    #[error("{0}")]
    Validation(String),
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    /// Any other failure reported by the store, passed through unchanged.
    #[error("{0}")]
    Storage(String),
}

impl DomainError {
    pub fn tag_not_found(id: i64) -> Self {
        Self::NotFound { entity: "tag", id }
    }

    pub fn note_not_found(id: i64) -> Self {
        Self::NotFound { entity: "note", id }
    }
}
