// src/domain/note.rs
use serde::{Deserialize, Serialize};

use super::{Paged, Tag};

/// A flashcard. Timestamps are Unix seconds and are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub category: String,
    pub tags: Vec<Tag>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn unsaved(front: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            ..Default::default()
        }
    }
}

pub type NoteList = Paged<Note>;
