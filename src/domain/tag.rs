// src/domain/tag.rs
use serde::{Deserialize, Serialize};

use super::Paged;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    /// A tag that has not been stored yet; the store assigns the id.
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

pub type TagList = Paged<Tag>;
