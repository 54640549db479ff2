// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod page;
pub mod tag;

pub use error::DomainError;
pub use note::{Note, NoteList};
pub use page::{PageRequest, Paged};
pub use tag::{Tag, TagList};
