// src/application/mod.rs
pub mod note_service;
pub mod repository;
pub mod tag_service;

pub use note_service::NoteService;
pub use repository::{ListQuery, NoteRepository, TagRepository};
pub use tag_service::TagService;
