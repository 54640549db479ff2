// src/infrastructure/mod.rs
pub mod config;
pub mod database;
pub mod memory;
pub mod sqlite_note;
pub mod sqlite_tag;

pub use config::Config;
pub use database::Database;
pub use memory::{MemoryNoteRepository, MemoryStore, MemoryTagRepository};
pub use sqlite_note::SqliteNoteRepository;
pub use sqlite_tag::SqliteTagRepository;
