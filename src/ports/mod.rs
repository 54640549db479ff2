// src/ports/mod.rs
pub mod binding;
pub mod envelope;

pub use binding::{NoteBinding, TagBinding};
pub use envelope::Envelope;
