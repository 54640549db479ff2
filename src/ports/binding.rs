// src/ports/binding.rs
//
// Envelope surface over the services, one method per UI action.
use crate::application::{NoteRepository, NoteService, TagRepository, TagService};
use crate::domain::DomainError;
use crate::ports::Envelope;
use serde::Serialize;
use tracing::warn;

fn respond<T: Serialize>(action: &'static str, result: Result<T, DomainError>) -> Envelope {
    if let Err(err) = &result {
        warn!(action, error = %err, "Request failed");
    }
    Envelope::from(result)
}

pub struct TagBinding<R: TagRepository> {
    service: TagService<R>,
}

impl<R: TagRepository> TagBinding<R> {
    pub fn new(service: TagService<R>) -> Self {
        Self { service }
    }

    pub fn list(&self, page: i64, page_size: i64, keyword: &str) -> Envelope {
        respond("tag.list", self.service.list(page, page_size, keyword))
    }

    pub fn get(&self, id: i64) -> Envelope {
        respond("tag.get", self.service.get(id))
    }

    pub fn create(&self, name: &str) -> Envelope {
        respond("tag.create", self.service.create(name))
    }

    pub fn update(&self, id: i64, name: &str) -> Envelope {
        respond("tag.update", self.service.update(id, name))
    }

    pub fn delete(&self, id: i64) -> Envelope {
        respond("tag.delete", self.service.delete(id))
    }
}

pub struct NoteBinding<R: NoteRepository> {
    service: NoteService<R>,
}

impl<R: NoteRepository> NoteBinding<R> {
    pub fn new(service: NoteService<R>) -> Self {
        Self { service }
    }

    pub fn list(&self, page: i64, page_size: i64, keyword: &str) -> Envelope {
        respond("note.list", self.service.list(page, page_size, keyword))
    }

    pub fn get(&self, id: i64) -> Envelope {
        respond("note.get", self.service.get(id))
    }

    pub fn create(&self, front: &str) -> Envelope {
        respond("note.create", self.service.create(front))
    }

    pub fn update(&self, id: i64, front: &str, back: &str) -> Envelope {
        respond("note.update", self.service.update(id, front, back))
    }

    pub fn delete(&self, id: i64) -> Envelope {
        respond("note.delete", self.service.delete(id))
    }

    pub fn set_tags(&self, id: i64, tag_ids: &[i64]) -> Envelope {
        respond("note.set_tags", self.service.set_tags(id, tag_ids))
    }
}
