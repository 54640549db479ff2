// src/util/testing.rs

use anyhow::Result;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{ListQuery, NoteRepository, TagRepository};
use crate::domain::{DomainError, Note, Tag};
use crate::infrastructure::{MemoryNoteRepository, MemoryStore, MemoryTagRepository};

/// Call log plus an optional failure shared by both mocks.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<&'static str>>,
    failure: Option<DomainError>,
}

impl Recorder {
    fn record(&self, call: &'static str) -> Result<(), DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// Tag repository for service tests.
///
/// Behaves like the in-memory backend, records every call by name, and can
/// be told to fail every call with a given error.
///
/// # Examples
///
/// ```
/// use langlearner::application::TagService;
/// use langlearner::util::testing::MockTagRepository;
///
/// let mock = MockTagRepository::builder().with_tags(["tag1", "tag2"]).build();
/// let service = TagService::new(mock);
/// assert_eq!(service.list(1, 10, "").unwrap().total, 2);
/// ```
pub struct MockTagRepository {
    inner: MemoryTagRepository,
    recorder: Recorder,
}

impl MockTagRepository {
    pub fn builder() -> MockTagRepositoryBuilder {
        MockTagRepositoryBuilder::new()
    }

    /// Names of the repository methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.recorder.calls()
    }
}

impl TagRepository for MockTagRepository {
    fn list(&self, query: &ListQuery) -> Result<Vec<Tag>, DomainError> {
        self.recorder.record("list")?;
        self.inner.list(query)
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        self.recorder.record("count")?;
        self.inner.count(keyword)
    }

    fn create(&self, tag: &mut Tag) -> Result<(), DomainError> {
        self.recorder.record("create")?;
        self.inner.create(tag)
    }

    fn update(&self, tag: &Tag) -> Result<usize, DomainError> {
        self.recorder.record("update")?;
        self.inner.update(tag)
    }

    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        self.recorder.record("delete")?;
        self.inner.delete(id)
    }
}

/// Builder for MockTagRepository
pub struct MockTagRepositoryBuilder {
    names: Vec<String>,
    failure: Option<DomainError>,
}

impl MockTagRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            names: vec![],
            failure: None,
        }
    }

    /// Seed tags in the given order; ids are assigned from 1.
    pub fn with_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Make every repository call fail with `err`
    pub fn with_failure(mut self, err: DomainError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn build(self) -> MockTagRepository {
        let inner = MemoryTagRepository::new(MemoryStore::new());
        for name in self.names {
            inner
                .create(&mut Tag::unsaved(name))
                .expect("Seeding mock tags should succeed");
        }
        MockTagRepository {
            inner,
            recorder: Recorder {
                failure: self.failure,
                ..Default::default()
            },
        }
    }
}

impl Default for MockTagRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Note repository for service tests, see [`MockTagRepository`].
pub struct MockNoteRepository {
    inner: MemoryNoteRepository,
    recorder: Recorder,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.recorder.calls()
    }
}

impl NoteRepository for MockNoteRepository {
    fn list(&self, query: &ListQuery) -> Result<Vec<Note>, DomainError> {
        self.recorder.record("list")?;
        self.inner.list(query)
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64, DomainError> {
        self.recorder.record("count")?;
        self.inner.count(keyword)
    }

    fn create(&self, note: &mut Note) -> Result<(), DomainError> {
        self.recorder.record("create")?;
        self.inner.create(note)
    }

    fn update(&self, note: &Note) -> Result<usize, DomainError> {
        self.recorder.record("update")?;
        self.inner.update(note)
    }

    fn delete(&self, id: i64) -> Result<usize, DomainError> {
        self.recorder.record("delete")?;
        self.inner.delete(id)
    }

    fn set_tags(&self, note_id: i64, tag_ids: &[i64]) -> Result<usize, DomainError> {
        self.recorder.record("set_tags")?;
        self.inner.set_tags(note_id, tag_ids)
    }
}

/// Builder for MockNoteRepository
pub struct MockNoteRepositoryBuilder {
    notes: Vec<(String, String)>,
    tags: Vec<String>,
    failure: Option<DomainError>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            tags: vec![],
            failure: None,
        }
    }

    /// Seed a note; ids are assigned from 1 in call order.
    pub fn with_note(mut self, front: &str, back: &str) -> Self {
        self.notes.push((front.to_string(), back.to_string()));
        self
    }

    /// Seed a tag that notes can be linked to; ids are assigned from 1.
    pub fn with_tag(mut self, name: &str) -> Self {
        self.tags.push(name.to_string());
        self
    }

    /// Make every repository call fail with `err`
    pub fn with_failure(mut self, err: DomainError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        let store = MemoryStore::new();
        let tags = MemoryTagRepository::new(store.clone());
        for name in self.tags {
            tags.create(&mut Tag::unsaved(name))
                .expect("Seeding mock tags should succeed");
        }

        let inner = MemoryNoteRepository::new(store);
        for (front, back) in self.notes {
            let mut note = Note::unsaved(front);
            note.back = back;
            inner
                .create(&mut note)
                .expect("Seeding mock notes should succeed");
        }

        MockNoteRepository {
            inner,
            recorder: Recorder {
                failure: self.failure,
                ..Default::default()
            },
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // rusqlite itself does not log; keep the filter for anything pulled in later
    let noisy_modules = ["mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
