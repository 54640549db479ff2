// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::{NoteService, TagService};
use infrastructure::{Config, Database, SqliteNoteRepository, SqliteTagRepository};
use ports::{Envelope, NoteBinding, TagBinding};
use std::path::Path;
use tracing::{debug, info};
use crate::cli::args::{Args, Command, NoteCommand, TagCommand};

/// Everything the binding layer needs, wired to one shared database handle.
pub struct App {
    pub tags: TagBinding<SqliteTagRepository>,
    pub notes: NoteBinding<SqliteNoteRepository>,
}

impl App {
    /// Open the store once and build both services on top of it.
    pub fn init(config: &Config) -> Result<Self> {
        config.validate()?;
        let db = Database::open(&config.database.path)?;
        Ok(Self::with_database(db, config.paging.default_page_size))
    }

    pub fn with_database(db: Database, default_page_size: i64) -> Self {
        let tags = TagService::with_default_page_size(
            SqliteTagRepository::new(db.clone()),
            default_page_size,
        );
        let notes =
            NoteService::with_default_page_size(SqliteNoteRepository::new(db), default_page_size);

        Self {
            tags: TagBinding::new(tags),
            notes: NoteBinding::new(notes),
        }
    }

    pub fn dispatch(&self, command: &Command) -> Envelope {
        match command {
            Command::Tag { action } => match action {
                TagCommand::List {
                    page,
                    page_size,
                    keyword,
                } => self
                    .tags
                    .list(*page, *page_size, keyword.as_deref().unwrap_or_default()),
                TagCommand::Get { id } => self.tags.get(*id),
                TagCommand::Create { name } => self.tags.create(name),
                TagCommand::Update { id, name } => self.tags.update(*id, name),
                TagCommand::Delete { id } => self.tags.delete(*id),
            },
            Command::Note { action } => match action {
                NoteCommand::List {
                    page,
                    page_size,
                    keyword,
                } => self
                    .notes
                    .list(*page, *page_size, keyword.as_deref().unwrap_or_default()),
                NoteCommand::Get { id } => self.notes.get(*id),
                NoteCommand::Create { front } => self.notes.create(front),
                NoteCommand::Update { id, front, back } => {
                    self.notes
                        .update(*id, front, back.as_deref().unwrap_or_default())
                }
                NoteCommand::Delete { id } => self.notes.delete(*id),
                NoteCommand::Tag { id, tag_ids } => self.notes.set_tags(*id, tag_ids),
            },
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting langlearner with arguments");

    let config = load_config(args.config.as_deref(), args.db.as_deref())?;
    let app = App::init(&config)?;

    info!(command = ?args.command, "Dispatching command");
    let envelope = app.dispatch(&args.command);
    debug!(?envelope, "Command finished");

    let json = serde_json::to_string_pretty(&envelope).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

/// Config from `config_path` (or defaults), with `db_override` taking
/// precedence over the configured database path.
pub fn load_config(config_path: Option<&Path>, db_override: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => {
            debug!(?path, "Loading config file");
            Config::load(path)?
        }
        None => Config::default(),
    };

    if let Some(path) = db_override {
        debug!(?path, "Using database path from command line");
        config.database.path = path.to_path_buf();
    }
    Ok(config)
}
