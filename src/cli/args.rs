// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the SQLite database (overrides the config file)
    #[arg(long, value_name = "DB", global = true)]
    pub db: Option<PathBuf>,

    /// Path to a TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Entity to operate on
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },

    /// Manage notes (flashcards)
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    /// List tags, optionally filtered by a name substring
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Page size (0 = configured default)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page_size: i64,

        /// Substring to look for in tag names
        #[arg(value_name = "KEYWORD")]
        keyword: Option<String>,
    },

    /// Show one tag
    Get {
        #[arg(value_name = "TAG_ID")]
        id: i64,
    },

    /// Create a tag
    Create {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Rename a tag
    Update {
        #[arg(value_name = "TAG_ID")]
        id: i64,

        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Delete a tag and its note links
    Delete {
        #[arg(value_name = "TAG_ID")]
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum NoteCommand {
    /// List notes, most recently updated first
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Page size (0 = configured default)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page_size: i64,

        /// Substring to look for in the front or back
        #[arg(value_name = "KEYWORD")]
        keyword: Option<String>,
    },

    /// Show one note with its tags
    Get {
        #[arg(value_name = "NOTE_ID")]
        id: i64,
    },

    /// Create a note from its front text
    Create {
        #[arg(value_name = "FRONT")]
        front: String,
    },

    /// Overwrite the front and back of a note
    Update {
        #[arg(value_name = "NOTE_ID")]
        id: i64,

        #[arg(value_name = "FRONT")]
        front: String,

        /// Back text; omitted means empty
        #[arg(value_name = "BACK")]
        back: Option<String>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        id: i64,
    },

    /// Replace the tags attached to a note (no ids clears them)
    Tag {
        #[arg(value_name = "NOTE_ID")]
        id: i64,

        #[arg(value_name = "TAG_ID")]
        tag_ids: Vec<i64>,
    },
}
