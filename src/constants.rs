// src/constants.rs
//
// Application-wide constants shared by the services, the storage adapters and
// the configuration layer.

/// Page number used when the caller passes zero or a negative page.
pub const FIRST_PAGE: i64 = 1;

/// Page size used when the caller passes zero or a negative page size and the
/// configuration does not override it.
///
/// Used in: `domain/page.rs`, `infrastructure/config.rs`
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Validation message for an empty tag name. Shown to the user verbatim.
pub const TAG_NAME_EMPTY_MSG: &str = "tag name cannot be empty";

/// Validation message for an empty note front. Shown to the user verbatim.
pub const NOTE_FRONT_EMPTY_MSG: &str = "note front cannot be empty";

/// User-facing message for a duplicate tag name ("tag already exists").
///
/// Replaces the raw SQLite text so the UI never shows constraint names.
pub const TAG_EXISTS_MSG: &str = "标签已存在";

/// Directory under the platform data dir that holds the database.
pub const APP_DIR_NAME: &str = "langlearner";

/// File name of the SQLite database.
pub const DB_FILE_NAME: &str = "langlearner.db";

/// Database path used when no platform data dir can be determined.
pub const FALLBACK_DB_PATH: &str = "data/langlearner.db";
