//! Repository contracts and their shared error type.
//!
//! # Responsibility
//! - Define the persistence interface the services depend on.
//! - Keep SQL details inside the SQLite implementations.
//!
//! # Invariants
//! - Write paths call the entity `validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::board::{BoardId, BoardValidationError};
use crate::model::task::{TaskId, TaskValidationError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod board_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for board/task persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    BoardValidation(BoardValidationError),
    TaskValidation(TaskValidationError),
    Db(DbError),
    BoardNotFound(BoardId),
    TaskNotFound(TaskId),
    /// The store's uniqueness backstop fired for an idempotency token. The
    /// creation guard resolves this internally; callers should not see it.
    DuplicateIdempotencyKey { key: String },
    InvalidData(String),
    UninitializedConnection { actual_version: u32 },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoardValidation(err) => write!(f, "{err}"),
            Self::TaskValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::DuplicateIdempotencyKey { key } => {
                write!(f, "idempotency key already used in this scope: {key}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection { actual_version } => write!(
                f,
                "connection has schema version {actual_version}; migrations have not run"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BoardValidation(err) => Some(err),
            Self::TaskValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardValidationError> for RepoError {
    fn from(value: BoardValidationError) -> Self {
        Self::BoardValidation(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::TaskValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection went through `db::open_*` bootstrap and carries
/// the tables a repository needs.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> RepoResult<()> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if version == 0 {
        return Err(RepoError::UninitializedConnection {
            actual_version: version,
        });
    }

    for &table in required_tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// Maps a SQLite unique-index violation on an idempotency column to the
/// dedicated duplicate-token error; everything else passes through.
pub(crate) fn map_insert_error(err: rusqlite::Error, key: Option<&str>) -> RepoError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        let hit_token_index = failure.code == rusqlite::ErrorCode::ConstraintViolation
            && message
                .as_deref()
                .is_some_and(|text| text.contains("idempotency_key"));
        if hit_token_index {
            return RepoError::DuplicateIdempotencyKey {
                key: key.unwrap_or_default().to_string(),
            };
        }
    }
    err.into()
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}
