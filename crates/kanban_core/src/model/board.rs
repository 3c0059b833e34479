//! Board entity: the scoping key for task rank partitions.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another board.
//! - `updated_at` is bumped by every controlled mutation.

use super::{now_epoch_ms, IDEMPOTENCY_KEY_LEN};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a board.
pub type BoardId = Uuid;

const NAME_MAX_CHARS: usize = 50;

/// Validation failures for board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardValidationError {
    EmptyName,
    NameTooLong { chars: usize },
    InvalidIdempotencyKey { chars: usize },
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "board name must not be empty"),
            Self::NameTooLong { chars } => {
                write!(f, "board name has {chars} chars, maximum is {NAME_MAX_CHARS}")
            }
            Self::InvalidIdempotencyKey { chars } => write!(
                f,
                "idempotency key has {chars} chars, expected exactly {IDEMPOTENCY_KEY_LEN}"
            ),
        }
    }
}

impl std::error::Error for BoardValidationError {}

/// A named collection of tasks. Fields mutate only through the controlled
/// methods below; external code reads through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub(crate) uuid: BoardId,
    pub(crate) name: String,
    pub(crate) idempotency_key: Option<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

impl Board {
    /// Creates a new board with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a board with a caller-provided stable ID (seed/import paths).
    pub fn with_id(uuid: BoardId, name: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            uuid,
            name: name.into(),
            idempotency_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn uuid(&self) -> BoardId {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Renames the board and bumps `updated_at`.
    pub fn update(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = now_epoch_ms();
    }

    /// Attaches the deduplication token for creation-time retries.
    pub fn set_idempotency_key(&mut self, key: impl Into<String>) {
        self.idempotency_key = Some(key.into());
    }

    /// Checks board invariants before persistence.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        if self.name.trim().is_empty() {
            return Err(BoardValidationError::EmptyName);
        }
        let chars = self.name.chars().count();
        if chars > NAME_MAX_CHARS {
            return Err(BoardValidationError::NameTooLong { chars });
        }
        if let Some(key) = &self.idempotency_key {
            let chars = key.chars().count();
            if chars != IDEMPOTENCY_KEY_LEN {
                return Err(BoardValidationError::InvalidIdempotencyKey { chars });
            }
        }
        Ok(())
    }
}
