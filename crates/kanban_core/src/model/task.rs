//! Task entity and its status lanes.
//!
//! # Responsibility
//! - Define the closed lane set and the task record persisted per board.
//! - Enforce that status and rank only ever change together (`move_to`).
//!
//! # Invariants
//! - `rank` is only ever produced by `rank::generator`; no mutator accepts a
//!   hand-assembled string.
//! - Within a `(board, status)` lane ranks are pairwise distinct; their
//!   lexicographic order is the display order.

use super::board::BoardId;
use super::{now_epoch_ms, IDEMPOTENCY_KEY_LEN};
use crate::rank::Rank;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 200;

/// Closed set of lanes a task can occupy. The derived `Ord` follows the
/// left-to-right column order on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Every lane, in column order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire name of the lane, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "toDo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation failures for task state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    TitleTooLong { chars: usize },
    DescriptionTooLong { chars: usize },
    InvalidIdempotencyKey { chars: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::TitleTooLong { chars } => {
                write!(f, "task title has {chars} chars, maximum is {TITLE_MAX_CHARS}")
            }
            Self::DescriptionTooLong { chars } => write!(
                f,
                "task description has {chars} chars, maximum is {DESCRIPTION_MAX_CHARS}"
            ),
            Self::InvalidIdempotencyKey { chars } => write!(
                f,
                "idempotency key has {chars} chars, expected exactly {IDEMPOTENCY_KEY_LEN}"
            ),
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// One card on a board. State changes flow through the controlled mutators;
/// in particular a move replaces status and rank in one step so a partially
/// moved task is never observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub(crate) uuid: TaskId,
    pub(crate) board_uuid: BoardId,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) status: TaskStatus,
    pub(crate) rank: Rank,
    pub(crate) idempotency_key: Option<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

impl Task {
    /// Creates a task with a generated stable ID and a generator-produced
    /// rank for its initial lane.
    pub fn new(
        board_uuid: BoardId,
        title: impl Into<String>,
        description: Option<String>,
        status: TaskStatus,
        rank: Rank,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            uuid: Uuid::new_v4(),
            board_uuid,
            title: title.into(),
            description,
            status,
            rank,
            idempotency_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn uuid(&self) -> TaskId {
        self.uuid
    }

    pub fn board_uuid(&self) -> BoardId {
        self.board_uuid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn rank(&self) -> &Rank {
        &self.rank
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

    /// Replaces the editable fields and bumps `updated_at`.
    pub fn update(&mut self, title: impl Into<String>, description: Option<String>) {
        self.title = title.into();
        self.description = description;
        self.updated_at = now_epoch_ms();
    }

    /// Relocates the task: status and rank change together, never separately.
    pub fn move_to(&mut self, status: TaskStatus, rank: Rank) {
        self.status = status;
        self.rank = rank;
        self.updated_at = now_epoch_ms();
    }

    /// Attaches the deduplication token for creation-time retries.
    pub fn set_idempotency_key(&mut self, key: impl Into<String>) {
        self.idempotency_key = Some(key.into());
    }

    /// Checks task invariants before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let title_chars = self.title.chars().count();
        if title_chars > TITLE_MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong { chars: title_chars });
        }
        if let Some(description) = &self.description {
            let chars = description.chars().count();
            if chars > DESCRIPTION_MAX_CHARS {
                return Err(TaskValidationError::DescriptionTooLong { chars });
            }
        }
        if let Some(key) = &self.idempotency_key {
            let chars = key.chars().count();
            if chars != IDEMPOTENCY_KEY_LEN {
                return Err(TaskValidationError::InvalidIdempotencyKey { chars });
            }
        }
        Ok(())
    }
}
