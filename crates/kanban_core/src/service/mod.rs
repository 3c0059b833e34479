//! Use-case services and their error surface.
//!
//! The controller layer above this crate maps `BoardNotFound`/`TaskNotFound`
//! to "not found" responses and `InvalidOrder`/`MissingNeighbors` to "bad
//! request"; `DuplicateIdempotencyKey` never escapes the creation guard.

use crate::model::task::TaskStatus;
use crate::rank::{InvalidOrderError, Rank};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_service;
pub mod idempotency;
pub mod placement;
pub mod task_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the use-case layer.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    /// Caller supplied neighbor ranks out of the required relative order
    /// (typically stale client state). Never retried internally.
    InvalidOrder { low: Rank, high: Rank },
    /// Caller asked for empty-lane placement, but the destination lane
    /// already holds other tasks.
    MissingNeighbors { status: TaskStatus },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidOrder { low, high } => {
                write!(f, "rank `{low}` must sort strictly before rank `{high}`")
            }
            Self::MissingNeighbors { status } => write!(
                f,
                "lane `{status}` is not empty; a previous or next neighbor is required"
            ),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidOrder { .. } | Self::MissingNeighbors { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<InvalidOrderError> for ServiceError {
    fn from(value: InvalidOrderError) -> Self {
        Self::InvalidOrder {
            low: value.low,
            high: value.high,
        }
    }
}
