//! Core domain logic for the kanban board: lexicographic rank ordering,
//! idempotent creation, and SQLite-backed board/task persistence.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod rank;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::board::{Board, BoardId, BoardValidationError};
pub use model::task::{Task, TaskId, TaskStatus, TaskValidationError};
pub use rank::{Rank, RankParseError};
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::board_service::BoardService;
pub use service::task_service::{CreateTaskRequest, MoveTaskRequest, TaskService};
pub use service::{ServiceError, ServiceResult};
