//! Task use-case service: CRUD, lane queries, and drag-and-drop moves.
//!
//! # Responsibility
//! - Resolve placement intents into generator ranks via lane/neighbor reads.
//! - Run task creation through the idempotency guard (board scope).
//!
//! # Invariants
//! - Ranks are only ever produced by `rank::generator`; this service never
//!   hand-assembles one.
//! - A move persists status and rank through one repository update; no
//!   partial move is ever observable.

use crate::model::board::BoardId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::rank::Rank;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::{idempotency, placement, ServiceError, ServiceResult};
use log::debug;
use std::collections::BTreeMap;

/// Fields for a task creation request. On an idempotency token hit all of
/// them are discarded in favor of the previously stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Drag-and-drop move intent. Neighbor ids are interpreted within the
/// destination lane; both absent means the destination lane is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
    pub previous_task_id: Option<TaskId>,
    pub next_task_id: Option<TaskId>,
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All tasks of the board, ordered by lane then rank.
    pub fn list_tasks(&self, board_id: BoardId) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks(board_id)?)
    }

    /// One lane of the board, ordered by rank.
    pub fn list_tasks_by_status(
        &self,
        board_id: BoardId,
        status: TaskStatus,
    ) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks_by_status(board_id, status)?)
    }

    /// Column view: every lane is present, empty lanes map to empty lists.
    pub fn tasks_grouped_by_status(
        &self,
        board_id: BoardId,
    ) -> ServiceResult<BTreeMap<TaskStatus, Vec<Task>>> {
        let mut grouped: BTreeMap<TaskStatus, Vec<Task>> = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, Vec::new()))
            .collect();

        for task in self.repo.list_tasks(board_id)? {
            grouped
                .entry(task.status())
                .or_default()
                .push(task);
        }

        Ok(grouped)
    }

    /// Lane names in column order.
    pub fn statuses(&self) -> &'static [TaskStatus] {
        &TaskStatus::ALL
    }

    /// Gets one task, failing with `TaskNotFound` when absent.
    pub fn get_task(&self, board_id: BoardId, id: TaskId) -> ServiceResult<Task> {
        self.repo
            .get_task(board_id, id)?
            .ok_or_else(|| RepoError::TaskNotFound(id).into())
    }

    /// Creates a task at the end of its lane, deduplicating retried requests
    /// by token within the board.
    pub fn create_task(
        &self,
        board_id: BoardId,
        request: &CreateTaskRequest,
        idempotency_key: Option<&str>,
    ) -> ServiceResult<Task> {
        let task = idempotency::create_idempotent(
            idempotency_key,
            |key| self.repo.find_task_by_idempotency_key(board_id, key),
            |key| {
                let greatest = self.repo.greatest_rank(board_id, request.status)?;
                let rank = placement::rank_for_creation(greatest.as_ref());
                let mut task = Task::new(
                    board_id,
                    request.title.as_str(),
                    request.description.clone(),
                    request.status,
                    rank,
                );
                if let Some(key) = key {
                    task.set_idempotency_key(key);
                }
                self.repo.insert_task(&task)?;
                Ok(task)
            },
        )?;
        Ok(task)
    }

    /// Replaces title and description; status and rank stay untouched.
    pub fn update_task(
        &self,
        board_id: BoardId,
        id: TaskId,
        title: &str,
        description: Option<String>,
    ) -> ServiceResult<Task> {
        let mut task = self.get_task(board_id, id)?;
        task.update(title, description);
        self.repo.update_task(&task)?;
        Ok(task)
    }

    pub fn delete_task(&self, board_id: BoardId, id: TaskId) -> ServiceResult<()> {
        Ok(self.repo.delete_task(board_id, id)?)
    }

    /// Moves a task to `request.status`, placed relative to the resolved
    /// neighbor tasks.
    ///
    /// # Errors
    /// - `TaskNotFound` when the task or a referenced neighbor is absent;
    ///   nothing is written in that case.
    /// - `InvalidOrder` when the neighbors do not satisfy `previous < next`.
    /// - `MissingNeighbors` when no neighbors were given but the destination
    ///   lane already holds other tasks.
    pub fn move_task(
        &self,
        board_id: BoardId,
        id: TaskId,
        request: &MoveTaskRequest,
    ) -> ServiceResult<Task> {
        let mut task = self.get_task(board_id, id)?;

        let previous_rank = self.neighbor_rank(board_id, request.previous_task_id)?;
        let next_rank = self.neighbor_rank(board_id, request.next_task_id)?;

        if previous_rank.is_none()
            && next_rank.is_none()
            && self.repo.lane_has_other_tasks(board_id, request.status, id)?
        {
            return Err(ServiceError::MissingNeighbors {
                status: request.status,
            });
        }

        let rank = placement::rank_for_move(previous_rank.as_ref(), next_rank.as_ref())?;
        debug!(
            "event=task_move module=service status=ok task={id} lane={} rank={rank}",
            request.status
        );

        task.move_to(request.status, rank);
        self.repo.update_task(&task)?;
        Ok(task)
    }

    /// Resolves an optional neighbor id to its rank within the board.
    fn neighbor_rank(
        &self,
        board_id: BoardId,
        neighbor: Option<TaskId>,
    ) -> ServiceResult<Option<Rank>> {
        match neighbor {
            None => Ok(None),
            Some(id) => {
                let task = self.get_task(board_id, id)?;
                Ok(Some(task.rank().clone()))
            }
        }
    }
}
