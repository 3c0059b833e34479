//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide rank-ordered lane reads and the neighbor/greatest-rank lookups
//!   the placement logic depends on.
//! - Enforce the per-board idempotency token scope through the unique index.
//!
//! # Invariants
//! - `update_task` replaces status and rank in a single statement, so a
//!   half-moved task is never observable.
//! - Lane queries order by rank; whole-board queries order by status then
//!   rank (the column order on screen).

use crate::model::board::BoardId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::rank::Rank;
use crate::repo::{ensure_connection_ready, map_insert_error, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    board_uuid,
    title,
    description,
    status,
    rank,
    idempotency_key,
    created_at,
    updated_at
FROM tasks";

/// Repository interface for task persistence and lane queries.
pub trait TaskRepository {
    /// Inserts one task; fails with `DuplicateIdempotencyKey` when the
    /// per-board token uniqueness backstop fires.
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Atomically replaces the mutable task fields (title, description,
    /// status, rank, timestamp) in one statement.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, board_id: BoardId, id: TaskId) -> RepoResult<Option<Task>>;
    /// All tasks of a board, ordered by status then rank.
    fn list_tasks(&self, board_id: BoardId) -> RepoResult<Vec<Task>>;
    /// One lane of a board, ordered by rank.
    fn list_tasks_by_status(&self, board_id: BoardId, status: TaskStatus)
        -> RepoResult<Vec<Task>>;
    /// Greatest rank currently assigned in a lane, if any.
    fn greatest_rank(&self, board_id: BoardId, status: TaskStatus) -> RepoResult<Option<Rank>>;
    /// Whether the lane holds any task other than `excluding`.
    fn lane_has_other_tasks(
        &self,
        board_id: BoardId,
        status: TaskStatus,
        excluding: TaskId,
    ) -> RepoResult<bool>;
    /// Pre-check read for the idempotent creation guard (board scope).
    fn find_task_by_idempotency_key(
        &self,
        board_id: BoardId,
        key: &str,
    ) -> RepoResult<Option<Task>>;
    fn delete_task(&self, board_id: BoardId, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["boards", "tasks"])?;
        Ok(Self { conn })
    }

    fn query_tasks(&self, sql: &str, bindings: &[&dyn rusqlite::ToSql]) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bindings)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn
            .execute(
                "INSERT INTO tasks (
                    uuid,
                    board_uuid,
                    title,
                    description,
                    status,
                    rank,
                    idempotency_key,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    task.uuid.to_string(),
                    task.board_uuid.to_string(),
                    task.title.as_str(),
                    task.description.as_deref(),
                    status_to_db(task.status),
                    task.rank.as_str(),
                    task.idempotency_key.as_deref(),
                    task.created_at,
                    task.updated_at,
                ],
            )
            .map_err(|err| map_insert_error(err, task.idempotency_key.as_deref()))?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                status = ?3,
                rank = ?4,
                updated_at = ?5
             WHERE uuid = ?6
               AND board_uuid = ?7;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                status_to_db(task.status),
                task.rank.as_str(),
                task.updated_at,
                task.uuid.to_string(),
                task.board_uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(task.uuid));
        }

        Ok(())
    }

    fn get_task(&self, board_id: BoardId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE board_uuid = ?1
               AND uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![board_id.to_string(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, board_id: BoardId) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE board_uuid = ?1
                 ORDER BY status, rank;"
            ),
            &[&board_id.to_string()],
        )
    }

    fn list_tasks_by_status(
        &self,
        board_id: BoardId,
        status: TaskStatus,
    ) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE board_uuid = ?1
                   AND status = ?2
                 ORDER BY rank;"
            ),
            &[&board_id.to_string(), &status_to_db(status)],
        )
    }

    fn greatest_rank(&self, board_id: BoardId, status: TaskStatus) -> RepoResult<Option<Rank>> {
        let mut stmt = self.conn.prepare(
            "SELECT rank
             FROM tasks
             WHERE board_uuid = ?1
               AND status = ?2
             ORDER BY rank DESC
             LIMIT 1;",
        )?;

        let mut rows = stmt.query(params![board_id.to_string(), status_to_db(status)])?;
        if let Some(row) = rows.next()? {
            let rank_text: String = row.get("rank")?;
            return Ok(Some(parse_rank(&rank_text)?));
        }

        Ok(None)
    }

    fn lane_has_other_tasks(
        &self,
        board_id: BoardId,
        status: TaskStatus,
        excluding: TaskId,
    ) -> RepoResult<bool> {
        let occupied: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM tasks
                WHERE board_uuid = ?1
                  AND status = ?2
                  AND uuid <> ?3
            );",
            params![
                board_id.to_string(),
                status_to_db(status),
                excluding.to_string()
            ],
            |row| row.get(0),
        )?;

        Ok(occupied == 1)
    }

    fn find_task_by_idempotency_key(
        &self,
        board_id: BoardId,
        key: &str,
    ) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE board_uuid = ?1
               AND idempotency_key = ?2;"
        ))?;

        let mut rows = stmt.query(params![board_id.to_string(), key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn delete_task(&self, board_id: BoardId, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks
             WHERE board_uuid = ?1
               AND uuid = ?2;",
            params![board_id.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let board_text: String = row.get("board_uuid")?;
    let status_code: i64 = row.get("status")?;
    let rank_text: String = row.get("rank")?;

    let task = Task {
        uuid: parse_uuid(&uuid_text, "tasks.uuid")?,
        board_uuid: parse_uuid(&board_text, "tasks.board_uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: parse_status(status_code).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid status `{status_code}` in tasks.status"))
        })?,
        rank: parse_rank(&rank_text)?,
        idempotency_key: row.get("idempotency_key")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_rank(value: &str) -> RepoResult<Rank> {
    Rank::parse(value)
        .map_err(|err| RepoError::InvalidData(format!("invalid rank `{value}` in tasks.rank: {err}")))
}

/// Status codes follow the lane order, so `ORDER BY status` sorts columns
/// left to right.
fn status_to_db(status: TaskStatus) -> i64 {
    match status {
        TaskStatus::ToDo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Done => 2,
    }
}

fn parse_status(code: i64) -> Option<TaskStatus> {
    match code {
        0 => Some(TaskStatus::ToDo),
        1 => Some(TaskStatus::InProgress),
        2 => Some(TaskStatus::Done),
        _ => None,
    }
}
