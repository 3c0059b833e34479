//! Demo data seeding: one board with ten ranked tasks.
//!
//! Seeding is a no-op once the demo board and its tasks exist, so it is safe
//! to run on every startup of a demo deployment. Boards created by users do
//! not suppress it.

use crate::model::board::{Board, BoardId};
use crate::model::task::{Task, TaskStatus};
use crate::rank;
use crate::repo::board_repo::{BoardRepository, SqliteBoardRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;
use uuid::{uuid, Uuid};

/// Fixed id of the seeded demo board.
pub const DEMO_BOARD_ID: Uuid = uuid!("6337ba0a-9725-4334-a606-ea62c8cdbc7c");

const DEMO_TASKS: &[(&str, &str, TaskStatus)] = &[
    (
        "Set up project repository",
        "Install the toolchain, configure the local database, and make sure the project runs.",
        TaskStatus::ToDo,
    ),
    (
        "Implement user authentication",
        "Build the signup/login flow with token-based sessions.",
        TaskStatus::ToDo,
    ),
    (
        "Design the board UI",
        "Create the initial layout with To Do, In Progress, and Done columns.",
        TaskStatus::ToDo,
    ),
    (
        "Add drag and drop",
        "Enable moving tasks between columns via drag and drop.",
        TaskStatus::ToDo,
    ),
    (
        "Implement the task creation modal",
        "Add a modal to create new tasks with title and description.",
        TaskStatus::ToDo,
    ),
    (
        "Add task editing and deleting",
        "Allow editing task title/description and deleting tasks.",
        TaskStatus::InProgress,
    ),
    (
        "Set up the CI pipeline",
        "Run lint, tests, and build on every push.",
        TaskStatus::InProgress,
    ),
    (
        "Add user roles and permissions",
        "Create admin and member roles with different permissions.",
        TaskStatus::Done,
    ),
    (
        "Implement the activity log",
        "Record task creations, updates, and deletions.",
        TaskStatus::Done,
    ),
    (
        "Add search and filtering",
        "Enable searching and filtering tasks by title or status.",
        TaskStatus::Done,
    ),
];

/// Inserts the demo board and its tasks when they are not present yet.
pub fn seed_demo_data(conn: &Connection) -> RepoResult<BoardId> {
    let board_repo = SqliteBoardRepository::try_new(conn)?;
    let task_repo = SqliteTaskRepository::try_new(conn)?;

    if board_repo.get_board(DEMO_BOARD_ID)?.is_none() {
        let board = Board::with_id(DEMO_BOARD_ID, "Demo Kanban Board");
        board_repo.insert_board(&board)?;
        info!("event=seed module=seed status=ok entity=board id={DEMO_BOARD_ID}");
    }

    if task_repo.list_tasks(DEMO_BOARD_ID)?.is_empty() {
        // One shared rank chain across lanes; uniqueness only matters within
        // a lane, and the chain keeps each lane's insertion order.
        let mut current = rank::middle();
        for &(title, description, status) in DEMO_TASKS {
            let task = Task::new(
                DEMO_BOARD_ID,
                title,
                Some(description.to_string()),
                status,
                current.clone(),
            );
            task_repo.insert_task(&task)?;
            current = rank::next(&current);
        }
        info!(
            "event=seed module=seed status=ok entity=tasks count={}",
            DEMO_TASKS.len()
        );
    }

    Ok(DEMO_BOARD_ID)
}
