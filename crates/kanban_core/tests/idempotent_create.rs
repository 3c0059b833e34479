use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::{
    BoardId, BoardService, CreateTaskRequest, SqliteBoardRepository, SqliteTaskRepository,
    TaskService, TaskStatus,
};
use rusqlite::Connection;
use std::sync::Barrier;
use uuid::Uuid;

#[test]
fn retried_task_create_returns_the_stored_task() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);
    let token = Uuid::new_v4().to_string();

    let first = service
        .create_task(board_id, &request("Original title"), Some(&token))
        .unwrap();
    // The retry carries different fields; they are discarded, not merged.
    let second = service
        .create_task(board_id, &request("Retried title"), Some(&token))
        .unwrap();

    assert_eq!(first.uuid(), second.uuid());
    assert_eq!(second.title(), "Original title");
    assert_eq!(count_tasks(&conn), 1);
}

#[test]
fn retried_board_create_returns_the_stored_board() {
    let conn = open_db_in_memory().unwrap();
    let service = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap());
    let token = Uuid::new_v4().to_string();

    let first = service.create_board("Original name", Some(&token)).unwrap();
    let second = service.create_board("Retried name", Some(&token)).unwrap();

    assert_eq!(first.uuid(), second.uuid());
    assert_eq!(second.name(), "Original name");
    assert_eq!(service.list_boards().unwrap().len(), 1);
}

#[test]
fn absent_or_blank_tokens_always_create() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let first = service
        .create_task(board_id, &request("One"), None)
        .unwrap();
    let second = service
        .create_task(board_id, &request("Two"), Some("   "))
        .unwrap();

    assert_ne!(first.uuid(), second.uuid());
    assert_eq!(count_tasks(&conn), 2);
}

#[test]
fn equal_tokens_on_different_boards_do_not_conflict() {
    let conn = open_db_in_memory().unwrap();
    let board_a = seeded_board(&conn);
    let board_b = seeded_board(&conn);
    let service = task_service(&conn);
    let token = Uuid::new_v4().to_string();

    let on_a = service
        .create_task(board_a, &request("On A"), Some(&token))
        .unwrap();
    let on_b = service
        .create_task(board_b, &request("On B"), Some(&token))
        .unwrap();

    assert_ne!(on_a.uuid(), on_b.uuid());
    assert_eq!(count_tasks(&conn), 2);
}

#[test]
fn concurrent_same_token_creators_observe_one_task() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");

    let board_id = {
        let conn = open_db(&path).unwrap();
        seeded_board(&conn)
    };

    let token = Uuid::new_v4().to_string();
    let barrier = Barrier::new(2);

    let ids: Vec<Uuid> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(|| {
                    let conn = open_db(&path).unwrap();
                    let service = task_service(&conn);
                    barrier.wait();
                    service
                        .create_task(board_id, &request("Raced"), Some(&token))
                        .unwrap()
                        .uuid()
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(ids[0], ids[1]);
    let conn = open_db(&path).unwrap();
    assert_eq!(count_tasks(&conn), 1);
}

fn request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: None,
        status: TaskStatus::ToDo,
    }
}

fn task_service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::try_new(conn).unwrap())
}

fn seeded_board(conn: &Connection) -> BoardId {
    let service = BoardService::new(SqliteBoardRepository::try_new(conn).unwrap());
    service
        .create_board(&format!("Board {}", Uuid::new_v4()), None)
        .unwrap()
        .uuid()
}

fn count_tasks(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap()
}
