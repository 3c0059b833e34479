use kanban_core::db::open_db_in_memory;
use kanban_core::{
    BoardId, BoardService, CreateTaskRequest, RepoError, ServiceError, SqliteBoardRepository,
    SqliteTaskRepository, TaskService, TaskStatus,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let created = service
        .create_task(
            board_id,
            &request("Write release notes", Some("Cover the ordering changes")),
            None,
        )
        .unwrap();

    let loaded = service.get_task(board_id, created.uuid()).unwrap();
    assert_eq!(loaded.uuid(), created.uuid());
    assert_eq!(loaded.title(), "Write release notes");
    assert_eq!(loaded.description(), Some("Cover the ordering changes"));
    assert_eq!(loaded.status(), TaskStatus::ToDo);
    assert_eq!(loaded.rank(), created.rank());
}

#[test]
fn first_task_in_a_lane_gets_the_middle_rank() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let created = service
        .create_task(board_id, &request("Only one", None), None)
        .unwrap();
    assert_eq!(created.rank().as_str(), "i");
}

#[test]
fn later_tasks_append_after_the_greatest_rank() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let first = service
        .create_task(board_id, &request("First", None), None)
        .unwrap();
    let second = service
        .create_task(board_id, &request("Second", None), None)
        .unwrap();
    let third = service
        .create_task(board_id, &request("Third", None), None)
        .unwrap();

    assert!(first.rank() < second.rank());
    assert!(second.rank() < third.rank());
}

#[test]
fn lanes_rank_independently() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let todo = service
        .create_task(board_id, &request("Todo card", None), None)
        .unwrap();
    let mut done = request("Done card", None);
    done.status = TaskStatus::Done;
    let done = service.create_task(board_id, &done, None).unwrap();

    // Each lane starts its own partition at the middle.
    assert_eq!(todo.rank().as_str(), "i");
    assert_eq!(done.rank().as_str(), "i");
}

#[test]
fn list_orders_by_status_then_rank() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let mut in_progress = request("Busy", None);
    in_progress.status = TaskStatus::InProgress;
    service.create_task(board_id, &in_progress, None).unwrap();
    service
        .create_task(board_id, &request("Todo A", None), None)
        .unwrap();
    service
        .create_task(board_id, &request("Todo B", None), None)
        .unwrap();

    let tasks = service.list_tasks(board_id).unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].status(), TaskStatus::ToDo);
    assert_eq!(tasks[1].status(), TaskStatus::ToDo);
    assert!(tasks[0].rank() < tasks[1].rank());
    assert_eq!(tasks[2].status(), TaskStatus::InProgress);
}

#[test]
fn grouped_view_covers_every_lane() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    service
        .create_task(board_id, &request("Only todo", None), None)
        .unwrap();

    let grouped = service.tasks_grouped_by_status(board_id).unwrap();
    assert_eq!(grouped.len(), TaskStatus::ALL.len());
    assert_eq!(grouped[&TaskStatus::ToDo].len(), 1);
    assert!(grouped[&TaskStatus::InProgress].is_empty());
    assert!(grouped[&TaskStatus::Done].is_empty());
}

#[test]
fn update_touches_title_and_description_only() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let created = service
        .create_task(board_id, &request("Draft", Some("old")), None)
        .unwrap();
    let updated = service
        .update_task(board_id, created.uuid(), "Final", Some("new".to_string()))
        .unwrap();

    assert_eq!(updated.title(), "Final");
    assert_eq!(updated.description(), Some("new"));
    assert_eq!(updated.status(), created.status());
    assert_eq!(updated.rank(), created.rank());
    assert!(updated.updated_at() >= created.updated_at());
}

#[test]
fn delete_removes_the_task() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let created = service
        .create_task(board_id, &request("Short lived", None), None)
        .unwrap();
    service.delete_task(board_id, created.uuid()).unwrap();

    assert!(matches!(
        service.get_task(board_id, created.uuid()),
        Err(ServiceError::Repo(RepoError::TaskNotFound(_)))
    ));
}

#[test]
fn tasks_are_scoped_to_their_board() {
    let conn = open_db_in_memory().unwrap();
    let board_a = seeded_board(&conn);
    let board_b = seeded_board(&conn);
    let service = task_service(&conn);

    let created = service
        .create_task(board_a, &request("Board A card", None), None)
        .unwrap();

    assert!(matches!(
        service.get_task(board_b, created.uuid()),
        Err(ServiceError::Repo(RepoError::TaskNotFound(_)))
    ));
}

#[test]
fn validation_blocks_bad_titles_and_descriptions() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    assert!(matches!(
        service.create_task(board_id, &request("   ", None), None),
        Err(ServiceError::Repo(RepoError::TaskValidation(_)))
    ));
    assert!(matches!(
        service.create_task(board_id, &request(&"t".repeat(101), None), None),
        Err(ServiceError::Repo(RepoError::TaskValidation(_)))
    ));
    let long_description = "d".repeat(201);
    assert!(matches!(
        service.create_task(board_id, &request("ok", Some(&long_description)), None),
        Err(ServiceError::Repo(RepoError::TaskValidation(_)))
    ));
}

#[test]
fn serialized_task_uses_wire_lane_names_and_string_ranks() {
    let conn = open_db_in_memory().unwrap();
    let board_id = seeded_board(&conn);
    let service = task_service(&conn);

    let mut in_progress = request("Wire shape", None);
    in_progress.status = TaskStatus::InProgress;
    let created = service.create_task(board_id, &in_progress, None).unwrap();

    let encoded = serde_json::to_value(&created).unwrap();
    assert_eq!(encoded["status"], "inProgress");
    assert_eq!(encoded["rank"], created.rank().as_str());
}

fn request(title: &str, description: Option<&str>) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: description.map(str::to_string),
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
