//! Board repository contract and SQLite implementation.

use crate::model::board::{Board, BoardId};
use crate::repo::{ensure_connection_ready, map_insert_error, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const BOARD_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    idempotency_key,
    created_at,
    updated_at
FROM boards";

/// Repository interface for board persistence.
pub trait BoardRepository {
    /// Inserts one board; fails with `DuplicateIdempotencyKey` when the
    /// token uniqueness backstop fires.
    fn insert_board(&self, board: &Board) -> RepoResult<BoardId>;
    /// Atomically replaces the mutable board fields.
    fn update_board(&self, board: &Board) -> RepoResult<()>;
    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>>;
    fn list_boards(&self) -> RepoResult<Vec<Board>>;
    fn delete_board(&self, id: BoardId) -> RepoResult<()>;
    /// Pre-check read for the idempotent creation guard.
    fn find_board_by_idempotency_key(&self, key: &str) -> RepoResult<Option<Board>>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["boards"])?;
        Ok(Self { conn })
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn insert_board(&self, board: &Board) -> RepoResult<BoardId> {
        board.validate()?;

        self.conn
            .execute(
                "INSERT INTO boards (
                    uuid,
                    name,
                    idempotency_key,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    board.uuid.to_string(),
                    board.name.as_str(),
                    board.idempotency_key.as_deref(),
                    board.created_at,
                    board.updated_at,
                ],
            )
            .map_err(|err| map_insert_error(err, board.idempotency_key.as_deref()))?;

        Ok(board.uuid)
    }

    fn update_board(&self, board: &Board) -> RepoResult<()> {
        board.validate()?;

        let changed = self.conn.execute(
            "UPDATE boards
             SET
                name = ?1,
                updated_at = ?2
             WHERE uuid = ?3;",
            params![board.name.as_str(), board.updated_at, board.uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::BoardNotFound(board.uuid));
        }

        Ok(())
    }

    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }

        Ok(None)
    }

    fn list_boards(&self) -> RepoResult<Vec<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} ORDER BY created_at, uuid;"))?;

        let mut rows = stmt.query([])?;
        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(parse_board_row(row)?);
        }

        Ok(boards)
    }

    fn delete_board(&self, id: BoardId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM boards WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::BoardNotFound(id));
        }

        Ok(())
    }

    fn find_board_by_idempotency_key(&self, key: &str) -> RepoResult<Option<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} WHERE idempotency_key = ?1;"))?;

        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }

        Ok(None)
    }
}

fn parse_board_row(row: &Row<'_>) -> RepoResult<Board> {
    let uuid_text: String = row.get("uuid")?;
    let board = Board {
        uuid: parse_uuid(&uuid_text, "boards.uuid")?,
        name: row.get("name")?,
        idempotency_key: row.get("idempotency_key")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    board.validate()?;
    Ok(board)
}
