//! Board use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for board callers.
//! - Run board creation through the idempotency guard.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Board tokens deduplicate globally (the board collection is the scope).

use crate::model::board::{Board, BoardId};
use crate::repo::board_repo::BoardRepository;
use crate::repo::RepoError;
use crate::service::{idempotency, ServiceResult};

/// Use-case service wrapper for board operations.
pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_boards(&self) -> ServiceResult<Vec<Board>> {
        Ok(self.repo.list_boards()?)
    }

    /// Gets one board, failing with `BoardNotFound` when absent.
    pub fn get_board(&self, id: BoardId) -> ServiceResult<Board> {
        self.repo
            .get_board(id)?
            .ok_or_else(|| RepoError::BoardNotFound(id).into())
    }

    /// Creates a board, deduplicating retried requests by token.
    ///
    /// On a token hit the stored board is returned unchanged and `name` is
    /// discarded (return-existing semantics).
    pub fn create_board(
        &self,
        name: &str,
        idempotency_key: Option<&str>,
    ) -> ServiceResult<Board> {
        let board = idempotency::create_idempotent(
            idempotency_key,
            |key| self.repo.find_board_by_idempotency_key(key),
            |key| {
                let mut board = Board::new(name);
                if let Some(key) = key {
                    board.set_idempotency_key(key);
                }
                self.repo.insert_board(&board)?;
                Ok(board)
            },
        )?;
        Ok(board)
    }

    /// Renames a board.
    pub fn update_board(&self, id: BoardId, name: &str) -> ServiceResult<Board> {
        let mut board = self.get_board(id)?;
        board.update(name);
        self.repo.update_board(&board)?;
        Ok(board)
    }

    pub fn delete_board(&self, id: BoardId) -> ServiceResult<()> {
        Ok(self.repo.delete_board(id)?)
    }
}
