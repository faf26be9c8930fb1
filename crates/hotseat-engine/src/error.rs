//! Engine error type.

use hotseat_core::{CoordinateError, NotationError};
use thiserror::Error;

/// Errors surfaced at the board, player, and game boundary.
///
/// Move generation itself never fails; these values are returned to the
/// caller, who keeps holding the previous (still valid) board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    Parse(#[from] NotationError),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("game has already ended")]
    GameOver,

    #[error("no move to take back")]
    NothingToUndo,
}
