//! Input-validation errors raised when building a [`GameState`](crate::game_state::GameState).

use thiserror::Error;

use crate::{game_state::Agent, grid::Position};

/// Reasons a snapshot from the host cannot be used for a decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameStateError {
    #[error("expected {expected} ghosts, found {found}")]
    WrongGhostCount { expected: usize, found: usize },

    #[error("board is empty")]
    EmptyBoard,

    #[error("board must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("declared board size {declared} does not match board of size {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("{agent} position {position:?} is outside a board of size {board_size}")]
    OutOfBounds { agent: Agent, position: Position, board_size: usize },

    #[error("{agent} position {position:?} is on a wall")]
    OnWall { agent: Agent, position: Position },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

pub type Result<T> = std::result::Result<T, GameStateError>;
