//! Ghost move selection for a grid-maze pacman game.
//!
//! Each tick, [`GhostAi::choose_moves`] ranks the three ghosts by A* distance to the pacman
//! and picks, ghost by ghost, the step that leaves the pacman the smallest region it can
//! reach before any ghost.

pub mod a_star;
pub mod error;
pub mod game_state;
pub mod ghost_agent;
pub mod grid;
pub mod history;
pub mod territory;
pub mod variables;

pub use error::{GameStateError, Result};
pub use game_state::{Agent, GameState, Positions};
pub use ghost_agent::{GhostAi, GhostAiConfiguration};
pub use grid::{Board, Move, Position};
pub use variables::Direction;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module exposing the ghost AI to the game host.
#[cfg(feature = "python")]
#[pymodule]
fn ghost_ai_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ghost_agent::PyGhostAi>()?;
    Ok(())
}
