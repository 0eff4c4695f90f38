#[cfg(feature = "python")]
pub(crate) mod py_wrappers;

use std::fmt;

use crate::{
    error::{GameStateError, Result},
    grid::{Board, Position},
    variables::NUM_GHOSTS,
};

/// Identifies one agent on the board: the pacman or one of the ghost slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Agent {
    Pacman,
    Ghost(usize),
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Pacman => write!(f, "pacman"),
            Agent::Ghost(slot) => write!(f, "ghost {slot}"),
        }
    }
}

/// Where every agent stands. The territory evaluator works on hypothetical
/// arrangements of these, separate from the snapshot they came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Positions {
    pub pacman: Position,
    pub ghosts: [Position; NUM_GHOSTS],
}

impl Positions {
    pub fn get(&self, agent: Agent) -> Position {
        match agent {
            Agent::Pacman => self.pacman,
            Agent::Ghost(slot) => self.ghosts[slot],
        }
    }

    /// Returns a copy with one ghost relocated.
    #[must_use]
    pub fn with_ghost(mut self, slot: usize, pos: Position) -> Self {
        self.ghosts[slot] = pos;
        self
    }
}

/// A validated, read-only snapshot of one tick.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    positions: Positions,
}

impl GameState {
    /// Validates a snapshot: exactly three ghosts, and every agent on a walkable cell.
    pub fn new(board: Board, pacman: Position, ghosts: &[Position]) -> Result<Self> {
        let ghosts: [Position; NUM_GHOSTS] = ghosts.try_into().map_err(|_| {
            GameStateError::WrongGhostCount { expected: NUM_GHOSTS, found: ghosts.len() }
        })?;
        let positions = Positions { pacman, ghosts };

        let agents = std::iter::once(Agent::Pacman).chain((0..NUM_GHOSTS).map(Agent::Ghost));
        for agent in agents {
            let position = positions.get(agent);
            if !board.in_bounds(position) {
                return Err(GameStateError::OutOfBounds {
                    agent,
                    position,
                    board_size: board.size(),
                });
            }
            if !board.is_walkable(position) {
                return Err(GameStateError::OnWall { agent, position });
            }
        }

        Ok(Self { board, positions })
    }

    /// Like [`GameState::new`], but also checks the size the host declared for the board.
    pub fn with_declared_size(
        board: Board,
        board_size: usize,
        pacman: Position,
        ghosts: &[Position],
    ) -> Result<Self> {
        if board.size() != board_size {
            return Err(GameStateError::SizeMismatch { declared: board_size, actual: board.size() });
        }
        Self::new(board, pacman, ghosts)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    pub fn pacman(&self) -> Position {
        self.positions.pacman
    }

    pub fn ghosts(&self) -> &[Position; NUM_GHOSTS] {
        &self.positions.ghosts
    }

    pub fn positions(&self) -> Positions {
        self.positions
    }
}
