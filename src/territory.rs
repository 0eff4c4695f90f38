//! Flood-fill territory estimates: which cells the pacman can reach before any ghost.

use std::collections::VecDeque;

use ndarray::{Array2, Zip};

use crate::{
    game_state::{Agent, Positions},
    grid::{Board, Position},
    variables::NUM_GHOSTS,
};

/// Per-cell breadth-first distances from a single source.
///
/// Cells the source never reaches (walls, disconnected regions) hold
/// [`DistanceField::UNREACHABLE`], so they can never be mistaken for the source cell itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    distances: Array2<u32>,
}

impl DistanceField {
    pub const UNREACHABLE: u32 = u32::MAX;

    /// Flood-fills the walkable cells of `board` starting from `source`.
    pub fn from_source(board: &Board, source: Position) -> Self {
        let size = board.size();
        let mut distances = Array2::from_elem((size, size), Self::UNREACHABLE);
        if !board.is_walkable(source) {
            return Self { distances };
        }

        distances[source] = 0;
        let mut queue = VecDeque::from([source]);
        while let Some(cur_pos) = queue.pop_front() {
            let neighbor_dist = distances[cur_pos] + 1;
            for step in board.valid_moves(cur_pos) {
                if distances[step.pos] == Self::UNREACHABLE {
                    distances[step.pos] = neighbor_dist;
                    queue.push_back(step.pos);
                }
            }
        }
        Self { distances }
    }

    /// The distance to `pos`, or None if the source cannot reach it.
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.distances.get(pos).copied().filter(|&dist| dist != Self::UNREACHABLE)
    }

    pub fn raw(&self) -> &Array2<u32> {
        &self.distances
    }
}

/// Cells where the pacman arrives strictly before every ghost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlMap {
    controlled: Array2<bool>,
}

impl ControlMap {
    /// Number of cells the pacman controls.
    pub fn size(&self) -> usize {
        self.controlled.iter().filter(|&&c| c).count()
    }

    pub fn is_controlled(&self, pos: Position) -> bool {
        self.controlled.get(pos).copied().unwrap_or(false)
    }
}

/// Flood-fills from the position `source` occupies in `positions`.
pub fn distance_field(source: Agent, positions: &Positions, board: &Board) -> DistanceField {
    DistanceField::from_source(board, positions.get(source))
}

/// Marks each cell the pacman reaches strictly sooner than the nearest ghost.
///
/// A cell no ghost can reach counts as controlled if the pacman can reach it; a cell the
/// pacman cannot reach is never controlled.
pub fn controlled_area(
    pacman: Position,
    ghosts: &[Position; NUM_GHOSTS],
    board: &Board,
) -> ControlMap {
    let pacman_field = DistanceField::from_source(board, pacman);

    // unreachable is u32::MAX, so the elementwise minimum keeps it only where no ghost arrives
    let mut nearest_ghost =
        Array2::from_elem(pacman_field.raw().dim(), DistanceField::UNREACHABLE);
    for &ghost in ghosts {
        let field = DistanceField::from_source(board, ghost);
        Zip::from(&mut nearest_ghost).and(field.raw()).for_each(|nearest, &dist| {
            *nearest = (*nearest).min(dist);
        });
    }

    let controlled = Zip::from(pacman_field.raw())
        .and(&nearest_ghost)
        .map_collect(|&pacman_dist, &ghost_dist| {
            pacman_dist != DistanceField::UNREACHABLE && pacman_dist < ghost_dist
        });
    ControlMap { controlled }
}

/// Convenience for [`controlled_area`] on a full arrangement of agents.
pub fn controlled_area_size(positions: &Positions, board: &Board) -> usize {
    controlled_area(positions.pacman, &positions.ghosts, board).size()
}
