//! Shortest grid paths via A* search with a Manhattan-distance heuristic.

use std::{cmp::Reverse, collections::BinaryHeap};

use ndarray::Array2;

use crate::grid::{manhattan_distance, Board, Position};

/// The outcome of a path search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathResult {
    /// The start cell is the goal.
    AtGoal,
    /// No walkable route connects the start to the goal.
    Unreachable,
    /// The cells visited after leaving the start, ending at the goal.
    Path(Vec<Position>),
}

impl PathResult {
    /// Number of steps to the goal, or None if it cannot be reached.
    pub fn distance(&self) -> Option<usize> {
        match self {
            PathResult::AtGoal => Some(0),
            PathResult::Unreachable => None,
            PathResult::Path(path) => Some(path.len()),
        }
    }

    /// The distance used for ranking: unreachable goals sort after every reachable one.
    pub fn rank_distance(&self) -> usize {
        self.distance().unwrap_or(usize::MAX)
    }

    /// Flattens the result into a plain path, empty when the ghost is already at the goal
    /// or cannot reach it.
    pub fn into_positions(self) -> Vec<Position> {
        match self {
            PathResult::Path(path) => path,
            PathResult::AtGoal | PathResult::Unreachable => Vec::new(),
        }
    }
}

/// Finds a shortest path from `start` to `goal` over walkable cells.
///
/// Every step costs 1. The frontier is ordered by `f = g + h` and then by row-major
/// position, so equal-cost alternatives always resolve the same way.
pub fn search(board: &Board, start: Position, goal: Position) -> PathResult {
    if start == goal {
        return PathResult::AtGoal;
    }

    let size = board.size();
    let mut g_score = Array2::from_elem((size, size), usize::MAX);
    let mut came_from: Array2<Option<Position>> = Array2::from_elem((size, size), None);
    let mut closed = Array2::from_elem((size, size), false);
    let mut open = BinaryHeap::new();

    g_score[start] = 0;
    open.push(Reverse((manhattan_distance(start, goal), start)));

    while let Some(Reverse((_, current))) = open.pop() {
        if closed[current] {
            continue;
        }
        if current == goal {
            return PathResult::Path(reconstruct_path(&came_from, start, goal));
        }
        closed[current] = true;

        let tentative_g = g_score[current] + 1;
        for step in board.valid_moves(current) {
            let neighbor = step.pos;
            if closed[neighbor] || tentative_g >= g_score[neighbor] {
                continue;
            }
            came_from[neighbor] = Some(current);
            g_score[neighbor] = tentative_g;
            open.push(Reverse((tentative_g + manhattan_distance(neighbor, goal), neighbor)));
        }
    }

    PathResult::Unreachable
}

fn reconstruct_path(
    came_from: &Array2<Option<Position>>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[current] {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
