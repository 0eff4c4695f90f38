use std::collections::VecDeque;

use ordered_float::NotNan;

use crate::{
    grid::Position,
    variables::{HISTORY_LENGTH, NUM_GHOSTS, STAGNATION_WEIGHT},
};

/// The most recent destinations chosen for each ghost, oldest first.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    capacity: usize,
    weight: NotNan<f32>,
    positions: [VecDeque<Position>; NUM_GHOSTS],
}

impl PositionHistory {
    /// Creates an empty history keeping up to `capacity` positions per ghost. Each repeat
    /// of a candidate cell costs `weight` in [`PositionHistory::stagnation_penalty`].
    pub fn new(capacity: usize, weight: NotNan<f32>) -> Self {
        Self {
            capacity,
            weight,
            positions: array_init::array_init(|_| VecDeque::with_capacity(capacity + 1)),
        }
    }

    /// Appends a destination for `ghost`, evicting the oldest once over capacity.
    pub fn record(&mut self, ghost: usize, pos: Position) {
        let history = &mut self.positions[ghost];
        history.push_back(pos);
        while history.len() > self.capacity {
            history.pop_front();
        }
    }

    pub fn positions(&self, ghost: usize) -> &VecDeque<Position> {
        &self.positions[ghost]
    }

    /// Penalizes returning to recently visited cells: the number of times `candidate`
    /// appears in the ghost's history, scaled by the configured weight.
    pub fn stagnation_penalty(&self, ghost: usize, candidate: Position) -> NotNan<f32> {
        let repeat_count = self.positions[ghost].iter().filter(|&&pos| pos == candidate).count();
        self.weight * repeat_count as f32
    }

    pub fn clear(&mut self) {
        self.positions.iter_mut().for_each(VecDeque::clear);
    }
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self::new(HISTORY_LENGTH, NotNan::new(STAGNATION_WEIGHT).expect("STAGNATION_WEIGHT is NaN"))
    }
}
