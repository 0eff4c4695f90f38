use arrayvec::ArrayVec;
use itertools::Itertools;
use ordered_float::NotNan;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    a_star::{self, PathResult},
    game_state::{GameState, Positions},
    grid::{Board, Move, Position},
    history::PositionHistory,
    territory::controlled_area_size,
    variables::{Direction, HISTORY_LENGTH, NUM_GHOSTS, STAGNATION_WEIGHT},
};

/// Tunables for a [`GhostAi`] session.
#[derive(Clone, Copy, Debug)]
pub struct GhostAiConfiguration {
    /// How many recent destinations are remembered per ghost.
    pub history_length: usize,
    /// Penalty per repeat of a recently visited cell.
    pub stagnation_weight: NotNan<f32>,
    /// Whether the stagnation penalty breaks ties between equally scored moves.
    /// Off by default; when on, it is consulted after controlled area and path distance.
    pub use_stagnation_penalty: bool,
    /// Seed for tie-breaking. None seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GhostAiConfiguration {
    fn default() -> Self {
        Self {
            history_length: HISTORY_LENGTH,
            stagnation_weight: NotNan::new(STAGNATION_WEIGHT)
                .expect("STAGNATION_WEIGHT is NaN"),
            use_stagnation_penalty: false,
            seed: None,
        }
    }
}

/// Ordering key for a candidate move; smaller is better.
type CandidateScore = (usize, usize, Option<NotNan<f32>>);

/// Decides ghost moves, one tick at a time, for a single game session.
///
/// The only state carried between ticks is each ghost's recent position history and the
/// tie-breaking RNG.
#[derive(Clone, Debug)]
pub struct GhostAi<R = StdRng> {
    configuration: GhostAiConfiguration,
    history: PositionHistory,
    rng: R,
}

impl GhostAi<StdRng> {
    /// Creates an engine with a fresh history, seeding the RNG from
    /// `configuration.seed` if present.
    pub fn new(configuration: GhostAiConfiguration) -> Self {
        let rng = match configuration.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(configuration, rng)
    }
}

impl Default for GhostAi<StdRng> {
    fn default() -> Self {
        Self::new(GhostAiConfiguration::default())
    }
}

impl<R: Rng> GhostAi<R> {
    /// Creates an engine that breaks ties with the given RNG.
    pub fn with_rng(configuration: GhostAiConfiguration, rng: R) -> Self {
        let history =
            PositionHistory::new(configuration.history_length, configuration.stagnation_weight);
        Self { configuration, history, rng }
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Forgets all position history, as at the start of a new game.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Returns one direction per ghost slot, in slot order.
    ///
    /// Ghosts are decided nearest-first; each decision is visible to the ghosts decided after
    /// it. A ghost adjacent to the pacman lunges at it unless another ghost already did this
    /// tick, in which case it avoids stacking onto the pacman's cell when it can.
    pub fn choose_moves(&mut self, game_state: &GameState) -> [Direction; NUM_GHOSTS] {
        let board = game_state.board();
        let pacman = game_state.pacman();
        let ghosts = game_state.ghosts();

        let paths: [PathResult; NUM_GHOSTS] =
            array_init::array_init(|slot| a_star::search(board, ghosts[slot], pacman));
        let distances: [usize; NUM_GHOSTS] =
            array_init::array_init(|slot| paths[slot].rank_distance());
        let order = decision_order(&paths);

        let mut planned = game_state.positions();
        let mut moves = [Direction::Stay; NUM_GHOSTS];
        let mut capture_claimed = false;

        for slot in order {
            let current = ghosts[slot];
            let valid_moves = board.valid_moves(current);
            if valid_moves.is_empty() {
                tracing::debug!("ghost {slot} at {current:?} has no legal moves, staying");
                continue;
            }

            let adjacent = distances[slot] == 1;
            let lunge = if adjacent && !capture_claimed {
                valid_moves.iter().find(|m| m.pos == pacman).copied()
            } else {
                None
            };

            let chosen = if let Some(lunge) = lunge {
                capture_claimed = true;
                tracing::debug!("ghost {slot} at {current:?} lunges {:?}", lunge.direction);
                lunge
            } else {
                let candidates: ArrayVec<Move, 4> = if adjacent && valid_moves.len() > 1 {
                    valid_moves.iter().filter(|m| m.pos != pacman).copied().collect()
                } else {
                    valid_moves
                };
                let chosen = self.best_candidate(slot, &candidates, &planned, board);
                tracing::debug!(
                    "ghost {slot} at {current:?} (distance {}) moves {:?} to {:?}",
                    distances[slot],
                    chosen.direction,
                    chosen.pos
                );
                chosen
            };

            self.history.record(slot, chosen.pos);
            planned = planned.with_ghost(slot, chosen.pos);
            moves[slot] = chosen.direction;
        }

        moves
    }

    /// Like [`GhostAi::choose_moves`], but returns the integer values the host expects.
    pub fn choose_move_values(&mut self, game_state: &GameState) -> [u8; NUM_GHOSTS] {
        self.choose_moves(game_state).map(u8::from)
    }

    /// Picks the candidate that leaves the pacman the least territory, then the one closest
    /// to the pacman, then (if enabled) the least repetitive, then uniformly at random.
    fn best_candidate(
        &mut self,
        slot: usize,
        candidates: &[Move],
        planned: &Positions,
        board: &Board,
    ) -> Move {
        let scored: ArrayVec<(Move, CandidateScore), 4> = candidates
            .iter()
            .map(|&candidate| {
                let score = self.score_candidate(slot, candidate, planned, board);
                tracing::trace!(
                    "ghost {slot} candidate {:?} -> {:?}: area {}, distance {}, penalty {:?}",
                    candidate.direction,
                    candidate.pos,
                    score.0,
                    score.1,
                    score.2
                );
                (candidate, score)
            })
            .collect();

        let best_score = scored.iter().map(|&(_, score)| score).min();
        let survivors: ArrayVec<Move, 4> = scored
            .iter()
            .filter(|&&(_, score)| Some(score) == best_score)
            .map(|&(candidate, _)| candidate)
            .collect();

        *survivors.choose(&mut self.rng).expect("candidate set is never empty")
    }

    fn score_candidate(
        &self,
        slot: usize,
        candidate: Move,
        planned: &Positions,
        board: &Board,
    ) -> CandidateScore {
        let hypothetical = planned.with_ghost(slot, candidate.pos);
        let area = controlled_area_size(&hypothetical, board);
        let distance = a_star::search(board, candidate.pos, planned.pacman).rank_distance();
        let penalty = self
            .configuration
            .use_stagnation_penalty
            .then(|| self.history.stagnation_penalty(slot, candidate.pos));
        (area, distance, penalty)
    }
}

/// Ghost slots sorted nearest-first by path length to the pacman. A ghost with no path to
/// follow, because it already stands on the pacman's cell or cannot reach it, goes last.
/// The sort is stable, so equal distances keep slot order.
fn decision_order(paths: &[PathResult; NUM_GHOSTS]) -> Vec<usize> {
    (0..NUM_GHOSTS)
        .sorted_by_key(|&slot| match &paths[slot] {
            PathResult::Path(path) => path.len(),
            PathResult::AtGoal | PathResult::Unreachable => usize::MAX,
        })
        .collect()
}

/// A [`GhostAi`] session exposed to the Python host. The host keeps one instance per game
/// and calls `choose_moves(game_state)` once per tick.
#[cfg(feature = "python")]
#[pyclass(name = "GhostAI")]
pub struct PyGhostAi {
    ai: GhostAi,
}

#[cfg(feature = "python")]
#[pymethods]
impl PyGhostAi {
    #[new]
    #[pyo3(signature = (seed = None, use_stagnation_penalty = false))]
    pub fn new(seed: Option<u64>, use_stagnation_penalty: bool) -> Self {
        let configuration =
            GhostAiConfiguration { seed, use_stagnation_penalty, ..Default::default() };
        Self { ai: GhostAi::new(configuration) }
    }

    /// Returns the move value (0-4) for each of the three ghosts.
    pub fn choose_moves(&mut self, game_state: GameState) -> [u8; NUM_GHOSTS] {
        self.ai.choose_move_values(&game_state)
    }

    /// Clears the position history for a new game.
    pub fn reset(&mut self) {
        self.ai.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GhostAi {
        GhostAi::new(GhostAiConfiguration { seed: Some(seed), ..Default::default() })
    }

    #[test]
    fn adjacent_ghost_lunges() {
        let board = Board::open(5).unwrap();
        let state = GameState::new(board, (1, 2), &[(1, 1), (4, 4), (4, 0)]).unwrap();
        let moves = seeded(0).choose_moves(&state);
        assert_eq!(moves[0], Direction::Right);
        assert_eq!(u8::from(moves[0]), 4);
    }

    #[test]
    fn boxed_in_ghost_stays() {
        let board: Board = "
            .#...
            ##...
            .....
            .....
            .....
        "
        .parse()
        .unwrap();
        let state = GameState::new(board, (3, 3), &[(0, 0), (4, 4), (2, 0)]).unwrap();
        for seed in 0..5 {
            let moves = seeded(seed).choose_moves(&state);
            assert_eq!(moves[0], Direction::Stay);
        }
    }

    #[test]
    fn records_chosen_destinations() {
        let board = Board::open(5).unwrap();
        let state = GameState::new(board, (1, 2), &[(1, 1), (4, 4), (4, 0)]).unwrap();
        let mut ai = seeded(1);
        ai.choose_moves(&state);
        assert_eq!(ai.history().positions(0).back(), Some(&(1, 2)));
        for slot in 0..NUM_GHOSTS {
            assert_eq!(ai.history().positions(slot).len(), 1);
        }
        ai.reset();
        assert!(ai.history().positions(0).is_empty());
    }

    fn paths_to(board: &Board, pacman: Position, ghosts: [Position; 3]) -> [PathResult; 3] {
        ghosts.map(|ghost| a_star::search(board, ghost, pacman))
    }

    #[test]
    fn nearest_ghost_is_decided_first() {
        let board = Board::open(5).unwrap();
        let paths = paths_to(&board, (4, 2), [(1, 2), (1, 4), (3, 3)]);
        assert_eq!(decision_order(&paths), [2, 0, 1]);
    }

    #[test]
    fn ghost_on_pacman_is_decided_last() {
        let board = Board::open(5).unwrap();
        let paths = paths_to(&board, (2, 2), [(2, 2), (2, 1), (0, 0)]);
        assert_eq!(paths[0], PathResult::AtGoal);
        assert_eq!(decision_order(&paths), [1, 2, 0]);
    }

    #[test]
    fn ghost_on_pacman_ties_with_unreachable_ghost() {
        let board: Board = "
            .#...
            ##...
            .....
            .....
            .....
        "
        .parse()
        .unwrap();
        let paths = paths_to(&board, (3, 3), [(0, 0), (3, 3), (3, 1)]);
        assert_eq!(paths[0], PathResult::Unreachable);
        assert_eq!(decision_order(&paths), [2, 0, 1]);
    }

    #[test]
    fn adjacent_ghost_lunges_past_ghost_on_pacman() {
        let board = Board::open(5).unwrap();
        let state = GameState::new(board, (2, 2), &[(2, 2), (2, 1), (0, 0)]).unwrap();
        for seed in 0..10 {
            let moves = seeded(seed).choose_moves(&state);
            assert_eq!(moves[1], Direction::Right);
            assert_ne!(moves[0], Direction::Stay);
        }
    }

    #[test]
    fn configured_weight_scales_penalty() {
        let configuration = GhostAiConfiguration {
            stagnation_weight: NotNan::new(3.0).unwrap(),
            seed: Some(0),
            ..Default::default()
        };
        let board = Board::open(5).unwrap();
        let state = GameState::new(board, (1, 2), &[(1, 1), (4, 4), (4, 0)]).unwrap();
        let mut ai = GhostAi::new(configuration);
        ai.choose_moves(&state);
        assert_eq!(ai.history().stagnation_penalty(0, (1, 2)).into_inner(), 3.0);
    }

    #[test]
    fn stagnation_penalty_is_off_by_default() {
        let configuration = GhostAiConfiguration::default();
        assert!(!configuration.use_stagnation_penalty);
        assert_eq!(configuration.history_length, 5);
    }
}
