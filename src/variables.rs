use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert;

/// A single-step movement choice, encoded with the values the host game loop expects.
///
/// `Up` and `Down` are labels of the host's movement model, not compass directions:
/// `Up` increases the row index and `Down` decreases it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Direction {
    Stay = 0,
    Up = 1,
    Left = 2,
    Down = 3,
    Right = 4,
}

impl Direction {
    /// The four directions that actually move an agent, in the order moves are generated.
    pub const MOVING: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the `(row, col)` offset this direction applies to a position.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Stay => (0, 0),
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the direction whose offset is `(drow, dcol)`, or None if the offset is not
    /// a unit step (or zero).
    pub const fn from_offset(drow: isize, dcol: isize) -> Option<Self> {
        match (drow, dcol) {
            (0, 0) => Some(Direction::Stay),
            (1, 0) => Some(Direction::Up),
            (-1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

// decision params
pub const NUM_GHOSTS: usize = 3;
pub const HISTORY_LENGTH: usize = 5;
pub const STAGNATION_WEIGHT: f32 = 2.0;

/// Board tag for an impassable cell. Every other value is walkable.
pub const WALL: i32 = 0;

const_assert!(NUM_GHOSTS == 3);
const_assert!(HISTORY_LENGTH > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_host_table() {
        assert_eq!(u8::from(Direction::Stay), 0);
        assert_eq!(u8::from(Direction::Up), 1);
        assert_eq!(u8::from(Direction::Left), 2);
        assert_eq!(u8::from(Direction::Down), 3);
        assert_eq!(u8::from(Direction::Right), 4);
        assert!(Direction::try_from(5u8).is_err());
    }

    #[test]
    fn offsets_invert() {
        for direction in Direction::MOVING {
            let (drow, dcol) = direction.offset();
            assert_eq!(Direction::from_offset(drow, dcol), Some(direction));
        }
        assert_eq!(Direction::from_offset(0, 0), Some(Direction::Stay));
        assert_eq!(Direction::from_offset(1, 1), None);
        assert_eq!(Direction::from_offset(0, 2), None);
    }
}
