use std::str::FromStr;

use arrayvec::ArrayVec;
use ndarray::Array2;

use crate::{
    error::{GameStateError, Result},
    variables::{Direction, WALL},
};

/// A `(row, col)` cell coordinate.
pub type Position = (usize, usize);

/// One legal single step: the cell it lands on and the direction that gets there.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub pos: Position,
    pub direction: Direction,
}

/// The static maze. Cells tagged `0` are walls; any other tag is walkable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Array2<i32>,
}

impl Board {
    /// Wraps a square, non-empty array of cell tags.
    pub fn from_array(cells: Array2<i32>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 {
            return Err(GameStateError::EmptyBoard);
        }
        if rows != cols {
            return Err(GameStateError::NotSquare { rows, cols });
        }
        Ok(Self { cells })
    }

    /// Builds a board from nested rows, as the host sends it.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Array2::zeros((size, size));
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(GameStateError::NotSquare { rows: size, cols: row.len() });
            }
            for (col_index, &tag) in row.iter().enumerate() {
                cells[[row_index, col_index]] = tag;
            }
        }
        Self::from_array(cells)
    }

    /// An obstacle-free board.
    pub fn open(size: usize) -> Result<Self> {
        Self::from_array(Array2::ones((size, size)))
    }

    /// The side length of the board.
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.0 < self.size() && pos.1 < self.size()
    }

    /// Returns true if `pos` is on the board and not a wall.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cells.get(pos).is_some_and(|&tag| tag != WALL)
    }

    /// Returns the cell one step from `pos` in `direction`, if it stays on the board.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (drow, dcol) = direction.offset();
        let row = pos.0.checked_add_signed(drow)?;
        let col = pos.1.checked_add_signed(dcol)?;
        let target = (row, col);
        self.in_bounds(target).then_some(target)
    }

    /// Returns the legal single-step moves from `pos`, in the order Up, Down, Left, Right.
    /// Staying put is never included.
    pub fn valid_moves(&self, pos: Position) -> ArrayVec<Move, 4> {
        Direction::MOVING
            .into_iter()
            .filter_map(|direction| {
                self.step(pos, direction)
                    .filter(|&target| self.is_walkable(target))
                    .map(|target| Move { pos: target, direction })
            })
            .collect()
    }

    /// Iterates over every walkable cell in row-major order.
    pub fn walkable_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.indexed_iter().filter(|(_, tag)| **tag != WALL).map(|(pos, _)| pos)
    }
}

/// Parses an ASCII maze: `#` is a wall and any other character is walkable.
/// The first line is row 0. Blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = GameStateError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<i32>> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| if c == '#' { WALL } else { 1 }).collect())
            .collect();
        Self::from_rows(&rows)
    }
}

pub fn manhattan_distance(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
