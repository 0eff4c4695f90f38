//! Reads the host game's state object into a validated [`GameState`].
//!
//! The host exposes `board`, `board_size`, `pacman_pos` and `ghosts_pos` attributes; each
//! may be a NumPy array or plain nested lists.

use ndarray::Array2;
use numpy::{PyReadonlyArray1, PyReadonlyArray2};
use pyo3::{exceptions::PyValueError, prelude::*};

use super::GameState;
use crate::{
    error::GameStateError,
    grid::{Board, Position},
};

impl From<GameStateError> for PyErr {
    fn from(err: GameStateError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Narrows a host cell tag. Only zero versus nonzero matters, so large tags stay nonzero.
fn cell_tag(tag: i64) -> i32 {
    i32::try_from(tag).unwrap_or(i32::MAX)
}

fn coordinate(value: i64) -> Result<usize, GameStateError> {
    usize::try_from(value)
        .map_err(|_| GameStateError::InvalidCoordinate(format!("{value} is negative")))
}

fn extract_board(ob: &PyAny) -> PyResult<Board> {
    let cells: Array2<i32> = if let Ok(array) = ob.extract::<PyReadonlyArray2<i64>>() {
        array.as_array().mapv(cell_tag)
    } else if let Ok(array) = ob.extract::<PyReadonlyArray2<i32>>() {
        array.as_array().to_owned()
    } else {
        let rows: Vec<Vec<i64>> = ob.extract()?;
        let rows: Vec<Vec<i32>> =
            rows.into_iter().map(|row| row.into_iter().map(cell_tag).collect()).collect();
        return Ok(Board::from_rows(&rows)?);
    };
    Ok(Board::from_array(cells)?)
}

fn position_from_coords(coords: &[i64]) -> Result<Position, GameStateError> {
    match coords {
        [row, col] => Ok((coordinate(*row)?, coordinate(*col)?)),
        _ => Err(GameStateError::InvalidCoordinate(format!(
            "expected 2 coordinates, got {}",
            coords.len()
        ))),
    }
}

fn extract_position(ob: &PyAny) -> PyResult<Position> {
    let coords: Vec<i64> = if let Ok(array) = ob.extract::<PyReadonlyArray1<i64>>() {
        array.as_array().to_vec()
    } else {
        ob.extract()?
    };
    Ok(position_from_coords(&coords)?)
}

fn extract_positions(ob: &PyAny) -> PyResult<Vec<Position>> {
    if let Ok(array) = ob.extract::<PyReadonlyArray2<i64>>() {
        return array
            .as_array()
            .rows()
            .into_iter()
            .map(|row| position_from_coords(&row.to_vec()).map_err(PyErr::from))
            .collect();
    }
    let items: Vec<&PyAny> = ob.extract()?;
    items.into_iter().map(extract_position).collect()
}

impl<'source> FromPyObject<'source> for GameState {
    fn extract(ob: &'source PyAny) -> PyResult<Self> {
        let board = extract_board(ob.getattr("board")?)?;
        let pacman = extract_position(ob.getattr("pacman_pos")?)?;
        let ghosts = extract_positions(ob.getattr("ghosts_pos")?)?;
        let game_state = match ob.getattr("board_size") {
            Ok(board_size) => {
                GameState::with_declared_size(board, board_size.extract()?, pacman, &ghosts)?
            }
            Err(_) => GameState::new(board, pacman, &ghosts)?,
        };
        Ok(game_state)
    }
}
