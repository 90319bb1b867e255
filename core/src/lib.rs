#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use round::*;
pub use types::*;

mod error;
mod generator;
mod reveal;
mod round;
mod types;

/// Grid value of a mined cell, every other value is an adjacency count.
pub const MINE: i8 = -1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Rejects boards that cannot be played instead of clamping them.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize);
        }
        let available = self.total_cells();
        if self.mines > available {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                available,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(9, 10)
    }
}

/// Square board of mine markers and adjacency counts. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    cells: Array2<i8>,
    mine_count: CellCount,
}

/// Serialized form of a [`Grid`], checked before it becomes one.
#[derive(Deserialize)]
struct GridRepr {
    cells: Array2<i8>,
    mine_count: CellCount,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let rows: alloc::vec::Vec<alloc::vec::Vec<i8>> =
            repr.cells.rows().into_iter().map(|row| row.to_vec()).collect();
        let grid = Self::from_rows(&rows)?;
        if grid.mine_count != repr.mine_count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(grid)
    }
}

impl Grid {
    /// Builds a grid from mine positions, computing every adjacency count.
    /// Duplicate positions count once.
    pub fn from_mines(size: Coord, mines: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines.iter().any(|&(row, col)| row >= size || col >= size) {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self::from_mine_iter(size, mines.iter().copied()))
    }

    /// Builds a grid from explicit rows of values, rejecting boards whose counts
    /// do not agree with their mines.
    pub fn from_rows<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self> {
        let size: Coord = rows.len().try_into().map_err(|_| GameError::InvalidSize)?;
        if size == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mines = alloc::vec::Vec::new();
        for (row, values) in (0..size).zip(rows) {
            let values = values.as_ref();
            if values.len() != usize::from(size) {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, &value) in (0..size).zip(values) {
                match value {
                    MINE => mines.push((row, col)),
                    0..=8 => {}
                    _ => return Err(GameError::InvalidCellValue),
                }
            }
        }

        let grid = Self::from_mine_iter(size, mines.into_iter());
        let matches = grid
            .cells
            .rows()
            .into_iter()
            .zip(rows)
            .all(|(computed, given)| computed.iter().eq(given.as_ref().iter()));
        if matches {
            Ok(grid)
        } else {
            Err(GameError::InvalidCellValue)
        }
    }

    pub(crate) fn from_mine_iter(size: Coord, mines: impl Iterator<Item = Coord2>) -> Self {
        let mut cells: Array2<i8> = Array2::zeros((usize::from(size), usize::from(size)));
        let mut mine_count = 0;

        for coords in mines {
            if cells[coords.to_nd_index()] == MINE {
                continue;
            }
            cells[coords.to_nd_index()] = MINE;
            mine_count += 1;
            for pos in cells.iter_neighbors(coords) {
                let cell = &mut cells[pos.to_nd_index()];
                if *cell != MINE {
                    *cell += 1;
                }
            }
        }

        Self { cells, mine_count }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<i8> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self[coords] == MINE
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Every position in row-major order together with its value.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, i8)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &value)| ((row as Coord, col as Coord), value))
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|&(_, value)| value == MINE)
            .map(|(coords, _)| coords)
    }
}

impl Index<Coord2> for Grid {
    type Output = i8;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
