use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 1")]
    InvalidSize,
    #[error("Too many mines: requested {requested} but the board only has {available} cells")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell value is not a mine or a matching adjacency count")]
    InvalidCellValue,
}

pub type Result<T> = core::result::Result<T, GameError>;
