use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown size class: {0:?}")]
    UnknownSizeClass(String),
    #[error("Board must be at least one cell wide and tall")]
    EmptyBoard,
    #[error("Board needs at least two cells")]
    TooFewCells,
    #[error("Too many dragons, requested {requested} but at most {capacity} fit")]
    TooManyDragons {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Dragon layout does not match the board")]
    InvalidLayout,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
