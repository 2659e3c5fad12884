use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cannot place {mines} mines, only {available} cells are outside the safe zone")]
    Configuration { mines: CellCount, available: CellCount },
    #[error("Unknown difficulty {0:?}, expected one of easy, medium, hard")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
