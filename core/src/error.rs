use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board rows must be non-empty and of equal length")]
    InvalidBoardShape,
    #[error("Invalid cell character {0:?}, expected 'O' or '.'")]
    InvalidCell(char),
    #[error("Game already won, no new moves are accepted")]
    AlreadyWon,
}

pub type Result<T> = core::result::Result<T, GameError>;
