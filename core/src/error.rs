use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    InvalidCoords,
    #[error("Board width and height must be at least 1")]
    InvalidSize,
    #[error("Maximum mine count is below the minimum")]
    InvalidMineRange,
    #[error("Too many mines for the board size")]
    TooManyMines,
    #[error("Mine count is outside the configured range")]
    MineCountOutOfRange,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board cells contradict each other")]
    InconsistentBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
