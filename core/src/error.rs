use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be positive")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Mine placed twice at the same coordinates")]
    DuplicateMine,
    #[error("Game has not started yet")]
    NotStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Corrupt save data: {0}")]
    CorruptSaveData(#[from] SaveDataError),
}

/// Reason a saved session was refused.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaveDataError {
    #[error("grid dimensions must be positive")]
    InvalidDimensions,
    #[error("more mines than the grid can hold")]
    TooManyMines,
    #[error("bomb location count does not match the mine count")]
    MineCountMismatch,
    #[error("bomb location outside the grid")]
    MineOutOfBounds,
    #[error("bomb location listed twice")]
    DuplicateMine,
    #[error("unrecognized verb in log")]
    UnknownVerb,
    #[error("wrong arguments for logged action")]
    BadArguments,
}

pub type Result<T> = core::result::Result<T, GameError>;
