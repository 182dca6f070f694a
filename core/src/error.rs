use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position is outside the board")]
    InvalidPosition,
    #[error("Too many mines, at least one safe tile is required")]
    TooManyMines,
    #[error("Mine layout does not match the game config")]
    LayoutMismatch,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
