use thiserror::Error;

use crate::Mode;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board must have an even number of cells")]
    OddCellCount,
    #[error("Board needs {requested} pairs but only {available} symbols exist")]
    TooManyPairs { requested: u16, available: u16 },
    #[error("{mode:?} mode does not allow {count} players")]
    InvalidPlayerCount { mode: Mode, count: usize },
    #[error("Deck does not hold exactly two of each symbol for this board")]
    InvalidDeck,
    #[error("Game state does not hold together")]
    InconsistentState,
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Card is already face up")]
    CardAlreadyOpen,
    #[error("Waiting for the mismatched pair to flip back")]
    AwaitingCooldown,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
