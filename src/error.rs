use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot plant {requested} mines on a board with only {cells} cells")]
    TooManyMines { requested: usize, cells: usize },
    #[error("mines have already been planted on this board")]
    AlreadyPlanted,
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("board size {size} is larger than the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },
    #[error("mine position ({row}, {col}) is outside the {size}x{size} board")]
    MineOutOfBounds { row: usize, col: usize, size: usize },
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("the game is already over")]
    GameOver,
    #[error("cell ({row}, {col}) is flagged, remove the flag first")]
    Flagged { row: usize, col: usize },
    #[error("failed to read settings file {}", .path.display())]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}", .path.display())]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
