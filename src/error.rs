use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or driving a game.
///
/// Collisions and a full board are game outcomes, not errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("board sides must be between 3 and {max}, got {width}x{height}", max = crate::config::MAX_BOARD_SIDE)]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
