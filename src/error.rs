//! Errors surfaced by the terminal shell.
//!
//! The simulation itself cannot fail: geometric edge cases are handled by
//! policy (wrap, resample, penalty). Only I/O and configuration reach here.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Terminal or log-file I/O failed.
    Io(io::Error),
    /// A configuration file could not be read or parsed.
    Config {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "terminal I/O failed: {}", e),
            GameError::Config { path, message } => {
                write!(f, "invalid config '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Config { .. } => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}
