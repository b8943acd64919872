use std::io;
use thiserror::Error;

/// Failures that end the program. Gameplay itself cannot fail, only the
/// terminal underneath it.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}
