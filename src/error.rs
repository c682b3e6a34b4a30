use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DropscanError>;

/// Everything that can end a run early. One-shot tool: nothing is retried,
/// every failure surfaces to the caller.
#[derive(Error, Debug)]
pub enum DropscanError {
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("could not decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("analysis window must be at least one sample")]
    InvalidWindow,

    #[error("could not render artifacts: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
