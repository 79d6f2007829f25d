use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort session startup or end a running session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dictionary unavailable: {path}: {source}")]
    DictionaryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary contains no usable words")]
    EmptyDictionary,

    #[error("no word length group holds at least {required} words")]
    NoUsableLengthGroup { required: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("placed {placed} of {required} words before the draw budget ran out")]
    InitializationFailed { placed: usize, required: usize },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// A single placement attempt ran out of retries.
///
/// Recoverable: the caller is expected to draw a different word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free space for `{word}` after {attempts} attempts")]
    NoSpaceFound { word: String, attempts: usize },
}
