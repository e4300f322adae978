//! Error types for landmark providers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("failed to launch detector '{script}': {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("detector did not signal ready, got: {0:?}")]
    NotReady(String),

    #[error("detector pipe closed: {0}")]
    PipeClosed(&'static str),

    #[error("failed to open replay file '{path}': {source}")]
    Replay {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed detection at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
