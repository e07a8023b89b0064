use std::path::PathBuf;

use thiserror::Error;

/// Boxed source for transport failures; concrete clients live outside this crate.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync>;

/// Every failure a push run can end with. None of them is recovered locally.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The project names an adapter outside the supported set.
    #[error("unsupported adapter: {0}")]
    UnsupportedAdapter(String),

    #[error("failed to read project configuration {path}: {source}")]
    ProjectConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project configuration {path}: {source}")]
    ProjectConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matched model file is not valid JSON for the expected shape.
    #[error("failed to parse model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Login, list or bulk call failed (connection, non-success status or bad body).
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportSource,
    },
}

impl SyncError {
    pub fn transport<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<TransportSource>,
    {
        SyncError::Transport {
            operation,
            source: source.into(),
        }
    }
}
