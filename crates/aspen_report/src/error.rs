//! Report error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read metrics: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid CSV metrics: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSONL metrics at line {line}: {source}")]
    Jsonl {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown model profile '{0}' (expected one of: {known})", known = crate::profile::ModelProfile::ids().join(", "))]
    UnknownProfile(String),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
