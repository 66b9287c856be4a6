//! Error types for bayes-rs

use std::path::PathBuf;

use thiserror::Error;

use crate::corpus::Class;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, BayesError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum BayesError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus file or directory could not be read
    #[error("Corpus error at {path:?}: {source}")]
    Corpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A vocabulary word has no entry in a smoothed frequency map
    #[error("Word '{word}' missing from {class} frequencies")]
    MissingWord { word: String, class: Class },

    /// Experiment parameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BayesError {
    pub(crate) fn corpus(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BayesError::Corpus {
            path: path.into(),
            source,
        }
    }
}
