//! Error types for the Aligo node.
//!
//! All errors are represented by the `AligoError` enum, which keeps
//! the underlying message as a plain string so it can be carried into
//! an item's output payload unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all node operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum AligoError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Missing or unusable credentials.
    #[error("{0}")]
    Credential(String),

    /// Item parameter validation errors, raised before any request is sent.
    #[error("{0}")]
    Parameter(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Transport errors: network failure, non-success status, malformed response.
    #[error("{0}")]
    Transport(String),

    /// A run aborted on the item at `index`.
    #[error("{message} [item {index}]")]
    Item {
        index: usize,
        message: String,
    },

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl AligoError {
    /// Tags this error with the position of the item that produced it.
    pub fn at_item(
        self,
        index: usize,
    ) -> Self {
        match self {
            AligoError::Item {
                message, ..
            } => AligoError::Item {
                index,
                message,
            },
            other => AligoError::Item {
                index,
                message: other.to_string(),
            },
        }
    }

    /// Returns the failing item's index, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            AligoError::Item {
                index, ..
            } => Some(*index),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AligoError {
    fn from(error: std::io::Error) -> Self {
        AligoError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for AligoError {
    fn from(error: serde_json::Error) -> Self {
        AligoError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for AligoError {
    fn from(error: toml::de::Error) -> Self {
        AligoError::Config(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for AligoError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        AligoError::Parameter(error.to_string())
    }
}

impl From<reqwest::Error> for AligoError {
    fn from(error: reqwest::Error) -> Self {
        AligoError::Transport(error.to_string())
    }
}
