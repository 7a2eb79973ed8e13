//! Error types for sheetref.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing a reference or loading limits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Invalid reference: {input}")]
    InvalidReference { input: String },

    #[error("Invalid limit: {limit}")]
    InvalidLimit { limit: String },

    #[error("Config error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ReferenceError {
    pub(crate) fn invalid(input: &str) -> Self {
        ReferenceError::InvalidReference {
            input: input.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
