//! Error types for the event creation flow.
//!
//! Extraction and link building cannot fail; these cover what happens around
//! them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuickCalError {
    #[error("Please enter some text for the event")]
    EmptyEventText,

    #[error("Active context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Failed to open '{url}' with '{command}': {reason}")]
    OpenFailed { url: String, command: String, reason: String },

    #[error("Invalid config file '{path}': {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, QuickCalError>;
