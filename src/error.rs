//! Error types for rendering operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning markup into plain text
///
/// Malformed markup is never one of them: unknown tags, missing attributes
/// and unmatched base elements all degrade gracefully.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document source could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the unreadable source
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Character encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// A render option is out of range
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// A selector in the options could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The offending selector text
        selector: String,
        /// What is wrong with it
        reason: String,
    },
    /// The tree nests deeper than the configured ceiling
    #[error("Document nesting exceeds maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

impl RenderError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            RenderError::Io { .. } => 1,
            RenderError::Encoding(_) => 2,
            RenderError::InvalidOption(_) => 3,
            RenderError::InvalidSelector { .. } => 4,
            RenderError::DepthLimitExceeded(_) => 5,
        }
    }
}
