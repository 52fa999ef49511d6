//! Error types and result aliases for Crux operations.
//!
//! Parsing either fully succeeds with an immutable value or fails atomically
//! with a [`FormatError`] carrying the offending input; there is no partial
//! or degraded result.

use thiserror::Error;

/// Parse failure for version or range text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid version format: {input}")]
    Version { input: String },

    #[error("invalid version range: {input}")]
    Range { input: String },
}

/// Result type alias for Crux operations
pub type CruxResult<T> = Result<T, FormatError>;

impl FormatError {
    /// Create a version format error from the raw input
    pub fn version(input: impl Into<String>) -> Self {
        Self::Version {
            input: input.into(),
        }
    }

    /// Create a range format error from the raw input
    pub fn range(input: impl Into<String>) -> Self {
        Self::Range {
            input: input.into(),
        }
    }

    /// The raw text that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::Version { input } | Self::Range { input } => input,
        }
    }
}
