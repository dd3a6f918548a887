//! Error types for PaperWright.
//!
//! Library crates use [`PaperwrightError`] via `thiserror`.
//! App crates (cli) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all PaperWright operations.
#[derive(Debug, thiserror::Error)]
pub enum PaperwrightError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Request validation error (empty topic, zero page count, bad kind).
    /// Surfaced to the caller before any work begins.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Source provider failure. Recovered locally by the assembler:
    /// downgraded to an empty source list, never fatal on its own.
    #[error("source fetch error: {0}")]
    SourceFetch(String),

    /// Unexpected fault during document assembly or rendering.
    /// Carried inside a degraded result, not raised past the assembler.
    #[error("generation error: {0}")]
    Generation(String),

    /// Payment gateway reported failure. A hard error in the paid flow.
    #[error("payment error: {0}")]
    Payment(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PaperwrightError>;

impl PaperwrightError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a generation error from any displayable message.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a payment error from any displayable message.
    pub fn payment(msg: impl Into<String>) -> Self {
        Self::Payment(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PaperwrightError::validation("topic must not be empty");
        assert_eq!(err.to_string(), "validation error: topic must not be empty");

        let err = PaperwrightError::payment("gateway declined the charge");
        assert!(err.to_string().contains("declined"));
    }
}
