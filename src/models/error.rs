//! Error types for examgen.
//!
//! Business outcomes (weight, coverage, capacity, structural and tolerance
//! findings) are never errors of this type: they travel as `Vec<String>`
//! inside the generate/validate responses. This enum covers what can go
//! wrong around the core.
//!
//! Epistemic taxonomy:
//! - B_i falsified: Expected failures (not found, malformed input)
//! - I^B materialized: Infrastructure failures (filesystem)
//! - K_i violated: Internal invariant violations (bugs)

use thiserror::Error;

/// Top-level error type for examgen.
#[derive(Debug, Error)]
pub enum ExamgenError {
    // ═══════════════════════════════════════════════════════════════════
    // B_i FALSIFIED - Belief proven wrong (expected failures)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No curriculum data found for module '{0}'.")]
    ModuleNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    // ═══════════════════════════════════════════════════════════════════
    // I^B MATERIALIZED - Bounded ignorance became known-bad
    // ═══════════════════════════════════════════════════════════════════

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ═══════════════════════════════════════════════════════════════════
    // K_i VIOLATED - Invariant broken (bug, should not happen)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExamgenError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error that remembers where the bad payload came from.
    pub fn parse(origin: impl std::fmt::Display, source: serde_json::Error) -> Self {
        Self::ParseError(format!("{origin}: {source}"))
    }

    /// Whether the caller sent something we could not use (as opposed to a
    /// local failure). Transport layers map this to a 4xx-style rejection.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::ModuleNotFound(_) | Self::ParseError(_)
        )
    }
}

/// Result type alias for examgen.
pub type Result<T> = std::result::Result<T, ExamgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_not_found_message() {
        let err = ExamgenError::ModuleNotFound("module-9".to_string());
        assert_eq!(
            err.to_string(),
            "No curriculum data found for module 'module-9'."
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_is_not_client_error() {
        let err = ExamgenError::io(
            "reading catalog",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "IO error: reading catalog");
        assert!(!err.is_client_error());
    }
}
