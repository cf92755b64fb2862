use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

/// Errors raised while hosting a page or reducing its tree
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// Browser launch failed
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Connection to an existing browser failed
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript evaluation failed
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The styled tree could not be read or written
    #[error("Failed to parse DOM: {0}")]
    DomParseFailed(String),

    /// The document has no `body` element
    #[error("Document has no body element")]
    MissingBody,

    /// The host could not resolve a computed style value
    #[error("Failed to resolve computed style '{property}' on <{tag}>: {reason}")]
    StyleResolutionFailed {
        tag: String,
        property: String,
        reason: String,
    },

    /// Snapshot file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyntaxError {
    /// Stable name of the error kind, reported alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxError::LaunchFailed(_) => "LaunchFailed",
            SyntaxError::ConnectionFailed(_) => "ConnectionFailed",
            SyntaxError::NavigationFailed(_) => "NavigationFailed",
            SyntaxError::EvaluationFailed(_) => "EvaluationFailed",
            SyntaxError::DomParseFailed(_) => "DomParseFailed",
            SyntaxError::MissingBody => "MissingBody",
            SyntaxError::StyleResolutionFailed { .. } => "StyleResolutionFailed",
            SyntaxError::Io(_) => "Io",
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Structured failure handed to the transport layer instead of a serialized tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReport {
    pub message: String,
    pub stack: String,
    pub name: String,
}

impl ErrorReport {
    /// Build a report from an error, flattening its source chain into `stack`
    pub fn from_error(error: &SyntaxError) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            stack: causes.join("\n"),
            name: error.kind().to_string(),
        }
    }
}

impl From<&SyntaxError> for ErrorReport {
    fn from(error: &SyntaxError) -> Self {
        Self::from_error(error)
    }
}
