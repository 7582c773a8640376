//! Error types for rendering a syntax tree back to text

use text_size::TextRange;
use thiserror::Error;

/// Main error type for a render call
///
/// Every variant is fatal for the render call that produced it. Callers either
/// fail the whole operation or fall back to the unformatted source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Tree or comment offsets are inconsistent with the source or with each other
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// The translator has no mapping for a node variant
    #[error("Unsupported node '{production}' at {range:?}")]
    UnsupportedNode { production: String, range: TextRange },

    /// Options rejected before any translation begins
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    UnsupportedNode,
    Configuration,
}

impl FormatError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::MalformedInput { .. } => ErrorKind::MalformedInput,
            FormatError::UnsupportedNode { .. } => ErrorKind::UnsupportedNode,
            FormatError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the caller supplied bad data, as opposed to hitting a gap in the translator
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedInput | ErrorKind::Configuration
        )
    }

    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an unsupported node error
    pub fn unsupported(production: impl Into<String>, range: TextRange) -> Self {
        Self::UnsupportedNode {
            production: production.into(),
            range,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
