//! Result type alias for render operations

use crate::error::FormatError;

/// Standard Result type for render operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_input_error() {
                    tracing::warn!("Input cannot be rendered: {}", err);
                } else {
                    tracing::error!("Translator gap: {}", err);
                }
                None
            }
        }
    }
}
