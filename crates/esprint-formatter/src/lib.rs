//! esprint formatter
//!
//! Public entry point over the esprint layout engine. A [`Formatter`] is
//! built once from validated options and then renders [`SourceUnit`]s, one
//! at a time or as a parallel batch.

use esprint_core::format_tree;
use rayon::prelude::*;
use tracing::{debug, warn};

pub use esprint_core::{
    CommentFilter, CommentKind, CommentPlacement, CommentStyle, ErrorKind, FormatError,
    FormatOptions, IndentStyle, RawComment, Result, SyntaxTree,
};

/// Everything needed to render one file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub source: String,
    pub tree: SyntaxTree,
    pub comments: Vec<RawComment>,
}

impl SourceUnit {
    pub fn new(source: impl Into<String>, tree: SyntaxTree, comments: Vec<RawComment>) -> Self {
        Self {
            source: source.into(),
            tree,
            comments,
        }
    }
}

/// Result of [`Formatter::format_or_verbatim`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted(String),
    /// Rendering failed; the original source is handed back untouched
    Verbatim { source: String, error: FormatError },
}

impl FormatOutcome {
    /// Text to write out, formatted or not
    pub fn text(&self) -> &str {
        match self {
            Self::Formatted(text) => text,
            Self::Verbatim { source, .. } => source,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Formatted(text) => text,
            Self::Verbatim { source, .. } => source,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }

    pub fn error(&self) -> Option<&FormatError> {
        match self {
            Self::Formatted(_) => None,
            Self::Verbatim { error, .. } => Some(error),
        }
    }
}

/// Renders syntax trees with a fixed, already validated option set
#[derive(Debug, Clone)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    /// Validate `options` and build a formatter around them
    pub fn new(options: FormatOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format(&self, unit: &SourceUnit) -> Result<String> {
        format_tree(&unit.tree, &unit.comments, &unit.source, &self.options)
    }

    /// Format `unit`, falling back to its original text on any error
    pub fn format_or_verbatim(&self, unit: &SourceUnit) -> FormatOutcome {
        match self.format(unit) {
            Ok(text) => FormatOutcome::Formatted(text),
            Err(error) => {
                warn!(%error, "Formatting failed, keeping source verbatim");
                FormatOutcome::Verbatim {
                    source: unit.source.clone(),
                    error,
                }
            }
        }
    }

    /// Format independent units in parallel
    ///
    /// Results come back in input order. One unit failing does not affect
    /// the others.
    pub fn format_batch(&self, units: &[SourceUnit]) -> Vec<Result<String>> {
        debug!("Formatting batch of {} units", units.len());
        units.par_iter().map(|unit| self.format(unit)).collect()
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use super::{FormatOptions, FormatOutcome, Formatter, SourceUnit};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_options_rejected_up_front() {
        let options = FormatOptions {
            line_width: 0,
            ..Default::default()
        };
        let err = Formatter::new(options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_outcome_accessors() {
        let formatted = FormatOutcome::Formatted("a;\n".to_string());
        assert!(formatted.is_formatted());
        assert_eq!(formatted.text(), "a;\n");
        assert!(formatted.error().is_none());

        let verbatim = FormatOutcome::Verbatim {
            source: "a++".to_string(),
            error: FormatError::config("bad"),
        };
        assert!(!verbatim.is_formatted());
        assert_eq!(verbatim.into_text(), "a++");
    }
}
