//! Formatter configuration
//!
//! [`FormatOptions`] is the user-facing option set. It deserializes from the
//! camelCase JSON a host tool embeds in its own configuration file, exports a
//! JSON schema, and is validated once per render call into the
//! [`PrinterOptions`] the layout pass consumes.
//!
//! ```jsonc
//! {
//!   "lineWidth": 80,
//!   "indentWidth": 2,
//!   "indentStyle": "spaces",
//!   "commentPlacement": "before",
//!   "commentStyle": "line",
//!   "commentFilter": { "html": false }
//! }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::result::Result;
use crate::syntax::CommentKind;

/// Indent style for formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Use spaces for indentation
    #[default]
    Spaces,
    /// Use tabs for indentation
    Tabs,
}

/// Side an own-line comment attaches to when it sits between two siblings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentPlacement {
    /// Leading comment of the following sibling
    #[default]
    Before,
    /// Trailing comment of the preceding sibling
    After,
}

/// Surface form rendered comments are converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `/* text */`
    Block,
    /// `// text`
    Line,
    /// `<!-- text -->`
    Html,
    /// `/** text */`, one ` * ` line per physical line
    Doc,
}

impl CommentStyle {
    /// The comment kind this style renders as
    pub fn kind(self) -> CommentKind {
        match self {
            CommentStyle::Block => CommentKind::Block,
            CommentStyle::Line => CommentKind::Line,
            CommentStyle::Html => CommentKind::Html,
            CommentStyle::Doc => CommentKind::Doc,
        }
    }
}

/// Which comment kinds survive formatting
///
/// Filtered-out comments are dropped from the output entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentFilter {
    #[schemars(description = "Keep `//` comments")]
    pub line: bool,
    #[schemars(description = "Keep `/* */` comments")]
    pub block: bool,
    #[schemars(description = "Keep `<!-- -->` comments")]
    pub html: bool,
    #[schemars(description = "Keep `/** */` comments")]
    pub doc: bool,
}

impl CommentFilter {
    /// Retain every comment kind
    pub fn all() -> Self {
        Self {
            line: true,
            block: true,
            html: true,
            doc: true,
        }
    }

    /// Drop every comment
    pub fn none() -> Self {
        Self {
            line: false,
            block: false,
            html: false,
            doc: false,
        }
    }

    pub fn retains(&self, kind: CommentKind) -> bool {
        match kind {
            CommentKind::Line => self.line,
            CommentKind::Block => self.block,
            CommentKind::Html => self.html,
            CommentKind::Doc => self.doc,
        }
    }
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Formatter configuration
///
/// Width fields are signed so that negative values coming from a config file
/// reach [`FormatOptions::validate`] and are reported as configuration errors
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Maximum line width
    #[schemars(description = "Maximum columns per line before a group must break")]
    pub line_width: i32,

    /// Columns per indentation level
    #[schemars(description = "Number of columns per indentation level")]
    pub indent_width: i32,

    /// Indent style (spaces or tabs)
    #[schemars(description = "Indentation style: 'spaces' or 'tabs'")]
    pub indent_style: IndentStyle,

    /// Force a line break after every statement
    #[schemars(description = "Break after every statement, even when a body would fit")]
    pub force_break_statements: bool,

    /// Default side for ambiguous own-line comments
    #[schemars(description = "Side that own-line comments between two nodes attach to")]
    pub comment_placement: CommentPlacement,

    /// Surface form for rendered comments; unset keeps each comment's own form
    #[schemars(description = "Convert comments to 'block', 'line', 'html' or 'doc' form")]
    pub comment_style: Option<CommentStyle>,

    /// Comment kinds to keep
    #[schemars(description = "Comment kinds retained in the output")]
    pub comment_filter: CommentFilter,

    /// Whether to keep blank lines between statements
    #[schemars(description = "Preserve blank lines from original source")]
    pub preserve_blank_lines: bool,

    /// Maximum consecutive blank lines to keep
    #[schemars(description = "Maximum number of consecutive blank lines")]
    pub max_blank_lines: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent_width: 2,
            indent_style: IndentStyle::Spaces,
            force_break_statements: true,
            comment_placement: CommentPlacement::Before,
            comment_style: None,
            comment_filter: CommentFilter::all(),
            preserve_blank_lines: true,
            max_blank_lines: 1,
        }
    }
}

impl FormatOptions {
    /// Check the options and derive the layout settings
    pub fn validate(&self) -> Result<PrinterOptions> {
        if self.line_width <= 0 {
            return Err(FormatError::config(format!(
                "lineWidth must be positive, got {}",
                self.line_width
            )));
        }
        if self.indent_width < 0 {
            return Err(FormatError::config(format!(
                "indentWidth must not be negative, got {}",
                self.indent_width
            )));
        }

        Ok(PrinterOptions {
            line_width: self.line_width as usize,
            indent_width: self.indent_width as usize,
            indent_style: self.indent_style,
        })
    }

    /// Blank lines allowed between two statements
    pub(crate) fn blank_line_limit(&self) -> usize {
        if self.preserve_blank_lines {
            self.max_blank_lines
        } else {
            0
        }
    }

    /// JSON schema for embedding in host configuration schemas
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(FormatOptions).to_value()
    }
}

/// Validated layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Maximum line width before a group breaks
    pub line_width: usize,

    /// Columns per indentation level
    pub indent_width: usize,

    /// Whether to use tabs for indentation
    pub indent_style: IndentStyle,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent_width: 2,
            indent_style: IndentStyle::Spaces,
        }
    }
}
