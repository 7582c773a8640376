//! Document IR for width-independent layout
//!
//! A [`Document`] describes everything that *could* be printed: text, break
//! candidates, indentation and groups whose breaks are decided together. No
//! width decision is taken while building one; the printer resolves them.
//!
//! Two text forms are kept apart, following the token/text split of the
//! Ruff and Biome formatters:
//! - `Token`: static ASCII punctuation and keywords
//! - `Text`: slices of the source buffer and rendered comments
//!
//! Every node caches its [`Measure`] at construction, so the printer can ask
//! "does this subtree fit flat?" in constant time.
//!
//! # Example
//!
//! ```
//! use esprint_core::document::{concat, group, indent, line, soft_line, text, token};
//!
//! let call = group(concat(vec![
//!     text("print"),
//!     token("("),
//!     indent(concat(vec![soft_line(), text("value")])),
//!     soft_line(),
//!     token(")"),
//! ]));
//! assert_eq!(call.measure().flat_width, 12);
//! assert!(!call.measure().forced_break);
//! # let _ = line();
//! ```

use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Cached layout facts about a document subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Measure {
    /// Display width when every break candidate renders flat
    pub flat_width: usize,
    /// Contains a hard line or a line suffix, so enclosing groups must break
    pub forced_break: bool,
}

impl Measure {
    fn join(self, other: Measure) -> Measure {
        Measure {
            flat_width: self.flat_width + other.flat_width,
            forced_break: self.forced_break || other.forced_break,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocKind {
    Nil,

    /// Static ASCII text without line terminators
    Token(&'static str),

    /// Dynamic text, never containing a line terminator
    Text(Box<str>),

    Concat(Vec<Document>),

    /// Space when flat, newline plus indent when broken
    Line,

    /// Nothing when flat, newline plus indent when broken
    SoftLine,

    /// Always a newline plus indent
    HardLine,

    Indent {
        levels: usize,
        contents: Box<Document>,
    },

    /// Breaks all of its direct lines together, or none of them
    ///
    /// An expanded group always breaks.
    Group {
        contents: Box<Document>,
        expand: bool,
    },

    /// Alternative layouts of the same content, most compact first
    ///
    /// The printer takes the first state that fits flat, then the first
    /// later state whose line up to its first break fits, else the last one.
    ConditionalGroup(Vec<Document>),

    /// Items separated by lines that break pairwise
    Fill(Vec<Document>),

    /// Deferred until just before the next newline
    LineSuffix(Box<Document>),
}

/// A node of the document IR with its cached measure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    kind: DocKind,
    measure: Measure,
}

impl Document {
    fn new(kind: DocKind) -> Self {
        let measure = match &kind {
            DocKind::Nil | DocKind::SoftLine => Measure::default(),
            DocKind::Token(s) => Measure {
                flat_width: s.len(),
                forced_break: false,
            },
            DocKind::Text(s) => Measure {
                flat_width: s.width(),
                forced_break: false,
            },
            DocKind::Line => Measure {
                flat_width: 1,
                forced_break: false,
            },
            DocKind::HardLine => Measure {
                flat_width: 0,
                forced_break: true,
            },
            DocKind::Concat(parts) => parts
                .iter()
                .fold(Measure::default(), |acc, part| acc.join(part.measure)),
            DocKind::Fill(items) => {
                let separators = Measure {
                    flat_width: items.len().saturating_sub(1),
                    forced_break: false,
                };
                items
                    .iter()
                    .fold(separators, |acc, item| acc.join(item.measure))
            }
            DocKind::Indent { contents, .. } => contents.measure,
            DocKind::Group { contents, expand } => Measure {
                forced_break: contents.measure.forced_break || *expand,
                ..contents.measure
            },
            DocKind::ConditionalGroup(states) => {
                states.first().map(|state| state.measure).unwrap_or_default()
            }
            DocKind::LineSuffix(_) => Measure {
                flat_width: 0,
                forced_break: true,
            },
        };
        Self { kind, measure }
    }

    pub fn kind(&self) -> &DocKind {
        &self.kind
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.kind, DocKind::Nil)
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + match &self.kind {
            DocKind::Concat(parts) | DocKind::Fill(parts) | DocKind::ConditionalGroup(parts) => {
                parts.iter().map(Document::node_count).sum()
            }
            DocKind::Indent { contents, .. }
            | DocKind::Group { contents, .. }
            | DocKind::LineSuffix(contents) => contents.node_count(),
            _ => 0,
        }
    }
}

pub(crate) static FILL_SEPARATOR: Document = Document {
    kind: DocKind::Line,
    measure: Measure {
        flat_width: 1,
        forced_break: false,
    },
};

/// Debug rendering of the IR structure, in the spirit of Prettier's doc debug output
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, items: &[Document]) -> fmt::Result {
            write!(f, "{}([", name)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "])")
        }

        match &self.kind {
            DocKind::Nil => write!(f, "nil"),
            DocKind::Token(s) => write!(f, "{:?}", s),
            DocKind::Text(s) => write!(f, "{:?}", s),
            DocKind::Concat(parts) => list(f, "concat", parts),
            DocKind::Line => write!(f, "line"),
            DocKind::SoftLine => write!(f, "softline"),
            DocKind::HardLine => write!(f, "hardline"),
            DocKind::Indent { levels: 1, contents } => write!(f, "indent({})", contents),
            DocKind::Indent { levels, contents } => write!(f, "indent({}, {})", levels, contents),
            DocKind::Group {
                contents,
                expand: false,
            } => write!(f, "group({})", contents),
            DocKind::Group {
                contents,
                expand: true,
            } => write!(f, "group(expand, {})", contents),
            DocKind::ConditionalGroup(states) => list(f, "conditionalGroup", states),
            DocKind::Fill(items) => list(f, "fill", items),
            DocKind::LineSuffix(contents) => write!(f, "lineSuffix({})", contents),
        }
    }
}

/// Builder API: Empty document
pub fn nil() -> Document {
    Document::new(DocKind::Nil)
}

/// Builder API: Create token for static, ASCII-only text
///
/// Use this for keywords, operators and punctuation.
///
/// # Panics
///
/// In debug builds, panics if `text` is not ASCII or contains a line
/// terminator or tab.
pub fn token(text: &'static str) -> Document {
    debug_assert!(text.is_ascii(), "Token must be ASCII only, got: {:?}", text);
    debug_assert!(
        !text.contains(['\n', '\r', '\t']),
        "Token cannot contain newlines/tabs, use hard_line instead: {:?}",
        text
    );
    Document::new(DocKind::Token(text))
}

/// Builder API: Create text from dynamic content
///
/// Use this for identifiers, literals and comment lines sliced from the source.
pub fn text(text: impl AsRef<str>) -> Document {
    let text = text.as_ref();
    debug_assert!(
        !text.contains(['\n', '\r']),
        "Text cannot contain line terminators: {:?}",
        text
    );
    Document::new(DocKind::Text(text.into()))
}

/// Builder API: Sequential composition
///
/// Nil parts are dropped and nested concatenations are spliced in.
pub fn concat(parts: Vec<Document>) -> Document {
    let mut flat = Vec::with_capacity(parts.len());
    for part in parts {
        match part.kind {
            DocKind::Nil => {}
            DocKind::Concat(inner) => flat.extend(inner),
            _ => flat.push(part),
        }
    }
    match flat.len() {
        0 => nil(),
        1 => flat.pop().unwrap_or_else(nil),
        _ => Document::new(DocKind::Concat(flat)),
    }
}

pub fn line() -> Document {
    Document::new(DocKind::Line)
}

pub fn soft_line() -> Document {
    Document::new(DocKind::SoftLine)
}

pub fn hard_line() -> Document {
    Document::new(DocKind::HardLine)
}

/// Builder API: One extra indentation level for lines inside `contents`
pub fn indent(contents: Document) -> Document {
    indent_by(1, contents)
}

pub fn indent_by(levels: usize, contents: Document) -> Document {
    if levels == 0 || contents.is_nil() {
        return contents;
    }
    Document::new(DocKind::Indent {
        levels,
        contents: Box::new(contents),
    })
}

/// Builder API: Group elements together
///
/// Groups try to stay on one line if they fit within the line width.
pub fn group(contents: Document) -> Document {
    if contents.is_nil() {
        return contents;
    }
    Document::new(DocKind::Group {
        contents: Box::new(contents),
        expand: false,
    })
}

/// Builder API: A group that always breaks
///
/// An existing group is marked expanded in place instead of being wrapped.
pub fn expanded_group(contents: Document) -> Document {
    let contents = match contents.kind {
        DocKind::Group { contents, .. } => *contents,
        _ => contents,
    };
    Document::new(DocKind::Group {
        contents: Box::new(contents),
        expand: true,
    })
}

/// Builder API: Try each state in turn, falling back to the last one
pub fn conditional_group(states: Vec<Document>) -> Document {
    Document::new(DocKind::ConditionalGroup(states))
}

/// Builder API: Items separated by break candidates resolved pairwise
pub fn fill(items: Vec<Document>) -> Document {
    Document::new(DocKind::Fill(items))
}

/// Builder API: Content flushed just before the next newline
///
/// Used for trailing line comments, so punctuation printed after the
/// commented node still lands before the comment.
pub fn line_suffix(contents: Document) -> Document {
    Document::new(DocKind::LineSuffix(Box::new(contents)))
}

/// Builder API: Interleave `separator` between `items`
pub fn join(separator: Document, items: Vec<Document>) -> Document {
    let mut parts = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(item);
    }
    concat(parts)
}
