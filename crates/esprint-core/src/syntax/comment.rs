//! Raw comment spans produced by the upstream scanner

use text_size::TextRange;

/// Textual style of a comment in the original source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
    /// `<!-- text -->`
    Html,
    /// `/** text */`
    Doc,
}

impl CommentKind {
    /// Opening delimiter
    pub fn opener(self) -> &'static str {
        match self {
            CommentKind::Line => "//",
            CommentKind::Block => "/*",
            CommentKind::Html => "<!--",
            CommentKind::Doc => "/**",
        }
    }

    /// Closing delimiter, if the comment has one
    pub fn closer(self) -> Option<&'static str> {
        match self {
            CommentKind::Line => None,
            CommentKind::Block | CommentKind::Doc => Some("*/"),
            CommentKind::Html => Some("-->"),
        }
    }

    /// Whether the comment runs to the end of its line
    pub fn ends_line(self) -> bool {
        matches!(self, CommentKind::Line)
    }
}

/// A comment span, not yet attached to any node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawComment {
    pub range: TextRange,
    pub kind: CommentKind,
}

impl RawComment {
    pub fn new(range: TextRange, kind: CommentKind) -> Self {
        Self { range, kind }
    }

    /// Slice the comment text out of the source buffer
    ///
    /// Returns `None` when the range does not address a valid slice of `source`.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(std::ops::Range::<usize>::from(self.range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_comment_text_slice() {
        let source = "x; // note";
        let comment = RawComment::new(
            TextRange::new(TextSize::from(3), TextSize::from(10)),
            CommentKind::Line,
        );
        assert_eq!(comment.text(source), Some("// note"));
    }

    #[test]
    fn test_out_of_bounds_slice() {
        let comment = RawComment::new(
            TextRange::new(TextSize::from(3), TextSize::from(40)),
            CommentKind::Block,
        );
        assert_eq!(comment.text("short"), None);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(CommentKind::Doc.opener(), "/**");
        assert_eq!(CommentKind::Html.closer(), Some("-->"));
        assert!(CommentKind::Line.ends_line());
        assert!(!CommentKind::Block.ends_line());
    }
}
