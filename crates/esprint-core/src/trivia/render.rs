//! Comment rendering
//!
//! Turns the raw text of a comment into document lines, optionally converting
//! it to another surface form. Continuation lines of multi-line comments are
//! emitted as separate texts joined by hard lines, so the enclosing indent
//! applies to each of them.

use crate::config::CommentStyle;
use crate::document::{Document, hard_line, join, text};
use crate::error::FormatError;
use crate::result::Result;
use crate::syntax::{CommentKind, RawComment};

/// A comment ready to splice into the document stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedComment {
    pub doc: Document,
    /// Surface form the comment was rendered in
    pub kind: CommentKind,
}

impl RenderedComment {
    /// A line comment must be followed by a newline
    pub fn ends_line(&self) -> bool {
        self.kind.ends_line()
    }

    /// Whether the rendered comment spans several lines
    pub fn is_multiline(&self) -> bool {
        self.doc.measure().forced_break
    }
}

/// Render one comment in `style`, or in its own form when `style` is unset
pub fn render_comment(
    comment: &RawComment,
    source: &str,
    style: Option<CommentStyle>,
) -> Result<RenderedComment> {
    let raw = comment.text(source).ok_or_else(|| {
        FormatError::malformed(format!(
            "comment range {:?} does not address the source",
            comment.range
        ))
    })?;
    let kind = comment.kind;
    if !raw.starts_with(kind.opener()) {
        return Err(FormatError::malformed(format!(
            "comment at {:?} does not start with {:?}",
            comment.range,
            kind.opener()
        )));
    }

    let target = style.map(CommentStyle::kind).unwrap_or(kind);
    if target == kind {
        return Ok(RenderedComment {
            doc: render_verbatim(raw, kind),
            kind,
        });
    }

    let lines = content_lines(body(raw, kind), kind);
    if !can_hold(target, &lines) {
        tracing::trace!(range = ?comment.range, ?target, "Comment kept in its own form");
        return Ok(RenderedComment {
            doc: render_verbatim(raw, kind),
            kind,
        });
    }

    Ok(RenderedComment {
        doc: render_as(target, &lines),
        kind: target,
    })
}

/// Text between the delimiters
fn body(raw: &str, kind: CommentKind) -> &str {
    // `/**/` is an empty block comment, not a doc comment
    if kind == CommentKind::Doc && raw.len() < 5 {
        return "";
    }
    let inner = &raw[kind.opener().len()..];
    match kind.closer() {
        Some(closer) => inner.strip_suffix(closer).unwrap_or(inner),
        None => inner,
    }
}

/// Keep the comment's own form, re-indenting continuation lines
fn render_verbatim(raw: &str, kind: CommentKind) -> Document {
    let lines: Vec<&str> = raw.lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return text(raw.trim_end());
    };
    if rest.is_empty() {
        return text(first.trim_end());
    }

    let star_aligned = kind != CommentKind::Html
        && rest
            .iter()
            .all(|line| line.trim_start().starts_with('*'));

    let mut out = Vec::with_capacity(lines.len());
    out.push(text(first.trim_end()));

    if star_aligned {
        out.extend(rest.iter().map(|line| text(format!(" {}", line.trim()))));
    } else {
        let margin = rest
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
            .min()
            .unwrap_or(0);
        out.extend(rest.iter().map(|line| {
            if line.trim().is_empty() {
                text("")
            } else {
                text(line[margin..].trim_end())
            }
        }));
    }

    join(hard_line(), out)
}

/// Physical lines of the comment body, stripped of decoration
fn content_lines(body: &str, kind: CommentKind) -> Vec<String> {
    let mut lines: Vec<String> = body
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim();
            let starred = matches!(kind, CommentKind::Block | CommentKind::Doc) && i > 0;
            match line.strip_prefix('*') {
                Some(rest) if starred => rest.trim().to_string(),
                _ => line.to_string(),
            }
        })
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let leading_blank = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading_blank);

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn can_hold(target: CommentKind, lines: &[String]) -> bool {
    match target.closer() {
        Some(closer) => !lines.iter().any(|line| line.contains(closer)),
        None => true,
    }
}

fn render_as(target: CommentKind, lines: &[String]) -> Document {
    let spaced = |prefix: &str, line: &str| {
        if line.is_empty() {
            text(prefix)
        } else {
            text(format!("{} {}", prefix, line))
        }
    };

    match (target, lines) {
        (CommentKind::Line, _) => join(
            hard_line(),
            lines.iter().map(|line| spaced("//", line)).collect(),
        ),
        (CommentKind::Block, [single]) => text(format!("/* {} */", single)),
        (CommentKind::Doc, [single]) => text(format!("/** {} */", single)),
        (CommentKind::Html, [single]) => text(format!("<!-- {} -->", single)),
        (CommentKind::Block | CommentKind::Doc, _) => {
            let mut out = vec![text(target.opener())];
            out.extend(lines.iter().map(|line| spaced(" *", line)));
            out.push(text(" */"));
            join(hard_line(), out)
        }
        (CommentKind::Html, _) => {
            let mut out = vec![text("<!--")];
            out.extend(lines.iter().map(text));
            out.push(text("-->"));
            join(hard_line(), out)
        }
    }
}
