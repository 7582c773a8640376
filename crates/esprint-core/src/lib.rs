//! esprint core
//!
//! Comment-preserving layout engine for ECMAScript syntax trees.
//!
//! Rendering runs in four stages over immutable inputs:
//!
//! 1. [`attach_comments`] binds every retained raw comment to an owning node
//! 2. [`translate`] maps the tree to a width-independent [`Document`]
//! 3. [`print_document`] lays the document out for a line width
//! 4. [`format_tree`] ties the stages together and normalises the final newline
//!
//! The tree, comments and source are never mutated, and no state is shared
//! between two render calls.

pub mod config;
pub mod document;
pub mod error;
pub mod printer;
pub mod result;
pub mod syntax;
pub mod translate;
pub mod trivia;

pub use config::{
    CommentFilter, CommentPlacement, CommentStyle, FormatOptions, IndentStyle, PrinterOptions,
};
pub use document::{DocKind, Document, Measure};
pub use error::{ErrorKind, FormatError};
pub use printer::{Printer, print_document};
pub use result::{Result, ResultExt};
pub use syntax::{
    CommentKind, NodeId, NodeKind, RawComment, SyntaxNode, SyntaxTree, TreeBuilder,
};
pub use translate::translate;
pub use trivia::{AttachedComment, CommentMap, Placement, attach_comments, render_comment};

/// Render a syntax tree and its comments as formatted source text
///
/// Options are validated first, then the tree is checked against `source`,
/// so configuration errors win over input errors. The output is empty or
/// ends with exactly one newline.
pub fn format_tree(
    tree: &SyntaxTree,
    comments: &[RawComment],
    source: &str,
    options: &FormatOptions,
) -> Result<String> {
    let printer_options = options.validate()?;
    tree.validate(source)?;

    let comment_map = attach_comments(tree, comments, source, options)?;
    let doc = translate(tree, &comment_map, source, options)?;
    let mut output = print_document(&doc, printer_options);

    let trimmed = output.trim_end_matches(['\n', ' ', '\t']).len();
    output.truncate(trimmed);
    if !output.is_empty() {
        output.push('\n');
    }

    tracing::debug!(
        nodes = tree.len(),
        comments = comment_map.len(),
        bytes = output.len(),
        "Rendered tree"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextRange;

    fn single_identifier(source: &str) -> SyntaxTree {
        let mut builder = TreeBuilder::new();
        let name = builder.node(0, 1, NodeKind::Identifier);
        let statement = builder.node(0, 2, NodeKind::ExpressionStatement { expression: name });
        let program = builder.node(
            0,
            source.len() as u32,
            NodeKind::Program {
                body: vec![statement],
            },
        );
        builder.finish(program)
    }

    #[test]
    fn test_output_ends_with_one_newline() {
        let source = "a;\n\n\n";
        let tree = single_identifier(source);
        let output = format_tree(&tree, &[], source, &FormatOptions::default()).unwrap();
        assert_eq!(output, "a;\n");
    }

    #[test]
    fn test_configuration_checked_before_tree() {
        let source = "a;";
        let mut builder = TreeBuilder::new();
        let program = builder.node(0, 40, NodeKind::Program { body: vec![] });
        let tree = builder.finish(program);
        let options = FormatOptions {
            line_width: 0,
            ..Default::default()
        };

        let err = format_tree(&tree, &[], source, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = format_tree(&tree, &[], source, &FormatOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_comment_only_program() {
        let source = "// only\n";
        let mut builder = TreeBuilder::new();
        let program = builder.node(0, 8, NodeKind::Program { body: vec![] });
        let tree = builder.finish(program);
        let comments = [RawComment::new(
            TextRange::new(0.into(), 7.into()),
            CommentKind::Line,
        )];

        let output = format_tree(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert_eq!(output, "// only\n");
    }

    #[test]
    fn test_filtered_comments_are_dropped() {
        let source = "a; // gone";
        let tree = single_identifier(source);
        let comments = [RawComment::new(
            TextRange::new(3.into(), 10.into()),
            CommentKind::Line,
        )];
        let options = FormatOptions {
            comment_filter: CommentFilter {
                line: false,
                ..CommentFilter::all()
            },
            ..Default::default()
        };

        let output = format_tree(&tree, &comments, source, &options).unwrap();
        assert_eq!(output, "a;\n");
    }
}
