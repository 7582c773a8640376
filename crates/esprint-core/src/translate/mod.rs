//! Node-to-document translation
//!
//! One exhaustive match over [`NodeKind`] maps every production to document
//! primitives. Attached comments are spliced around each node as it is
//! printed, and parentheses are re-derived from the slot a node is printed in.
//!
//! The translator never looks at columns; every width decision is left to the
//! printer.

mod expressions;
mod parens;
mod statements;

use std::collections::HashSet;

use text_size::TextSize;

use crate::config::FormatOptions;
use crate::document::{Document, concat, hard_line, line_suffix, text, token};
use crate::error::FormatError;
use crate::result::Result;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use crate::trivia::{AttachedComment, CommentMap, RenderedComment, render_comment};

pub(crate) use parens::Slot;

/// Translate a validated tree with its attached comments into a document
pub fn translate(
    tree: &SyntaxTree,
    comments: &CommentMap,
    source: &str,
    options: &FormatOptions,
) -> Result<Document> {
    let mut translator = Translator {
        tree,
        comments,
        source,
        options,
        printed_comments: 0,
        parenthesize: HashSet::new(),
    };
    let doc = translator.print(tree.root(), Slot::Statement)?;

    if translator.printed_comments != comments.len() {
        return Err(FormatError::malformed(format!(
            "{} comments attached but {} printed",
            comments.len(),
            translator.printed_comments
        )));
    }

    tracing::debug!(nodes = doc.node_count(), "Document built");
    Ok(doc)
}

pub(crate) struct Translator<'a> {
    tree: &'a SyntaxTree,
    comments: &'a CommentMap,
    source: &'a str,
    options: &'a FormatOptions,
    printed_comments: usize,
    /// Nodes that start a statement or arrow body and would be misread without parentheses
    parenthesize: HashSet<NodeId>,
}

impl<'a> Translator<'a> {
    /// Print a node with its parentheses and attached comments
    fn print(&mut self, id: NodeId, slot: Slot) -> Result<Document> {
        let doc = self.print_node(id, slot)?;
        let forced = self.parenthesize.remove(&id);
        let doc = if forced || parens::needs_parens(self.tree, id, slot) {
            concat(vec![token("("), doc, token(")")])
        } else {
            doc
        };
        self.print_comments(id, doc)
    }

    fn print_node(&mut self, id: NodeId, slot: Slot) -> Result<Document> {
        let tree = self.tree;
        let node = tree.node(id);

        match &node.kind {
            NodeKind::Program { body } => self.print_program(id, body),
            NodeKind::VariableDeclaration { kind, declarators } => {
                self.print_variable_declaration(*kind, declarators)
            }
            NodeKind::VariableDeclarator { id: name, init } => {
                let name = self.print(*name, Slot::AssignmentLeft)?;
                match init {
                    Some(init) => self.print_assignment(name, token(" ="), *init),
                    None => Ok(name),
                }
            }
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => {
                self.print_function(id, function)
            }
            NodeKind::ClassDeclaration {
                id: name,
                super_class,
                body,
            } => self.print_class(*name, *super_class, *body),
            NodeKind::ClassBody { members } => self.print_class_body(id, members),
            NodeKind::MethodDefinition {
                key,
                kind,
                is_static,
                computed,
                is_async,
                is_generator,
                params,
                body,
            } => self.print_method(
                id,
                statements::MethodParts {
                    key: *key,
                    kind: *kind,
                    is_static: *is_static,
                    computed: *computed,
                    is_async: *is_async,
                    is_generator: *is_generator,
                },
                params,
                *body,
            ),
            NodeKind::ExpressionStatement { expression } => {
                self.print_expression_statement(*expression)
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => self.print_if(*test, *consequent, *alternate),
            NodeKind::BlockStatement { body } => self.print_block(id, body),
            NodeKind::ReturnStatement { argument } => self.print_return(id, *argument),
            NodeKind::EmptyStatement => Ok(token(";")),
            NodeKind::Identifier => Ok(text(tree.text(id, self.source))),
            NodeKind::Literal { .. } => {
                let raw = tree.text(id, self.source);
                if raw.contains(['\n', '\r']) {
                    return Err(FormatError::unsupported("MultilineLiteral", node.range));
                }
                Ok(text(raw))
            }
            NodeKind::This => Ok(token("this")),
            NodeKind::Binary { .. } => self.print_binary(id, slot),
            NodeKind::Assignment {
                operator,
                left,
                right,
            } => {
                let left = self.print(*left, Slot::AssignmentLeft)?;
                let operator = concat(vec![token(" "), token(operator.as_str())]);
                self.print_assignment(left, operator, *right)
            }
            NodeKind::Unary { operator, argument } => {
                let argument = self.print(*argument, Slot::UnaryArgument(*operator))?;
                let separator = if operator.is_keyword() {
                    token(" ")
                } else {
                    crate::document::nil()
                };
                Ok(concat(vec![token(operator.as_str()), separator, argument]))
            }
            NodeKind::Call { callee, arguments } => {
                let callee = self.print(*callee, Slot::Callee)?;
                let arguments = self.print_arguments(id, arguments)?;
                Ok(concat(vec![callee, arguments]))
            }
            NodeKind::New { callee, arguments } => {
                let callee = self.print(*callee, Slot::NewCallee)?;
                let arguments = self.print_arguments(id, arguments)?;
                Ok(concat(vec![token("new "), callee, arguments]))
            }
            NodeKind::Member {
                object,
                property,
                computed,
            } => self.print_member(*object, *property, *computed),
            NodeKind::Array { elements } => self.print_array(id, elements),
            NodeKind::Object { properties } => self.print_object(id, properties),
            NodeKind::Property {
                key,
                value,
                computed,
            } => self.print_property(*key, *value, *computed),
            NodeKind::ArrowFunction {
                params,
                body,
                is_async,
            } => self.print_arrow(id, params, *body, *is_async),
            NodeKind::Spread { argument } => {
                let argument = self.print(*argument, Slot::Spread)?;
                Ok(concat(vec![token("..."), argument]))
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => self.print_conditional(*test, *consequent, *alternate),
            NodeKind::Unsupported { production, .. } => {
                Err(FormatError::unsupported(production.clone(), node.range))
            }
        }
    }

    /// Splice leading and trailing comments around an already printed node
    fn print_comments(&mut self, id: NodeId, doc: Document) -> Result<Document> {
        let comments = self.comments;
        let leading = comments.leading(id);
        let trailing = comments.trailing(id);
        if leading.is_empty() && trailing.is_empty() {
            return Ok(doc);
        }

        let node_start = self.tree.range(id).start();
        let mut parts = Vec::with_capacity(leading.len() * 2 + trailing.len() + 1);

        for (i, attached) in leading.iter().enumerate() {
            let rendered = self.render(attached)?;
            let next_start = leading
                .get(i + 1)
                .map_or(node_start, |next| next.comment.range.start());
            let inline = attached.same_line && !rendered.ends_line() && !rendered.is_multiline();

            parts.push(rendered.doc);
            if inline {
                parts.push(token(" "));
            } else {
                parts.push(hard_line());
                let blank = self.blank_lines(attached.comment.range.end(), next_start);
                parts.extend((0..blank).map(|_| hard_line()));
            }
        }

        parts.push(doc);

        for attached in trailing {
            let rendered = self.render(attached)?;
            let piece = if !attached.same_line {
                line_suffix(concat(vec![hard_line(), rendered.doc]))
            } else if rendered.ends_line() {
                line_suffix(concat(vec![token(" "), rendered.doc]))
            } else {
                concat(vec![token(" "), rendered.doc])
            };
            parts.push(piece);
        }

        Ok(concat(parts))
    }

    fn render(&mut self, attached: &AttachedComment) -> Result<RenderedComment> {
        self.printed_comments += 1;
        render_comment(&attached.comment, self.source, self.options.comment_style)
    }

    /// Dangling comments, one per line
    fn print_dangling_lines(&mut self, id: NodeId) -> Result<Document> {
        let comments = self.comments;
        let dangling = comments.dangling(id);
        let mut parts = Vec::with_capacity(dangling.len() * 2);
        for (i, attached) in dangling.iter().enumerate() {
            if let Some(previous) = i.checked_sub(1).map(|p| &dangling[p]) {
                parts.push(hard_line());
                let blank =
                    self.blank_lines(previous.comment.range.end(), attached.comment.range.start());
                parts.extend((0..blank).map(|_| hard_line()));
            }
            let rendered = self.render(attached)?;
            parts.push(rendered.doc);
        }
        Ok(concat(parts))
    }

    /// Blank lines to keep between two source offsets
    fn blank_lines(&self, from: TextSize, to: TextSize) -> usize {
        let limit = self.options.blank_line_limit();
        if limit == 0 || from >= to {
            return 0;
        }
        let gap = self
            .source
            .get(usize::from(from)..usize::from(to))
            .unwrap_or_default();
        gap.matches('\n').count().saturating_sub(1).min(limit)
    }

    fn has_newline(&self, from: TextSize, to: TextSize) -> bool {
        from < to
            && self
                .source
                .get(usize::from(from)..usize::from(to))
                .is_some_and(|gap| gap.contains('\n'))
    }

    /// Start of a node including its leading comments
    fn leading_edge(&self, id: NodeId) -> TextSize {
        let start = self.tree.range(id).start();
        self.comments
            .leading(id)
            .first()
            .map_or(start, |c| c.comment.range.start().min(start))
    }

    /// End of a node including its trailing comments
    fn trailing_edge(&self, id: NodeId) -> TextSize {
        let end = self.tree.range(id).end();
        self.comments
            .trailing(id)
            .last()
            .map_or(end, |c| c.comment.range.end().max(end))
    }

    /// Whether a node carries comments that force a line break before it
    fn has_leading_own_line_comment(&self, id: NodeId) -> bool {
        self.comments
            .leading(id)
            .iter()
            .any(|c| !c.same_line || c.comment.kind.ends_line())
    }
}
