//! Comment attachment
//!
//! Each retained comment is bound to exactly one node of the tree. The
//! attacher descends from the root to the deepest node whose range contains
//! the comment, then looks at the children on either side of it:
//!
//! - a preceding sibling on the same line takes it as a trailing comment
//! - between two siblings on its own line, `commentPlacement` decides
//! - with only one neighbour, that neighbour takes it
//! - with no neighbours it dangles on the nearest container

use std::collections::HashMap;

use text_size::{TextRange, TextSize};

use crate::config::{CommentPlacement, FormatOptions};
use crate::error::FormatError;
use crate::result::Result;
use crate::syntax::{NodeId, NodeKind, RawComment, SyntaxTree};

/// Side of its owner a comment is printed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Leading,
    Trailing,
    /// Inside an owner that has no child to attach to
    Dangling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedComment {
    pub comment: RawComment,
    pub owner: NodeId,
    pub placement: Placement,
    /// No line break between the comment and its owner (or, for dangling
    /// comments, between the container start and the comment)
    pub same_line: bool,
}

#[derive(Debug, Clone, Default)]
struct NodeComments {
    leading: Vec<AttachedComment>,
    trailing: Vec<AttachedComment>,
    dangling: Vec<AttachedComment>,
}

/// Attached comments indexed by owner, each list in source order
#[derive(Debug, Clone, Default)]
pub struct CommentMap {
    by_owner: HashMap<NodeId, NodeComments>,
    len: usize,
}

impl CommentMap {
    pub fn leading(&self, id: NodeId) -> &[AttachedComment] {
        self.by_owner
            .get(&id)
            .map(|c| c.leading.as_slice())
            .unwrap_or_default()
    }

    pub fn trailing(&self, id: NodeId) -> &[AttachedComment] {
        self.by_owner
            .get(&id)
            .map(|c| c.trailing.as_slice())
            .unwrap_or_default()
    }

    pub fn dangling(&self, id: NodeId) -> &[AttachedComment] {
        self.by_owner
            .get(&id)
            .map(|c| c.dangling.as_slice())
            .unwrap_or_default()
    }

    pub fn has_comments(&self, id: NodeId) -> bool {
        self.by_owner.contains_key(&id)
    }

    /// Number of attached comments
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All attached comments, grouped by owner
    pub fn iter(&self) -> impl Iterator<Item = &AttachedComment> {
        self.by_owner
            .values()
            .flat_map(|c| c.leading.iter().chain(&c.trailing).chain(&c.dangling))
    }

    fn insert(&mut self, attached: AttachedComment) {
        let entry = self.by_owner.entry(attached.owner).or_default();
        match attached.placement {
            Placement::Leading => entry.leading.push(attached),
            Placement::Trailing => entry.trailing.push(attached),
            Placement::Dangling => entry.dangling.push(attached),
        }
        self.len += 1;
    }
}

/// Bind every comment retained by `options.comment_filter` to a node
///
/// `tree` must already have passed [`SyntaxTree::validate`] against `source`.
pub fn attach_comments(
    tree: &SyntaxTree,
    comments: &[RawComment],
    source: &str,
    options: &FormatOptions,
) -> Result<CommentMap> {
    let mut retained: Vec<RawComment> = comments
        .iter()
        .copied()
        .filter(|comment| options.comment_filter.retains(comment.kind))
        .collect();
    retained.sort_by_key(|comment| comment.range.start());

    let dropped = comments.len() - retained.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Comments removed by filter");
    }

    let attacher = Attacher {
        tree,
        source,
        placement: options.comment_placement,
    };
    let mut map = CommentMap::default();
    let mut previous_end = TextSize::from(0);

    for comment in retained {
        attacher.check_range(comment.range)?;
        if comment.range.start() < previous_end {
            return Err(FormatError::malformed(format!(
                "comment at {:?} overlaps the previous comment",
                comment.range
            )));
        }
        previous_end = comment.range.end();

        let attached = attacher.attach(comment)?;
        tracing::trace!(
            range = ?comment.range,
            owner = %attached.owner,
            placement = ?attached.placement,
            same_line = attached.same_line,
            "Attached comment"
        );
        map.insert(attached);
    }

    tracing::debug!(comments = map.len(), "Comment attachment complete");
    Ok(map)
}

struct Attacher<'a> {
    tree: &'a SyntaxTree,
    source: &'a str,
    placement: CommentPlacement,
}

/// Where a comment sits relative to the deepest node containing it
struct Enclosing {
    /// Root first, deepest enclosing node last
    path: Vec<NodeId>,
    preceding: Option<NodeId>,
    following: Option<NodeId>,
}

impl Attacher<'_> {
    fn check_range(&self, range: TextRange) -> Result<()> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if range.is_empty()
            || end > self.source.len()
            || !self.source.is_char_boundary(start)
            || !self.source.is_char_boundary(end)
        {
            return Err(FormatError::malformed(format!(
                "comment range {:?} does not address the {}-byte source",
                range,
                self.source.len()
            )));
        }
        if !self.tree.range(self.tree.root()).contains_range(range) {
            return Err(FormatError::malformed(format!(
                "comment at {:?} lies outside the root node",
                range
            )));
        }
        Ok(())
    }

    fn attach(&self, comment: RawComment) -> Result<AttachedComment> {
        let Enclosing {
            path,
            preceding,
            following,
        } = self.enclose(comment.range)?;
        let range = comment.range;
        let enclosing = path.last().copied().unwrap_or_else(|| self.tree.root());

        let attached = |owner, placement, same_line| AttachedComment {
            comment,
            owner,
            placement,
            same_line,
        };

        // `f(/* c */)`: the comment sits in the argument parentheses
        if let NodeKind::Call { callee, arguments } | NodeKind::New { callee, arguments } =
            self.tree.kind(enclosing)
            && arguments.is_empty()
            && preceding == Some(*callee)
        {
            let same_line = !self.has_newline(self.tree.range(*callee).end(), range.start());
            return Ok(attached(enclosing, Placement::Dangling, same_line));
        }

        // `function f(/* c */) {}` and `(/* c */) => x`
        if let Some((before, body)) = self.empty_parameters(enclosing)
            && preceding == before
            && following == Some(body)
        {
            let from = before.map_or(self.tree.range(enclosing).start(), |b| {
                self.tree.range(b).end()
            });
            let inside = self.slice(from, range.start()).contains('(')
                && self.slice(range.end(), self.tree.range(body).start()).contains(')');
            if inside {
                let same_line = !self.has_newline(from, range.start());
                return Ok(attached(enclosing, Placement::Dangling, same_line));
            }
        }

        let after_preceding =
            preceding.map(|p| !self.has_newline(self.tree.range(p).end(), range.start()));
        let before_following =
            following.map(|f| !self.has_newline(range.end(), self.tree.range(f).start()));

        let result = match (preceding, following) {
            (Some(p), _) if after_preceding == Some(true) => {
                attached(p, Placement::Trailing, true)
            }
            (Some(p), Some(f)) => match self.placement {
                CommentPlacement::Before => {
                    attached(f, Placement::Leading, before_following == Some(true))
                }
                CommentPlacement::After => attached(p, Placement::Trailing, false),
            },
            (None, Some(f)) => attached(f, Placement::Leading, before_following == Some(true)),
            (Some(p), None) => attached(p, Placement::Trailing, false),
            (None, None) => {
                let container = path
                    .iter()
                    .rev()
                    .copied()
                    .find(|&id| self.tree.kind(id).is_comment_container())
                    .unwrap_or_else(|| self.tree.root());
                let same_line =
                    !self.has_newline(self.tree.range(container).start(), range.start());
                attached(container, Placement::Dangling, same_line)
            }
        };
        Ok(result)
    }

    /// For a function-like node without parameters, the child in front of `(` and the body
    fn empty_parameters(&self, id: NodeId) -> Option<(Option<NodeId>, NodeId)> {
        match self.tree.kind(id) {
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function)
                if function.params.is_empty() =>
            {
                Some((function.id, function.body))
            }
            NodeKind::MethodDefinition {
                key, params, body, ..
            } if params.is_empty() => Some((Some(*key), *body)),
            NodeKind::ArrowFunction { params, body, .. } if params.is_empty() => {
                Some((None, *body))
            }
            _ => None,
        }
    }

    /// Descend to the deepest node containing `range`
    fn enclose(&self, range: TextRange) -> Result<Enclosing> {
        let mut path = vec![self.tree.root()];
        let mut current = self.tree.root();

        loop {
            let node = self.tree.node(current);
            if node.kind.is_token() {
                return Err(FormatError::malformed(format!(
                    "comment at {:?} lies inside {} {}",
                    range,
                    node.kind.name(),
                    current
                )));
            }

            let children = node.children();
            let index =
                children.partition_point(|&child| self.tree.range(child).end() <= range.start());
            let preceding = index.checked_sub(1).map(|i| children[i]);

            let Some(&candidate) = children.get(index) else {
                return Ok(Enclosing {
                    path,
                    preceding,
                    following: None,
                });
            };

            let candidate_range = self.tree.range(candidate);
            if range.end() <= candidate_range.start() {
                return Ok(Enclosing {
                    path,
                    preceding,
                    following: Some(candidate),
                });
            }
            if !candidate_range.contains_range(range) {
                return Err(FormatError::malformed(format!(
                    "comment at {:?} straddles the boundary of {}",
                    range, candidate
                )));
            }

            path.push(candidate);
            current = candidate;
        }
    }

    fn has_newline(&self, from: TextSize, to: TextSize) -> bool {
        if from >= to {
            return false;
        }
        self.source
            .get(usize::from(from)..usize::from(to))
            .is_some_and(|gap| gap.contains('\n'))
    }

    fn slice(&self, from: TextSize, to: TextSize) -> &str {
        self.source
            .get(usize::from(from)..usize::from(to))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommentFilter;
    use crate::error::ErrorKind;
    use crate::syntax::{CommentKind, Function, LiteralKind, TreeBuilder, VariableKind};

    fn comment(source: &str, text: &str, kind: CommentKind) -> RawComment {
        let start = source.find(text).unwrap() as u32;
        let end = start + text.len() as u32;
        RawComment::new(TextRange::new(start.into(), end.into()), kind)
    }

    /// `const x = 10;` statements, one per given range
    fn declarations(source: &str, ranges: &[(u32, u32)]) -> (SyntaxTree, Vec<NodeId>) {
        let mut builder = TreeBuilder::new();
        let mut statements = Vec::new();
        for &(start, end) in ranges {
            let id = builder.node(start + 6, start + 7, NodeKind::Identifier);
            let init = builder.node(
                start + 10,
                start + 12,
                NodeKind::Literal {
                    kind: LiteralKind::Number,
                },
            );
            let declarator = builder.node(
                start + 6,
                start + 12,
                NodeKind::VariableDeclarator {
                    id,
                    init: Some(init),
                },
            );
            statements.push(builder.node(
                start,
                end,
                NodeKind::VariableDeclaration {
                    kind: VariableKind::Const,
                    declarators: vec![declarator],
                },
            ));
        }
        let program = builder.node(
            0,
            source.len() as u32,
            NodeKind::Program {
                body: statements.clone(),
            },
        );
        (builder.finish(program), statements)
    }

    #[test]
    fn test_same_line_comment_trails_statement() {
        let source = "const x = 10; // keep";
        let (tree, statements) = declarations(source, &[(0, 13)]);
        let comments = [comment(source, "// keep", CommentKind::Line)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        let trailing = map.trailing(statements[0]);
        assert_eq!(trailing.len(), 1);
        assert!(trailing[0].same_line);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_own_line_comment_between_statements() {
        let source = "const a = 10;\n// between\nconst b = 20;";
        let (tree, statements) = declarations(source, &[(0, 13), (25, 38)]);
        let comments = [comment(source, "// between", CommentKind::Line)];

        let before = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert_eq!(before.leading(statements[1]).len(), 1);
        assert!(!before.leading(statements[1])[0].same_line);
        assert!(before.trailing(statements[0]).is_empty());

        let options = FormatOptions {
            comment_placement: CommentPlacement::After,
            ..Default::default()
        };
        let after = attach_comments(&tree, &comments, source, &options).unwrap();
        assert_eq!(after.trailing(statements[0]).len(), 1);
        assert!(!after.trailing(statements[0])[0].same_line);
    }

    #[test]
    fn test_comment_before_first_statement_leads() {
        let source = "/* head */ const x = 10;";
        let (tree, statements) = declarations(source, &[(11, 24)]);
        let comments = [comment(source, "/* head */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        let leading = map.leading(statements[0]);
        assert_eq!(leading.len(), 1);
        assert!(leading[0].same_line);
    }

    #[test]
    fn test_comment_in_empty_block_dangles() {
        let source = "{ /* todo */ }";
        let mut builder = TreeBuilder::new();
        let block = builder.node(0, 14, NodeKind::BlockStatement { body: vec![] });
        let program = builder.node(0, 14, NodeKind::Program { body: vec![block] });
        let tree = builder.finish(program);
        let comments = [comment(source, "/* todo */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        let dangling = map.dangling(block);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].placement, Placement::Dangling);
    }

    #[test]
    fn test_comment_in_empty_program_dangles_on_root() {
        let source = "// only";
        let mut builder = TreeBuilder::new();
        let program = builder.node(0, 7, NodeKind::Program { body: vec![] });
        let tree = builder.finish(program);
        let comments = [comment(source, "// only", CommentKind::Line)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert_eq!(map.dangling(program).len(), 1);
    }

    #[test]
    fn test_comment_in_empty_arguments_dangles_on_call() {
        let source = "f(/* none */);";
        let mut builder = TreeBuilder::new();
        let callee = builder.node(0, 1, NodeKind::Identifier);
        let call = builder.node(
            0,
            13,
            NodeKind::Call {
                callee,
                arguments: vec![],
            },
        );
        let statement = builder.node(0, 14, NodeKind::ExpressionStatement { expression: call });
        let program = builder.node(
            0,
            14,
            NodeKind::Program {
                body: vec![statement],
            },
        );
        let tree = builder.finish(program);
        let comments = [comment(source, "/* none */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert_eq!(map.dangling(call).len(), 1);
        assert!(map.trailing(callee).is_empty());
    }

    /// `function f<gap>{}` with no parameters
    fn function_declaration(source: &str) -> (SyntaxTree, NodeId, NodeId) {
        let end = source.len() as u32;
        let mut builder = TreeBuilder::new();
        let name = builder.node(9, 10, NodeKind::Identifier);
        let body = builder.node(end - 2, end, NodeKind::BlockStatement { body: vec![] });
        let function = builder.node(
            0,
            end,
            NodeKind::FunctionDeclaration(Function {
                id: Some(name),
                params: vec![],
                body,
                is_async: false,
                is_generator: false,
            }),
        );
        let program = builder.node(
            0,
            end,
            NodeKind::Program {
                body: vec![function],
            },
        );
        (builder.finish(program), function, name)
    }

    #[test]
    fn test_comment_in_empty_parameters_dangles_on_function() {
        let source = "function f(/* none */) {}";
        let (tree, function, name) = function_declaration(source);
        let comments = [comment(source, "/* none */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        let dangling = map.dangling(function);
        assert_eq!(dangling.len(), 1);
        assert!(dangling[0].same_line);
        assert!(map.trailing(name).is_empty());
    }

    #[test]
    fn test_comment_after_parameters_stays_outside() {
        let source = "function f() /* c */ {}";
        let (tree, function, name) = function_declaration(source);
        let comments = [comment(source, "/* c */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert!(map.dangling(function).is_empty());
        assert_eq!(map.trailing(name).len(), 1);
    }

    #[test]
    fn test_comment_in_empty_arrow_parameters_dangles_on_arrow() {
        let source = "(/* none */) => 1;";
        let mut builder = TreeBuilder::new();
        let body = builder.node(
            16,
            17,
            NodeKind::Literal {
                kind: LiteralKind::Number,
            },
        );
        let arrow = builder.node(
            0,
            17,
            NodeKind::ArrowFunction {
                params: vec![],
                body,
                is_async: false,
            },
        );
        let statement = builder.node(0, 18, NodeKind::ExpressionStatement { expression: arrow });
        let program = builder.node(
            0,
            18,
            NodeKind::Program {
                body: vec![statement],
            },
        );
        let tree = builder.finish(program);
        let comments = [comment(source, "/* none */", CommentKind::Block)];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        assert_eq!(map.dangling(arrow).len(), 1);
        assert!(map.leading(body).is_empty());
    }

    #[test]
    fn test_filter_drops_comments_before_attachment() {
        let source = "const x = 10; // keep";
        let (tree, _) = declarations(source, &[(0, 13)]);
        let comments = [comment(source, "// keep", CommentKind::Line)];
        let options = FormatOptions {
            comment_filter: CommentFilter {
                line: false,
                ..CommentFilter::all()
            },
            ..Default::default()
        };

        let map = attach_comments(&tree, &comments, source, &options).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_comment_outside_root_is_malformed() {
        let source = "{} // keep";
        // Root only spans the braces
        let mut builder = TreeBuilder::new();
        let block = builder.node(0, 2, NodeKind::BlockStatement { body: vec![] });
        let tree = builder.finish(block);

        let comments = [comment(source, "// keep", CommentKind::Line)];
        let err = attach_comments(&tree, &comments, source, &FormatOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_comment_beyond_source_is_malformed() {
        let source = "const x = 10;";
        let (tree, _) = declarations(source, &[(0, 13)]);
        let comments = [RawComment::new(
            TextRange::new(10.into(), 40.into()),
            CommentKind::Block,
        )];
        assert!(attach_comments(&tree, &comments, source, &FormatOptions::default()).is_err());
    }

    #[test]
    fn test_comment_straddling_node_is_malformed() {
        let source = "const x = 10;";
        let (tree, _) = declarations(source, &[(0, 13)]);
        // Overlaps the literal `10`
        let comments = [RawComment::new(
            TextRange::new(8.into(), 11.into()),
            CommentKind::Block,
        )];
        let err = attach_comments(&tree, &comments, source, &FormatOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_unsorted_input_is_attached_in_source_order() {
        let source = "/* a */ /* b */ const x = 10;";
        let (tree, statements) = declarations(source, &[(16, 29)]);
        let comments = [
            comment(source, "/* b */", CommentKind::Block),
            comment(source, "/* a */", CommentKind::Block),
        ];

        let map = attach_comments(&tree, &comments, source, &FormatOptions::default()).unwrap();
        let leading = map.leading(statements[0]);
        assert_eq!(leading.len(), 2);
        assert!(leading[0].comment.range.start() < leading[1].comment.range.start());
    }
}
