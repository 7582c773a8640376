//! Expressions

use super::{Slot, Translator, parens};
use crate::document::{
    Document, concat, conditional_group, expanded_group, fill, group, hard_line, indent, join,
    line, nil, soft_line, token,
};
use crate::result::Result;
use crate::syntax::{BinaryOperator, LiteralKind, NodeId, NodeKind, SyntaxTree};

impl Translator<'_> {
    /// Binary chains: operators end lines, continuation lines indented one level
    pub(super) fn print_binary(&mut self, id: NodeId, slot: Slot) -> Result<Document> {
        let tree = self.tree;
        let NodeKind::Binary {
            operator,
            left,
            right,
        } = tree.kind(id)
        else {
            return Ok(nil());
        };

        let mut parts = Vec::new();
        self.binary_parts(*operator, *left, *right, &mut parts)?;

        // The surrounding `if (` group decides the breaks
        if slot == Slot::Test {
            return Ok(concat(parts));
        }

        // (
        //   a &&
        //   b
        // ).call()
        if matches!(
            slot,
            Slot::Callee | Slot::NewCallee | Slot::MemberObject | Slot::UnaryArgument(_)
        ) {
            return Ok(group(concat(vec![
                indent(concat(vec![soft_line(), concat(parts)])),
                soft_line(),
            ])));
        }

        if matches!(slot, Slot::AssignmentRight | Slot::ArrowBody)
            || should_inline_logical(tree, *operator, *right)
        {
            return Ok(group(concat(parts)));
        }

        let mut parts = parts.into_iter();
        let head = parts.next().unwrap_or_else(nil);
        Ok(group(concat(vec![head, indent(concat(parts.collect()))])))
    }

    /// Flatten same-precedence left operands into one list of parts
    fn binary_parts(
        &mut self,
        operator: BinaryOperator,
        left: NodeId,
        right: NodeId,
        parts: &mut Vec<Document>,
    ) -> Result<()> {
        let tree = self.tree;
        match tree.kind(left) {
            NodeKind::Binary {
                operator: left_operator,
                left: inner_left,
                right: inner_right,
            } if parens::should_flatten(operator, *left_operator)
                && !self.comments.has_comments(left) =>
            {
                self.binary_parts(*left_operator, *inner_left, *inner_right, parts)?;
            }
            _ => parts.push(group(self.print(left, Slot::BinaryLeft(operator))?)),
        }

        let inline = should_inline_logical(tree, operator, right);
        let right = self.print(right, Slot::BinaryRight(operator))?;
        let operator = token(operator.as_str());
        parts.push(if inline {
            concat(vec![token(" "), operator, token(" "), right])
        } else {
            concat(vec![token(" "), operator, line(), right])
        });
        Ok(())
    }

    /// `left = right`, `key: value`
    ///
    /// Right-hand sides that cannot break well on their own (chains, strings,
    /// member chains) move to the next line instead.
    pub(super) fn print_assignment(
        &mut self,
        left: Document,
        operator: Document,
        right: NodeId,
    ) -> Result<Document> {
        let break_after_operator = self.should_break_after_operator(right);
        let right = self.print(right, Slot::AssignmentRight)?;

        if break_after_operator {
            Ok(group(concat(vec![
                group(left),
                operator,
                group(indent(concat(vec![line(), right]))),
            ])))
        } else {
            Ok(group(concat(vec![group(left), operator, token(" "), right])))
        }
    }

    fn should_break_after_operator(&self, right: NodeId) -> bool {
        if self.has_leading_own_line_comment(right) {
            return true;
        }
        let tree = self.tree;
        match tree.kind(right) {
            NodeKind::Binary {
                operator,
                right: operand,
                ..
            } => !should_inline_logical(tree, *operator, *operand),
            NodeKind::Conditional { test, .. } => matches!(
                tree.kind(*test),
                NodeKind::Binary { operator, right: operand, .. }
                    if !should_inline_logical(tree, *operator, *operand)
            ),
            NodeKind::Literal {
                kind: LiteralKind::String,
            } => true,
            NodeKind::Member { .. } => is_member_chain(tree, right),
            _ => false,
        }
    }

    /// Call and `new` arguments
    pub(super) fn print_arguments(&mut self, id: NodeId, arguments: &[NodeId]) -> Result<Document> {
        if arguments.is_empty() {
            if self.comments.dangling(id).is_empty() {
                return Ok(token("()"));
            }
            return self.print_dangling_in(id, "(", ")", true);
        }

        let hug = self.should_hug_last_argument(arguments);
        let docs = self.print_items(arguments)?;

        let Some((last, leading)) = docs.split_last() else {
            return Ok(token("()"));
        };
        if !hug || leading.iter().any(|doc| doc.measure().forced_break) {
            return Ok(list_layout("(", docs, ")"));
        }

        // foo(a, () => {
        //   ...
        // })
        let hugged = |last: Document| {
            let mut parts = leading.to_vec();
            parts.push(last);
            concat(vec![token("("), join(token(", "), parts), token(")")])
        };
        let flat = hugged(last.clone());
        let expanded = hugged(expanded_group(last.clone()));
        Ok(conditional_group(vec![flat, expanded, list_layout("(", docs, ")")]))
    }

    fn should_hug_last_argument(&self, arguments: &[NodeId]) -> bool {
        let tree = self.tree;
        let Some((&last, rest)) = arguments.split_last() else {
            return false;
        };
        if arguments.iter().any(|&argument| self.comments.has_comments(argument)) {
            return false;
        }
        let huggable = match tree.kind(last) {
            NodeKind::Object { properties } => !properties.is_empty(),
            NodeKind::FunctionExpression(_) => true,
            NodeKind::ArrowFunction { body, .. } => matches!(
                tree.kind(*body),
                NodeKind::BlockStatement { .. } | NodeKind::Object { .. }
            ),
            _ => false,
        };
        huggable
            && rest.iter().all(|&argument| {
                !matches!(
                    tree.kind(argument),
                    NodeKind::Object { .. }
                        | NodeKind::Array { .. }
                        | NodeKind::FunctionExpression(_)
                        | NodeKind::ArrowFunction { .. }
                )
            })
    }

    /// Bracketed comma list whose items wrap one by one
    pub(super) fn print_list(
        &mut self,
        open: &'static str,
        items: &[NodeId],
        close: &'static str,
    ) -> Result<Document> {
        if items.is_empty() {
            return Ok(concat(vec![token(open), token(close)]));
        }
        let docs = self.print_items(items)?;
        Ok(list_layout(open, docs, close))
    }

    fn print_items(&mut self, items: &[NodeId]) -> Result<Vec<Document>> {
        items
            .iter()
            .map(|&item| self.print(item, Slot::ListItem))
            .collect()
    }

    pub(super) fn print_member(
        &mut self,
        object: NodeId,
        property: NodeId,
        computed: bool,
    ) -> Result<Document> {
        let object = self.print(object, Slot::MemberObject)?;
        let property = self.print(property, Slot::Expression)?;
        if computed {
            Ok(concat(vec![object, token("["), property, token("]")]))
        } else {
            Ok(concat(vec![object, token("."), property]))
        }
    }

    pub(super) fn print_array(&mut self, id: NodeId, elements: &[NodeId]) -> Result<Document> {
        if elements.is_empty() {
            if self.comments.dangling(id).is_empty() {
                return Ok(token("[]"));
            }
            return self.print_dangling_in(id, "[", "]", true);
        }
        self.print_list("[", elements, "]")
    }

    /// Objects break all at once, and stay expanded if the source had a
    /// newline between `{` and the first property
    pub(super) fn print_object(&mut self, id: NodeId, properties: &[NodeId]) -> Result<Document> {
        let Some(&first) = properties.first() else {
            if self.comments.dangling(id).is_empty() {
                return Ok(token("{}"));
            }
            return self.print_dangling_in(id, "{", "}", false);
        };

        let expanded = self.has_newline(self.tree.range(id).start(), self.leading_edge(first));
        let docs = properties
            .iter()
            .map(|&property| self.print(property, Slot::Expression))
            .collect::<Result<Vec<_>>>()?;

        let separator = if expanded { hard_line() } else { line() };
        Ok(group(concat(vec![
            token("{"),
            indent(concat(vec![
                separator.clone(),
                join(concat(vec![token(","), line()]), docs),
            ])),
            separator,
            token("}"),
        ])))
    }

    pub(super) fn print_property(
        &mut self,
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
    ) -> Result<Document> {
        let key = self.print_key(key, computed)?;
        match value {
            Some(value) => self.print_assignment(key, token(":"), value),
            None => Ok(key),
        }
    }

    pub(super) fn print_arrow(
        &mut self,
        id: NodeId,
        params: &[NodeId],
        body: NodeId,
        is_async: bool,
    ) -> Result<Document> {
        let tree = self.tree;
        let mut parts = Vec::new();
        if is_async {
            parts.push(token("async "));
        }
        parts.push(self.print_parameters(id, params)?);
        parts.push(token(" =>"));

        // `=> {` would open a block
        let first = parens::leftmost(tree, body);
        if matches!(tree.kind(first), NodeKind::Object { .. }) {
            self.parenthesize.insert(first);
        }

        let body_doc = self.print(body, Slot::ArrowBody)?;
        match tree.kind(body) {
            NodeKind::BlockStatement { .. }
            | NodeKind::Object { .. }
            | NodeKind::Array { .. }
            | NodeKind::ArrowFunction { .. } => {
                parts.push(token(" "));
                parts.push(body_doc);
            }
            _ => parts.push(group(indent(concat(vec![line(), body_doc])))),
        }
        Ok(group(concat(parts)))
    }

    pub(super) fn print_conditional(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    ) -> Result<Document> {
        let test = self.print(test, Slot::ConditionalTest)?;
        let consequent = self.print(consequent, Slot::ConditionalBranch)?;
        let alternate = self.print(alternate, Slot::ConditionalBranch)?;
        Ok(group(concat(vec![
            test,
            indent(concat(vec![
                line(),
                token("? "),
                consequent,
                line(),
                token(": "),
                alternate,
            ])),
        ])))
    }
}

fn list_layout(open: &'static str, docs: Vec<Document>, close: &'static str) -> Document {
    let count = docs.len();
    let items = docs
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            if i + 1 < count {
                concat(vec![doc, token(",")])
            } else {
                doc
            }
        })
        .collect();
    group(concat(vec![
        token(open),
        indent(concat(vec![soft_line(), fill(items)])),
        soft_line(),
        token(close),
    ]))
}

/// `a && { ... }` keeps the object on the operator's line
fn should_inline_logical(tree: &SyntaxTree, operator: BinaryOperator, right: NodeId) -> bool {
    operator.is_logical()
        && match tree.kind(right) {
            NodeKind::Object { properties } => !properties.is_empty(),
            NodeKind::Array { elements } => !elements.is_empty(),
            _ => false,
        }
}

/// `a.b.c` down to an identifier
fn is_member_chain(tree: &SyntaxTree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::Member { object, .. } => match tree.kind(*object) {
            NodeKind::Identifier => true,
            _ => is_member_chain(tree, *object),
        },
        _ => false,
    }
}
