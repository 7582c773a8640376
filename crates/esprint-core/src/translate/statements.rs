//! Statements, declarations and bodies

use super::{Slot, Translator, parens};
use crate::document::{
    Document, concat, group, hard_line, indent, join, line, line_suffix, soft_line, token,
};
use crate::result::Result;
use crate::syntax::{Function, MethodKind, NodeId, NodeKind, VariableKind};

/// Method flags, kept together so the dispatch stays readable
pub(super) struct MethodParts {
    pub key: NodeId,
    pub kind: MethodKind,
    pub is_static: bool,
    pub computed: bool,
    pub is_async: bool,
    pub is_generator: bool,
}

impl Translator<'_> {
    pub(super) fn print_program(&mut self, id: NodeId, body: &[NodeId]) -> Result<Document> {
        let statements = self.print_statement_sequence(body)?;
        let dangling = self.print_dangling_lines(id)?;

        let contents = match (statements.is_nil(), dangling.is_nil()) {
            (true, true) => return Ok(statements),
            (false, false) => concat(vec![statements, hard_line(), dangling]),
            (false, true) => statements,
            (true, false) => dangling,
        };
        Ok(concat(vec![contents, hard_line()]))
    }

    /// Statements separated by line breaks, keeping up to the configured number of blank lines
    pub(super) fn print_statement_sequence(&mut self, ids: &[NodeId]) -> Result<Document> {
        let mut parts = Vec::with_capacity(ids.len() * 2);
        let mut previous: Option<NodeId> = None;

        for &id in ids {
            if self.is_omitted(id) {
                continue;
            }
            if let Some(previous) = previous {
                parts.push(hard_line());
                let blank = self.blank_lines(self.trailing_edge(previous), self.leading_edge(id));
                parts.extend((0..blank).map(|_| hard_line()));
            }
            parts.push(self.print(id, Slot::Statement)?);
            previous = Some(id);
        }

        Ok(concat(parts))
    }

    /// Bare `;` statements print nothing unless a comment hangs on them
    fn is_omitted(&self, id: NodeId) -> bool {
        matches!(self.tree.kind(id), NodeKind::EmptyStatement) && !self.comments.has_comments(id)
    }

    pub(super) fn print_block(&mut self, id: NodeId, body: &[NodeId]) -> Result<Document> {
        let has_statements = body.iter().any(|&statement| !self.is_omitted(statement));
        let has_dangling = !self.comments.dangling(id).is_empty();
        if !has_statements && !has_dangling {
            return Ok(token("{}"));
        }

        let statements = self.print_statement_sequence(body)?;
        let contents = if has_dangling {
            let dangling = self.print_dangling_lines(id)?;
            if has_statements {
                concat(vec![statements, hard_line(), dangling])
            } else {
                dangling
            }
        } else {
            statements
        };

        let separator = if self.options.force_break_statements || has_dangling {
            hard_line()
        } else {
            line()
        };
        Ok(group(concat(vec![
            token("{"),
            indent(concat(vec![separator.clone(), contents])),
            separator,
            token("}"),
        ])))
    }

    pub(super) fn print_variable_declaration(
        &mut self,
        kind: VariableKind,
        declarators: &[NodeId],
    ) -> Result<Document> {
        let printed = declarators
            .iter()
            .map(|&declarator| self.print(declarator, Slot::Expression))
            .collect::<Result<Vec<_>>>()?;
        let has_init = declarators.iter().any(|&declarator| {
            matches!(
                self.tree.kind(declarator),
                NodeKind::VariableDeclarator { init: Some(_), .. }
            )
        });

        let mut printed = printed.into_iter();
        let Some(first) = printed.next() else {
            return Ok(concat(vec![token(kind.as_str()), token(";")]));
        };

        // Several initialised declarators get a line each
        let rest: Vec<Document> = printed
            .map(|declarator| {
                let separator = if has_init { hard_line() } else { line() };
                concat(vec![token(","), separator, declarator])
            })
            .collect();

        Ok(group(concat(vec![
            token(kind.as_str()),
            token(" "),
            first,
            indent(concat(rest)),
            token(";"),
        ])))
    }

    pub(super) fn print_function(&mut self, id: NodeId, function: &Function) -> Result<Document> {
        let mut parts = Vec::new();
        if function.is_async {
            parts.push(token("async "));
        }
        parts.push(token("function"));
        if function.is_generator {
            parts.push(token("*"));
        }
        parts.push(token(" "));
        if let Some(name) = function.id {
            parts.push(self.print(name, Slot::Expression)?);
        }
        parts.push(self.print_parameters(id, &function.params)?);
        parts.push(token(" "));
        parts.push(self.print(function.body, Slot::Statement)?);
        Ok(concat(parts))
    }

    /// `owner` holds the comments of an empty parameter list as dangling
    pub(super) fn print_parameters(
        &mut self,
        owner: NodeId,
        params: &[NodeId],
    ) -> Result<Document> {
        if params.is_empty() && !self.comments.dangling(owner).is_empty() {
            return self.print_dangling_in(owner, "(", ")", true);
        }
        self.print_list("(", params, ")")
    }

    pub(super) fn print_class(
        &mut self,
        name: Option<NodeId>,
        super_class: Option<NodeId>,
        body: NodeId,
    ) -> Result<Document> {
        let mut parts = vec![token("class")];
        if let Some(name) = name {
            parts.push(token(" "));
            parts.push(self.print(name, Slot::Expression)?);
        }
        if let Some(super_class) = super_class {
            parts.push(token(" extends "));
            parts.push(self.print(super_class, Slot::Callee)?);
        }
        parts.push(token(" "));
        parts.push(self.print(body, Slot::Statement)?);
        Ok(concat(parts))
    }

    pub(super) fn print_class_body(&mut self, id: NodeId, members: &[NodeId]) -> Result<Document> {
        let has_dangling = !self.comments.dangling(id).is_empty();
        if members.is_empty() && !has_dangling {
            return Ok(token("{}"));
        }

        let members_doc = self.print_statement_sequence(members)?;
        let contents = match (members.is_empty(), has_dangling) {
            (false, true) => {
                let dangling = self.print_dangling_lines(id)?;
                concat(vec![members_doc, hard_line(), dangling])
            }
            (true, _) => self.print_dangling_lines(id)?,
            (false, false) => members_doc,
        };

        Ok(concat(vec![
            token("{"),
            indent(concat(vec![hard_line(), contents])),
            hard_line(),
            token("}"),
        ]))
    }

    pub(super) fn print_method(
        &mut self,
        id: NodeId,
        method: MethodParts,
        params: &[NodeId],
        body: NodeId,
    ) -> Result<Document> {
        let mut parts = Vec::new();
        if method.is_static {
            parts.push(token("static "));
        }
        if method.is_async {
            parts.push(token("async "));
        }
        match method.kind {
            MethodKind::Get => parts.push(token("get ")),
            MethodKind::Set => parts.push(token("set ")),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if method.is_generator {
            parts.push(token("*"));
        }
        parts.push(self.print_key(method.key, method.computed)?);
        parts.push(self.print_parameters(id, params)?);
        parts.push(token(" "));
        parts.push(self.print(body, Slot::Statement)?);
        Ok(concat(parts))
    }

    pub(super) fn print_expression_statement(&mut self, expression: NodeId) -> Result<Document> {
        // `{` or `function` at the start of a statement would begin a block or declaration
        let first = parens::leftmost(self.tree, expression);
        if matches!(
            self.tree.kind(first),
            NodeKind::Object { .. } | NodeKind::FunctionExpression(_)
        ) {
            self.parenthesize.insert(first);
        }
        let expression = self.print(expression, Slot::ExpressionStatement)?;
        Ok(concat(vec![expression, token(";")]))
    }

    pub(super) fn print_if(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    ) -> Result<Document> {
        let test = self.print(test, Slot::Test)?;
        let consequent_doc = self.print_clause(consequent)?;
        let opening = group(concat(vec![
            token("if ("),
            group(concat(vec![indent(concat(vec![soft_line(), test])), soft_line()])),
            token(")"),
            consequent_doc,
        ]));

        let Some(alternate) = alternate else {
            return Ok(opening);
        };

        let mut parts = vec![opening];
        // A trailing `// ...` after the block would swallow `else`.
        if self.is_block(consequent) && self.comments.trailing(consequent).is_empty() {
            parts.push(token(" "));
        } else {
            parts.push(hard_line());
        }
        parts.push(token("else"));
        if matches!(self.tree.kind(alternate), NodeKind::IfStatement { .. }) {
            parts.push(token(" "));
            parts.push(self.print(alternate, Slot::Statement)?);
        } else {
            parts.push(self.print_clause(alternate)?);
        }
        Ok(concat(parts))
    }

    /// Body of an `if` or `else`: blocks hug the keyword, other statements go on their own line
    fn print_clause(&mut self, id: NodeId) -> Result<Document> {
        let body = self.print(id, Slot::Statement)?;
        if self.is_block(id) {
            return Ok(concat(vec![token(" "), body]));
        }
        if matches!(self.tree.kind(id), NodeKind::EmptyStatement) && !self.comments.has_comments(id)
        {
            return Ok(body);
        }
        let separator = if self.options.force_break_statements {
            hard_line()
        } else {
            line()
        };
        Ok(indent(concat(vec![separator, body])))
    }

    fn is_block(&self, id: NodeId) -> bool {
        matches!(self.tree.kind(id), NodeKind::BlockStatement { .. })
    }

    pub(super) fn print_return(
        &mut self,
        id: NodeId,
        argument: Option<NodeId>,
    ) -> Result<Document> {
        let Some(argument) = argument else {
            return self.print_empty_return(id);
        };

        // A line break right after `return` would end the statement
        if self.has_leading_own_line_comment(argument) {
            let argument = self.print(argument, Slot::Expression)?;
            return Ok(concat(vec![
                token("return ("),
                indent(concat(vec![hard_line(), argument])),
                hard_line(),
                token(");"),
            ]));
        }

        let argument = self.print(argument, Slot::Expression)?;
        Ok(concat(vec![token("return "), argument, token(";")]))
    }

    /// `return /* reason */;`
    fn print_empty_return(&mut self, id: NodeId) -> Result<Document> {
        let comments = self.comments;
        let mut inline = Vec::new();
        let mut suffix = Vec::new();
        for attached in comments.dangling(id) {
            let rendered = self.render(attached)?;
            if rendered.ends_line() {
                suffix.push(line_suffix(concat(vec![token(" "), rendered.doc])));
            } else {
                inline.push(token(" "));
                inline.push(rendered.doc);
            }
        }

        let mut parts = vec![token("return")];
        parts.extend(inline);
        parts.push(token(";"));
        parts.extend(suffix);
        Ok(concat(parts))
    }

    /// Property and method keys, bracketed when computed
    pub(super) fn print_key(&mut self, key: NodeId, computed: bool) -> Result<Document> {
        let key = self.print(key, Slot::Key)?;
        if computed {
            Ok(concat(vec![token("["), key, token("]")]))
        } else {
            Ok(key)
        }
    }

    /// Comments hanging inside an otherwise empty bracket pair
    pub(super) fn print_dangling_in(
        &mut self,
        id: NodeId,
        open: &'static str,
        close: &'static str,
        allow_inline: bool,
    ) -> Result<Document> {
        let comments = self.comments;
        let dangling = comments.dangling(id);
        let inline = allow_inline
            && dangling
                .iter()
                .all(|c| c.same_line && !c.comment.kind.ends_line());

        if inline {
            let rendered = dangling
                .iter()
                .map(|attached| self.render(attached).map(|r| r.doc))
                .collect::<Result<Vec<_>>>()?;
            if rendered.iter().all(|doc| !doc.measure().forced_break) {
                return Ok(concat(vec![
                    token(open),
                    join(token(" "), rendered),
                    token(close),
                ]));
            }
            return Ok(concat(vec![
                token(open),
                indent(concat(vec![hard_line(), join(hard_line(), rendered)])),
                hard_line(),
                token(close),
            ]));
        }

        let lines = self.print_dangling_lines(id)?;
        Ok(concat(vec![
            token(open),
            indent(concat(vec![hard_line(), lines])),
            hard_line(),
            token(close),
        ]))
    }
}
