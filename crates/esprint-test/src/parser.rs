//! Fixture parser
//!
//! Recursive descent over the lexer's tokens, building an arena tree with
//! [`TreeBuilder`]. Node ranges follow ESTree: a parenthesised expression keeps
//! its own range, while its parent's range covers the parentheses.
//!
//! Productions outside the modelled subset either fail with a [`ParseError`]
//! or, for a few common ones (template literals, update expressions), become
//! `Unsupported` nodes so the engine's error path can be exercised.

use esprint_core::syntax::{
    AssignmentOperator, BinaryOperator, Function, LiteralKind, MethodKind, NodeId, NodeKind,
    SyntaxTree, TreeBuilder, UnaryOperator, VariableKind,
};
use thiserror::Error;

use crate::lexer::{Lexed, Token, TokenKind};

/// Errors raised while lexing or parsing a fixture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unterminated {what} starting at offset {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("Unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("Expected {expected} at offset {offset}, found '{found}'")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Expected {expected}, found end of input")]
    UnexpectedEnd { expected: String },
}

type Result<T> = std::result::Result<T, ParseError>;

/// A parsed expression and its outer extent, parentheses included
#[derive(Debug, Clone, Copy)]
struct Expr {
    id: NodeId,
    start: usize,
    end: usize,
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    previous_end: usize,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, lexed: Lexed) -> Self {
        Self {
            source,
            tokens: lexed.tokens,
            pos: 0,
            previous_end: 0,
            builder: TreeBuilder::new(),
        }
    }

    /// Parse the whole input as a program spanning the entire source
    pub fn parse_program(mut self) -> Result<SyntaxTree> {
        let mut body = Vec::new();
        while self.peek().is_some() {
            body.push(self.parse_statement()?);
        }
        let program = self.node(0, self.source.len(), NodeKind::Program { body });
        Ok(self.builder.finish(program))
    }

    // Statements

    fn parse_statement(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        match self.peek_text() {
            Some("var" | "let" | "const") => self.parse_variable_declaration(),
            Some("function") => self.parse_function_declaration(),
            Some("async") if self.peek_text_at(1) == Some("function") => {
                self.parse_function_declaration()
            }
            Some("class") => self.parse_class(),
            Some("if") => self.parse_if(),
            Some("{") => self.parse_block(),
            Some("return") => self.parse_return(),
            Some(";") => {
                self.bump();
                Ok(self.node(start, self.previous_end, NodeKind::EmptyStatement))
            }
            _ => {
                let expression = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.node(
                    expression.start,
                    self.previous_end,
                    NodeKind::ExpressionStatement {
                        expression: expression.id,
                    },
                ))
            }
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        let kind = match self.peek_text() {
            Some("var") => VariableKind::Var,
            Some("let") => VariableKind::Let,
            _ => VariableKind::Const,
        };
        self.bump();

        let mut declarators = Vec::new();
        loop {
            let name = self.parse_identifier()?;
            let init = if self.eat("=") {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            let end = init.map_or(name.end, |init| init.end);
            declarators.push(self.node(
                name.start,
                end,
                NodeKind::VariableDeclarator {
                    id: name.id,
                    init: init.map(|init| init.id),
                },
            ));
            if !self.eat(",") {
                break;
            }
        }

        self.consume_semicolon()?;
        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::VariableDeclaration { kind, declarators },
        ))
    }

    fn parse_function_declaration(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        let function = self.parse_function()?;
        if function.id.is_none() {
            return Err(self.expected("function name"));
        }
        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::FunctionDeclaration(function),
        ))
    }

    /// `async function* name(params) { body }`, name optional
    fn parse_function(&mut self) -> Result<Function> {
        let is_async = self.eat("async");
        self.expect("function")?;
        let is_generator = self.eat("*");
        let id = if self.at("(") {
            None
        } else {
            Some(self.parse_identifier()?.id)
        };
        let params = self.parse_parameters()?;
        let body = self.parse_block()?;
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<NodeId>> {
        self.expect("(")?;
        self.parse_list(")")
    }

    fn parse_class(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        self.expect("class")?;
        let id = if self.at("extends") || self.at("{") {
            None
        } else {
            Some(self.parse_identifier()?.id)
        };
        let super_class = if self.eat("extends") {
            Some(self.parse_member_chain()?.id)
        } else {
            None
        };

        let body_start = self.current_start();
        self.expect("{")?;
        let mut members = Vec::new();
        while !self.at("}") {
            if self.eat(";") {
                continue;
            }
            members.push(self.parse_method()?);
        }
        self.expect("}")?;
        let body = self.node(body_start, self.previous_end, NodeKind::ClassBody { members });

        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::ClassDeclaration {
                id,
                super_class,
                body,
            },
        ))
    }

    fn parse_method(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        let is_static = self.at("static") && self.is_modifier();
        if is_static {
            self.bump();
        }
        let is_async = self.at("async") && self.is_modifier();
        if is_async {
            self.bump();
        }
        let is_generator = self.eat("*");
        let mut kind = MethodKind::Method;
        if (self.at("get") || self.at("set")) && self.is_modifier() {
            kind = if self.at("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.bump();
        }

        let (key, computed) = self.parse_property_key()?;
        if kind == MethodKind::Method
            && !computed
            && self.slice(key.start, key.end) == "constructor"
        {
            kind = MethodKind::Constructor;
        }
        let params = self.parse_parameters()?;
        let body = self.parse_block()?;

        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::MethodDefinition {
                key: key.id,
                kind,
                is_static,
                computed,
                is_async,
                is_generator,
                params,
                body,
            },
        ))
    }

    /// A method modifier is followed by the key on the same line, not by `(`
    fn is_modifier(&self) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(|next| !next.newline_before && self.text(next) != "(")
    }

    fn parse_if(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        self.expect("if")?;
        self.expect("(")?;
        let test = self.parse_expression()?;
        self.expect(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::IfStatement {
                test: test.id,
                consequent,
                alternate,
            },
        ))
    }

    fn parse_block(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        self.expect("{")?;
        let mut body = Vec::new();
        while !self.at("}") {
            if self.peek().is_none() {
                return Err(self.expected("'}'"));
            }
            body.push(self.parse_statement()?);
        }
        self.expect("}")?;
        Ok(self.node(start, self.previous_end, NodeKind::BlockStatement { body }))
    }

    fn parse_return(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        self.expect("return")?;
        let bare = self
            .peek()
            .is_none_or(|next| next.newline_before || self.at(";") || self.at("}"));
        let argument = if bare {
            None
        } else {
            Some(self.parse_expression()?.id)
        };
        self.consume_semicolon()?;
        Ok(self.node(
            start,
            self.previous_end,
            NodeKind::ReturnStatement { argument },
        ))
    }

    /// `;`, or an inserted one before a line break, `}` or the end of input
    fn consume_semicolon(&mut self) -> Result<()> {
        if self.eat(";") {
            return Ok(());
        }
        match self.peek() {
            None => Ok(()),
            Some(next) if next.newline_before => Ok(()),
            Some(_) if self.at("}") => Ok(()),
            Some(_) => Err(self.expected("';'")),
        }
    }

    // Expressions

    fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr> {
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }

        let left = self.parse_conditional()?;
        let operator = self
            .peek()
            .filter(|token| token.kind == TokenKind::Punct)
            .and_then(|token| AssignmentOperator::from_token(self.text(token)));
        let Some(operator) = operator else {
            return Ok(left);
        };

        self.bump();
        let right = self.parse_assignment()?;
        Ok(self.expr(
            left.start,
            right.end,
            NodeKind::Assignment {
                operator,
                left: left.id,
                right: right.id,
            },
        ))
    }

    /// `x => ...`, `(a, b) => ...`, `async (a) => ...`
    fn try_parse_arrow(&mut self) -> Result<Option<Expr>> {
        let is_async = self.at("async")
            && self.tokens.get(self.pos + 1).is_some_and(|next| {
                !next.newline_before
                    && (self.text(next) == "(" || next.kind == TokenKind::Word)
            });
        let head = self.pos + usize::from(is_async);

        let arrow_at = match self.tokens.get(head) {
            Some(token) if token.kind == TokenKind::Word => head + 1,
            Some(token) if self.text(token) == "(" => match self.matching_paren(head) {
                Some(close) => close + 1,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        if self.tokens.get(arrow_at).map(|token| self.text(token)) != Some("=>") {
            return Ok(None);
        }

        let start = self.current_start();
        if is_async {
            self.bump();
        }
        let params = if self.at("(") {
            self.parse_parameters()?
        } else {
            vec![self.parse_identifier()?.id]
        };
        self.expect("=>")?;

        let body = if self.at("{") {
            let start = self.current_start();
            let id = self.parse_block()?;
            Expr {
                id,
                start,
                end: self.previous_end,
            }
        } else {
            self.parse_assignment()?
        };

        Ok(Some(self.expr(
            start,
            body.end,
            NodeKind::ArrowFunction {
                params,
                body: body.id,
                is_async,
            },
        )))
    }

    fn matching_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.kind != TokenKind::Punct {
                continue;
            }
            match self.text(token) {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn parse_conditional(&mut self) -> Result<Expr> {
        let test = self.parse_binary(1)?;
        if !self.eat("?") {
            return Ok(test);
        }
        let consequent = self.parse_assignment()?;
        self.expect(":")?;
        let alternate = self.parse_assignment()?;
        Ok(self.expr(
            test.start,
            alternate.end,
            NodeKind::Conditional {
                test: test.id,
                consequent: consequent.id,
                alternate: alternate.id,
            },
        ))
    }

    /// Precedence climbing over binary operators
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(operator) = self.peek_binary_operator() {
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.bump();
            let next_min = if operator.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min)?;
            left = self.expr(
                left.start,
                right.end,
                NodeKind::Binary {
                    operator,
                    left: left.id,
                    right: right.id,
                },
            );
        }
        Ok(left)
    }

    fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Punct | TokenKind::Word => BinaryOperator::from_token(self.text(token)),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let start = self.current_start();
        let operator = self
            .peek()
            .filter(|token| matches!(token.kind, TokenKind::Punct | TokenKind::Word))
            .and_then(|token| UnaryOperator::from_token(self.text(token)));
        if let Some(operator) = operator {
            self.bump();
            let argument = self.parse_unary()?;
            return Ok(self.expr(
                start,
                argument.end,
                NodeKind::Unary {
                    operator,
                    argument: argument.id,
                },
            ));
        }

        if self.at("++") || self.at("--") {
            self.bump();
            let argument = self.parse_unary()?;
            return Ok(self.unsupported("UpdateExpression", start, argument.end, vec![argument.id]));
        }

        let expression = self.parse_call_chain()?;
        let postfix = self
            .peek()
            .is_some_and(|next| !next.newline_before && (self.at("++") || self.at("--")));
        if postfix {
            self.bump();
            return Ok(self.unsupported(
                "UpdateExpression",
                expression.start,
                self.previous_end,
                vec![expression.id],
            ));
        }
        Ok(expression)
    }

    /// Member accesses and calls following a primary or `new` expression
    fn parse_call_chain(&mut self) -> Result<Expr> {
        let mut expression = if self.at("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            if let Some(member) = self.parse_member_suffix(expression)? {
                expression = member;
            } else if self.at("(") {
                self.bump();
                let arguments = self.parse_list(")")?;
                expression = self.expr(
                    expression.start,
                    self.previous_end,
                    NodeKind::Call {
                        callee: expression.id,
                        arguments,
                    },
                );
            } else if self
                .peek()
                .is_some_and(|next| next.kind == TokenKind::Template)
            {
                self.bump();
                expression = self.unsupported(
                    "TaggedTemplateExpression",
                    expression.start,
                    self.previous_end,
                    vec![expression.id],
                );
            } else {
                return Ok(expression);
            }
        }
    }

    /// `.name` or `[expression]` after `object`
    fn parse_member_suffix(&mut self, object: Expr) -> Result<Option<Expr>> {
        let (property, computed) = if self.eat(".") {
            (self.parse_identifier()?, false)
        } else if self.eat("[") {
            let property = self.parse_expression()?;
            self.expect("]")?;
            (property, true)
        } else {
            return Ok(None);
        };
        Ok(Some(self.expr(
            object.start,
            self.previous_end,
            NodeKind::Member {
                object: object.id,
                property: property.id,
                computed,
            },
        )))
    }

    /// Primary expression followed by member accesses only, as in `extends a.b`
    fn parse_member_chain(&mut self) -> Result<Expr> {
        let mut expression = self.parse_primary()?;
        while let Some(member) = self.parse_member_suffix(expression)? {
            expression = member;
        }
        Ok(expression)
    }

    fn parse_new(&mut self) -> Result<Expr> {
        let start = self.current_start();
        self.expect("new")?;
        let mut callee = if self.at("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while let Some(member) = self.parse_member_suffix(callee)? {
            callee = member;
        }
        let arguments = if self.eat("(") {
            self.parse_list(")")?
        } else {
            Vec::new()
        };
        Ok(self.expr(
            start,
            self.previous_end,
            NodeKind::New {
                callee: callee.id,
                arguments,
            },
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.expected("expression"));
        };
        let (start, end) = (token.span.start, token.span.end);

        match token.kind {
            TokenKind::Number => self.literal(LiteralKind::Number),
            TokenKind::String => self.literal(LiteralKind::String),
            TokenKind::RegExp => self.literal(LiteralKind::RegExp),
            TokenKind::Template => {
                self.bump();
                Ok(self.unsupported("TemplateLiteral", start, end, Vec::new()))
            }
            TokenKind::Word => match self.text(&token) {
                "this" => {
                    self.bump();
                    Ok(self.expr(start, end, NodeKind::This))
                }
                "true" | "false" => self.literal(LiteralKind::Boolean),
                "null" => self.literal(LiteralKind::Null),
                "function" => self.parse_function_expression(),
                "async" if self.peek_text_at(1) == Some("function") => {
                    self.parse_function_expression()
                }
                _ => self.parse_identifier(),
            },
            TokenKind::Punct => match self.text(&token) {
                "(" => {
                    self.bump();
                    let inner = self.parse_expression()?;
                    self.expect(")")?;
                    Ok(Expr {
                        id: inner.id,
                        start,
                        end: self.previous_end,
                    })
                }
                "[" => {
                    self.bump();
                    let elements = self.parse_list("]")?;
                    Ok(self.expr(start, self.previous_end, NodeKind::Array { elements }))
                }
                "{" => self.parse_object(),
                _ => Err(self.expected("expression")),
            },
        }
    }

    fn parse_function_expression(&mut self) -> Result<Expr> {
        let start = self.current_start();
        let function = self.parse_function()?;
        Ok(self.expr(
            start,
            self.previous_end,
            NodeKind::FunctionExpression(function),
        ))
    }

    fn parse_object(&mut self) -> Result<Expr> {
        let start = self.current_start();
        self.expect("{")?;
        let mut properties = Vec::new();
        while !self.at("}") {
            properties.push(self.parse_property()?);
            if !self.eat(",") {
                break;
            }
        }
        self.expect("}")?;
        Ok(self.expr(start, self.previous_end, NodeKind::Object { properties }))
    }

    fn parse_property(&mut self) -> Result<NodeId> {
        let start = self.current_start();
        if self.eat("...") {
            let argument = self.parse_assignment()?;
            return Ok(self.node(
                start,
                argument.end,
                NodeKind::Spread {
                    argument: argument.id,
                },
            ));
        }

        let (key, computed) = self.parse_property_key()?;
        if self.eat(":") {
            let value = self.parse_assignment()?;
            return Ok(self.node(
                start,
                value.end,
                NodeKind::Property {
                    key: key.id,
                    value: Some(value.id),
                    computed,
                },
            ));
        }

        if computed || self.at("(") {
            return Err(self.expected("':'"));
        }
        Ok(self.node(
            start,
            key.end,
            NodeKind::Property {
                key: key.id,
                value: None,
                computed: false,
            },
        ))
    }

    /// Identifier, string or number key, or `[expression]`
    fn parse_property_key(&mut self) -> Result<(Expr, bool)> {
        if self.eat("[") {
            let key = self.parse_assignment()?;
            self.expect("]")?;
            return Ok((key, true));
        }
        let key = match self.peek().map(|token| token.kind) {
            Some(TokenKind::String) => self.literal(LiteralKind::String)?,
            Some(TokenKind::Number) => self.literal(LiteralKind::Number)?,
            _ => self.parse_identifier()?,
        };
        Ok((key, false))
    }

    /// Bracketed comma list of expressions and spreads, trailing comma allowed
    ///
    /// The opening bracket has already been consumed.
    fn parse_list(&mut self, close: &str) -> Result<Vec<NodeId>> {
        let mut items = Vec::new();
        while !self.at(close) {
            let start = self.current_start();
            let item = if self.eat("...") {
                let argument = self.parse_assignment()?;
                self.node(
                    start,
                    argument.end,
                    NodeKind::Spread {
                        argument: argument.id,
                    },
                )
            } else {
                self.parse_assignment()?.id
            };
            items.push(item);
            if !self.eat(",") {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_identifier(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Word => {
                let (start, end) = (token.span.start, token.span.end);
                self.bump();
                Ok(self.expr(start, end, NodeKind::Identifier))
            }
            _ => Err(self.expected("identifier")),
        }
    }

    fn literal(&mut self, kind: LiteralKind) -> Result<Expr> {
        let Some(token) = self.bump() else {
            return Err(self.expected("literal"));
        };
        Ok(self.expr(token.span.start, token.span.end, NodeKind::Literal { kind }))
    }

    fn unsupported(
        &mut self,
        production: &str,
        start: usize,
        end: usize,
        children: Vec<NodeId>,
    ) -> Expr {
        self.expr(
            start,
            end,
            NodeKind::Unsupported {
                production: production.to_string(),
                children,
            },
        )
    }

    // Token plumbing

    fn node(&mut self, start: usize, end: usize, kind: NodeKind) -> NodeId {
        self.builder.node(start as u32, end as u32, kind)
    }

    fn expr(&mut self, start: usize, end: usize, kind: NodeKind) -> Expr {
        let id = self.node(start, end, kind);
        Expr { id, start, end }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_text(&self) -> Option<&'a str> {
        self.peek_text_at(0)
    }

    fn peek_text_at(&self, offset: usize) -> Option<&'a str> {
        self.tokens
            .get(self.pos + offset)
            .map(|token| self.text(token))
    }

    fn text(&self, token: &Token) -> &'a str {
        self.slice(token.span.start, token.span.end)
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn current_start(&self) -> usize {
        self.peek()
            .map_or(self.source.len(), |token| token.span.start)
    }

    /// Whether the next token is punctuation or a word spelled `text`
    fn at(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| {
            matches!(token.kind, TokenKind::Punct | TokenKind::Word) && self.text(token) == text
        })
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        self.previous_end = token.span.end;
        Some(token)
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.at(text) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, text: &str) -> Result<()> {
        if self.eat(text) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", text)))
        }
    }

    fn expected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::Expected {
                expected: expected.to_string(),
                found: self.text(token).to_string(),
                offset: token.span.start,
            },
            None => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse(source: &str) -> SyntaxTree {
        let lexed = lex(source).unwrap();
        let tree = Parser::new(source, lexed).parse_program().unwrap();
        tree.validate(source).unwrap();
        tree
    }

    fn statement_kinds(tree: &SyntaxTree) -> Vec<String> {
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("root is not a program");
        };
        body.iter()
            .map(|&id| tree.kind(id).name().to_string())
            .collect()
    }

    #[test]
    fn test_statements() {
        let source = concat!(
            "const x = 1;\n",
            "function f(a, b) { return a + b; }\n",
            "class A extends B.C { static get x() {} }\n",
            "if (a) b(); else { c }\n;",
        );
        let tree = parse(source);
        assert_eq!(
            statement_kinds(&tree),
            [
                "VariableDeclaration",
                "FunctionDeclaration",
                "ClassDeclaration",
                "IfStatement",
                "EmptyStatement"
            ]
        );
    }

    #[test]
    fn test_parenthesised_range_covers_parens() {
        let source = "(a + b) * c;";
        let tree = parse(source);
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("root is not a program");
        };
        let NodeKind::ExpressionStatement { expression } = tree.kind(body[0]) else {
            panic!("not an expression statement");
        };
        let NodeKind::Binary { left, .. } = tree.kind(*expression) else {
            panic!("not a binary expression");
        };
        assert_eq!(tree.text(*expression, source), "(a + b) * c");
        assert_eq!(tree.text(*left, source), "a + b");
    }

    #[test]
    fn test_precedence_and_associativity() {
        let source = "a - b - c * d ** e ** f;";
        let tree = parse(source);
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("root is not a program");
        };
        let NodeKind::ExpressionStatement { expression } = tree.kind(body[0]) else {
            panic!("not an expression statement");
        };
        let NodeKind::Binary {
            operator,
            left,
            right,
        } = tree.kind(*expression)
        else {
            panic!("not a binary expression");
        };
        assert_eq!(*operator, BinaryOperator::Minus);
        assert_eq!(tree.text(*left, source), "a - b");
        assert_eq!(tree.text(*right, source), "c * d ** e ** f");
    }

    #[test]
    fn test_automatic_semicolons() {
        let tree = parse("let a = 1\nlet b = 2\nreturn\nc");
        assert_eq!(
            statement_kinds(&tree),
            [
                "VariableDeclaration",
                "VariableDeclaration",
                "ReturnStatement",
                "ExpressionStatement"
            ]
        );

        let source = "a b";
        let err = Parser::new(source, lex(source).unwrap())
            .parse_program()
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected {
                expected: "';'".to_string(),
                found: "b".to_string(),
                offset: 2
            }
        );
    }

    fn count_kinds(tree: &SyntaxTree, name: &str) -> usize {
        tree.iter()
            .filter(|(_, node)| node.kind.name() == name)
            .count()
    }

    #[test]
    fn test_arrows_and_calls() {
        let tree = parse("f(x => x * 2, async (a, b) => { return a; }, (c));");
        assert_eq!(count_kinds(&tree, "ArrowFunctionExpression"), 2);
        assert_eq!(count_kinds(&tree, "CallExpression"), 1);
    }

    #[test]
    fn test_unsupported_productions_become_nodes() {
        let tree = parse("x++; `t`;");
        let unsupported: Vec<_> = tree
            .iter()
            .filter_map(|(_, node)| match &node.kind {
                NodeKind::Unsupported { production, .. } => Some(production.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(unsupported, ["UpdateExpression", "TemplateLiteral"]);
    }

    #[test]
    fn test_objects() {
        let tree = parse("x = { a, b: 1, [c]: 2, 'd': 3, ...e };");
        assert_eq!(count_kinds(&tree, "Property"), 4);
        assert_eq!(count_kinds(&tree, "SpreadElement"), 1);
    }
}
