//! Node kinds for the modelled ECMAScript subset

use super::operators::{AssignmentOperator, BinaryOperator, UnaryOperator};
use super::tree::NodeId;

/// `var`, `let` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
    Null,
    RegExp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

/// Shared shape of function declarations and function expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub id: Option<NodeId>,
    pub params: Vec<NodeId>,
    pub body: NodeId,
    pub is_async: bool,
    pub is_generator: bool,
}

/// One variant per grammar production
///
/// Children are referenced by id. Identifier names and literal text live in
/// the source buffer and are sliced by the node's range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    VariableDeclaration {
        kind: VariableKind,
        declarators: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    FunctionDeclaration(Function),
    FunctionExpression(Function),
    ClassDeclaration {
        id: Option<NodeId>,
        super_class: Option<NodeId>,
        body: NodeId,
    },
    ClassBody {
        members: Vec<NodeId>,
    },
    MethodDefinition {
        key: NodeId,
        kind: MethodKind,
        is_static: bool,
        computed: bool,
        is_async: bool,
        is_generator: bool,
        params: Vec<NodeId>,
        body: NodeId,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    EmptyStatement,
    Identifier,
    Literal {
        kind: LiteralKind,
    },
    This,
    Binary {
        operator: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    Assignment {
        operator: AssignmentOperator,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        operator: UnaryOperator,
        argument: NodeId,
    },
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    New {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    Array {
        elements: Vec<NodeId>,
    },
    Object {
        properties: Vec<NodeId>,
    },
    /// `value` is `None` for shorthand properties
    Property {
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
    },
    ArrowFunction {
        params: Vec<NodeId>,
        body: NodeId,
        is_async: bool,
    },
    Spread {
        argument: NodeId,
    },
    Conditional {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    /// A production the translator has no mapping for
    Unsupported {
        production: String,
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Children in source order
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => {
                out.extend_from_slice(body)
            }
            NodeKind::VariableDeclaration { declarators, .. } => out.extend_from_slice(declarators),
            NodeKind::VariableDeclarator { id, init } => {
                out.push(*id);
                out.extend(*init);
            }
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => {
                out.extend(function.id);
                out.extend_from_slice(&function.params);
                out.push(function.body);
            }
            NodeKind::ClassDeclaration {
                id,
                super_class,
                body,
            } => {
                out.extend(*id);
                out.extend(*super_class);
                out.push(*body);
            }
            NodeKind::ClassBody { members } => out.extend_from_slice(members),
            NodeKind::MethodDefinition {
                key, params, body, ..
            } => {
                out.push(*key);
                out.extend_from_slice(params);
                out.push(*body);
            }
            NodeKind::ExpressionStatement { expression } => out.push(*expression),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.extend(*alternate);
            }
            NodeKind::ReturnStatement { argument } => out.extend(*argument),
            NodeKind::EmptyStatement
            | NodeKind::Identifier
            | NodeKind::Literal { .. }
            | NodeKind::This => {}
            NodeKind::Binary { left, right, .. } | NodeKind::Assignment { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::Unary { argument, .. } | NodeKind::Spread { argument } => out.push(*argument),
            NodeKind::Call { callee, arguments } | NodeKind::New { callee, arguments } => {
                out.push(*callee);
                out.extend_from_slice(arguments);
            }
            NodeKind::Member {
                object, property, ..
            } => {
                out.push(*object);
                out.push(*property);
            }
            NodeKind::Array { elements } => out.extend_from_slice(elements),
            NodeKind::Object { properties } => out.extend_from_slice(properties),
            NodeKind::Property { key, value, .. } => {
                out.push(*key);
                out.extend(*value);
            }
            NodeKind::ArrowFunction { params, body, .. } => {
                out.extend_from_slice(params);
                out.push(*body);
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            NodeKind::Unsupported { children, .. } => out.extend_from_slice(children),
        }
        out
    }

    /// Production name, as used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ClassDeclaration { .. } => "ClassDeclaration",
            NodeKind::ClassBody { .. } => "ClassBody",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::This => "ThisExpression",
            NodeKind::Binary { .. } => "BinaryExpression",
            NodeKind::Assignment { .. } => "AssignmentExpression",
            NodeKind::Unary { .. } => "UnaryExpression",
            NodeKind::Call { .. } => "CallExpression",
            NodeKind::New { .. } => "NewExpression",
            NodeKind::Member { .. } => "MemberExpression",
            NodeKind::Array { .. } => "ArrayExpression",
            NodeKind::Object { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::ArrowFunction { .. } => "ArrowFunctionExpression",
            NodeKind::Spread { .. } => "SpreadElement",
            NodeKind::Conditional { .. } => "ConditionalExpression",
            NodeKind::Unsupported { production, .. } => production.as_str(),
        }
    }

    /// Single-token nodes; comments can never sit inside them
    pub fn is_token(&self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::Literal { .. }
                | NodeKind::This
                | NodeKind::EmptyStatement
        )
    }

    /// Nodes that can own dangling comments
    pub fn is_comment_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Program { .. }
                | NodeKind::BlockStatement { .. }
                | NodeKind::ClassBody { .. }
                | NodeKind::Object { .. }
                | NodeKind::Array { .. }
                | NodeKind::Call { .. }
                | NodeKind::New { .. }
                | NodeKind::FunctionDeclaration(_)
                | NodeKind::FunctionExpression(_)
                | NodeKind::MethodDefinition { .. }
                | NodeKind::ArrowFunction { .. }
                | NodeKind::ReturnStatement { .. }
        )
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::VariableDeclaration { .. }
                | NodeKind::FunctionDeclaration(_)
                | NodeKind::ClassDeclaration { .. }
                | NodeKind::ExpressionStatement { .. }
                | NodeKind::IfStatement { .. }
                | NodeKind::BlockStatement { .. }
                | NodeKind::ReturnStatement { .. }
                | NodeKind::EmptyStatement
        )
    }
}
