//! Syntax model consumed by the engine
//!
//! Trees are built upstream (or by the fixture parser in `esprint-test`) and
//! handed to the engine together with the raw comment spans scanned from the
//! same source buffer.

mod comment;
mod kind;
mod operators;
mod tree;

pub use comment::{CommentKind, RawComment};
pub use kind::{Function, LiteralKind, MethodKind, NodeKind, VariableKind};
pub use operators::{AssignmentOperator, BinaryOperator, UnaryOperator};
pub use tree::{NodeId, SyntaxNode, SyntaxTree, TreeBuilder};
