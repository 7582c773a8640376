//! Parenthesisation
//!
//! Trees carry no parenthesis nodes. Whether a node needs them is decided
//! from its kind and the slot of its parent it is printed in.

use crate::syntax::{BinaryOperator, LiteralKind, NodeId, NodeKind, SyntaxTree, UnaryOperator};

/// Position a node is printed in, as seen from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Statement,
    ExpressionStatement,
    /// Any expression position with no binding constraints
    Expression,
    /// Between parentheses the grammar already requires, such as an `if` test
    Test,
    ListItem,
    Key,
    AssignmentLeft,
    AssignmentRight,
    BinaryLeft(BinaryOperator),
    BinaryRight(BinaryOperator),
    UnaryArgument(UnaryOperator),
    Callee,
    NewCallee,
    MemberObject,
    ConditionalTest,
    ConditionalBranch,
    ArrowBody,
    Spread,
}

impl Slot {
    /// Operand positions of binary and unary operators, calls and member access
    fn binds_tightly(self) -> bool {
        matches!(
            self,
            Slot::BinaryLeft(_)
                | Slot::BinaryRight(_)
                | Slot::UnaryArgument(_)
                | Slot::Callee
                | Slot::NewCallee
                | Slot::MemberObject
        )
    }
}

pub(super) fn needs_parens(tree: &SyntaxTree, id: NodeId, slot: Slot) -> bool {
    match tree.kind(id) {
        NodeKind::Assignment { .. } => {
            slot.binds_tightly()
                || matches!(
                    slot,
                    Slot::ConditionalTest | Slot::ConditionalBranch | Slot::ArrowBody
                )
        }
        NodeKind::Conditional { .. } | NodeKind::ArrowFunction { .. } => {
            slot.binds_tightly() || slot == Slot::ConditionalTest
        }
        NodeKind::FunctionExpression(_) => {
            matches!(slot, Slot::Callee | Slot::NewCallee | Slot::MemberObject)
        }
        NodeKind::Binary { operator, .. } => match slot {
            Slot::BinaryLeft(parent) => binary_operand_needs_parens(*operator, parent, false),
            Slot::BinaryRight(parent) => binary_operand_needs_parens(*operator, parent, true),
            Slot::UnaryArgument(_) | Slot::Callee | Slot::NewCallee | Slot::MemberObject => true,
            _ => false,
        },
        NodeKind::Unary { operator, .. } => match slot {
            Slot::BinaryLeft(BinaryOperator::Exponent) => true,
            Slot::UnaryArgument(parent) => matches!(
                (parent, operator),
                (UnaryOperator::Minus, UnaryOperator::Minus)
                    | (UnaryOperator::Plus, UnaryOperator::Plus)
            ),
            Slot::Callee | Slot::NewCallee | Slot::MemberObject => true,
            _ => false,
        },
        NodeKind::Literal {
            kind: LiteralKind::Number,
        } => slot == Slot::MemberObject,
        NodeKind::Call { .. } => slot == Slot::NewCallee,
        NodeKind::Member { .. } => slot == Slot::NewCallee && member_chain_has_call(tree, id),
        _ => false,
    }
}

/// `a - (b - c)`, `(a ** b) ** c`, `a + (b % c)`, `(a == b) == c`
fn binary_operand_needs_parens(
    child: BinaryOperator,
    parent: BinaryOperator,
    is_right: bool,
) -> bool {
    let child_precedence = child.precedence();
    let parent_precedence = parent.precedence();

    // `??` cannot be mixed with `||` or `&&` without parentheses
    if (parent == BinaryOperator::NullishCoalescing) != (child == BinaryOperator::NullishCoalescing)
        && parent.is_logical()
        && child.is_logical()
    {
        return true;
    }
    if parent_precedence > child_precedence {
        return true;
    }
    if parent_precedence == child_precedence && (is_right || !should_flatten(parent, child)) {
        return true;
    }
    if parent_precedence < child_precedence && child == BinaryOperator::Remainder {
        return matches!(parent, BinaryOperator::Plus | BinaryOperator::Minus);
    }
    is_bitwise(parent)
}

/// Whether `a <child> b <parent> c` may print as one flat chain
pub(super) fn should_flatten(parent: BinaryOperator, child: BinaryOperator) -> bool {
    if parent.precedence() != child.precedence() {
        return false;
    }
    if parent == BinaryOperator::Exponent {
        return false;
    }
    if parent.is_equality() && child.is_equality() {
        return false;
    }
    let multiplicative = |op| {
        matches!(
            op,
            BinaryOperator::Times | BinaryOperator::Divide | BinaryOperator::Remainder
        )
    };
    if (child == BinaryOperator::Remainder && multiplicative(parent))
        || (parent == BinaryOperator::Remainder && multiplicative(child))
    {
        return false;
    }
    if child != parent && multiplicative(child) && multiplicative(parent) {
        return false;
    }
    if is_bitshift(parent) && is_bitshift(child) {
        return false;
    }
    true
}

fn is_bitshift(op: BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::LeftShift | BinaryOperator::RightShift | BinaryOperator::UnsignedRightShift
    )
}

fn is_bitwise(op: BinaryOperator) -> bool {
    is_bitshift(op)
        || matches!(
            op,
            BinaryOperator::BitwiseOr | BinaryOperator::BitwiseXor | BinaryOperator::BitwiseAnd
        )
}

/// `new (a.b())()` must not be read as `new a.b()()`
fn member_chain_has_call(tree: &SyntaxTree, id: NodeId) -> bool {
    let mut current = id;
    loop {
        match tree.kind(current) {
            NodeKind::Member { object, .. } => current = *object,
            NodeKind::Call { .. } => return true,
            _ => return false,
        }
    }
}

/// The node printed first when `id` is printed, following left operands
pub(super) fn leftmost(tree: &SyntaxTree, id: NodeId) -> NodeId {
    let mut current = id;
    loop {
        current = match tree.kind(current) {
            NodeKind::Binary { left, .. } | NodeKind::Assignment { left, .. } => *left,
            NodeKind::Conditional { test, .. } => *test,
            NodeKind::Call { callee, .. } => *callee,
            NodeKind::Member { object, .. } => *object,
            _ => return current,
        };
    }
}
