//! Operator tables
//!
//! Binding strength follows the ECMAScript grammar. Higher numbers bind tighter.

use std::fmt;

/// Binary and logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    NullishCoalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    Instanceof,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Times,
    Divide,
    Remainder,
    Exponent,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "!=",
            BinaryOperator::StrictEquality => "===",
            BinaryOperator::StrictInequality => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::In => "in",
            BinaryOperator::Instanceof => "instanceof",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Times => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponent => "**",
        }
    }

    /// Look up an operator by its source spelling
    pub fn from_token(text: &str) -> Option<Self> {
        let op = match text {
            "??" => BinaryOperator::NullishCoalescing,
            "||" => BinaryOperator::LogicalOr,
            "&&" => BinaryOperator::LogicalAnd,
            "|" => BinaryOperator::BitwiseOr,
            "^" => BinaryOperator::BitwiseXor,
            "&" => BinaryOperator::BitwiseAnd,
            "==" => BinaryOperator::Equality,
            "!=" => BinaryOperator::Inequality,
            "===" => BinaryOperator::StrictEquality,
            "!==" => BinaryOperator::StrictInequality,
            "<" => BinaryOperator::LessThan,
            "<=" => BinaryOperator::LessThanOrEqual,
            ">" => BinaryOperator::GreaterThan,
            ">=" => BinaryOperator::GreaterThanOrEqual,
            "in" => BinaryOperator::In,
            "instanceof" => BinaryOperator::Instanceof,
            "<<" => BinaryOperator::LeftShift,
            ">>" => BinaryOperator::RightShift,
            ">>>" => BinaryOperator::UnsignedRightShift,
            "+" => BinaryOperator::Plus,
            "-" => BinaryOperator::Minus,
            "*" => BinaryOperator::Times,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Remainder,
            "**" => BinaryOperator::Exponent,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::NullishCoalescing => 1,
            BinaryOperator::LogicalOr => 2,
            BinaryOperator::LogicalAnd => 3,
            BinaryOperator::BitwiseOr => 4,
            BinaryOperator::BitwiseXor => 5,
            BinaryOperator::BitwiseAnd => 6,
            BinaryOperator::Equality
            | BinaryOperator::Inequality
            | BinaryOperator::StrictEquality
            | BinaryOperator::StrictInequality => 7,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::In
            | BinaryOperator::Instanceof => 8,
            BinaryOperator::LeftShift
            | BinaryOperator::RightShift
            | BinaryOperator::UnsignedRightShift => 9,
            BinaryOperator::Plus | BinaryOperator::Minus => 10,
            BinaryOperator::Times | BinaryOperator::Divide | BinaryOperator::Remainder => 11,
            BinaryOperator::Exponent => 12,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::NullishCoalescing
                | BinaryOperator::LogicalOr
                | BinaryOperator::LogicalAnd
        )
    }

    pub fn is_equality(self) -> bool {
        self.precedence() == 7
    }

    /// `**` groups to the right; everything else groups to the left
    pub fn is_right_associative(self) -> bool {
        self == BinaryOperator::Exponent
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment operators, plain and compound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    RemainderAssign,
    ExponentAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    NullishAssign,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::PlusAssign => "+=",
            AssignmentOperator::MinusAssign => "-=",
            AssignmentOperator::TimesAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::RemainderAssign => "%=",
            AssignmentOperator::ExponentAssign => "**=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftAssign => ">>=",
            AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
            AssignmentOperator::BitwiseAndAssign => "&=",
            AssignmentOperator::BitwiseOrAssign => "|=",
            AssignmentOperator::BitwiseXorAssign => "^=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishAssign => "??=",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        let op = match text {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::PlusAssign,
            "-=" => AssignmentOperator::MinusAssign,
            "*=" => AssignmentOperator::TimesAssign,
            "/=" => AssignmentOperator::DivideAssign,
            "%=" => AssignmentOperator::RemainderAssign,
            "**=" => AssignmentOperator::ExponentAssign,
            "<<=" => AssignmentOperator::LeftShiftAssign,
            ">>=" => AssignmentOperator::RightShiftAssign,
            ">>>=" => AssignmentOperator::UnsignedRightShiftAssign,
            "&=" => AssignmentOperator::BitwiseAndAssign,
            "|=" => AssignmentOperator::BitwiseOrAssign,
            "^=" => AssignmentOperator::BitwiseXorAssign,
            "&&=" => AssignmentOperator::LogicalAndAssign,
            "||=" => AssignmentOperator::LogicalOrAssign,
            "??=" => AssignmentOperator::NullishAssign,
            _ => return None,
        };
        Some(op)
    }
}

/// Prefix unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Minus,
    Plus,
    LogicalNot,
    BitwiseNot,
    Typeof,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        let op = match text {
            "-" => UnaryOperator::Minus,
            "+" => UnaryOperator::Plus,
            "!" => UnaryOperator::LogicalNot,
            "~" => UnaryOperator::BitwiseNot,
            "typeof" => UnaryOperator::Typeof,
            "void" => UnaryOperator::Void,
            "delete" => UnaryOperator::Delete,
            _ => return None,
        };
        Some(op)
    }

    /// Keyword operators need a space before their operand
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(BinaryOperator::Times.precedence() > BinaryOperator::Plus.precedence());
        assert!(BinaryOperator::LogicalAnd.precedence() > BinaryOperator::LogicalOr.precedence());
        assert_eq!(
            BinaryOperator::In.precedence(),
            BinaryOperator::LessThan.precedence()
        );
        assert!(BinaryOperator::Exponent.is_right_associative());
        assert!(!BinaryOperator::Minus.is_right_associative());
    }

    #[test]
    fn test_spelling_lookup() {
        for op in [
            BinaryOperator::UnsignedRightShift,
            BinaryOperator::Instanceof,
            BinaryOperator::NullishCoalescing,
        ] {
            assert_eq!(BinaryOperator::from_token(op.as_str()), Some(op));
        }
        assert_eq!(
            AssignmentOperator::from_token("??="),
            Some(AssignmentOperator::NullishAssign)
        );
        assert_eq!(UnaryOperator::from_token("typeof"), Some(UnaryOperator::Typeof));
        assert_eq!(BinaryOperator::from_token("=>"), None);
    }
}
