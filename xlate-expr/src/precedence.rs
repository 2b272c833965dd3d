//! Operator precedence levels for backend expressions.
//!
//! A composite expression declares the precedence of its template as a whole. When the
//! composite is nested inside another expression, the renderer compares the two levels
//! to decide whether the inner one needs parentheses.

use crate::{BinaryOp, CompareOp};

/// Binding strength of a backend expression; higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Precedence {
    /// Unknown binding; always parenthesized when nested.
    Unknown = 0,
    /// `OR`
    LogicalDisjunction = 10,
    /// `AND`
    LogicalConjunction = 20,
    /// `NOT`
    LogicalNegation = 30,
    /// `^`
    Bitwise = 40,
    /// `=`, `<>`, `<`, `LIKE`, `IN`, `IS NULL`, ...
    Comparison = 50,
    /// `+`
    Additive = 60,
    /// `-`
    Subtraction = 70,
    /// `*`, `/`, `%`
    Multiplicative = 80,
    /// unary `-`, casts
    Unary = 90,
    /// literals, identifiers, function calls, parenthesized expressions
    #[default]
    Primary = 100,
}

impl Precedence {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Whether an operand at `self` must be parenthesized inside a parent at `parent`.
    ///
    /// Equal levels wrap for the non-associative operators so `a - (b - c)` keeps its
    /// parentheses.
    pub fn needs_parentheses_within(self, parent: Precedence) -> bool {
        self == Precedence::Unknown
            || self < parent
            || (self == parent
                && matches!(
                    parent,
                    Precedence::Subtraction
                        | Precedence::Multiplicative
                        | Precedence::LogicalNegation
                ))
    }
}

impl BinaryOp {
    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOp::Add => Precedence::Additive,
            BinaryOp::Subtract => Precedence::Subtraction,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Multiplicative,
            BinaryOp::And => Precedence::LogicalConjunction,
            BinaryOp::Or => Precedence::LogicalDisjunction,
        }
    }
}

impl CompareOp {
    pub fn precedence(&self) -> Precedence {
        Precedence::Comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_binding_strength() {
        assert!(Precedence::Primary > Precedence::Multiplicative);
        assert!(Precedence::Additive > Precedence::Comparison);
        assert!(Precedence::LogicalConjunction > Precedence::LogicalDisjunction);
        assert_eq!(Precedence::default(), Precedence::Primary);
        assert_eq!(Precedence::Subtraction.value(), 70);
    }

    #[test]
    fn parenthesization_rules() {
        assert!(Precedence::Additive.needs_parentheses_within(Precedence::Primary));
        assert!(!Precedence::Primary.needs_parentheses_within(Precedence::Additive));
        assert!(Precedence::Subtraction.needs_parentheses_within(Precedence::Subtraction));
        assert!(!Precedence::Additive.needs_parentheses_within(Precedence::Additive));
        assert!(Precedence::Unknown.needs_parentheses_within(Precedence::Unknown));
    }
}
