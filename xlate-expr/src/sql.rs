//! Backend expression tree.
//!
//! [`SqlExpr`] is what translation produces and what the SQL builder consumes. The
//! composite node, [`SqlExpression`], keeps its template verbatim next to the converted
//! operands; templates are only expanded when the tree is rendered.

use crate::literal::Literal;
use crate::precedence::Precedence;
use crate::types::{BinaryOp, CompareOp, ValueType};
use std::sync::Arc;

/// Text the sentinel renders as. It is not valid SQL, so a sentinel that leaks into
/// generated SQL fails loudly on the server.
pub const UNREFERENCED_OPERAND_TEXT: &str = "!!!";

/// A column of a mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table name, or `None` for an unqualified column.
    pub table: Option<String>,
    pub name: String,
    pub ty: ValueType,
}

impl ColumnRef {
    pub fn new(table: Option<String>, name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            table,
            name: name.into(),
            ty,
        }
    }
}

/// Composite node built from an expression template.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlExpression {
    /// The template, shared with the mapping it came from.
    pub template: Arc<str>,
    pub ty: ValueType,
    pub precedence: Precedence,
    /// Converted operands, positionally aligned with the source node's operands.
    pub parameters: Vec<SqlExpr>,
}

impl SqlExpression {
    pub fn new(
        template: Arc<str>,
        ty: ValueType,
        precedence: Precedence,
        parameters: Vec<SqlExpr>,
    ) -> Self {
        Self {
            template,
            ty,
            precedence,
            parameters,
        }
    }
}

/// Node of the backend expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    Value {
        value: Literal,
        ty: ValueType,
    },
    /// A bound query parameter.
    Parameter {
        name: String,
        ty: ValueType,
    },
    Column(ColumnRef),
    Binary {
        left: Box<SqlExpr>,
        op: BinaryOp,
        right: Box<SqlExpr>,
        ty: ValueType,
    },
    Compare {
        left: Box<SqlExpr>,
        op: CompareOp,
        right: Box<SqlExpr>,
    },
    Expression(SqlExpression),
    /// Sentinel for an operand its template never references.
    Unreferenced,
}

impl SqlExpr {
    pub fn value(value: impl Into<Literal>, ty: ValueType) -> Self {
        SqlExpr::Value {
            value: value.into(),
            ty,
        }
    }

    pub fn parameter(name: impl Into<String>, ty: ValueType) -> Self {
        SqlExpr::Parameter {
            name: name.into(),
            ty,
        }
    }

    pub fn column(table: Option<String>, name: impl Into<String>, ty: ValueType) -> Self {
        SqlExpr::Column(ColumnRef::new(table, name, ty))
    }

    pub fn binary(left: SqlExpr, op: BinaryOp, right: SqlExpr, ty: ValueType) -> Self {
        SqlExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
            ty,
        }
    }

    pub fn compare(left: SqlExpr, op: CompareOp, right: SqlExpr) -> Self {
        SqlExpr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// The sentinel filled into operand slots no placeholder refers to.
    pub fn sentinel() -> Self {
        SqlExpr::Unreferenced
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, SqlExpr::Unreferenced)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            SqlExpr::Value { .. } | SqlExpr::Parameter { .. } | SqlExpr::Column(_) => {
                Precedence::Primary
            }
            SqlExpr::Binary { op, .. } => op.precedence(),
            SqlExpr::Compare { op, .. } => op.precedence(),
            SqlExpr::Expression(expr) => expr.precedence,
            SqlExpr::Unreferenced => Precedence::Unknown,
        }
    }

    pub fn ty(&self) -> ValueType {
        match self {
            SqlExpr::Value { ty, .. }
            | SqlExpr::Parameter { ty, .. }
            | SqlExpr::Binary { ty, .. } => ty.clone(),
            SqlExpr::Column(column) => column.ty.clone(),
            SqlExpr::Compare { .. } => ValueType::Boolean,
            SqlExpr::Expression(expr) => expr.ty.clone(),
            SqlExpr::Unreferenced => ValueType::Unknown,
        }
    }

    /// Borrow the composite node, if this is one.
    pub fn as_expression(&self) -> Option<&SqlExpression> {
        match self {
            SqlExpr::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<SqlExpression> for SqlExpr {
    fn from(expr: SqlExpression) -> Self {
        SqlExpr::Expression(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_has_no_semantic_content() {
        let s = SqlExpr::sentinel();
        assert!(s.is_sentinel());
        assert_eq!(s.precedence(), Precedence::Unknown);
        assert_eq!(s.ty(), ValueType::Unknown);
        assert!(!SqlExpr::value(1, ValueType::Int32).is_sentinel());
    }

    #[test]
    fn composite_reports_declared_metadata() {
        let expr: SqlExpr = SqlExpression::new(
            Arc::from("{0} + {1}"),
            ValueType::Int64,
            Precedence::Additive,
            vec![
                SqlExpr::value(1, ValueType::Int64),
                SqlExpr::value(2, ValueType::Int64),
            ],
        )
        .into();
        assert_eq!(expr.precedence(), Precedence::Additive);
        assert_eq!(expr.ty(), ValueType::Int64);
        let composite = expr.as_expression().expect("composite");
        assert_eq!(&*composite.template, "{0} + {1}");
        assert_eq!(composite.parameters.len(), 2);
    }
}
