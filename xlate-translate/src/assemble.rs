use std::sync::Arc;

use xlate_expr::{SqlExpr, SqlExpression, ValueType};
use xlate_mapping::ExpressionMapping;

/// Build the composite node for `mapping` over already resolved `operands`.
///
/// The template is shared with the mapping, not expanded; expansion happens when the
/// tree is rendered.
pub fn assemble_expression(
    mapping: &ExpressionMapping,
    ty: ValueType,
    operands: Vec<SqlExpr>,
) -> SqlExpr {
    SqlExpr::Expression(SqlExpression::new(
        Arc::clone(mapping.template()),
        ty,
        mapping.precedence(),
        operands,
    ))
}
