use xlate_expr::{SourceExpr, SqlExpr};
use xlate_mapping::{ColumnDescriptor, ExpressionMapping};
use xlate_result::Result;

use crate::assemble::assemble_expression;
use crate::operands::MappedNode;
use crate::options::TranslationOptions;
use crate::resolve::resolve_operands;

/// Translate a call or member access through its expression mapping.
///
/// `converter` is invoked at most once per operand the template references; it may call
/// back into this function for nested mapped nodes. Any error aborts the translation and
/// is returned unchanged.
pub fn translate_mapped<C, F>(
    context: &C,
    expr: &SourceExpr,
    mapping: &ExpressionMapping,
    converter: F,
) -> Result<SqlExpr>
where
    C: AsRef<TranslationOptions> + ?Sized,
    F: FnMut(&C, &SourceExpr, Option<&ColumnDescriptor>) -> Result<SqlExpr>,
{
    let node = MappedNode::try_from(expr)?;
    let operands = node.operands();
    let template = mapping.template();
    tracing::debug!(
        member = %node.member(),
        template = %template,
        operands = operands.len(),
        ty = %node.result_type(),
        "translating mapped node"
    );

    let resolved = resolve_operands(template, &operands, context, converter)?;
    Ok(assemble_expression(mapping, node.result_type(), resolved))
}
