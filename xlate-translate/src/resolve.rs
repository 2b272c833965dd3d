//! Placeholder resolution: lazy, memoized conversion of template operands.
//!
//! The template is tokenized and range-checked first, so a malformed or out-of-range
//! placeholder fails before the converter runs at all. Operands are then converted in
//! order of first appearance, each exactly once no matter how often its index repeats.
//! Slots no placeholder refers to receive [`SqlExpr::sentinel`], keeping the result
//! positionally aligned with the operand list.

use xlate_expr::{SourceExpr, SqlExpr, placeholder_indices};
use xlate_mapping::ColumnDescriptor;
use xlate_result::{Error, Result};

use crate::options::TranslationOptions;

/// Resolve the operands `template` refers to through `converter`.
///
/// The returned vector has exactly `operands.len()` entries. Any error aborts resolution;
/// no partially resolved operands are returned.
pub fn resolve_operands<C, F>(
    template: &str,
    operands: &[&SourceExpr],
    context: &C,
    mut converter: F,
) -> Result<Vec<SqlExpr>>
where
    C: AsRef<TranslationOptions> + ?Sized,
    F: FnMut(&C, &SourceExpr, Option<&ColumnDescriptor>) -> Result<SqlExpr>,
{
    let indices = placeholder_indices(template)?;
    let operand_count = operands.len();
    if let Some(&index) = indices.iter().find(|&&index| index >= operand_count) {
        return Err(Error::PlaceholderOutOfRange {
            template: template.to_string(),
            index,
            operand_count,
        });
    }

    let mut slots: Vec<Option<SqlExpr>> = (0..operand_count).map(|_| None).collect();
    for index in indices {
        let slot = &mut slots[index];
        if slot.is_none() {
            let operand = operands[index];
            tracing::trace!(index, %operand, "converting template operand");
            *slot = Some(converter(context, operand, None)?);
        }
    }

    let strict = context.as_ref().strict_operand_usage;
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            Some(expr) => Ok(expr),
            None if strict => Err(Error::UnreferencedOperand {
                template: template.to_string(),
                index,
            }),
            None => {
                tracing::warn!(index, template, "operand not referenced by template");
                Ok(SqlExpr::sentinel())
            }
        })
        .collect()
}
