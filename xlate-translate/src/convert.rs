//! Default converter from source trees to backend trees.
//!
//! [`ExpressionConverter`] handles the node kinds a data model can describe on its own and
//! routes every call or member access with a registered mapping through
//! [`translate_mapped`], passing itself as the converter so nested mappings expand
//! recursively.

use std::sync::Arc;

use xlate_expr::{MemberAccess, SourceExpr, SqlExpr};
use xlate_mapping::{ColumnDescriptor, MetadataReader};
use xlate_result::{Error, Result};

use crate::context::TranslationContext;
use crate::translate::translate_mapped;

/// Translate `expr` with the default converter.
pub fn translate(context: &TranslationContext, expr: &SourceExpr) -> Result<SqlExpr> {
    ExpressionConverter::new(context).convert(context, expr, None)
}

/// Re-entrant converter backed by the context's metadata reader.
#[derive(Debug, Clone)]
pub struct ExpressionConverter {
    reader: Arc<dyn MetadataReader>,
}

impl ExpressionConverter {
    pub fn new(context: &TranslationContext) -> Self {
        Self {
            reader: context.metadata_reader(),
        }
    }

    pub fn reader(&self) -> &Arc<dyn MetadataReader> {
        &self.reader
    }

    /// Convert one sub-expression.
    ///
    /// `hint` describes the column the value is compared with or combined into; a
    /// constant takes its type from it.
    pub fn convert(
        &self,
        context: &TranslationContext,
        expr: &SourceExpr,
        hint: Option<&ColumnDescriptor>,
    ) -> Result<SqlExpr> {
        match expr {
            SourceExpr::Constant { value, ty } => {
                let ty = hint.map_or_else(|| ty.clone(), |column| column.ty.clone());
                Ok(SqlExpr::Value {
                    value: value.clone(),
                    ty,
                })
            }
            SourceExpr::Parameter { name, ty } => match ty.entity_name() {
                Some(entity) => Err(Error::conversion_failure(format!(
                    "parameter '{name}' of entity type {entity} cannot be used as a value"
                ))),
                None => Ok(SqlExpr::parameter(name.clone(), ty.clone())),
            },
            SourceExpr::MemberAccess(access) => {
                if let Some(mapping) = self.reader.expression_mapping(&access.member) {
                    return translate_mapped(context, expr, &mapping, |ctx, e, h| {
                        self.convert(ctx, e, h)
                    });
                }
                self.column(access)
            }
            SourceExpr::Call(call) => match self.reader.expression_mapping(&call.method) {
                Some(mapping) => translate_mapped(context, expr, &mapping, |ctx, e, h| {
                    self.convert(ctx, e, h)
                }),
                None => Err(Error::conversion_failure(format!(
                    "no expression mapping registered for {}",
                    call.method
                ))),
            },
            SourceExpr::Binary {
                op,
                left,
                right,
                ty,
            } => {
                let (left, right) = self.convert_pair(context, left, right)?;
                Ok(SqlExpr::binary(left, *op, right, ty.clone()))
            }
            SourceExpr::Compare { op, left, right } => {
                let (left, right) = self.convert_pair(context, left, right)?;
                Ok(SqlExpr::compare(left, *op, right))
            }
            SourceExpr::Convert { operand, .. } => self.convert(context, operand, hint),
        }
    }

    /// Convert both sides of a binary node, handing the column of either side to the
    /// other as its hint.
    fn convert_pair(
        &self,
        context: &TranslationContext,
        left: &SourceExpr,
        right: &SourceExpr,
    ) -> Result<(SqlExpr, SqlExpr)> {
        let left_column = self.column_descriptor(left);
        let right_column = self.column_descriptor(right);
        let left = self.convert(context, left, right_column.as_ref())?;
        let right = self.convert(context, right, left_column.as_ref())?;
        Ok((left, right))
    }

    fn column(&self, access: &MemberAccess) -> Result<SqlExpr> {
        let Some(entity) = access
            .target
            .as_deref()
            .and_then(|target| target.ty().entity_name().map(str::to_string))
        else {
            return Err(Error::conversion_failure(format!(
                "member {} has no expression mapping and is not an entity column",
                access.member
            )));
        };
        let column = self
            .reader
            .column(&entity, &access.member.name)
            .ok_or_else(|| Error::MissingColumnMapping {
                entity: entity.clone(),
                member: access.member.name.clone(),
            })?;
        Ok(SqlExpr::column(
            Some(column.table),
            column.column_name,
            column.ty,
        ))
    }

    /// Column descriptor of `expr` when it reads a mapped entity column.
    fn column_descriptor(&self, expr: &SourceExpr) -> Option<ColumnDescriptor> {
        let expr = match expr {
            SourceExpr::Convert { operand, .. } => operand.as_ref(),
            other => other,
        };
        let SourceExpr::MemberAccess(access) = expr else {
            return None;
        };
        let target_ty = access.target.as_deref()?.ty();
        self.reader
            .column(target_ty.entity_name()?, &access.member.name)
    }
}
