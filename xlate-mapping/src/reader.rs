//! Metadata readers: how model elements map onto backend storage.

use crate::mapping::{ExpressionMapping, MappingRegistry};
use crate::model::{DataModel, ModelId};
use std::fmt;
use std::sync::Arc;
use xlate_expr::{MemberRef, ValueType};

/// Column hint handed to converters alongside a sub-expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub table: String,
    pub column_name: String,
    pub member: MemberRef,
    pub ty: ValueType,
    pub can_be_null: bool,
    pub length: Option<usize>,
    pub is_primary_key: bool,
}

/// Per-model view of storage attributes and expression mappings.
///
/// Readers are shared across threads through the metadata-reader cache, so they must be
/// immutable once constructed.
pub trait MetadataReader: Send + Sync + fmt::Debug {
    /// Identity of the model this reader was built for, `None` for the default reader.
    fn model_id(&self) -> Option<ModelId>;

    /// Column mapping of `entity.member`, if the member is mapped.
    fn column(&self, entity: &str, member: &str) -> Option<ColumnDescriptor>;

    /// Expression mapping registered for `member`, if any.
    fn expression_mapping(&self, member: &MemberRef) -> Option<ExpressionMapping>;
}

/// Reader over an optional [`DataModel`] plus a shared function registry.
///
/// Model-level functions shadow the shared registry.
#[derive(Debug, Clone)]
pub struct ModelMetadataReader {
    model: Option<Arc<DataModel>>,
    functions: Arc<MappingRegistry>,
}

impl ModelMetadataReader {
    pub fn new(model: Option<Arc<DataModel>>, functions: Arc<MappingRegistry>) -> Self {
        Self { model, functions }
    }

    pub fn model(&self) -> Option<&Arc<DataModel>> {
        self.model.as_ref()
    }
}

impl MetadataReader for ModelMetadataReader {
    fn model_id(&self) -> Option<ModelId> {
        self.model.as_ref().map(|m| m.id())
    }

    fn column(&self, entity: &str, member: &str) -> Option<ColumnDescriptor> {
        let entity = self.model.as_ref()?.entity(entity)?;
        let property = entity.property(member)?;
        let is_primary_key = entity.is_key(member);
        Some(ColumnDescriptor {
            table: entity.table().to_string(),
            column_name: property.column_name.clone(),
            member: MemberRef::new(entity.name(), &property.name),
            ty: property.ty.clone(),
            can_be_null: !(property.is_required || is_primary_key),
            length: property.max_length,
            is_primary_key,
        })
    }

    fn expression_mapping(&self, member: &MemberRef) -> Option<ExpressionMapping> {
        self.model
            .as_ref()
            .and_then(|m| m.functions().get(member))
            .or_else(|| self.functions.get(member))
            .cloned()
    }
}
