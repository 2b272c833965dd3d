//! Host data model: entities, their column mappings and model-level functions.
//!
//! Entities are configured with the same fluent vocabulary host mapping layers use:
//!
//! ```
//! use xlate_expr::ValueType;
//! use xlate_mapping::DataModel;
//!
//! let model = DataModel::builder()
//!     .entity("Region", |e| {
//!         e.has_key("RegionId");
//!         e.property("RegionId", ValueType::Int32).has_column_name("RegionID");
//!         e.property("RegionDescription", ValueType::String)
//!             .is_required()
//!             .has_max_length(50);
//!     })
//!     .build();
//! assert_eq!(model.entity("Region").unwrap().properties().len(), 2);
//! ```

use crate::mapping::{ExpressionMapping, MappingRegistry};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use xlate_expr::{MemberRef, ValueType};
use xlate_result::Result;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`DataModel`]; the metadata-reader cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// Storage mapping of one entity property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    pub name: String,
    pub column_name: String,
    pub ty: ValueType,
    pub is_required: bool,
    pub max_length: Option<usize>,
}

/// Storage mapping of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityModel {
    name: String,
    table: String,
    key: Vec<String>,
    properties: Vec<PropertyModel>,
}

impl EntityModel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table: name.to_string(),
            key: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_key(&self, property: &str) -> bool {
        self.key.iter().any(|k| k == property)
    }
}

/// A configured data model.
#[derive(Debug)]
pub struct DataModel {
    id: ModelId,
    entities: FxHashMap<String, EntityModel>,
    functions: MappingRegistry,
}

impl DataModel {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityModel> {
        self.entities.values()
    }

    /// Database functions mapped at the model level.
    pub fn functions(&self) -> &MappingRegistry {
        &self.functions
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    entities: FxHashMap<String, EntityModel>,
    functions: MappingRegistry,
}

impl ModelBuilder {
    /// Configure entity `name`, creating it on first use.
    pub fn entity(mut self, name: &str, configure: impl FnOnce(&mut EntityBuilder<'_>)) -> Self {
        let entity = self
            .entities
            .entry(name.to_string())
            .or_insert_with(|| EntityModel::new(name));
        configure(&mut EntityBuilder { entity });
        self
    }

    /// Map a database function for this model.
    pub fn function(mut self, member: MemberRef, mapping: ExpressionMapping) -> Result<Self> {
        self.functions.register(member, mapping)?;
        Ok(self)
    }

    pub fn build(self) -> DataModel {
        let model = DataModel {
            id: ModelId::next(),
            entities: self.entities,
            functions: self.functions,
        };
        tracing::debug!(
            model = %model.id,
            entities = model.entities.len(),
            functions = model.functions.len(),
            "built data model"
        );
        model
    }
}

pub struct EntityBuilder<'a> {
    entity: &'a mut EntityModel,
}

impl EntityBuilder<'_> {
    pub fn map_to_table(&mut self, table: &str) -> &mut Self {
        self.entity.table = table.to_string();
        self
    }

    pub fn has_key(&mut self, property: &str) -> &mut Self {
        if !self.entity.is_key(property) {
            self.entity.key.push(property.to_string());
        }
        self
    }

    /// Configure property `name`; its column name defaults to the property name.
    pub fn property(&mut self, name: &str, ty: ValueType) -> PropertyBuilder<'_> {
        let properties = &mut self.entity.properties;
        let idx = match properties.iter().position(|p| p.name == name) {
            Some(idx) => {
                properties[idx].ty = ty;
                idx
            }
            None => {
                properties.push(PropertyModel {
                    name: name.to_string(),
                    column_name: name.to_string(),
                    ty,
                    is_required: false,
                    max_length: None,
                });
                properties.len() - 1
            }
        };
        PropertyBuilder {
            property: &mut properties[idx],
        }
    }
}

pub struct PropertyBuilder<'a> {
    property: &'a mut PropertyModel,
}

impl PropertyBuilder<'_> {
    pub fn has_column_name(self, column: &str) -> Self {
        self.property.column_name = column.to_string();
        self
    }

    pub fn is_required(self) -> Self {
        self.property.is_required = true;
        self
    }

    pub fn has_max_length(self, length: usize) -> Self {
        self.property.max_length = Some(length);
        self
    }
}
