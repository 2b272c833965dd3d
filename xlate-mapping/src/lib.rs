//! Mapping metadata for xlate.
//!
//! - [`ExpressionMapping`] / [`MappingRegistry`]: templates declared per method or property.
//! - [`DataModel`]: entities, column mappings and model-level functions.
//! - [`MetadataReader`]: per-model view used by converters while translating.
//! - [`TranslationTools`]: the injectable strategy that builds readers.
//! - [`MetadataReaderCache`]: one reader per model, shared across translations.
#![forbid(unsafe_code)]

pub mod cache;
pub mod mapping;
pub mod model;
pub mod reader;
pub mod tools;

pub use cache::MetadataReaderCache;
pub use mapping::{ExpressionMapping, MappingOptions, MappingRegistry};
pub use model::{DataModel, EntityBuilder, EntityModel, ModelBuilder, ModelId, PropertyModel, PropertyBuilder};
pub use reader::{ColumnDescriptor, MetadataReader, ModelMetadataReader};
pub use tools::{DefaultTranslationTools, TranslationTools};
