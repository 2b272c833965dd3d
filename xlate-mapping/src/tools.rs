//! The injectable strategy that builds metadata readers.
//!
//! Callers hand a `TranslationTools` implementation to each translation context instead
//! of swapping a process-wide implementation.

use crate::mapping::MappingRegistry;
use crate::model::DataModel;
use crate::reader::{MetadataReader, ModelMetadataReader};
use std::fmt;
use std::sync::Arc;

pub trait TranslationTools: Send + Sync + fmt::Debug {
    /// Build the reader for `model`, or the default reader when `model` is `None`.
    ///
    /// Called at most once per model by the metadata-reader cache.
    fn create_metadata_reader(&self, model: Option<&Arc<DataModel>>) -> Arc<dyn MetadataReader>;
}

/// Builds [`ModelMetadataReader`]s that share one function registry.
#[derive(Debug, Clone, Default)]
pub struct DefaultTranslationTools {
    functions: Arc<MappingRegistry>,
}

impl DefaultTranslationTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `functions` as the mappings every reader falls back to.
    pub fn with_functions(functions: MappingRegistry) -> Self {
        Self {
            functions: Arc::new(functions),
        }
    }

    pub fn functions(&self) -> &MappingRegistry {
        &self.functions
    }
}

impl TranslationTools for DefaultTranslationTools {
    fn create_metadata_reader(&self, model: Option<&Arc<DataModel>>) -> Arc<dyn MetadataReader> {
        Arc::new(ModelMetadataReader::new(
            model.cloned(),
            Arc::clone(&self.functions),
        ))
    }
}
