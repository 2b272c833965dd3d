//! Shared cache of metadata readers, one per data model.
//!
//! A cache owns the [`TranslationTools`] that build its readers, so every reader it hands
//! out comes from the same tools. The cache is read-heavy and append-only: a reader is built the first time a model is
//! seen and is never evicted. Population is insert-if-absent under the write lock, so
//! concurrent first requests for the same model build exactly one reader and every caller
//! receives the same `Arc`. The reader for "no model" lives in a `OnceLock`.

use crate::model::{DataModel, ModelId};
use crate::reader::MetadataReader;
use crate::tools::TranslationTools;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

pub struct MetadataReaderCache {
    tools: Arc<dyn TranslationTools>,
    readers: RwLock<FxHashMap<ModelId, Arc<dyn MetadataReader>>>,
    default_reader: OnceLock<Arc<dyn MetadataReader>>,
}

impl fmt::Debug for MetadataReaderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataReaderCache")
            .field("tools", &self.tools)
            .field("models", &self.len())
            .field("default_initialized", &self.default_reader.get().is_some())
            .finish()
    }
}

impl MetadataReaderCache {
    pub fn new(tools: Arc<dyn TranslationTools>) -> Self {
        Self {
            tools,
            readers: RwLock::new(FxHashMap::default()),
            default_reader: OnceLock::new(),
        }
    }

    /// The tools every reader of this cache is built with.
    pub fn tools(&self) -> &Arc<dyn TranslationTools> {
        &self.tools
    }

    /// Reader for `model`, building it on first request.
    pub fn get(&self, model: Option<&Arc<DataModel>>) -> Arc<dyn MetadataReader> {
        let tools = self.tools.as_ref();
        let Some(model) = model else {
            return Arc::clone(self.default_reader.get_or_init(|| {
                tracing::debug!("building default metadata reader");
                tools.create_metadata_reader(None)
            }));
        };

        let id = model.id();
        {
            // The map is append-only, so a poisoned lock still holds consistent entries.
            let readers = self.readers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(reader) = readers.get(&id) {
                return Arc::clone(reader);
            }
        }

        let mut readers = self.readers.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(readers.entry(id).or_insert_with(|| {
            tracing::debug!(model = %id, "building metadata reader");
            tools.create_metadata_reader(Some(model))
        }))
    }

    /// Number of models with a cached reader.
    pub fn len(&self) -> usize {
        self.readers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
