use std::sync::Arc;

use xlate_mapping::{
    DataModel, DefaultTranslationTools, MetadataReader, MetadataReaderCache, TranslationTools,
};

use crate::options::TranslationOptions;

/// Per-translation context threaded through converters.
///
/// The context carries the injected [`TranslationTools`] strategy rather than reading a
/// process-wide implementation, so different callers can translate with different tools
/// side by side. The tools live in the reader cache, so contexts sharing a cache also
/// share its tools. Cloning is cheap; clones share the cache.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    readers: Arc<MetadataReaderCache>,
    model: Option<Arc<DataModel>>,
    options: TranslationOptions,
}

/// Default tools, with options read from the environment.
impl Default for TranslationContext {
    fn default() -> Self {
        Self::new(Arc::new(DefaultTranslationTools::new()))
            .with_options(TranslationOptions::from_env())
    }
}

impl TranslationContext {
    /// A context with its own reader cache over `tools`.
    pub fn new(tools: Arc<dyn TranslationTools>) -> Self {
        Self::with_reader_cache(Arc::new(MetadataReaderCache::new(tools)))
    }

    /// A context sharing `readers`, and the tools behind it, with other contexts.
    pub fn with_reader_cache(readers: Arc<MetadataReaderCache>) -> Self {
        Self {
            readers,
            model: None,
            options: TranslationOptions::default(),
        }
    }

    /// Translate against `model`.
    pub fn with_model(mut self, model: Arc<DataModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_options(mut self, options: TranslationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tools(&self) -> &dyn TranslationTools {
        self.readers.tools().as_ref()
    }

    pub fn model(&self) -> Option<&Arc<DataModel>> {
        self.model.as_ref()
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    pub fn reader_cache(&self) -> &Arc<MetadataReaderCache> {
        &self.readers
    }

    /// The cached metadata reader for this context's model.
    pub fn metadata_reader(&self) -> Arc<dyn MetadataReader> {
        self.readers.get(self.model.as_ref())
    }
}

impl AsRef<TranslationOptions> for TranslationContext {
    fn as_ref(&self) -> &TranslationOptions {
        &self.options
    }
}
