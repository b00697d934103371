use std::sync::Arc;

use crate::config::Config;
use crate::extract::{FileTextExtractor, TextExtractor};
use crate::suggest::SuggestionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<dyn TextExtractor>,
    /// Remote suggestion provider. `None` keeps suggestions local.
    pub suggestions: Option<Arc<dyn SuggestionProvider>>,
}

impl AppState {
    /// State with the default extractor and no remote provider.
    pub fn local(config: Config) -> Self {
        Self {
            extractor: Arc::new(FileTextExtractor::new(config.max_upload_bytes)),
            suggestions: None,
            config,
        }
    }
}
