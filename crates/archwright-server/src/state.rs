//! Shared application state.

use std::sync::Arc;

use archwright_pipeline::RecommendationPipeline;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pipeline: Arc<RecommendationPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<RecommendationPipeline>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pipeline }),
        }
    }

    pub fn pipeline(&self) -> &RecommendationPipeline {
        &self.inner.pipeline
    }
}
