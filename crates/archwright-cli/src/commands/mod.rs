//! CLI command implementations.

pub mod analyze;
pub mod ask;
pub mod export;
pub mod pricing;
pub mod saved;
pub mod serve;

use std::sync::Arc;

use anyhow::Context;
use archwright_core::ArchwrightConfig;
use archwright_pipeline::{
    PricingAggregator, RecommendationPipeline, RetailPriceClient, ServiceCatalog,
};
use archwright_session::{FileAnalysisStore, Session};

/// Pipeline over the configured generation service and price catalog.
pub fn build_pipeline(config: &ArchwrightConfig) -> anyhow::Result<Arc<RecommendationPipeline>> {
    let pipeline = RecommendationPipeline::from_config(config)
        .context("Failed to set up the recommendation pipeline")?;
    Ok(Arc::new(pipeline))
}

/// Price lookups alone; needs no generation API key.
pub fn build_pricing(config: &ArchwrightConfig) -> anyhow::Result<PricingAggregator> {
    let client = RetailPriceClient::from_config(&config.pricing)
        .context("Failed to set up the pricing client")?;
    Ok(PricingAggregator::new(Arc::new(client))
        .with_catalog(ServiceCatalog::builtin().with_aliases(&config.pricing.aliases))
        .with_max_concurrency(config.pricing.max_concurrency))
}

/// Session backed by the configured saved-analyses file.
pub fn open_session(config: &ArchwrightConfig) -> Session {
    let store = FileAnalysisStore::from_config(&config.storage);
    tracing::debug!(path = %store.path().display(), "Using saved analyses file");
    Session::new(Arc::new(store))
}
