//! # archwright-core
//!
//! Shared types for the Archwright recommendation pipeline.
//!
//! - [`Architecture`]: the validated recommendation produced from a free-form
//!   requirements description. Either fully schema-valid or not constructed.
//! - [`PriceRecord`] / [`PricingReport`]: per-service unit prices, one record
//!   per requested service (sentinel records stand in for missing data).
//! - [`Analysis`]: a saved snapshot of one recommendation and its artifacts.
//! - [`config`]: the `archwright.yaml` configuration tree.

pub mod analysis;
pub mod architecture;
pub mod config;
pub mod pricing;

pub use analysis::Analysis;
pub use architecture::{Architecture, Components, CostEstimate, SchemaError};
pub use config::{
    ArchwrightConfig, ConfigError, GenerationConfig, LoggingConfig, PricingConfig, ServerConfig,
    StorageConfig,
};
pub use pricing::{PriceRecord, PricingReport};
