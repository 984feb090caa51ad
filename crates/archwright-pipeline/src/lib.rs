//! # archwright-pipeline
//!
//! Turns a free-form project description into a validated [`Architecture`]
//! and derives artifacts from it on demand.
//!
//! ## Data flow
//!
//! ```text
//! requirements text
//!       │
//!       ▼
//! RecommendationPipeline::analyze ── TextGenerator ── extract_architecture
//!       │
//!       ▼
//! Architecture ──┬── generate_diagram              (Mermaid, fence-stripped)
//!                ├── generate_infrastructure_code  (Terraform, fence-stripped)
//!                ├── get_pricing                   (per-service, never fails)
//!                └── ask                           (free-form answer)
//! ```
//!
//! The generation service is never trusted to honour its output contract:
//! everything structured goes through [`extract_architecture`], and
//! "could not extract" is an ordinary [`PipelineError::MalformedResponse`].
//!
//! [`Architecture`]: archwright_core::Architecture

pub mod diagram;
pub mod error;
pub mod extract;
pub mod generation;
pub mod infrastructure;
pub mod orchestrator;
pub mod pricing;
pub mod prompts;
pub mod qa;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use diagram::DiagramGenerator;
pub use error::{ExtractionError, GenerationError, PipelineError, PricingError};
pub use extract::{extract_architecture, strip_fences};
pub use generation::{AnthropicGenerator, GenerationRequest, TextGenerator};
pub use infrastructure::InfrastructureCodeGenerator;
pub use orchestrator::RecommendationPipeline;
pub use pricing::{CatalogItem, PriceLookup, PricingAggregator, RetailPriceClient, ServiceCatalog};
pub use qa::QuestionAnswerer;
