//! The structured architecture recommendation.
//!
//! The wire shape nests the component descriptions under an `architecture`
//! key, matching the JSON contract handed to the generation service:
//!
//! ```json
//! {
//!   "summary": "...",
//!   "architecture": {
//!     "core_services": ["Azure App Service"],
//!     "compute": "...", "storage": "...", "networking": "...", "security": "..."
//!   },
//!   "cost_estimate": { "monthly_range": "$50 - $120 USD", "breakdown": ["..."] },
//!   "deployment_steps": ["..."],
//!   "considerations": ["..."]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated cloud-architecture recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    /// Short prose summary of the project.
    pub summary: String,

    /// Service selection and per-layer descriptions.
    #[serde(rename = "architecture")]
    pub components: Components,

    /// Coarse monthly cost estimate.
    pub cost_estimate: CostEstimate,

    /// Ordered deployment steps (execution order).
    pub deployment_steps: Vec<String>,

    /// Unordered considerations.
    pub considerations: Vec<String>,
}

/// Service selection and free-text layer descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Catalog service names, in recommendation order.
    pub core_services: Vec<String>,
    pub compute: String,
    pub storage: String,
    pub networking: String,
    pub security: String,
}

/// Static cost estimate produced alongside the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Human-readable range, e.g. `"$50 - $120 USD"`.
    pub monthly_range: String,
    /// Line items, e.g. `"App Service B1: $13"`.
    pub breakdown: Vec<String>,
}

/// Schema violations beyond field presence and shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// `architecture.core_services` is empty.
    #[error("architecture.core_services must contain at least one service")]
    NoCoreServices,

    /// A required description field is blank.
    #[error("field {0} must not be empty")]
    EmptyField(&'static str),
}

impl Architecture {
    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.components.core_services.is_empty() {
            return Err(SchemaError::NoCoreServices);
        }

        let descriptions = [
            ("architecture.compute", &self.components.compute),
            ("architecture.storage", &self.components.storage),
            ("architecture.networking", &self.components.networking),
            ("architecture.security", &self.components.security),
        ];
        for (name, value) in descriptions {
            if value.trim().is_empty() {
                return Err(SchemaError::EmptyField(name));
            }
        }

        Ok(())
    }

    /// Catalog service names, in recommendation order.
    pub fn core_services(&self) -> &[String] {
        &self.components.core_services
    }

    /// Service names that appear more than once in `core_services`.
    pub fn duplicate_services(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for service in &self.components.core_services {
            if !seen.insert(service.as_str()) && !duplicates.contains(&service.as_str()) {
                duplicates.push(service.as_str());
            }
        }
        duplicates
    }
}
