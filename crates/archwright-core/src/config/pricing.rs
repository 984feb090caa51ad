//! Retail price catalog configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for price lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Retail prices endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Currency code used in the lookup filter.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of catalog items requested per lookup.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound on lookups in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-lookup timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra display-name to catalog-name entries, layered over the built-in table.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            currency: default_currency(),
            page_size: default_page_size(),
            max_concurrency: default_max_concurrency(),
            timeout_secs: default_timeout_secs(),
            aliases: BTreeMap::new(),
        }
    }
}

fn default_endpoint() -> String {
    "https://prices.azure.com/api/retail/prices".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_max_concurrency() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    30
}
