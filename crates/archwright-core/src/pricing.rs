//! Unit pricing records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Region reported when the catalog gives none.
pub const DEFAULT_REGION: &str = "eastus";
/// Unit reported when the catalog gives none.
pub const DEFAULT_UNIT: &str = "Hour";
/// SKU reported when the catalog gives none.
pub const DEFAULT_SKU: &str = "Standard";

/// Unit of a sentinel record.
pub const SENTINEL_UNIT: &str = "N/A";
/// SKU of a sentinel record when the catalog had no match.
pub const SKU_NO_MATCH: &str = "Contact Azure";
/// SKU of a sentinel record when the lookup itself failed.
pub const SKU_LOOKUP_ERROR: &str = "Error";

/// Best-match retail price for one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Non-negative unit price.
    pub price: f64,
    pub unit: String,
    pub region: String,
    pub sku_name: String,
}

impl PriceRecord {
    /// Sentinel for a lookup that matched nothing.
    pub fn no_match() -> Self {
        Self::sentinel(SKU_NO_MATCH)
    }

    /// Sentinel for a lookup that failed outright.
    pub fn lookup_error() -> Self {
        Self::sentinel(SKU_LOOKUP_ERROR)
    }

    fn sentinel(sku_name: &str) -> Self {
        Self {
            price: 0.0,
            unit: SENTINEL_UNIT.to_string(),
            region: DEFAULT_REGION.to_string(),
            sku_name: sku_name.to_string(),
        }
    }

    /// Whether this record stands in for missing price data.
    pub fn is_sentinel(&self) -> bool {
        self.unit == SENTINEL_UNIT && self.price == 0.0
    }

    /// `$0.0130 per Hour | B1 | eastus`
    pub fn describe(&self) -> String {
        format!(
            "${:.4} per {} | {} | {}",
            self.price, self.unit, self.sku_name, self.region
        )
    }
}

/// Service name (as requested) to price record, in request order.
pub type PricingReport = IndexMap<String, PriceRecord>;
