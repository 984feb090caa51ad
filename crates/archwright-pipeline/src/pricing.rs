//! Per-service unit pricing.
//!
//! Each requested service is looked up independently against the retail
//! price catalog. A lookup that matches nothing or fails outright yields a
//! sentinel record, so the report always has one entry per service.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use archwright_core::pricing::{DEFAULT_REGION, DEFAULT_SKU, DEFAULT_UNIT};
use archwright_core::{PriceRecord, PricingConfig, PricingReport};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;

use crate::error::PricingError;

/// Display name to catalog name, for services whose catalog name differs.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Azure App Service", "Virtual Machines"),
    ("Azure Functions", "Functions"),
    ("Azure SQL Database", "SQL Database"),
    ("Azure Cosmos DB", "Azure Cosmos DB"),
    ("Azure Storage", "Storage"),
    ("Azure Blob Storage", "Storage"),
    ("Azure CDN", "Content Delivery Network"),
    ("Azure Media Services", "Media Services"),
    ("Azure SignalR Service", "SignalR Service"),
    ("Azure Communication Services", "Communication Services"),
    ("Azure Key Vault", "Key Vault"),
    ("Azure Application Gateway", "Application Gateway"),
    ("Azure Logic Apps", "Logic Apps"),
    ("Azure API Management", "API Management"),
];

/// One item from the retail price catalog. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub retail_price: Option<f64>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub arm_region_name: Option<String>,
    #[serde(default)]
    pub sku_name: Option<String>,
}

impl CatalogItem {
    /// Fill gaps with the documented fallbacks.
    pub fn to_record(&self) -> PriceRecord {
        PriceRecord {
            price: self
                .retail_price
                .filter(|p| p.is_finite() && *p >= 0.0)
                .unwrap_or(0.0),
            unit: non_empty(&self.unit_of_measure).unwrap_or(DEFAULT_UNIT).to_string(),
            region: non_empty(&self.arm_region_name)
                .unwrap_or(DEFAULT_REGION)
                .to_string(),
            sku_name: non_empty(&self.sku_name).unwrap_or(DEFAULT_SKU).to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Retail price catalog. Returns consumption prices for one catalog service name.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn lookup(&self, catalog_name: &str) -> Result<Vec<CatalogItem>, PricingError>;
}

/// [`PriceLookup`] over the public Azure retail prices API.
pub struct RetailPriceClient {
    client: reqwest::Client,
    endpoint: String,
    currency: String,
    page_size: u32,
}

#[derive(Deserialize)]
struct RetailPriceResponse {
    #[serde(rename = "Items", default)]
    items: Vec<CatalogItem>,
}

impl RetailPriceClient {
    pub fn from_config(config: &PricingConfig) -> Result<Self, PricingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PricingError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            currency: config.currency.clone(),
            page_size: config.page_size,
        })
    }

    /// Lookup URL for one catalog name.
    pub fn url_for(&self, catalog_name: &str) -> String {
        let filter = format!(
            "serviceName eq '{}' and priceType eq 'Consumption' and currencyCode eq '{}'",
            catalog_name.replace('\'', "''"),
            self.currency.replace('\'', "''"),
        );
        format!(
            "{}?$filter={}&$top={}",
            self.endpoint,
            urlencoding::encode(&filter),
            self.page_size
        )
    }
}

#[async_trait]
impl PriceLookup for RetailPriceClient {
    async fn lookup(&self, catalog_name: &str) -> Result<Vec<CatalogItem>, PricingError> {
        let response = self
            .client
            .get(self.url_for(catalog_name))
            .send()
            .await
            .map_err(|e| PricingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricingError::Status(status.as_u16()));
        }

        let body: RetailPriceResponse = response
            .json()
            .await
            .map_err(|e| PricingError::Decode(e.to_string()))?;
        Ok(body.items)
    }
}

/// Display-name to catalog-name translation.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    aliases: HashMap<String, String>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ServiceCatalog {
    /// The built-in alias table.
    pub fn builtin() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(display, catalog)| (display.to_string(), catalog.to_string()))
                .collect(),
        }
    }

    /// Layer extra aliases over the current table.
    pub fn with_aliases(mut self, extra: &BTreeMap<String, String>) -> Self {
        self.aliases
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Catalog name for a display name. Unmapped names pass through.
    pub fn catalog_name<'a>(&'a self, service: &'a str) -> &'a str {
        self.aliases.get(service).map(String::as_str).unwrap_or(service)
    }
}

/// Joins independent best-effort lookups into one [`PricingReport`].
pub struct PricingAggregator {
    lookup: Arc<dyn PriceLookup>,
    catalog: ServiceCatalog,
    max_concurrency: usize,
}

impl PricingAggregator {
    pub fn new(lookup: Arc<dyn PriceLookup>) -> Self {
        Self {
            lookup,
            catalog: ServiceCatalog::builtin(),
            max_concurrency: 8,
        }
    }

    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// One record per distinct requested service, in request order.
    pub async fn get_pricing(&self, services: &[String]) -> PricingReport {
        let mut seen = HashSet::new();
        let distinct: Vec<String> = services
            .iter()
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect();

        let records: Vec<(String, PriceRecord)> = futures::stream::iter(distinct)
            .map(|service: String| async move {
                let record = self.price_for(&service).await;
                (service, record)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        records.into_iter().collect()
    }

    async fn price_for(&self, service: &str) -> PriceRecord {
        let catalog_name = self.catalog.catalog_name(service);

        match self.lookup.lookup(catalog_name).await {
            Ok(items) => match items.first() {
                Some(item) => item.to_record(),
                None => {
                    tracing::debug!(service, catalog_name, "No catalog match");
                    PriceRecord::no_match()
                }
            },
            Err(e) => {
                tracing::warn!(service, catalog_name, error = %e, "Price lookup failed");
                PriceRecord::lookup_error()
            }
        }
    }
}
