//! End-to-end pipeline scenarios over in-process collaborators.
//!
//! Run with: cargo test -p archwright-pipeline --test scenarios

use std::sync::{Arc, Mutex};

use archwright_pipeline::{
    CatalogItem, GenerationError, GenerationRequest, PipelineError, PriceLookup, PricingError,
    RecommendationPipeline, TextGenerator, extract_architecture,
};
use async_trait::async_trait;

const BLOG_JSON: &str = r#"{
  "summary": "A simple blog with low traffic, hosted on PaaS.",
  "architecture": {
    "core_services": ["Azure App Service", "Azure Database for MySQL"],
    "compute": "App Service Basic B1",
    "storage": "Azure Database for MySQL Flexible Server, Burstable B1ms",
    "networking": "Public endpoint with HTTPS only",
    "security": "Managed identity, TLS 1.2, firewall rules"
  },
  "cost_estimate": {
    "monthly_range": "$25 - $45 USD",
    "breakdown": ["App Service B1: $13", "MySQL B1ms: $12"]
  },
  "deployment_steps": ["Create resource group", "Create MySQL server", "Deploy app"],
  "considerations": ["Backups are retained for 7 days"]
}"#;

struct Canned {
    reply: String,
    calls: Mutex<usize>,
}

impl Canned {
    fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for Canned {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.reply.clone())
    }
}

/// Knows only "Virtual Machines"; anything else matches nothing.
struct VmOnlyCatalog;

#[async_trait]
impl PriceLookup for VmOnlyCatalog {
    async fn lookup(&self, catalog_name: &str) -> Result<Vec<CatalogItem>, PricingError> {
        if catalog_name == "Virtual Machines" {
            Ok(vec![CatalogItem {
                retail_price: Some(0.018),
                unit_of_measure: Some("1 Hour".to_string()),
                arm_region_name: Some("eastus".to_string()),
                sku_name: Some("B1".to_string()),
            }])
        } else {
            Ok(Vec::new())
        }
    }
}

fn is_usd_range(range: &str) -> bool {
    // "$X - $Y USD"
    let Some(rest) = range.strip_suffix(" USD") else {
        return false;
    };
    let Some((low, high)) = rest.split_once(" - ") else {
        return false;
    };
    [low, high].iter().all(|side| {
        side.strip_prefix('$')
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.'))
    })
}

#[tokio::test]
async fn scenario_a_fenced_json_yields_architecture() {
    let generator = Canned::new(format!("```json\n{BLOG_JSON}\n```"));
    let pipeline = RecommendationPipeline::new(generator.clone(), Arc::new(VmOnlyCatalog));

    let arch = pipeline.analyze("simple blog, low traffic").await.unwrap();

    assert!(!arch.core_services().is_empty());
    assert!(is_usd_range(&arch.cost_estimate.monthly_range));
    assert_eq!(generator.calls(), 1);
}

#[test]
fn scenario_b_prose_wrapped_fence_is_extracted() {
    let raw = format!("Sure! ```json\n{BLOG_JSON}\n```\nLet me know if you need changes.");
    let arch = extract_architecture(&raw).unwrap();
    assert_eq!(arch.core_services()[0], "Azure App Service");
}

#[tokio::test]
async fn scenario_c_pricing_populated_and_sentinel() {
    let pipeline = RecommendationPipeline::new(Canned::new(""), Arc::new(VmOnlyCatalog));

    let report = pipeline
        .get_pricing(&[
            "Azure App Service".to_string(),
            "Unknown Widget Service".to_string(),
        ])
        .await;

    assert_eq!(report.len(), 2);
    let app = &report["Azure App Service"];
    assert_eq!(app.price, 0.018);
    assert_eq!(app.sku_name, "B1");
    let unknown = &report["Unknown Widget Service"];
    assert_eq!(unknown.price, 0.0);
    assert_eq!(unknown.unit, "N/A");
    assert_eq!(unknown.sku_name, "Contact Azure");
}

#[tokio::test]
async fn scenario_d_empty_requirements_rejected_before_generation() {
    let generator = Canned::new(BLOG_JSON);
    let pipeline = RecommendationPipeline::new(generator.clone(), Arc::new(VmOnlyCatalog));

    let err = pipeline.analyze("").await.unwrap_err();

    assert!(matches!(err, PipelineError::InvalidInput(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn artifacts_can_be_requested_concurrently() {
    let generator = Canned::new("graph TB\n    A[Users] --> B[Azure App Service]");
    let pipeline = RecommendationPipeline::new(generator.clone(), Arc::new(VmOnlyCatalog));
    let arch = extract_architecture(BLOG_JSON).unwrap();

    let (diagram, code, pricing) = tokio::join!(
        pipeline.generate_diagram(&arch),
        pipeline.generate_infrastructure_code(&arch),
        pipeline.get_pricing(arch.core_services()),
    );

    assert!(diagram.unwrap().starts_with("graph TB"));
    assert!(code.is_ok());
    assert_eq!(pricing.len(), arch.core_services().len());
    assert_eq!(generator.calls(), 2);
}

#[test]
fn usd_range_pattern() {
    assert!(is_usd_range("$25 - $45 USD"));
    assert!(is_usd_range("$1,200 - $2,500.50 USD"));
    assert!(!is_usd_range("25-45 dollars"));
}
