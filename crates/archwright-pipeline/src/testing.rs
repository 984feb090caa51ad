//! In-memory collaborators for tests.
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for downstream crates' tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use archwright_core::{Architecture, Components, CostEstimate};
use async_trait::async_trait;

use crate::error::{GenerationError, PricingError};
use crate::generation::{GenerationRequest, TextGenerator};
use crate::pricing::{CatalogItem, PriceLookup};

enum Script {
    Always(String),
    Sequence(VecDeque<String>),
    Fail,
}

/// [`TextGenerator`] that replays canned output and records every request.
pub struct ScriptedGenerator {
    script: Mutex<Script>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    fn with_script(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_script(Script::Always(text.into()))
    }

    /// Answer requests with `replies` in order, then fail.
    pub fn sequence<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(Script::Sequence(
            replies.into_iter().map(Into::into).collect(),
        ))
    }

    /// Fail every request with a transport error.
    pub fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let mut script = self
            .script
            .lock()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        match &mut *script {
            Script::Always(text) => Ok(text.clone()),
            Script::Sequence(replies) => replies
                .pop_front()
                .ok_or_else(|| GenerationError::Transport("script exhausted".to_string())),
            Script::Fail => Err(GenerationError::Transport("connection refused".to_string())),
        }
    }
}

/// [`PriceLookup`] over a fixed table of catalog items.
#[derive(Default)]
pub struct FakeCatalog {
    items: HashMap<String, Vec<CatalogItem>>,
    failing: HashSet<String>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item for `catalog_name`.
    pub fn with_item(mut self, catalog_name: &str, item: CatalogItem) -> Self {
        self.items
            .entry(catalog_name.to_string())
            .or_default()
            .push(item);
        self
    }

    /// Make lookups of `catalog_name` fail.
    pub fn failing_for(mut self, catalog_name: &str) -> Self {
        self.failing.insert(catalog_name.to_string());
        self
    }
}

#[async_trait]
impl PriceLookup for FakeCatalog {
    async fn lookup(&self, catalog_name: &str) -> Result<Vec<CatalogItem>, PricingError> {
        if self.failing.contains(catalog_name) {
            return Err(PricingError::Status(503));
        }
        Ok(self.items.get(catalog_name).cloned().unwrap_or_default())
    }
}

/// A small, valid architecture.
pub fn sample_architecture() -> Architecture {
    Architecture {
        summary: "A low-traffic personal blog on managed Azure services.".to_string(),
        components: Components {
            core_services: vec![
                "Azure App Service".to_string(),
                "Azure SQL Database".to_string(),
                "Azure Key Vault".to_string(),
            ],
            compute: "App Service Basic B1 plan, single instance".to_string(),
            storage: "Azure SQL Database Basic tier".to_string(),
            networking: "Public HTTPS endpoint with a managed certificate".to_string(),
            security: "Managed identity with secrets in Key Vault".to_string(),
        },
        cost_estimate: CostEstimate {
            monthly_range: "$20 - $60 USD".to_string(),
            breakdown: vec![
                "App Service B1: $13".to_string(),
                "SQL Database Basic: $5".to_string(),
                "Key Vault: $1".to_string(),
            ],
        },
        deployment_steps: vec![
            "Create a resource group".to_string(),
            "Provision the SQL database".to_string(),
            "Deploy the web app".to_string(),
        ],
        considerations: vec![
            "Add a CDN if traffic grows".to_string(),
            "Enable automated backups".to_string(),
        ],
    }
}

/// [`sample_architecture`] as pretty-printed JSON.
pub fn sample_json() -> String {
    serde_json::to_string_pretty(&sample_architecture()).unwrap_or_default()
}
