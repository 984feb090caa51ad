//! Recommendation orchestration.
//!
//! [`RecommendationPipeline::analyze`] turns requirements text into a
//! validated [`Architecture`]. The derived artifacts are separate calls, each
//! failing on its own without touching the architecture already obtained.

use std::sync::Arc;

use archwright_core::{Architecture, ArchwrightConfig, GenerationConfig, PricingReport};

use crate::diagram::DiagramGenerator;
use crate::error::PipelineError;
use crate::extract::extract_architecture;
use crate::generation::{AnthropicGenerator, GenerationRequest, TextGenerator};
use crate::infrastructure::InfrastructureCodeGenerator;
use crate::pricing::{PriceLookup, PricingAggregator, RetailPriceClient, ServiceCatalog};
use crate::prompts;
use crate::qa::QuestionAnswerer;

/// Entry point for analysis and artifact generation.
pub struct RecommendationPipeline {
    generator: Arc<dyn TextGenerator>,
    analysis_max_tokens: u32,
    diagrams: DiagramGenerator,
    infrastructure: InfrastructureCodeGenerator,
    pricing: PricingAggregator,
    questions: QuestionAnswerer,
}

impl RecommendationPipeline {
    /// Build a pipeline over the given collaborators with default limits.
    pub fn new(generator: Arc<dyn TextGenerator>, lookup: Arc<dyn PriceLookup>) -> Self {
        Self::with_limits(generator, lookup, &GenerationConfig::default())
    }

    /// Build a pipeline using the token limits in `limits`.
    pub fn with_limits(
        generator: Arc<dyn TextGenerator>,
        lookup: Arc<dyn PriceLookup>,
        limits: &GenerationConfig,
    ) -> Self {
        Self {
            analysis_max_tokens: limits.analysis_max_tokens,
            diagrams: DiagramGenerator::new(generator.clone(), limits.diagram_max_tokens),
            infrastructure: InfrastructureCodeGenerator::new(
                generator.clone(),
                limits.infrastructure_max_tokens,
            ),
            questions: QuestionAnswerer::new(generator.clone(), limits.answer_max_tokens),
            pricing: PricingAggregator::new(lookup),
            generator,
        }
    }

    /// Replace the pricing aggregator's catalog and concurrency.
    pub fn with_pricing(mut self, catalog: ServiceCatalog, max_concurrency: usize) -> Self {
        self.pricing = self
            .pricing
            .with_catalog(catalog)
            .with_max_concurrency(max_concurrency);
        self
    }

    /// Build a pipeline with the HTTP collaborators described by `config`.
    pub fn from_config(config: &ArchwrightConfig) -> Result<Self, PipelineError> {
        let generator = AnthropicGenerator::from_config(&config.generation)
            .map_err(|e| PipelineError::Configuration(e.to_string()))?;
        let lookup = RetailPriceClient::from_config(&config.pricing)
            .map_err(|e| PipelineError::Configuration(format!("pricing client: {e}")))?;

        tracing::info!(
            model = %generator.model(),
            pricing_endpoint = %config.pricing.endpoint,
            "Recommendation pipeline configured"
        );

        Ok(Self::with_limits(Arc::new(generator), Arc::new(lookup), &config.generation)
            .with_pricing(
                ServiceCatalog::builtin().with_aliases(&config.pricing.aliases),
                config.pricing.max_concurrency,
            ))
    }

    /// Recommend an architecture for `requirements`.
    ///
    /// Blank requirements are rejected without calling the generation service.
    pub async fn analyze(&self, requirements: &str) -> Result<Architecture, PipelineError> {
        if requirements.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "requirements must not be empty".to_string(),
            ));
        }

        let prompt = prompts::analysis_prompt(requirements);
        let raw = self
            .generator
            .generate(GenerationRequest::new(prompt, self.analysis_max_tokens))
            .await?;
        tracing::debug!(response = %raw, "Analysis response");

        let arch = extract_architecture(&raw).inspect_err(|e| {
            tracing::warn!(reason = %e.reason, snippet = %e.raw_snippet, "Could not extract architecture");
        })?;

        let duplicates = arch.duplicate_services();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Recommendation lists duplicate core services");
        }

        tracing::info!(
            services = arch.core_services().len(),
            monthly_range = %arch.cost_estimate.monthly_range,
            "Architecture recommended"
        );
        Ok(arch)
    }

    /// Mermaid diagram for `arch`.
    pub async fn generate_diagram(&self, arch: &Architecture) -> Result<String, PipelineError> {
        check_architecture(arch)?;
        Ok(self.diagrams.generate(arch).await?)
    }

    /// Terraform for `arch`.
    pub async fn generate_infrastructure_code(
        &self,
        arch: &Architecture,
    ) -> Result<String, PipelineError> {
        check_architecture(arch)?;
        Ok(self.infrastructure.generate(arch).await?)
    }

    /// Unit prices for `services`. Never fails; see [`PricingAggregator`].
    pub async fn get_pricing(&self, services: &[String]) -> PricingReport {
        self.pricing.get_pricing(services).await
    }

    /// Answer a follow-up question about `context`.
    pub async fn ask(&self, question: &str, context: &Architecture) -> Result<String, PipelineError> {
        if question.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        check_architecture(context)?;
        Ok(self.questions.ask(question, context).await?)
    }
}

/// Architectures arriving from callers are re-checked before use.
fn check_architecture(arch: &Architecture) -> Result<(), PipelineError> {
    arch.validate()
        .map_err(|e| PipelineError::InvalidInput(format!("architecture: {e}")))
}
