//! Diagram generation.

use std::sync::Arc;

use archwright_core::Architecture;

use crate::error::GenerationError;
use crate::extract::strip_fences;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::prompts;

/// Produces a Mermaid `graph TB` flowchart for an architecture.
///
/// The returned text is fence-stripped but otherwise unchecked; a diagram
/// that fails to render is the presentation layer's problem.
pub struct DiagramGenerator {
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl DiagramGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }

    pub async fn generate(&self, arch: &Architecture) -> Result<String, GenerationError> {
        let prompt = prompts::diagram_prompt(arch)?;
        let raw = self
            .generator
            .generate(GenerationRequest::new(prompt, self.max_tokens))
            .await?;

        let diagram = strip_fences(&raw);
        if diagram.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        tracing::debug!(lines = diagram.lines().count(), "Generated diagram");
        Ok(diagram)
    }
}
