//! Infrastructure-as-code generation.

use std::sync::Arc;

use archwright_core::Architecture;

use crate::error::GenerationError;
use crate::extract::strip_fences;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::prompts;

/// Produces Terraform for an architecture. The output is opaque text.
pub struct InfrastructureCodeGenerator {
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl InfrastructureCodeGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }

    pub async fn generate(&self, arch: &Architecture) -> Result<String, GenerationError> {
        let prompt = prompts::infrastructure_prompt(arch)?;
        let raw = self
            .generator
            .generate(GenerationRequest::new(prompt, self.max_tokens))
            .await?;

        let code = strip_fences(&raw);
        if code.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        tracing::debug!(lines = code.lines().count(), "Generated infrastructure code");
        Ok(code)
    }
}
