//! Follow-up questions about an existing recommendation.

use std::sync::Arc;

use archwright_core::Architecture;

use crate::error::GenerationError;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::prompts;

/// Single-turn Q&A. No history is kept between calls.
pub struct QuestionAnswerer {
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl QuestionAnswerer {
    pub fn new(generator: Arc<dyn TextGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }

    /// Returns the service's prose answer unmodified.
    pub async fn ask(&self, question: &str, context: &Architecture) -> Result<String, GenerationError> {
        let prompt = prompts::question_prompt(context, question)?;
        self.generator
            .generate(GenerationRequest::new(prompt, self.max_tokens))
            .await
    }
}
