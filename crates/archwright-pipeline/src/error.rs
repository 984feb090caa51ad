//! Error types for the pipeline crate.

use thiserror::Error;

/// Longest raw-output excerpt carried in an error.
pub const SNIPPET_CHARS: usize = 500;

/// The generation output could not be turned into a valid Architecture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ExtractionError {
    /// What went wrong (syntax, missing field, empty field, ...).
    pub reason: String,
    /// Leading excerpt of the offending output.
    pub raw_snippet: String,
}

impl ExtractionError {
    pub(crate) fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw_snippet: snippet(raw),
        }
    }
}

/// Failures talking to the text-generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The client could not be built (missing key, bad endpoint).
    #[error("generation service not configured: {0}")]
    NotConfigured(String),

    /// The request never produced an HTTP response.
    #[error("generation request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("generation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but the body was not understood.
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),

    /// The service produced no usable text.
    #[error("generation service returned no text")]
    EmptyResponse,

    /// The architecture context could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of a single price lookup. Never escapes the aggregator.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("price lookup request failed: {0}")]
    Transport(String),

    #[error("price catalog returned status {0}")]
    Status(u16),

    #[error("invalid price catalog response: {0}")]
    Decode(String),
}

/// Errors surfaced by pipeline entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before calling the generation service.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The generation service answered but no valid Architecture could be extracted.
    #[error("malformed response from generation service: {reason}")]
    MalformedResponse { reason: String, raw_snippet: String },

    /// The generation service itself failed.
    #[error("generation service failure: {0}")]
    GenerationServiceFailure(#[from] GenerationError),

    /// Collaborator clients could not be built from configuration.
    #[error("pipeline configuration error: {0}")]
    Configuration(String),
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        PipelineError::MalformedResponse {
            reason: err.reason,
            raw_snippet: err.raw_snippet,
        }
    }
}

/// Leading excerpt of `raw`, cut on a char boundary.
pub fn snippet(raw: &str) -> String {
    match raw.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => raw[..idx].to_string(),
        None => raw.to_string(),
    }
}
