//! API request and response types.
//!
//! Field names are camelCase on the wire.

use archwright_core::{Architecture, PricingReport};
use serde::{Deserialize, Serialize};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub requirements: String,
    /// Accepted for client compatibility; artifacts are separate calls.
    #[serde(default)]
    pub include_diagram: bool,
    /// Accepted for client compatibility; artifacts are separate calls.
    #[serde(default)]
    pub include_terraform: bool,
}

/// Body of `/generate-diagram` and `/generate-terraform`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArchitectureRequest {
    pub architecture: Architecture,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PricingRequest {
    pub services: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub context: Architecture,
}

// =============================================================================
// Responses
// =============================================================================

/// `{"success": true}` merged with the payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub architecture: Architecture,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramResponse {
    pub diagram_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformResponse {
    pub terraform_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PricingResponse {
    pub pricing: PricingReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}
