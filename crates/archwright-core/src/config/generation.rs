//! Text-generation service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Messages API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (prefer `api_key_env`).
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable containing the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Token limit for the architecture analysis call.
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    /// Token limit for diagram generation.
    #[serde(default = "default_diagram_max_tokens")]
    pub diagram_max_tokens: u32,

    /// Token limit for infrastructure-code generation.
    #[serde(default = "default_infrastructure_max_tokens")]
    pub infrastructure_max_tokens: u32,

    /// Token limit for follow-up answers.
    #[serde(default = "default_answer_max_tokens")]
    pub answer_max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            analysis_max_tokens: default_analysis_max_tokens(),
            diagram_max_tokens: default_diagram_max_tokens(),
            infrastructure_max_tokens: default_infrastructure_max_tokens(),
            answer_max_tokens: default_answer_max_tokens(),
        }
    }
}

impl GenerationConfig {
    /// Get the API key, checking `api_key_env` first.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }
}

fn default_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_api_key_env() -> Option<String> {
    Some("ANTHROPIC_API_KEY".to_string())
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_analysis_max_tokens() -> u32 {
    4000
}

fn default_diagram_max_tokens() -> u32 {
    2000
}

fn default_infrastructure_max_tokens() -> u32 {
    3000
}

fn default_answer_max_tokens() -> u32 {
    2000
}
