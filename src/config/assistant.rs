//! Assistant Config

use clap::Args;
use lumina::assistant::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiClient, GeminiConfig};

/// Generative model settings for the product assistant.
#[derive(Debug, Args)]
pub(crate) struct AssistantConfig {
    /// Gemini API key; the assistant answers with a fallback message without one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

impl AssistantConfig {
    /// The configured client, if an API key is set.
    pub(crate) fn client(&self) -> Option<GeminiClient> {
        let api_key = self.gemini_api_key.as_deref().filter(|key| !key.trim().is_empty())?;

        Some(GeminiClient::new(GeminiConfig {
            api_key: api_key.to_string(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
        }))
    }
}
