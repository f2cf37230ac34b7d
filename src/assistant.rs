//! Product assistant
//!
//! Answers shopper questions about a product with a generative text model.
//! The cart never waits on this; callers ask for an answer and show it.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::products::Product;

/// Store name used in prompts.
pub const STORE_NAME: &str = "Lumina";

/// Reply when no generator is configured.
pub const UNAVAILABLE_REPLY: &str =
    "AI services are currently unavailable. Please check your API configuration.";

/// Reply when the generator fails.
pub const FAILURE_REPLY: &str =
    "I'm having trouble connecting to the brain right now. Please try again later.";

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Errors raised by a text generator.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model returned a non-2xx response or an unexpected body.
    #[error("unexpected response from model: {0}")]
    UnexpectedResponse(String),
}

/// Build the shopping-assistant prompt for a product question.
#[must_use]
pub fn build_prompt(store: &str, product_name: &str, description: &str, query: &str) -> String {
    format!(
        "You are a helpful shopping assistant for an e-commerce store called {store}.\n\
         The user is looking at a product named \"{product_name}\".\n\
         Product Description: \"{description}\".\n\
         \n\
         The user asks: \"{query}\"\n\
         \n\
         Provide a concise, helpful, and friendly answer (max 3 sentences) based on the product details provided.\n\
         If the answer isn't in the description, use your general knowledge about this type of product to be helpful,\n\
         but mention that specific details might vary."
    )
}

/// Something that turns a prompt into text.
#[automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Configuration for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,

    /// Model name, e.g. `"gemini-3-flash-preview"`
    pub model: String,

    /// API base URL, without a trailing slash
    pub base_url: String,
}

impl GeminiConfig {
    /// Config for the public endpoint and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// HTTP client for Gemini `generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(AssistantError::UnexpectedResponse(format!(
                "generateContent failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        parsed.text().ok_or_else(|| {
            AssistantError::UnexpectedResponse("response contained no text".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;

        let text: String = parts.iter().filter_map(|part| part.text.as_deref()).collect();

        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Answers product questions, degrading to canned replies.
#[derive(Debug)]
pub struct ProductAssistant<G> {
    store: String,
    generator: Option<G>,
}

impl<G: TextGenerator> ProductAssistant<G> {
    /// Create an assistant. Pass `None` when no model is configured.
    pub fn new(generator: Option<G>) -> Self {
        Self {
            store: STORE_NAME.to_string(),
            generator,
        }
    }

    /// Use a different store name in prompts.
    #[must_use]
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    /// Answer `query` about `product`. Never fails.
    pub async fn ask(&self, product: &Product<'_>, query: &str) -> String {
        let Some(generator) = &self.generator else {
            warn!(product = %product.id, "assistant asked without a configured model");

            return UNAVAILABLE_REPLY.to_string();
        };

        let prompt = build_prompt(&self.store, &product.name, &product.description, query);

        match generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(err) => {
                error!(product = %product.id, error = %err, "assistant request failed");

                FAILURE_REPLY.to_string()
            }
        }
    }
}
