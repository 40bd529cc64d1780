use crate::capture::CapturedImage;
use crate::core::error::StepError;
use crate::prompts::{EMPTY_REPLY_FALLBACK, ERROR_REPLY_FALLBACK};
use crate::providers::ReplyProvider;
use crate::session::message::Message;
use async_trait::async_trait;
use tracing::warn;

mod client;
pub mod types;

pub use client::GeminiClient;

/// Gemini-backed companion provider.
#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, model: String, temperature: f64) -> Self {
        let base_url = "https://generativelanguage.googleapis.com".to_string();
        Self::with_endpoint(base_url, api_key, model, temperature)
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: Option<String>,
        model: String,
        temperature: f64,
    ) -> Self {
        let api_key = api_key.unwrap_or_default();
        Self {
            client: GeminiClient::new(endpoint, api_key, model, temperature),
        }
    }
}

#[async_trait]
impl ReplyProvider for GeminiProvider {
    async fn reply(
        &self,
        history: &[Message],
        new_text: Option<&str>,
        new_image: Option<&CapturedImage>,
    ) -> String {
        resolve_reply(self.client.generate(history, new_text, new_image).await)
    }
}

/// Collapses a request outcome into the text the user will see. Failures
/// and empty replies map to distinct canned fallbacks; the error itself
/// only reaches the diagnostic log.
fn resolve_reply(outcome: Result<Option<String>, StepError>) -> String {
    match outcome {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_REPLY_FALLBACK.to_string(),
        Err(err) => {
            warn!("generation request failed: {err}");
            ERROR_REPLY_FALLBACK.to_string()
        }
    }
}
