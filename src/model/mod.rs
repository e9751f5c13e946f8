pub mod completion;

use log::{debug, error, info};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, TutorError};
use crate::web::models::Message;

pub use completion::Completion;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
}

// Client for the OpenAI-compatible chat-completions endpoint
pub struct TutorModel {
    api_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl TutorModel {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Using completion endpoint at: {}", config.api_url);
        info!(
            "Default model: {} (timeout {}s)",
            config.model,
            config.timeout.as_secs()
        );

        // One pooled client for every request; the timeout covers the whole call
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
        })
    }

    // Single attempt, no retries. Any failure surfaces to the caller.
    pub async fn complete(&self, messages: &[Message]) -> Result<Value> {
        let payload = CompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        info!(
            "Sending {} messages to {} (max_tokens: {})",
            messages.len(),
            self.model,
            MAX_TOKENS
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Provider returned {}: {}", status, error_text);
            return Err(TutorError::Transport(format!(
                "provider returned {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let response_json: Value = serde_json::from_str(&body).map_err(|e| {
            TutorError::UpstreamProtocol(format!("response body is not JSON: {}", e))
        })?;
        debug!("Response JSON: {}", response_json);

        Ok(response_json)
    }

    pub async fn solve(&self, messages: &[Message]) -> Result<Completion> {
        let raw = self.complete(messages).await?;
        let completion = Completion::from_response(&raw, &self.model)?;
        info!("Response length: {} characters", completion.text.len());
        Ok(completion)
    }
}
