use serde_json::{Map, Value};

use crate::error::{Result, TutorError};

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub model: String,
    pub text: String,
    pub usage: Value,
}

impl Completion {
    /// Pulls the first choice's text out of a chat-completions response.
    ///
    /// `fallback_model` is reported when the provider omits `model`; a missing `usage`
    /// block becomes an empty object.
    pub fn from_response(raw: &Value, fallback_model: &str) -> Result<Self> {
        let first_choice = raw
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .ok_or_else(|| TutorError::UpstreamProtocol("no choices returned".to_string()))?;

        let text = first_choice
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                TutorError::UpstreamProtocol("first choice has no message content".to_string())
            })?;

        let model = raw
            .get("model")
            .and_then(|model| model.as_str())
            .unwrap_or(fallback_model);

        let usage = raw
            .get("usage")
            .filter(|usage| !usage.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        Ok(Self {
            model: model.to_string(),
            text: text.to_string(),
            usage,
        })
    }
}
