use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

// Plain text, or an ordered list of typed parts for vision input.
// Caller-supplied turns never decode into `Parts`: anything other than a string is kept
// as `Raw` so it reaches the provider byte-for-byte. Variant order matters for untagged
// decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    #[serde(skip_deserializing)]
    Parts(Vec<ContentPart>),
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
    // Keys such as `name` on caller-supplied turns, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Content::Text(text.into()),
            extra: Map::new(),
        }
    }

    pub fn user(content: Content) -> Self {
        Self {
            role: Role::User,
            content,
            extra: Map::new(),
        }
    }
}

// POST /solve
#[derive(MultipartForm)]
pub struct SolveForm {
    pub problem_text: Option<Text<String>>,
    pub image: Option<Bytes>,
}

// POST /chat, urlencoded flavour
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: Option<String>,
    pub conversation_history: Option<String>,
}

// POST /chat, multipart flavour
#[derive(MultipartForm)]
pub struct ChatMultipartForm {
    pub message: Option<Text<String>>,
    pub conversation_history: Option<Text<String>>,
}

impl From<ChatMultipartForm> for ChatForm {
    fn from(form: ChatMultipartForm) -> Self {
        Self {
            message: form.message.map(|t| t.into_inner()),
            conversation_history: form.conversation_history.map(|t| t.into_inner()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SolveMetadata {
    pub has_image: bool,
    pub has_text: bool,
    pub teaching_mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub success: bool,
    pub solution: String,
    pub model: String,
    pub usage: Value,
    pub metadata: SolveMetadata,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub api_key_configured: bool,
    pub endpoint: String,
}
