use actix_web::web::Bytes;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, TutorError};

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

// An uploaded image, alive for a single request only
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Bytes,
    mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Bytes, declared_mime: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(TutorError::ImageProcessing("uploaded image is empty".to_string()));
        }

        // Browsers fall back to octet-stream when they can't sniff the file type
        let mime_type = match declared_mime.map(essence) {
            None => DEFAULT_MIME_TYPE.to_string(),
            Some(m) if m.is_empty() || m == "application/octet-stream" => {
                DEFAULT_MIME_TYPE.to_string()
            }
            Some(m) if m.starts_with("image/") => m,
            Some(m) => {
                return Err(TutorError::ImageProcessing(format!(
                    "unsupported content type {}",
                    m
                )))
            }
        };

        Ok(Self { bytes, mime_type })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

// "image/PNG; name=x" -> "image/png"
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}
