use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TutorError>;

#[derive(Error, Debug)]
pub enum TutorError {
    /// Missing or unusable request fields
    #[error("{0}")]
    InvalidInput(String),

    /// Network failure, timeout or non-2xx status from the provider
    #[error("Error calling AI service: {0}")]
    Transport(String),

    /// Provider answered, but not with a usable completion
    #[error("Invalid response from AI service: {0}")]
    UpstreamProtocol(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),
}

impl TutorError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        TutorError::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TutorError::InvalidInput(_) => "invalid_input",
            TutorError::Transport(_) => "transport_error",
            TutorError::UpstreamProtocol(_) => "upstream_protocol_error",
            TutorError::ImageProcessing(_) => "image_processing_error",
        }
    }
}

impl From<reqwest::Error> for TutorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TutorError::Transport(format!("request timed out: {}", err))
        } else {
            TutorError::Transport(err.to_string())
        }
    }
}

impl ResponseError for TutorError {
    fn status_code(&self) -> StatusCode {
        match self {
            TutorError::InvalidInput(_) | TutorError::ImageProcessing(_) => StatusCode::BAD_REQUEST,
            TutorError::Transport(_) | TutorError::UpstreamProtocol(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.kind(),
            "detail": self.to_string(),
        }))
    }
}
