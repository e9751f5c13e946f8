use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_MB: usize = 10;

// Read once at startup, shared read-only afterwards
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values are treated the same as unset ones
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GROQ_API_KEY")
            .ok_or_else(|| anyhow!("GROQ_API_KEY environment variable is required"))?;

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", v))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("GROQ_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("GROQ_TIMEOUT_SECS must be a number of seconds, got {:?}", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(anyhow!("GROQ_TIMEOUT_SECS must be greater than zero"));
        }

        let max_upload_mb = match get("MAX_UPLOAD_MB") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_MB must be a whole number, got {:?}", v))?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow!("MAX_UPLOAD_MB is too large: {}", max_upload_mb))?;

        Ok(Self {
            api_key,
            api_url: get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
        })
    }

    pub fn api_key_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
