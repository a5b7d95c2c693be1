use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Client configuration, loaded from the environment with sane defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the verification backend.
    pub api_url: String,
    /// Base URL of the blob upload endpoint (the dashboard host in production).
    pub blob_url: String,
    /// Seconds between verification status polls.
    pub poll_interval_secs: u64,
    /// Command line used for on-device text extraction, split on whitespace.
    pub ocr_command: String,
    /// Seconds before a text extraction attempt is abandoned.
    pub ocr_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            blob_url: "http://localhost:3000".to_string(),
            poll_interval_secs: 5,
            ocr_command: "tesseract stdin stdout".to_string(),
            ocr_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("VAULT_API_URL") {
            config.api_url = url;
        }
        if let Ok(url) = std::env::var("VAULT_BLOB_URL") {
            config.blob_url = url;
        }
        if let Ok(raw) = std::env::var("VAULT_POLL_INTERVAL_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.poll_interval_secs = secs,
                _ => warn!("Ignoring invalid VAULT_POLL_INTERVAL_SECS: {}", raw),
            }
        }
        if let Ok(command) = std::env::var("VAULT_OCR_COMMAND") {
            config.ocr_command = command;
        }
        if let Ok(raw) = std::env::var("VAULT_OCR_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.ocr_timeout_secs = secs,
                _ => warn!("Ignoring invalid VAULT_OCR_TIMEOUT_SECS: {}", raw),
            }
        }
        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}
