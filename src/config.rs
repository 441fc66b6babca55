//! Runtime configuration for the client.
//!
//! A single external setting selects the backend origin; the push endpoint
//! is derived from it. Defaults point at a local backend and can be
//! overridden through the environment.

use serde::{Deserialize, Serialize};

pub const BACKEND_URL_ENV: &str = "ORDERDESK_BACKEND_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend origin for both the REST API and the push channel.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl AppConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(BACKEND_URL_ENV) {
            if !value.trim().is_empty() {
                self.base_url = value.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(self.base_url.trim()).map_err(|error| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: error.to_string(),
        })?;
        Ok(())
    }

    /// WebSocket endpoint derived from the backend origin.
    pub fn push_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{ws_base}/ws")
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}
