use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::capabilities::{HttpError, ValidatedUrl, MAX_RESPONSE_BODY_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";
pub const BASE_URL_ENV: &str = "RECIPES_API_BASE_URL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] HttpError),

    #[error("base URL must not carry a query or fragment: {0}")]
    UnexpectedQuery(String),
}

/// Where the gateway points and how much it is willing to read.
///
/// Deserializing goes through [`GatewayConfig::new`], so a config shipped
/// as JSON is validated and normalized the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGatewayConfig")]
pub struct GatewayConfig {
    base_url: String,
    pub max_response_size: usize,
}

#[derive(Deserialize)]
struct RawGatewayConfig {
    base_url: String,
    #[serde(default = "default_max_response_size")]
    max_response_size: usize,
}

fn default_max_response_size() -> usize {
    MAX_RESPONSE_BODY_SIZE
}

impl TryFrom<RawGatewayConfig> for GatewayConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGatewayConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(&raw.base_url)?.with_max_response_size(raw.max_response_size))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_response_size: MAX_RESPONSE_BODY_SIZE,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let validated = ValidatedUrl::new(base_url)?;
        let mut url = Url::parse(validated.as_str()).map_err(|e| {
            ConfigError::InvalidBaseUrl(HttpError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })
        })?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::UnexpectedQuery(base_url.to_string()));
        }

        // Routes are joined relative to the base, which only keeps the last
        // path segment when it ends in a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url.to_string(),
            ..Self::default()
        })
    }

    /// Defaults, with the base URL taken from `RECIPES_API_BASE_URL` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn with_max_response_size(mut self, max_bytes: usize) -> Self {
        self.max_response_size = max_bytes.min(MAX_RESPONSE_BODY_SIZE);
        self
    }
}
