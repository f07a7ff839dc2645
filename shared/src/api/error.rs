use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::HttpError;

/// Every way a gateway call can fail.
///
/// Screens only ever keep the rendered message; the variants exist for logs
/// and tests.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    #[error("Could not reach the recipe service ({message})")]
    Transport { url: String, message: String },

    #[error("The recipe service responded with status {status}")]
    Server { status: u16, url: String },

    #[error("The recipe service sent data we could not read ({message})")]
    Decode { message: String },
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidUrl { url, reason } => Self::Transport {
                url,
                message: reason,
            },
            HttpError::InvalidResponse { reason, .. } => Self::Decode { message: reason },
            other @ (HttpError::InvalidHeader { .. }
            | HttpError::ConnectionError { .. }
            | HttpError::Timeout { .. }
            | HttpError::ResponseTooLarge { .. }) => {
                let url = match &other {
                    HttpError::ConnectionError { host, .. } | HttpError::Timeout { host, .. } => {
                        host.clone()
                    }
                    _ => String::new(),
                };
                Self::Transport {
                    url,
                    message: other.to_string(),
                }
            }
        }
    }
}
