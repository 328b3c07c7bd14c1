//! Failure taxonomy for a single dispatch.
//!
//! Every variant is an expected outcome; the dispatcher turns each one into
//! a [`ChatResult::Failure`](crate::types::ChatResult) before returning.
//! Rendered messages must never contain credential values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The inbound request is unusable (e.g. empty message).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No registry entry for the requested model id.
    #[error("model not supported: {0}")]
    ModelNotSupported(String),

    /// The provider resolved but its credential variable is unset.
    #[error("{provider} API key not configured (set {env_var})")]
    CredentialMissing {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Upstream rejected the call; carries the provider's own message when it gave one.
    #[error("{0}")]
    Upstream(String),

    /// Upstream answered 2xx but the body lacked the expected fields.
    #[error("{provider} API returned an unexpected response: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    /// Network failure or timeout before any provider payload arrived.
    #[error("{provider} API request failed: {reason}")]
    Transport {
        provider: &'static str,
        reason: String,
    },
}

impl GatewayError {
    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            detail: detail.into(),
        }
    }

    pub fn transport(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::ModelNotSupported(_) => "model_not_supported",
            GatewayError::CredentialMissing { .. } => "credential_missing",
            GatewayError::Upstream(_) => "upstream",
            GatewayError::MalformedResponse { .. } => "malformed_response",
            GatewayError::Transport { .. } => "transport",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
