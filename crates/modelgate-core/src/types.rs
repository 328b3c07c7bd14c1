//! Core types for Modelgate — the normalized shapes callers see.
//!
//! Upstream providers each speak their own chat-completion dialect; these
//! types are the single vocabulary the rest of the gateway uses. JSON on the
//! caller side is **camelCase**.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

// ─────────────────────────────────────────────
// Provider tag
// ─────────────────────────────────────────────

/// Which upstream provider serves a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ProviderKind {
    /// Every supported provider, in registry order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::DeepSeek];

    /// The lowercase tag used in config and JSON (`"openai"`, `"deepseek"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Inbound request
// ─────────────────────────────────────────────

/// A single "send chat message" request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message text. Must not be empty.
    pub message: String,
    /// Model identifier, matched exactly against the registry.
    pub model: String,
    /// Optional sampling temperature override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Optional max-token override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

// ─────────────────────────────────────────────
// Provider output
// ─────────────────────────────────────────────

/// Token accounting, copied verbatim from the upstream response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// What a provider adapter returns on success.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub reply: String,
    pub usage: Usage,
}

// ─────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────

/// Outcome of one dispatch. Failures are values, not errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatResult {
    Success {
        message: String,
        reply: String,
        usage: Usage,
    },
    Failure {
        message: String,
        error: String,
    },
}

/// Shown when a failure carries no message of its own.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

impl ChatResult {
    pub fn success(message: impl Into<String>, completion: Completion) -> Self {
        ChatResult::Success {
            message: message.into(),
            reply: completion.reply,
            usage: completion.usage,
        }
    }

    /// Build a failure from a typed error, falling back to a generic
    /// message when the error renders empty.
    pub fn failure(message: impl Into<String>, err: &GatewayError) -> Self {
        let text = err.to_string();
        let error = if text.trim().is_empty() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            text
        };
        ChatResult::Failure {
            message: message.into(),
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatResult::Success { .. })
    }

    /// The reply text, if this is a success.
    pub fn reply(&self) -> Option<&str> {
        match self {
            ChatResult::Success { reply, .. } => Some(reply),
            ChatResult::Failure { .. } => None,
        }
    }

    /// The error text, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            ChatResult::Success { .. } => None,
            ChatResult::Failure { error, .. } => Some(error),
        }
    }
}

/// Flat wire shape of a [`ChatResult`], as returned by `sendMessage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl From<ChatResult> for ChatResponse {
    fn from(result: ChatResult) -> Self {
        match result {
            ChatResult::Success {
                message,
                reply,
                usage,
            } => ChatResponse {
                success: true,
                message: Some(message),
                reply: Some(reply),
                error: None,
                usage: Some(usage),
            },
            ChatResult::Failure { message, error } => ChatResponse {
                success: false,
                message: Some(message),
                reply: None,
                error: Some(error),
                usage: None,
            },
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
