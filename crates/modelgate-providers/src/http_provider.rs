//! HTTP adapter for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Both supported upstreams speak this dialect; what differs between them
//! (endpoint, system prompt, tuning knobs, credential variable) lives in
//! their [`ProviderSpec`].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use modelgate_core::config::schema::ProviderConfig;
use modelgate_core::params::EffectiveParameters;
use modelgate_core::types::{Completion, ProviderKind, Usage};
use modelgate_core::GatewayError;

use crate::registry::ProviderSpec;
use crate::traits::ProviderAdapter;

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
}

/// Every field optional so a short body becomes `MalformedResponse`, not a parse panic.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: Option<WireReply>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    total_tokens: Option<u64>,
}

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// Adapter for one OpenAI-compatible provider.
pub struct HttpProvider {
    /// HTTP client (connection-pooled, carries the call timeout).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    timeout: Duration,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("provider", &self.spec.display_name)
            .finish()
    }
}

impl HttpProvider {
    /// Create an adapter for `spec`.
    ///
    /// # Arguments
    /// * `config`  — Deployment overrides (api_base)
    /// * `spec`    — Static provider spec from the registry
    /// * `timeout` — Ceiling for a whole upstream call
    pub fn new(
        config: &ProviderConfig,
        spec: &'static ProviderSpec,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| spec.default_api_base.to_string());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpProvider {
            client,
            api_base,
            timeout,
            spec,
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn build_request<'a>(
        &self,
        message: &'a str,
        model: &'a str,
        params: &EffectiveParameters,
    ) -> CompletionRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.spec.system_prompt {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: message,
        });

        let tuning = &self.spec.tuning;
        CompletionRequest {
            model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: tuning.top_p,
            frequency_penalty: tuning.frequency_penalty,
            presence_penalty: tuning.presence_penalty,
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> GatewayError {
        let reason = if err.is_timeout() {
            format!("timed out after {}s", self.timeout.as_secs())
        } else if err.is_connect() {
            "could not connect".to_string()
        } else {
            "request could not be completed".to_string()
        };
        GatewayError::transport(self.spec.display_name, reason)
    }

    /// Map a non-2xx answer to `Upstream`, preferring the provider's own message.
    fn upstream_error(&self, status: reqwest::StatusCode, body: &str) -> GatewayError {
        match extract_error_message(body) {
            Some(msg) => GatewayError::Upstream(msg),
            None => GatewayError::Upstream(format!(
                "{} API error: {}",
                self.spec.display_name,
                status.as_u16()
            )),
        }
    }

    fn parse_completion(&self, body: &str) -> Result<Completion, GatewayError> {
        // Some providers answer 2xx with an error payload.
        if let Some(msg) = extract_error_message(body) {
            return Err(GatewayError::Upstream(msg));
        }

        let name = self.spec.display_name;
        let parsed: CompletionResponse = serde_json::from_str(body)
            .map_err(|_| GatewayError::malformed(name, "body is not a chat completion"))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| GatewayError::malformed(name, "missing choices[0].message.content"))?;

        let usage = parsed
            .usage
            .ok_or_else(|| GatewayError::malformed(name, "missing usage"))?;
        let usage = Usage {
            prompt_tokens: usage
                .prompt_tokens
                .ok_or_else(|| GatewayError::malformed(name, "missing usage.prompt_tokens"))?,
            completion_tokens: usage
                .completion_tokens
                .ok_or_else(|| GatewayError::malformed(name, "missing usage.completion_tokens"))?,
            total_tokens: usage
                .total_tokens
                .ok_or_else(|| GatewayError::malformed(name, "missing usage.total_tokens"))?,
        };

        Ok(Completion { reply, usage })
    }
}

/// Pull `error.message` (or a bare string `error`) out of an error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let message = match error {
        serde_json::Value::String(s) => s.as_str(),
        other => other.get("message")?.as_str()?,
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[async_trait]
impl ProviderAdapter for HttpProvider {
    async fn send(
        &self,
        message: &str,
        model: &str,
        credential: &str,
        params: &EffectiveParameters,
    ) -> Result<Completion, GatewayError> {
        let request_body = self.build_request(message, model, params);
        let url = self.completions_url();

        debug!(
            provider = self.spec.display_name,
            model = model,
            message_len = message.len(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "Calling upstream"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.spec.display_name, error = %e, "HTTP request failed");
                self.transport_error(&e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(provider = self.spec.display_name, error = %e, "Failed to read response body");
            self.transport_error(&e)
        })?;

        if !status.is_success() {
            warn!(
                provider = self.spec.display_name,
                status = %status,
                body_len = body.len(),
                "Upstream returned an error"
            );
            return Err(self.upstream_error(status, &body));
        }

        let completion = self.parse_completion(&body).inspect_err(|e| {
            error!(provider = self.spec.display_name, error = %e, "Unusable upstream response");
        })?;

        debug!(
            provider = self.spec.display_name,
            reply_len = completion.reply.len(),
            total_tokens = completion.usage.total_tokens,
            "Upstream response received"
        );
        Ok(completion)
    }

    fn kind(&self) -> ProviderKind {
        self.spec.kind
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
