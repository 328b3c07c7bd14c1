//! Provider adapter trait — the seam between dispatch and the network.
//!
//! One adapter instance per provider; the dispatcher picks it by
//! [`ProviderKind`]. `HttpProvider` in `http_provider.rs` implements it for
//! every OpenAI-compatible upstream.

use async_trait::async_trait;
use modelgate_core::params::EffectiveParameters;
use modelgate_core::types::{Completion, ProviderKind};
use modelgate_core::GatewayError;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Send one user message and return the first completion.
    ///
    /// # Arguments
    /// * `message`    — User text, sent as a single user-role message.
    /// * `model`      — Model identifier, forwarded unchanged.
    /// * `credential` — Bearer token for this call only.
    /// * `params`     — Resolved temperature / max tokens.
    ///
    /// # Errors
    /// `Upstream` for non-2xx answers, `MalformedResponse` for 2xx bodies
    /// missing fields, `Transport` for network failures and timeouts.
    async fn send(
        &self,
        message: &str,
        model: &str,
        credential: &str,
        params: &EffectiveParameters,
    ) -> Result<Completion, GatewayError>;

    /// Provider this adapter talks to.
    fn kind(&self) -> ProviderKind;
}
