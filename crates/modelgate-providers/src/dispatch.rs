//! Dispatch — the only place that maps a provider tag to its credential
//! and adapter.
//!
//! Per call: validate → registry lookup → credential → parameters →
//! one adapter call → sanitize (reasoning-emitting providers only).
//! Every step returns a typed `Result`; [`Dispatcher::dispatch`] folds the
//! error into a [`ChatResult::Failure`] so nothing escapes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use modelgate_core::config::Config;
use modelgate_core::env::EnvSource;
use modelgate_core::models::{ModelDescriptor, ModelRegistry};
use modelgate_core::params::ParameterDefaults;
use modelgate_core::types::{ChatRequest, ChatResult, Completion, ProviderKind};
use modelgate_core::{GatewayError, ReplySanitizer};

use crate::http_provider::HttpProvider;
use crate::registry::{find_by_kind, ProviderSpec, PROVIDERS};
use crate::traits::ProviderAdapter;

// ─────────────────────────────────────────────
// AdapterSet
// ─────────────────────────────────────────────

/// One adapter per provider tag.
#[derive(Clone, Default)]
pub struct AdapterSet {
    adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an `HttpProvider` for every known provider from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_secs);
        let mut set = Self::new();
        for spec in PROVIDERS {
            let adapter = HttpProvider::new(config.providers.get(spec.kind), spec, timeout)?;
            debug!(provider = spec.display_name, ?adapter, "Registered adapter");
            set.register(Arc::new(adapter));
        }
        Ok(set)
    }

    /// Register an adapter under its own provider tag, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.get(&kind)
    }
}

// ─────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────

/// Routes a [`ChatRequest`] to the right upstream. Read-only after construction,
/// so one instance can serve concurrent calls.
pub struct Dispatcher {
    registry: ModelRegistry,
    defaults: ParameterDefaults,
    sanitizer: ReplySanitizer,
    adapters: AdapterSet,
}

impl Dispatcher {
    pub fn new(
        registry: ModelRegistry,
        defaults: ParameterDefaults,
        sanitizer: ReplySanitizer,
        adapters: AdapterSet,
    ) -> Self {
        Self {
            registry,
            defaults,
            sanitizer,
            adapters,
        }
    }

    /// Build everything from a loaded config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            config.registry(),
            config.defaults,
            config.reply_sanitizer(),
            AdapterSet::from_config(config)?,
        ))
    }

    /// The model listing operation.
    pub fn models(&self) -> &[ModelDescriptor] {
        self.registry.list()
    }

    /// Handle one request. Never fails: errors come back as `Failure`.
    pub async fn dispatch(&self, request: &ChatRequest, env: &dyn EnvSource) -> ChatResult {
        info!(
            model = %request.model,
            message_len = request.message.len(),
            "Dispatching message"
        );

        match self.try_dispatch(request, env).await {
            Ok(completion) => {
                info!(
                    model = %request.model,
                    total_tokens = completion.usage.total_tokens,
                    "Dispatch succeeded"
                );
                ChatResult::success(request.message.clone(), completion)
            }
            Err(err) => {
                warn!(model = %request.model, kind = err.kind(), error = %err, "Dispatch failed");
                ChatResult::failure(request.message.clone(), &err)
            }
        }
    }

    async fn try_dispatch(
        &self,
        request: &ChatRequest,
        env: &dyn EnvSource,
    ) -> Result<Completion, GatewayError> {
        if request.message.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        // 1. Model
        let model = self.registry.lookup(&request.model)?;
        let spec = provider_spec(model.provider)?;

        // 2. Credential (presence only is logged)
        let credential = resolve_credential(spec, env)?;

        // 3. Parameters
        let params = self
            .defaults
            .resolve(model.provider, request.temperature, request.max_tokens);

        // 4. Adapter
        let adapter = self.adapters.get(model.provider).ok_or_else(|| {
            GatewayError::Upstream(format!("no adapter registered for {}", spec.display_name))
        })?;
        let completion = adapter
            .send(&request.message, &model.id, &credential, &params)
            .await?;

        // 5. Sanitize
        if spec.emits_reasoning {
            Ok(Completion {
                reply: self.sanitizer.sanitize(&completion.reply),
                usage: completion.usage,
            })
        } else {
            Ok(completion)
        }
    }
}

fn provider_spec(kind: ProviderKind) -> Result<&'static ProviderSpec, GatewayError> {
    find_by_kind(kind)
        .ok_or_else(|| GatewayError::Upstream(format!("unsupported provider: {kind}")))
}

/// Read the provider's credential from the environment. Blank counts as missing.
fn resolve_credential(
    spec: &'static ProviderSpec,
    env: &dyn EnvSource,
) -> Result<String, GatewayError> {
    let credential = env.non_empty(spec.env_key);
    debug!(
        provider = spec.display_name,
        env_var = spec.env_key,
        present = credential.is_some(),
        "Credential check"
    );
    credential.ok_or(GatewayError::CredentialMissing {
        provider: spec.display_name,
        env_var: spec.env_key,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
