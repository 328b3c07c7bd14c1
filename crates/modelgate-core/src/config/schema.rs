//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProvidersConfig`, `ParameterDefaults`,
//! `HttpConfig`, `SanitizerConfig`, optional model list.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! Credentials never live here: they are read from the environment per call.

use serde::{Deserialize, Serialize};

use crate::models::{ModelDescriptor, ModelRegistry};
use crate::params::ParameterDefaults;
use crate::sanitize::{default_markers, MarkerPair, ReplySanitizer, DEFAULT_FALLBACK};
use crate::types::ProviderKind;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.modelgate/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub defaults: ParameterDefaults,
    pub http: HttpConfig,
    pub sanitizer: SanitizerConfig,
    /// Replaces the built-in model list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelDescriptor>>,
}

impl Config {
    /// The model registry this config describes.
    pub fn registry(&self) -> ModelRegistry {
        match &self.models {
            Some(models) => ModelRegistry::new(models.clone()),
            None => ModelRegistry::builtin(),
        }
    }

    /// Sanitizer built from the default markers plus any configured extras.
    pub fn reply_sanitizer(&self) -> ReplySanitizer {
        let mut markers = default_markers();
        for extra in &self.sanitizer.extra_markers {
            if !markers.contains(extra) {
                markers.push(extra.clone());
            }
        }
        ReplySanitizer::new(&markers, self.sanitizer.fallback.clone())
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Connection settings for a single upstream provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// One `ProviderConfig` per supported provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub deepseek: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, provider: ProviderKind) -> &ProviderConfig {
        match provider {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::DeepSeek => &self.deepseek,
        }
    }

    pub fn get_mut(&mut self, provider: ProviderKind) -> &mut ProviderConfig {
        match provider {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::DeepSeek => &mut self.deepseek,
        }
    }
}

// ─────────────────────────────────────────────
// HTTP
// ─────────────────────────────────────────────

/// Outbound HTTP settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    /// Ceiling for one upstream call, in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

// ─────────────────────────────────────────────
// Sanitizer
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizerConfig {
    /// Reply used when nothing survives stripping.
    pub fallback: String,
    /// Marker pairs recognized in addition to the built-in ones.
    pub extra_markers: Vec<MarkerPair>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK.to_string(),
            extra_markers: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
