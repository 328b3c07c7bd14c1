//! Provider registry — static specs for the two supported upstreams.
//!
//! Each `ProviderSpec` describes how to reach a provider and the quirks of
//! its adapter: credential variable, default endpoint, whether its models
//! leak reasoning markup, and the tuning knobs sent with every request.

use modelgate_core::types::ProviderKind;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one upstream provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Provider tag this spec serves.
    pub kind: ProviderKind,
    /// Human-readable name for logs and error messages. E.g. `"DeepSeek"`.
    pub display_name: &'static str,
    /// Environment variable holding the API key. E.g. `"DEEPSEEK_API_KEY"`.
    pub env_key: &'static str,
    /// API base URL; `/chat/completions` is appended.
    pub default_api_base: &'static str,
    /// Whether replies may embed reasoning blocks that must be stripped.
    pub emits_reasoning: bool,
    /// System instruction prepended to the user message, if any.
    pub system_prompt: Option<&'static str>,
    /// Adapter-only sampling knobs.
    pub tuning: Tuning,
}

/// Provider-specific request knobs. Never visible to callers.
#[derive(Clone, Debug, Default)]
pub struct Tuning {
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

const CONCISE_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user's question \
directly and concisely. Do not show your reasoning process or any internal thinking; \
reply with the final answer only.";

// ─────────────────────────────────────────────
// All providers
// ─────────────────────────────────────────────

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        kind: ProviderKind::OpenAi,
        display_name: "OpenAI",
        env_key: "OPENAI_API_KEY",
        default_api_base: "https://api.openai.com/v1",
        emits_reasoning: false,
        system_prompt: None,
        tuning: Tuning {
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        },
    },
    // DeepSeek models sometimes think out loud; steer them and strip what leaks.
    ProviderSpec {
        kind: ProviderKind::DeepSeek,
        display_name: "DeepSeek",
        env_key: "DEEPSEEK_API_KEY",
        default_api_base: "https://api.deepseek.com",
        emits_reasoning: true,
        system_prompt: Some(CONCISE_SYSTEM_PROMPT),
        tuning: Tuning {
            top_p: Some(0.9),
            frequency_penalty: Some(0.1),
            presence_penalty: Some(0.1),
        },
    },
];

/// Find the spec for a provider tag.
pub fn find_by_kind(kind: ProviderKind) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.kind == kind)
}

/// Find a provider spec by its lowercase tag (e.g. `"deepseek"`).
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.kind.as_str() == name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
