//! Generation parameter resolution.
//!
//! A caller-supplied value always wins, unchanged and unvalidated. Otherwise
//! the provider's configured default applies: 0.7 / 1000 for OpenAI and
//! 0.4 / 800 for DeepSeek unless the config says otherwise.

use serde::{Deserialize, Serialize};

use crate::types::ProviderKind;

/// Default temperature / max-tokens pair for one provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDefaults {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Parameters actually sent upstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveParameters {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Per-provider defaults, loaded once from config.
///
/// On disk every field is optional; anything left out keeps its built-in value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialParameterDefaults")]
pub struct ParameterDefaults {
    pub openai: ProviderDefaults,
    pub deepseek: ProviderDefaults,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            openai: ProviderDefaults {
                temperature: 0.7,
                max_tokens: 1000,
            },
            deepseek: ProviderDefaults {
                temperature: 0.4,
                max_tokens: 800,
            },
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PartialProviderDefaults {
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl PartialProviderDefaults {
    fn merge_into(self, base: ProviderDefaults) -> ProviderDefaults {
        ProviderDefaults {
            temperature: self.temperature.unwrap_or(base.temperature),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PartialParameterDefaults {
    openai: PartialProviderDefaults,
    deepseek: PartialProviderDefaults,
}

impl From<PartialParameterDefaults> for ParameterDefaults {
    fn from(partial: PartialParameterDefaults) -> Self {
        let base = Self::default();
        Self {
            openai: partial.openai.merge_into(base.openai),
            deepseek: partial.deepseek.merge_into(base.deepseek),
        }
    }
}

impl ParameterDefaults {
    pub fn for_provider(&self, provider: ProviderKind) -> ProviderDefaults {
        match provider {
            ProviderKind::OpenAi => self.openai,
            ProviderKind::DeepSeek => self.deepseek,
        }
    }

    /// Fill in whatever the caller left out.
    pub fn resolve(
        &self,
        provider: ProviderKind,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> EffectiveParameters {
        let defaults = self.for_provider(provider);
        EffectiveParameters {
            temperature: temperature.unwrap_or(defaults.temperature),
            max_tokens: max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_defaults() {
        let p = ParameterDefaults::default().resolve(ProviderKind::OpenAi, None, None);
        assert_eq!(p.temperature, 0.7);
        assert_eq!(p.max_tokens, 1000);
    }

    #[test]
    fn deepseek_defaults() {
        let p = ParameterDefaults::default().resolve(ProviderKind::DeepSeek, None, None);
        assert_eq!(p.temperature, 0.4);
        assert_eq!(p.max_tokens, 800);
    }

    #[test]
    fn explicit_values_win() {
        let defaults = ParameterDefaults::default();
        let p = defaults.resolve(ProviderKind::DeepSeek, Some(0.9), None);
        assert_eq!(p.temperature, 0.9);
        assert_eq!(p.max_tokens, 800);

        let p = defaults.resolve(ProviderKind::OpenAi, None, Some(42));
        assert_eq!(p.temperature, 0.7);
        assert_eq!(p.max_tokens, 42);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let p = ParameterDefaults::default().resolve(ProviderKind::OpenAi, Some(5.0), Some(1));
        assert_eq!(p.temperature, 5.0);
        assert_eq!(p.max_tokens, 1);
    }

    #[test]
    fn resolution_is_idempotent() {
        let defaults = ParameterDefaults::default();
        for provider in ProviderKind::ALL {
            for (t, m) in [(None, None), (Some(0.3), None), (None, Some(10)), (Some(1.2), Some(5))] {
                assert_eq!(defaults.resolve(provider, t, m), defaults.resolve(provider, t, m));
            }
        }
    }

    #[test]
    fn partial_json_keeps_builtin_values() {
        let defaults: ParameterDefaults =
            serde_json::from_str(r#"{"deepseek": {"temperature": 0.1}}"#).unwrap();
        assert_eq!(defaults.deepseek.temperature, 0.1);
        assert_eq!(defaults.deepseek.max_tokens, 800);
        assert_eq!(defaults.openai, ParameterDefaults::default().openai);

        let empty: ParameterDefaults = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ParameterDefaults::default());
    }

    #[test]
    fn configured_deepseek_defaults() {
        let defaults = ParameterDefaults {
            deepseek: ProviderDefaults {
                temperature: 0.1,
                max_tokens: 500,
            },
            ..Default::default()
        };
        let p = defaults.resolve(ProviderKind::DeepSeek, None, None);
        assert_eq!(p.temperature, 0.1);
        assert_eq!(p.max_tokens, 500);
        // OpenAI untouched
        assert_eq!(defaults.resolve(ProviderKind::OpenAi, None, None).max_tokens, 1000);
    }
}
