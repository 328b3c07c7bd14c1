//! Model registry — which model ids the gateway accepts and who serves them.
//!
//! The registry is an ordered list built once at start-up (built-ins or the
//! `models` section of the config file) and never mutated afterwards.
//! Lookup is an exact, case-sensitive match on the id.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::types::ProviderKind;

/// Display metadata for one model, as returned by the listing operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique model identifier sent upstream unchanged (e.g. `"gpt-4"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Provider that serves this model.
    pub provider: ProviderKind,
    #[serde(default)]
    pub description: String,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: ProviderKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider,
            description: description.into(),
        }
    }
}

/// Immutable, ordered set of supported models.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Build a registry from an explicit list. Later duplicates of an id are
    /// dropped so lookup stays unambiguous.
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        let mut unique: Vec<ModelDescriptor> = Vec::with_capacity(models.len());
        for model in models {
            if unique.iter().any(|m| m.id == model.id) {
                tracing::warn!(model = %model.id, "duplicate model id in registry, ignoring");
                continue;
            }
            unique.push(model);
        }
        Self { models: unique }
    }

    /// The four models shipped with the gateway.
    pub fn builtin() -> Self {
        Self::new(vec![
            ModelDescriptor::new(
                "gpt-3.5-turbo",
                "GPT-3.5 Turbo",
                ProviderKind::OpenAi,
                "OpenAI's fast-response model",
            ),
            ModelDescriptor::new(
                "gpt-4",
                "GPT-4",
                ProviderKind::OpenAi,
                "OpenAI's most capable model",
            ),
            ModelDescriptor::new(
                "deepseek-chat",
                "DeepSeek Chat",
                ProviderKind::DeepSeek,
                "DeepSeek's conversational model",
            ),
            ModelDescriptor::new(
                "deepseek-coder",
                "DeepSeek Coder",
                ProviderKind::DeepSeek,
                "DeepSeek's code-generation model",
            ),
        ])
    }

    /// Find a model by exact id.
    pub fn lookup(&self, model_id: &str) -> Result<&ModelDescriptor, GatewayError> {
        self.models
            .iter()
            .find(|m| m.id == model_id)
            .ok_or_else(|| GatewayError::ModelNotSupported(model_id.to_string()))
    }

    /// All models, in registry order.
    pub fn list(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.lookup("gpt-4").unwrap().provider, ProviderKind::OpenAi);
        assert_eq!(
            registry.lookup("deepseek-coder").unwrap().provider,
            ProviderKind::DeepSeek
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ModelRegistry::builtin();
        assert!(registry.lookup("GPT-4").is_err());
        assert!(registry.lookup("gpt-4 ").is_err());
    }

    #[test]
    fn test_lookup_unknown_names_the_id() {
        let err = ModelRegistry::builtin().lookup("unknown-model").unwrap_err();
        assert_eq!(err, GatewayError::ModelNotSupported("unknown-model".into()));
        assert!(err.to_string().contains("unknown-model"));
    }

    #[test]
    fn test_builtin_order() {
        let registry = ModelRegistry::builtin();
        let ids: Vec<&str> = registry.list().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["gpt-3.5-turbo", "gpt-4", "deepseek-chat", "deepseek-coder"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = ModelRegistry::new(vec![
            ModelDescriptor::new("m", "First", ProviderKind::OpenAi, ""),
            ModelDescriptor::new("m", "Second", ProviderKind::DeepSeek, ""),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("m").unwrap().name, "First");
    }

    #[test]
    fn test_descriptor_json_shape() {
        let json = serde_json::to_value(&ModelRegistry::builtin().list()[2]).unwrap();
        assert_eq!(json["id"], "deepseek-chat");
        assert_eq!(json["name"], "DeepSeek Chat");
        assert_eq!(json["provider"], "deepseek");
        assert!(json["description"].is_string());
    }
}
