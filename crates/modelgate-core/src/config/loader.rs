//! Config loader — reads `~/.modelgate/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.modelgate/config.json`
//! 3. Environment variables `MODELGATE_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, HttpConfig};
use crate::env::{EnvSource, ProcessEnv};
use crate::types::ProviderKind;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + process env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    load_config_with_env(path, &ProcessEnv)
}

/// Same as [`load_config`], reading overrides from `env`.
pub fn load_config_with_env(path: Option<&Path>, env: &dyn EnvSource) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, env)
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(mut c) => {
            if c.http.timeout_secs == 0 {
                warn!("ignoring http.timeoutSecs = 0 in {}", path.display());
                c.http.timeout_secs = HttpConfig::default().timeout_secs;
            }
            c
        }
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `MODELGATE_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `MODELGATE_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `MODELGATE_DEFAULTS__<NAME>__TEMPERATURE` → `defaults.<name>.temperature`
/// - `MODELGATE_DEFAULTS__<NAME>__MAX_TOKENS` → `defaults.<name>.max_tokens`
/// - `MODELGATE_HTTP__TIMEOUT_SECS` → `http.timeout_secs`
/// - `MODELGATE_SANITIZER__FALLBACK` → `sanitizer.fallback`
///
/// Unparseable numeric values and a zero timeout are ignored with a warning.
fn apply_env_overrides(mut config: Config, env: &dyn EnvSource) -> Config {
    for provider in ProviderKind::ALL {
        let name = provider.as_str().to_uppercase();

        if let Some(val) = env.non_empty(&format!("MODELGATE_PROVIDERS__{name}__API_BASE")) {
            config.providers.get_mut(provider).api_base = Some(val);
        }

        let defaults = match provider {
            ProviderKind::OpenAi => &mut config.defaults.openai,
            ProviderKind::DeepSeek => &mut config.defaults.deepseek,
        };
        let key = format!("MODELGATE_DEFAULTS__{name}__TEMPERATURE");
        if let Some(val) = env.non_empty(&key) {
            match val.trim().parse::<f64>() {
                Ok(t) => defaults.temperature = t,
                Err(_) => warn!(var = %key, "ignoring non-numeric override"),
            }
        }
        let key = format!("MODELGATE_DEFAULTS__{name}__MAX_TOKENS");
        if let Some(val) = env.non_empty(&key) {
            match val.trim().parse::<u32>() {
                Ok(n) => defaults.max_tokens = n,
                Err(_) => warn!(var = %key, "ignoring non-numeric override"),
            }
        }
    }

    if let Some(val) = env.non_empty("MODELGATE_HTTP__TIMEOUT_SECS") {
        match val.trim().parse::<u64>() {
            Ok(0) => warn!(var = "MODELGATE_HTTP__TIMEOUT_SECS", "ignoring zero timeout"),
            Ok(n) => config.http.timeout_secs = n,
            Err(_) => warn!(var = "MODELGATE_HTTP__TIMEOUT_SECS", "ignoring non-numeric override"),
        }
    }

    if let Some(val) = env.non_empty("MODELGATE_SANITIZER__FALLBACK") {
        config.sanitizer.fallback = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "providers": { "deepseek": { "apiBase": "https://proxy.example/v1" } },
            "defaults": { "deepseek": { "temperature": 0.3, "maxTokens": 800 } },
            "http": { "timeoutSecs": 12 }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(
            config.providers.deepseek.api_base.as_deref(),
            Some("https://proxy.example/v1")
        );
        assert_eq!(config.defaults.deepseek.temperature, 0.3);
        assert_eq!(config.http.timeout_secs, 12);
        // Default preserved
        assert_eq!(config.defaults.openai.max_tokens, 1000);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.defaults.deepseek.temperature = 0.1;
        config.defaults.deepseek.max_tokens = 500;
        config.providers.openai.api_base = Some("http://localhost:9000/v1".into());

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["defaults"]["deepseek"].get("maxTokens").is_some());
        assert!(raw["defaults"]["deepseek"].get("max_tokens").is_none());
        assert!(raw["http"].get("timeoutSecs").is_some());
    }

    #[test]
    fn test_env_override_deepseek_defaults() {
        let env = env_of(&[
            ("MODELGATE_DEFAULTS__DEEPSEEK__TEMPERATURE", "0.7"),
            ("MODELGATE_DEFAULTS__DEEPSEEK__MAX_TOKENS", "1000"),
        ]);
        let config = apply_env_overrides(Config::default(), &env);
        assert_eq!(config.defaults.deepseek.temperature, 0.7);
        assert_eq!(config.defaults.deepseek.max_tokens, 1000);
        assert_eq!(config.defaults.openai, Config::default().defaults.openai);
    }

    #[test]
    fn test_env_override_api_base_and_timeout() {
        let env = env_of(&[
            ("MODELGATE_PROVIDERS__OPENAI__API_BASE", "http://127.0.0.1:8080/v1"),
            ("MODELGATE_HTTP__TIMEOUT_SECS", "5"),
        ]);
        let config = apply_env_overrides(Config::default(), &env);
        assert_eq!(
            config.providers.openai.api_base.as_deref(),
            Some("http://127.0.0.1:8080/v1")
        );
        assert!(config.providers.deepseek.api_base.is_none());
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn test_env_override_bad_number_ignored() {
        let env = env_of(&[
            ("MODELGATE_DEFAULTS__OPENAI__MAX_TOKENS", "lots"),
            ("MODELGATE_HTTP__TIMEOUT_SECS", "-1"),
        ]);
        let config = apply_env_overrides(Config::default(), &env);
        assert_eq!(config.defaults.openai.max_tokens, 1000);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_partial_defaults_keep_rest_of_file() {
        let file = write_temp_json(
            r#"{
            "http": { "timeoutSecs": 90 },
            "providers": { "deepseek": { "apiBase": "https://proxy" } },
            "defaults": { "deepseek": { "temperature": 0.1 } }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.http.timeout_secs, 90);
        assert_eq!(config.providers.deepseek.api_base.as_deref(), Some("https://proxy"));
        assert_eq!(config.defaults.deepseek.temperature, 0.1);
        assert_eq!(config.defaults.deepseek.max_tokens, 800);
    }

    #[test]
    fn test_zero_timeout_ignored() {
        let env = env_of(&[("MODELGATE_HTTP__TIMEOUT_SECS", "0")]);
        let config = apply_env_overrides(Config::default(), &env);
        assert_eq!(config.http.timeout_secs, 30);

        let file = write_temp_json(r#"{ "http": { "timeoutSecs": 0 } }"#);
        let config = load_config_from_path(file.path());
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_env_override_fallback() {
        let env = env_of(&[("MODELGATE_SANITIZER__FALLBACK", "Nothing to say.")]);
        let config = apply_env_overrides(Config::default(), &env);
        assert_eq!(config.sanitizer.fallback, "Nothing to say.");
        assert_eq!(
            config.reply_sanitizer().sanitize("<think>only this</think>"),
            "Nothing to say."
        );
    }

    #[test]
    fn test_env_beats_file() {
        let file = write_temp_json(r#"{ "defaults": { "deepseek": { "temperature": 0.1, "maxTokens": 500 } } }"#);
        let env = env_of(&[("MODELGATE_DEFAULTS__DEEPSEEK__TEMPERATURE", "0.4")]);
        let config = load_config_with_env(Some(file.path()), &env);
        assert_eq!(config.defaults.deepseek.temperature, 0.4);
        assert_eq!(config.defaults.deepseek.max_tokens, 500);
    }
}
