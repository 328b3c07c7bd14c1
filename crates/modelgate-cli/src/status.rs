//! `modelgate status` — show configuration and credential status.
//!
//! Credentials are only ever shown masked.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use modelgate_core::config::{get_config_path, load_config};
use modelgate_core::env::{EnvSource, ProcessEnv};
use modelgate_core::utils::mask_secret;
use modelgate_providers::registry::{ProviderSpec, PROVIDERS};

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Modelgate Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );
    println!(
        "  {:<18} {}s",
        "HTTP timeout:".bold(),
        config.http.timeout_secs
    );
    println!(
        "  {:<18} {}",
        "Models:".bold(),
        config.registry().len()
    );

    println!();
    println!("  {}", "Providers:".bold());
    for spec in PROVIDERS {
        let defaults = config.defaults.for_provider(spec.kind);
        let api_base = config
            .providers
            .get(spec.kind)
            .api_base
            .as_deref()
            .unwrap_or(spec.default_api_base);
        println!(
            "    {:<12} {}  {}",
            spec.display_name,
            credential_status(spec, &ProcessEnv),
            format!(
                "temp: {} | max_tokens: {} | {}",
                defaults.temperature, defaults.max_tokens, api_base
            )
            .dimmed()
        );
    }

    println!();

    Ok(())
}

/// Describe whether a provider's API key is present, without revealing it.
fn credential_status(spec: &ProviderSpec, env: &dyn EnvSource) -> String {
    match env.non_empty(spec.env_key) {
        Some(key) => format!("{} {} ({})", "✓".green(), spec.env_key, mask_secret(&key)),
        None => format!("{}", format!("· {} not set", spec.env_key).dimmed()),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
