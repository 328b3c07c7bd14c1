//! `modelgate init` — write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use modelgate_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Modelgate Setup".cyan().bold());
    println!();

    if write_default(&path, force)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            path.display()
        );
    }

    println!();
    println!("  API keys are read from the environment, never from this file:");
    println!("    export OPENAI_API_KEY=...");
    println!("    export DEEPSEEK_API_KEY=...");
    println!();

    Ok(())
}

/// Write `Config::default()` to `path`. Returns `false` if the file was kept.
fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use modelgate_core::config::load_config_with_env;

    fn load(path: &Path) -> Config {
        load_config_with_env(Some(path), &HashMap::<String, String>::new())
    }

    #[test]
    fn writes_defaults_into_new_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(write_default(&path, false).unwrap());
        assert_eq!(load(&path), Config::default());
    }

    #[test]
    fn keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"http": {"timeoutSecs": 5}}"#).unwrap();

        assert!(!write_default(&path, false).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"timeoutSecs\": 5"));

        assert!(write_default(&path, true).unwrap());
        assert_eq!(load(&path).http.timeout_secs, 30);
    }
}
