//! Utility helpers — path resolution and safe display of secrets.

use std::path::PathBuf;

/// Get the Modelgate data directory (e.g. `~/.modelgate/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".modelgate")
}

/// Render a secret for display: first four characters and the length only.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return format!("**** ({len} chars)");
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}**** ({len} chars)")
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_long_secret() {
        let masked = mask_secret("sk-abcdefghijklmnop");
        assert_eq!(masked, "sk-a**** (19 chars)");
        assert!(!masked.contains("efgh"));
    }

    #[test]
    fn test_mask_short_secret_hides_everything() {
        assert_eq!(mask_secret("abc"), "**** (3 chars)");
    }

    #[test]
    fn test_data_path_name() {
        assert!(get_data_path().ends_with(".modelgate"));
    }
}
