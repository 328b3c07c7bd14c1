//! Reply sanitizer — removes reasoning markup some models leak into replies.
//!
//! Each recognized style is an open/close [`MarkerPair`]; everything between
//! a pair (inclusive, non-greedy, across lines) is dropped. Adding a style is
//! a config change, not a code change.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Substituted when nothing is left after stripping.
pub const DEFAULT_FALLBACK: &str = "I don't have anything further to add.";

/// Literal open/close delimiters of one reasoning block style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub open: String,
    pub close: String,
}

impl MarkerPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    fn to_pattern(&self) -> String {
        format!(
            "(?s){}.*?{}",
            regex::escape(&self.open),
            regex::escape(&self.close)
        )
    }
}

/// Styles recognized out of the box: angle-bracket, full-width bracket,
/// and asterisk tags.
pub fn default_markers() -> Vec<MarkerPair> {
    vec![
        MarkerPair::new("<think>", "</think>"),
        MarkerPair::new("<thinking>", "</thinking>"),
        MarkerPair::new("【思考】", "【/思考】"),
        MarkerPair::new("*thinking*", "*/thinking*"),
    ]
}

#[derive(Clone, Debug)]
pub struct ReplySanitizer {
    patterns: Vec<Regex>,
    fallback: String,
}

impl ReplySanitizer {
    pub fn new(markers: &[MarkerPair], fallback: impl Into<String>) -> Self {
        let patterns = markers
            .iter()
            .filter(|m| !m.open.is_empty() && !m.close.is_empty())
            .filter_map(|m| Regex::new(&m.to_pattern()).ok())
            .collect();
        Self {
            patterns,
            fallback: fallback.into(),
        }
    }

    /// Strip every marked block, trim, and fall back if nothing remains.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for re in &self.patterns {
            if re.is_match(&text) {
                text = re.replace_all(&text, "").into_owned();
            }
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!(raw_len = raw.len(), "reply empty after sanitizing, using fallback");
            self.fallback.clone()
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for ReplySanitizer {
    fn default() -> Self {
        Self::new(&default_markers(), DEFAULT_FALLBACK)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
