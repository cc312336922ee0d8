//! # Simple Text Normalizers

use serde::Deserialize;
use serde_json::Value;

use crate::{config::PatternConfig, errors::WCResult, regex::RegexWrapper};

fn default_true() -> bool {
    true
}

/// Trim leading and/or trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StripNormalizer {
    /// Trim the start.
    #[serde(default = "default_true")]
    pub strip_left: bool,

    /// Trim the end.
    #[serde(default = "default_true")]
    pub strip_right: bool,
}

impl StripNormalizer {
    /// Normalize text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        match (self.strip_left, self.strip_right) {
            (true, true) => text.trim(),
            (true, false) => text.trim_start(),
            (false, true) => text.trim_end(),
            (false, false) => text,
        }
        .to_string()
    }
}

#[derive(Deserialize)]
struct ReplaceConfig {
    pattern: PatternConfig,
    content: String,
}

/// Replace every match of a pattern with fixed content.
///
/// Shared by the `Replace` normalizer, pre-tokenizer, and decoder.
#[derive(Debug, Clone)]
pub struct ReplaceNormalizer {
    regex: RegexWrapper,
    content: String,
}

impl ReplaceNormalizer {
    /// Build from a `{"pattern": .., "content": ..}` config.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        let config = ReplaceConfig::deserialize(config)?;
        Ok(Self {
            regex: config.pattern.compile()?,
            content: config.content,
        })
    }

    /// Normalize text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        self.regex.replace_all(text, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_strip() {
        let both: StripNormalizer = serde_json::from_value(json!({})).unwrap();
        assert_eq!(both.normalize("  a b  "), "a b");

        let left: StripNormalizer =
            serde_json::from_value(json!({"strip_left": true, "strip_right": false})).unwrap();
        assert_eq!(left.normalize("  a b  "), "a b  ");

        let right = StripNormalizer {
            strip_left: false,
            strip_right: true,
        };
        assert_eq!(right.normalize("  a b  "), "  a b");
    }

    #[test]
    fn test_replace_regex() {
        let n = ReplaceNormalizer::from_config(&json!({
            "pattern": {"Regex": r" {2,}"},
            "content": " "
        }))
        .unwrap();
        assert_eq!(n.normalize("a   b  c d"), "a b c d");
    }
}
