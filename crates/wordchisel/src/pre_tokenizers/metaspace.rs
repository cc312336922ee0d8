//! # Metaspace Pre-Tokenizer
//!
//! SentencePiece-style pipelines mark word starts with a sentinel (`▁`)
//! instead of spaces.

use serde::Deserialize;

/// When to add a leading sentinel.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrependScheme {
    /// Prefix every section.
    #[default]
    Always,

    /// Prefix only the first section (`section_index == 0`).
    First,

    /// Never prefix.
    Never,
}

fn default_replacement() -> char {
    '▁'
}

fn default_true() -> bool {
    true
}

/// Replaces spaces with a sentinel char, optionally adding a leading sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaspacePreTokenizer {
    /// The sentinel char.
    #[serde(default = "default_replacement")]
    pub replacement: char,

    /// The string written in place of each space; defaults to `replacement`.
    #[serde(default)]
    pub str_rep: Option<String>,

    /// Allow a leading sentinel (subject to `prepend_scheme`).
    #[serde(default = "default_true")]
    pub add_prefix_space: bool,

    /// Which sections get a leading sentinel.
    #[serde(default)]
    pub prepend_scheme: PrependScheme,

    /// Cut the result before each sentinel.
    #[serde(default)]
    pub split: bool,
}

impl Default for MetaspacePreTokenizer {
    fn default() -> Self {
        Self {
            replacement: default_replacement(),
            str_rep: None,
            add_prefix_space: true,
            prepend_scheme: PrependScheme::Always,
            split: false,
        }
    }
}

impl MetaspacePreTokenizer {
    /// Pre-tokenize a section, appending the pieces to `pieces`.
    pub fn pre_tokenize_append(
        &self,
        text: &str,
        section_index: usize,
        pieces: &mut Vec<String>,
    ) {
        let replacement = self.replacement.to_string();
        let str_rep = self
            .str_rep
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&replacement);

        let mut normalized = text.replace(' ', str_rep);

        let scheme_allows = match self.prepend_scheme {
            PrependScheme::Always => true,
            PrependScheme::First => section_index == 0,
            PrependScheme::Never => false,
        };
        if self.add_prefix_space && scheme_allows && !normalized.starts_with(self.replacement) {
            normalized.insert_str(0, str_rep);
        }

        if !self.split {
            pieces.push(normalized);
            return;
        }

        let mut start = 0;
        for (idx, _) in normalized.match_indices(self.replacement) {
            if idx > start {
                pieces.push(normalized[start..idx].to_string());
            }
            start = idx;
        }
        if start < normalized.len() {
            pieces.push(normalized[start..].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        p: &MetaspacePreTokenizer,
        text: &str,
        section_index: usize,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        p.pre_tokenize_append(text, section_index, &mut pieces);
        pieces
    }

    #[test]
    fn test_prepend_schemes() {
        let always = MetaspacePreTokenizer::default();
        assert_eq!(run(&always, "Hey friend", 0), vec!["▁Hey▁friend"]);
        assert_eq!(run(&always, "Hey", 3), vec!["▁Hey"]);
        assert_eq!(run(&always, " Hey", 0), vec!["▁Hey"]);

        let first: MetaspacePreTokenizer = serde_json::from_str(
            r#"{"type": "Metaspace", "replacement": "▁", "prepend_scheme": "first"}"#,
        )
        .unwrap();
        assert_eq!(run(&first, "Hey", 0), vec!["▁Hey"]);
        assert_eq!(run(&first, "Hey", 1), vec!["Hey"]);

        let never = MetaspacePreTokenizer {
            prepend_scheme: PrependScheme::Never,
            ..Default::default()
        };
        assert_eq!(run(&never, "a b", 0), vec!["a▁b"]);

        let no_prefix = MetaspacePreTokenizer {
            add_prefix_space: false,
            ..Default::default()
        };
        assert_eq!(run(&no_prefix, "a b", 0), vec!["a▁b"]);
    }

    #[test]
    fn test_split() {
        let p = MetaspacePreTokenizer {
            split: true,
            ..Default::default()
        };
        assert_eq!(run(&p, "Hey  friend", 0), vec!["▁Hey", "▁", "▁friend"]);
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(PrependScheme::First.to_string(), "first");
        assert_eq!("never".parse::<PrependScheme>().unwrap(), PrependScheme::Never);
    }
}
