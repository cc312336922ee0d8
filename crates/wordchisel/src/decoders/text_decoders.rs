//! # Text Decoders
//!
//! Decoders that rewrite token strings fragment-by-fragment.

use serde::Deserialize;

use crate::decoders::clean_up_tokenization;

fn default_true() -> bool {
    true
}

fn default_prefix() -> String {
    "##".to_string()
}

fn default_replacement() -> char {
    '▁'
}

fn default_suffix() -> String {
    "</w>".to_string()
}

fn default_pad_token() -> String {
    "<pad>".to_string()
}

fn default_word_delimiter_token() -> String {
    "|".to_string()
}

/// Undo WordPiece continuing-subword prefixes.
///
/// Non-initial tokens lose their prefix, or gain a leading space when they
/// have none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordPieceDecoder {
    /// The continuing-subword prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Apply [`clean_up_tokenization`] to each fragment.
    #[serde(default = "default_true")]
    pub cleanup: bool,
}

impl WordPieceDecoder {
    /// Decode fragments.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| {
                let token = if idx == 0 {
                    token
                } else if let Some(rest) = token.strip_prefix(&self.prefix) {
                    rest.to_string()
                } else {
                    format!(" {token}")
                };
                if self.cleanup {
                    clean_up_tokenization(&token)
                } else {
                    token
                }
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct MetaspaceDecoderConfig {
    #[serde(default = "default_replacement")]
    replacement: char,

    #[serde(default)]
    add_prefix_space: Option<bool>,

    #[serde(default)]
    prepend_scheme: Option<String>,
}

/// Replace the metaspace sentinel with spaces.
///
/// With `add_prefix_space`, one leading space is dropped from the first fragment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "MetaspaceDecoderConfig")]
pub struct MetaspaceDecoder {
    /// The sentinel char.
    pub replacement: char,

    /// Was a prefix sentinel added at encode time?
    pub add_prefix_space: bool,
}

impl From<MetaspaceDecoderConfig> for MetaspaceDecoder {
    fn from(cfg: MetaspaceDecoderConfig) -> Self {
        let add_prefix_space = cfg
            .add_prefix_space
            .unwrap_or_else(|| cfg.prepend_scheme.as_deref() != Some("never"));
        Self {
            replacement: cfg.replacement,
            add_prefix_space,
        }
    }
}

impl MetaspaceDecoder {
    /// Decode fragments.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        let mut sentinel = [0u8; 4];
        let sentinel: &str = self.replacement.encode_utf8(&mut sentinel);
        tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| {
                let text = token.replace(sentinel, " ");
                match text.strip_prefix(' ') {
                    Some(rest) if idx == 0 && self.add_prefix_space => rest.to_string(),
                    _ => text,
                }
            })
            .collect()
    }
}

/// Replace the end-of-word suffix with a space; dropped on the last token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BpeSuffixDecoder {
    /// The end-of-word suffix.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl BpeSuffixDecoder {
    /// Decode fragments.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        let last = tokens.len().saturating_sub(1);
        tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| {
                let replacement = if idx == last { "" } else { " " };
                token.replace(&self.suffix, replacement)
            })
            .collect()
    }
}

/// Connectionist-temporal-classification output decoder.
///
/// Collapses repeated tokens, drops the blank (pad) token, and joins the
/// rest into one fragment. With `cleanup`, the result is cleaned up, the
/// word delimiter becomes a space, and the ends are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CtcDecoder {
    /// The blank token.
    #[serde(default = "default_pad_token")]
    pub pad_token: String,

    /// The word delimiter token.
    #[serde(default = "default_word_delimiter_token")]
    pub word_delimiter_token: String,

    /// Clean up the joined text.
    #[serde(default = "default_true")]
    pub cleanup: bool,
}

impl CtcDecoder {
    /// Decode fragments.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        let mut tokens = tokens;
        tokens.dedup();

        let text: String = tokens
            .into_iter()
            .filter(|t| *t != self.pad_token)
            .collect();

        if !self.cleanup {
            return vec![text];
        }
        let text = clean_up_tokenization(&text).replace(&self.word_delimiter_token, " ");
        vec![text.trim().to_string()]
    }
}

/// Strip up to `start` leading and `stop` trailing `content` chars from each fragment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripDecoder {
    /// The char to strip.
    pub content: char,

    /// The most leading chars to strip.
    #[serde(default)]
    pub start: usize,

    /// The most trailing chars to strip.
    #[serde(default)]
    pub stop: usize,
}

impl StripDecoder {
    /// Decode fragments.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        tokens
            .into_iter()
            .map(|token| {
                let chars: Vec<char> = token.chars().collect();
                let start = chars
                    .iter()
                    .take(self.start)
                    .take_while(|&&c| c == self.content)
                    .count();
                let stop = chars[start..]
                    .iter()
                    .rev()
                    .take(self.stop)
                    .take_while(|&&c| c == self.content)
                    .count();
                chars[start..chars.len() - stop].iter().collect()
            })
            .collect()
    }
}
