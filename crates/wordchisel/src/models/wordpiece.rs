//! # WordPiece Model

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{config::parse_component, errors::WCResult, types::TokenType, vocab::TokenVocab};

fn default_unk_token() -> String {
    "[UNK]".to_string()
}

fn default_continuing_subword_prefix() -> String {
    "##".to_string()
}

fn default_max_input_chars_per_word() -> usize {
    100
}

#[derive(Debug, Deserialize)]
struct WordPieceConfig {
    vocab: HashMap<String, usize>,

    #[serde(default = "default_unk_token")]
    unk_token: String,

    #[serde(default = "default_continuing_subword_prefix")]
    continuing_subword_prefix: String,

    #[serde(default = "default_max_input_chars_per_word")]
    max_input_chars_per_word: usize,

    #[serde(default)]
    fuse_unk: bool,
}

/// Greedy longest-match-first subword model.
///
/// Each word is consumed left to right by taking the longest vocabulary
/// entry at the cursor; non-initial pieces carry the continuing prefix.
/// A word with any unmatchable position, or longer than the char limit,
/// becomes a single unknown token.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPieceModel {
    unk_token: String,
    continuing_subword_prefix: String,
    max_input_chars_per_word: usize,
    fuse_unk: bool,
}

impl WordPieceModel {
    /// Build the model and its vocabulary from a `WordPiece` model config.
    pub fn from_config<T: TokenType>(config: &Value) -> WCResult<(Self, TokenVocab<T>)> {
        let cfg: WordPieceConfig = parse_component(config)?;
        let vocab =
            TokenVocab::from_entries(cfg.vocab)?.with_unk_token(Some(cfg.unk_token.clone()));
        let model = Self {
            unk_token: cfg.unk_token,
            continuing_subword_prefix: cfg.continuing_subword_prefix,
            max_input_chars_per_word: cfg.max_input_chars_per_word,
            fuse_unk: cfg.fuse_unk,
        };
        Ok((model, vocab))
    }

    /// The prefix marking non-initial pieces.
    pub fn continuing_subword_prefix(&self) -> &str {
        &self.continuing_subword_prefix
    }

    /// Fuse runs of unknown tokens?
    pub fn fuse_unk(&self) -> bool {
        self.fuse_unk
    }

    /// Tokenize one word, appending to `tokens`.
    pub fn tokenize_append<T: TokenType>(
        &self,
        vocab: &TokenVocab<T>,
        word: &str,
        tokens: &mut Vec<String>,
    ) {
        if word.chars().count() > self.max_input_chars_per_word {
            tokens.push(self.unk_token.clone());
            return;
        }

        let boundaries: Vec<usize> = word
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(word.len()))
            .collect();

        let mark = tokens.len();
        let mut start = 0;
        while start + 1 < boundaries.len() {
            let begin = boundaries[start];
            let found = (start + 1..boundaries.len()).rev().find_map(|end| {
                let piece = &word[begin..boundaries[end]];
                let piece = if start > 0 {
                    format!("{}{piece}", self.continuing_subword_prefix)
                } else {
                    piece.to_string()
                };
                vocab.contains(&piece).then_some((end, piece))
            });

            match found {
                Some((end, piece)) => {
                    tokens.push(piece);
                    start = end;
                }
                None => {
                    tokens.truncate(mark);
                    tokens.push(self.unk_token.clone());
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(vocab: Value) -> (WordPieceModel, TokenVocab<u32>) {
        WordPieceModel::from_config(&json!({
            "type": "WordPiece",
            "vocab": vocab,
            "max_input_chars_per_word": 8,
        }))
        .unwrap()
    }

    fn tokenize(
        model: &WordPieceModel,
        vocab: &TokenVocab<u32>,
        word: &str,
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        model.tokenize_append(vocab, word, &mut tokens);
        tokens
    }

    #[test]
    fn test_longest_match_first() {
        let (m, v) = model(json!({"[UNK]": 0, "un": 1, "##able": 2, "unable": 3}));
        assert_eq!(tokenize(&m, &v, "unable"), vec!["unable"]);

        let (m, v) = model(json!({"[UNK]": 0, "un": 1, "##able": 2, "##a": 3}));
        assert_eq!(tokenize(&m, &v, "unable"), vec!["un", "##able"]);
        assert_eq!(m.continuing_subword_prefix(), "##");
    }

    #[test]
    fn test_all_or_nothing() {
        let (m, v) = model(json!({"[UNK]": 0, "un": 1, "##able": 2}));
        assert_eq!(tokenize(&m, &v, "unablex"), vec!["[UNK]"]);
        assert_eq!(tokenize(&m, &v, "xunable"), vec!["[UNK]"]);
    }

    #[test]
    fn test_char_limit() {
        let (m, v) = model(json!({"[UNK]": 0, "a": 1, "##a": 2}));
        assert_eq!(tokenize(&m, &v, "aaaaaaaa").len(), 8);
        assert_eq!(tokenize(&m, &v, "aaaaaaaaa"), vec!["[UNK]"]);
    }

    #[test]
    fn test_multibyte_chars() {
        let (m, v) = model(json!({"[UNK]": 0, "é": 1, "##t": 2, "##é": 3}));
        assert_eq!(tokenize(&m, &v, "été"), vec!["é", "##t", "##é"]);
    }
}
