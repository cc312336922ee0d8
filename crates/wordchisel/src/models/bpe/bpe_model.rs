//! # BPE Model

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::parse_component,
    errors::{WCResult, WordchiselError},
    models::bpe::{MergeTable, WordCache, merge_word},
    types::TokenType,
    vocab::TokenVocab,
};

/// A merge as serialized: `"left right"` or `["left", "right"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MergeConfig {
    Joined(String),
    Pair(String, String),
}

impl MergeConfig {
    fn into_pair(self) -> WCResult<(String, String)> {
        match self {
            Self::Pair(left, right) => Ok((left, right)),
            Self::Joined(joined) => joined
                .split_once(' ')
                .map(|(left, right)| (left.to_string(), right.to_string()))
                .ok_or_else(|| {
                    WordchiselError::InvalidConfig(format!("malformed BPE merge: {joined:?}"))
                }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BpeConfig {
    vocab: HashMap<String, usize>,

    #[serde(default)]
    merges: Vec<MergeConfig>,

    #[serde(default)]
    unk_token: Option<String>,

    #[serde(default)]
    end_of_word_suffix: Option<String>,

    #[serde(default)]
    continuing_subword_suffix: Option<String>,

    #[serde(default)]
    byte_fallback: bool,

    #[serde(default)]
    fuse_unk: bool,

    #[serde(default)]
    ignore_merges: bool,
}

/// Byte-pair encoding model.
///
/// Each word is split into chars (the last carrying the end-of-word
/// suffix), then merged by rank with [`merge_word`]. Pieces missing from
/// the vocabulary become `<0xNN>` byte tokens under byte fallback, else
/// the unknown token; with neither, they are dropped.
///
/// Per-word merge results are memoized in a shared [`WordCache`].
#[derive(Debug)]
pub struct BpeModel {
    merges: MergeTable,
    unk_token: Option<String>,
    end_of_word_suffix: Option<String>,
    continuing_subword_suffix: Option<String>,
    byte_fallback: bool,
    fuse_unk: bool,
    ignore_merges: bool,
    cache: WordCache,
}

impl BpeModel {
    /// Build the model and its vocabulary from a `BPE` model config.
    pub fn from_config<T: TokenType>(config: &Value) -> WCResult<(Self, TokenVocab<T>)> {
        let cfg: BpeConfig = parse_component(config)?;

        let pairs = cfg
            .merges
            .into_iter()
            .map(MergeConfig::into_pair)
            .collect::<WCResult<Vec<_>>>()?;

        let vocab = TokenVocab::from_entries(cfg.vocab)?.with_unk_token(cfg.unk_token.clone());
        let model = Self {
            merges: MergeTable::from_pairs(pairs),
            unk_token: cfg.unk_token,
            end_of_word_suffix: cfg.end_of_word_suffix.filter(|s| !s.is_empty()),
            continuing_subword_suffix: cfg.continuing_subword_suffix.filter(|s| !s.is_empty()),
            byte_fallback: cfg.byte_fallback,
            fuse_unk: cfg.fuse_unk,
            ignore_merges: cfg.ignore_merges,
            cache: WordCache::default(),
        };
        log::debug!("BPE model: {} merges", model.merges.len());
        Ok((model, vocab))
    }

    /// The suffix appended to the last char of each word.
    pub fn end_of_word_suffix(&self) -> Option<&str> {
        self.end_of_word_suffix.as_deref()
    }

    /// Fuse runs of unknown tokens?
    pub fn fuse_unk(&self) -> bool {
        self.fuse_unk
    }

    /// The merge rules.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// The per-word merge cache.
    pub fn cache(&self) -> &WordCache {
        &self.cache
    }

    /// Merge one word into pieces, through the cache.
    ///
    /// Pieces are not yet checked against the vocabulary.
    pub fn merge_pieces(
        &self,
        word: &str,
    ) -> WCResult<Vec<String>> {
        if word.is_empty() {
            return Ok(Vec::new());
        }
        let pieces = self
            .cache
            .get_or_try_insert_with(word, || self.merge_uncached(word))?;
        Ok(pieces.to_vec())
    }

    fn merge_uncached(
        &self,
        word: &str,
    ) -> WCResult<Vec<String>> {
        let text = match &self.end_of_word_suffix {
            Some(suffix) => format!("{word}{suffix}"),
            None => word.to_string(),
        };

        let mut segments: Vec<_> = word
            .char_indices()
            .map(|(idx, c)| idx..idx + c.len_utf8())
            .collect();
        if let Some(last) = segments.last_mut() {
            last.end = text.len();
        }

        let ranges = merge_word(&text, segments, &self.merges)?;
        let last = ranges.len().saturating_sub(1);
        Ok(ranges
            .into_iter()
            .enumerate()
            .map(|(idx, range)| match &self.continuing_subword_suffix {
                Some(suffix) if idx < last => format!("{}{suffix}", &text[range]),
                _ => text[range].to_string(),
            })
            .collect())
    }

    /// Tokenize one word, appending to `tokens`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, vocab, tokens)))]
    pub fn tokenize_append<T: TokenType>(
        &self,
        vocab: &TokenVocab<T>,
        word: &str,
        tokens: &mut Vec<String>,
    ) -> WCResult<()> {
        if self.ignore_merges && vocab.contains(word) {
            tokens.push(word.to_string());
            return Ok(());
        }

        for piece in self.merge_pieces(word)? {
            if vocab.contains(&piece) {
                tokens.push(piece);
            } else if self.byte_fallback {
                tokens.extend(piece.bytes().map(|b| format!("<0x{b:02X}>")));
            } else if let Some(unk) = &self.unk_token {
                tokens.push(unk.clone());
            } else {
                log::debug!("dropping out-of-vocabulary BPE piece {piece:?}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokenize(
        model: &BpeModel,
        vocab: &TokenVocab<u32>,
        word: &str,
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        model.tokenize_append(vocab, word, &mut tokens).unwrap();
        tokens
    }

    fn lower_config() -> Value {
        json!({
            "type": "BPE",
            "unk_token": "<unk>",
            "vocab": {"<unk>": 0, "l": 1, "o": 2, "w": 3, "e": 4, "r": 5,
                      "lo": 6, "low": 7, "er": 8, "lower": 9},
            "merges": ["l o", "lo w", "e r", ["low", "er"]],
        })
    }

    #[test]
    fn test_merges() {
        let (model, vocab) = BpeModel::from_config::<u32>(&lower_config()).unwrap();
        assert_eq!(model.merges().len(), 4);
        assert_eq!(tokenize(&model, &vocab, "lower"), vec!["lower"]);
        assert_eq!(tokenize(&model, &vocab, "rowel"), vec!["r", "o", "w", "e", "l"]);
        assert_eq!(tokenize(&model, &vocab, "lowz"), vec!["low", "<unk>"]);
        assert!(tokenize(&model, &vocab, "").is_empty());
    }

    #[test]
    fn test_cache_is_deterministic() {
        let (model, vocab) = BpeModel::from_config::<u32>(&lower_config()).unwrap();
        let first = tokenize(&model, &vocab, "lower");
        assert_eq!(model.cache().len(), 1);
        assert_eq!(tokenize(&model, &vocab, "lower"), first);
        assert_eq!(model.cache().len(), 1);
    }

    #[test]
    fn test_suffixes() {
        let (model, vocab) = BpeModel::from_config::<u32>(&json!({
            "type": "BPE",
            "vocab": {"a": 0, "b</w>": 1, "a@@": 2},
            "merges": [],
            "end_of_word_suffix": "</w>",
            "continuing_subword_suffix": "@@",
        }))
        .unwrap();
        assert_eq!(model.end_of_word_suffix(), Some("</w>"));
        assert_eq!(tokenize(&model, &vocab, "ab"), vec!["a@@", "b</w>"]);
        assert_eq!(tokenize(&model, &vocab, "c"), Vec::<String>::new());
    }

    #[test]
    fn test_byte_fallback() {
        let (model, vocab) = BpeModel::from_config::<u32>(&json!({
            "type": "BPE",
            "vocab": {"<unk>": 0, "a": 1, "<0xC3>": 2, "<0xA9>": 3},
            "merges": [],
            "unk_token": "<unk>",
            "byte_fallback": true,
        }))
        .unwrap();
        assert_eq!(tokenize(&model, &vocab, "aé"), vec!["a", "<0xC3>", "<0xA9>"]);
    }

    #[test]
    fn test_ignore_merges() {
        let (model, vocab) = BpeModel::from_config::<u32>(&json!({
            "type": "BPE",
            "vocab": {"a": 0, "b": 1, "ab": 2, "abab": 3},
            "merges": ["a b"],
            "ignore_merges": true,
        }))
        .unwrap();
        assert_eq!(tokenize(&model, &vocab, "abab"), vec!["abab"]);
        assert_eq!(tokenize(&model, &vocab, "aba"), vec!["ab", "a"]);
    }

    #[test]
    fn test_malformed_merge() {
        assert!(matches!(
            BpeModel::from_config::<u32>(&json!({
                "type": "BPE", "vocab": {}, "merges": ["ab"]
            })),
            Err(WordchiselError::InvalidConfig(_))
        ));
    }
}
