//! # Unigram Model

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::parse_component,
    errors::{WCResult, WordchiselError},
    models::unigram::{CharTrie, TokenLattice},
    types::TokenType,
    vocab::TokenVocab,
};

/// Penalty below the minimum piece score for unknown spans.
const UNK_PENALTY: f64 = 10.0;

#[derive(Debug, Deserialize)]
struct UnigramConfig {
    vocab: Vec<(String, f64)>,

    #[serde(default)]
    unk_id: Option<usize>,
}

/// Max-score segmentation model.
///
/// Every char position gets an edge for each vocabulary piece starting
/// there; a position with no single-char piece also gets a one-char
/// unknown edge, scored 10 below the minimum piece score.
/// The unknown piece itself is scored the same way.
///
/// Unknown spans are emitted as their raw text; they map to the unknown
/// id at conversion, and runs of them are fused.
#[derive(Debug, Clone, PartialEq)]
pub struct UnigramModel {
    trie: CharTrie,
    scores: Vec<f64>,
    unk_score: f64,
}

impl UnigramModel {
    /// Build the model and its vocabulary from a `Unigram` model config.
    pub fn from_config<T: TokenType>(config: &Value) -> WCResult<(Self, TokenVocab<T>)> {
        let cfg: UnigramConfig = parse_component(config)?;

        let min_score = cfg
            .vocab
            .iter()
            .map(|(_, score)| *score)
            .reduce(f64::min)
            .unwrap_or(0.0);
        let unk_score = min_score - UNK_PENALTY;

        let mut scores: Vec<f64> = cfg.vocab.iter().map(|(_, score)| *score).collect();
        let unk_token = match cfg.unk_id {
            Some(id) => {
                let slot = scores
                    .get_mut(id)
                    .ok_or(WordchiselError::TokenOutOfRange { id })?;
                *slot = unk_score;
                Some(cfg.vocab[id].0.clone())
            }
            None => None,
        };

        let mut trie = CharTrie::new();
        for (id, (piece, _)) in cfg.vocab.iter().enumerate() {
            trie.insert(piece, id);
        }

        let vocab = TokenVocab::from_entries(
            cfg.vocab
                .into_iter()
                .enumerate()
                .map(|(id, (piece, _))| (piece, id)),
        )?
        .with_unk_token(unk_token);

        let model = Self {
            trie,
            scores,
            unk_score,
        };
        Ok((model, vocab))
    }

    /// The score given to unknown spans.
    pub fn unk_score(&self) -> f64 {
        self.unk_score
    }

    /// Tokenize one word, appending to `tokens`.
    pub fn tokenize_append(
        &self,
        word: &str,
        tokens: &mut Vec<String>,
    ) {
        let chars: Vec<char> = word.chars().collect();
        let mut lattice = TokenLattice::new(chars.len());

        for start in 0..chars.len() {
            let mut has_single = false;
            for (len, piece) in self.trie.common_prefix_search(&chars[start..]) {
                lattice.insert(start, start + len, self.scores[piece], Some(piece));
                has_single |= len == 1;
            }
            if !has_single {
                lattice.insert(start, start + 1, self.unk_score, None);
            }
        }

        // Every position has a one-char edge; the end is reachable.
        if let Some(path) = lattice.viterbi() {
            tokens.extend(
                path.into_iter()
                    .map(|(span, _)| chars[span].iter().collect::<String>()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokenize(
        model: &UnigramModel,
        word: &str,
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        model.tokenize_append(word, &mut tokens);
        tokens
    }

    fn t5_like() -> (UnigramModel, TokenVocab<u32>) {
        UnigramModel::from_config(&json!({
            "type": "Unigram",
            "unk_id": 0,
            "vocab": [
                ["<unk>", 0.0],
                ["▁he", -2.0],
                ["llo", -2.5],
                ["▁hello", -4.0],
                ["▁", -1.0],
                ["h", -3.0],
                ["e", -3.0],
                ["l", -3.0],
                ["o", -3.0],
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_best_segmentation() {
        let (model, vocab) = t5_like();
        assert_eq!(model.unk_score(), -14.0);
        assert_eq!(vocab.unk_token(), Some("<unk>"));

        // "▁hello" (-4.0) beats "▁he" + "llo" (-4.5).
        assert_eq!(tokenize(&model, "▁hello"), vec!["▁hello"]);
        assert_eq!(tokenize(&model, "▁hellol"), vec!["▁hello", "l"]);
    }

    #[test]
    fn test_unknown_spans() {
        let (model, vocab) = t5_like();
        let tokens = tokenize(&model, "▁hexx");
        assert_eq!(tokens, vec!["▁he", "x", "x"]);
        assert_eq!(vocab.fuse_unknown(tokens), vec!["▁he", "x"]);
        assert!(tokenize(&model, "").is_empty());
    }

    #[test]
    fn test_bad_unk_id() {
        assert!(matches!(
            UnigramModel::from_config::<u32>(&json!({
                "type": "Unigram", "unk_id": 3, "vocab": [["a", -1.0]]
            })),
            Err(WordchiselError::TokenOutOfRange { id: 3 })
        ));
    }
}
