//! # Tokenizer Models
//!
//! Models turn pre-tokenized pieces ("words") into subword token strings:
//! * [`WordPieceModel`] - greedy longest-match-first.
//! * [`BpeModel`] - rank-ordered pair merging, with a per-word cache.
//! * [`UnigramModel`] - max-score segmentation over a piece lattice.
//! * [`LegacyModel`] - pass-through over a pre-tokenized vocabulary.
//!
//! [`TokenizerModel::from_config`] builds the model and its [`TokenVocab`].

pub mod bpe;
pub mod legacy;
pub mod unigram;
pub mod wordpiece;

#[doc(inline)]
pub use bpe::BpeModel;
#[doc(inline)]
pub use legacy::LegacyModel;
#[doc(inline)]
pub use unigram::UnigramModel;
#[doc(inline)]
pub use wordpiece::WordPieceModel;

use serde_json::Value;

use crate::{
    config::{TokenizerSettings, component_type, unknown_type},
    errors::{WCResult, WordchiselError},
    types::TokenType,
    vocab::TokenVocab,
};

const COMPONENT: &str = "model";

/// A subword tokenization model.
#[derive(Debug)]
#[non_exhaustive]
pub enum TokenizerModel {
    /// See [`WordPieceModel`].
    WordPiece(WordPieceModel),

    /// See [`BpeModel`].
    Bpe(BpeModel),

    /// See [`UnigramModel`].
    Unigram(UnigramModel),

    /// See [`LegacyModel`].
    Legacy(LegacyModel),
}

impl TokenizerModel {
    /// Build a model and its vocabulary from the model config.
    ///
    /// A config with no recognized `type` but with a `vocab` is a [`LegacyModel`].
    ///
    /// ## Arguments
    /// * `config` - the `model` object of the tokenizer definition.
    /// * `settings` - the tokenizer settings; used by legacy vocabularies.
    pub fn from_config<T: TokenType>(
        config: &Value,
        settings: &TokenizerSettings,
    ) -> WCResult<(Self, TokenVocab<T>)> {
        let (model, vocab) = match component_type(config, COMPONENT)? {
            Some("WordPiece") => {
                let (model, vocab) = WordPieceModel::from_config(config)?;
                (Self::WordPiece(model), vocab)
            }
            Some("BPE") => {
                let (model, vocab) = BpeModel::from_config(config)?;
                (Self::Bpe(model), vocab)
            }
            Some("Unigram") => {
                let (model, vocab) = UnigramModel::from_config(config)?;
                (Self::Unigram(model), vocab)
            }
            _ if config.get("vocab").is_some() => {
                let (model, vocab) = LegacyModel::from_config(config, settings)?;
                (Self::Legacy(model), vocab)
            }
            Some(other) => return Err(unknown_type(COMPONENT, other)),
            None => return Err(WordchiselError::MissingComponentType { component: COMPONENT }),
        };
        log::debug!(
            "loaded {} model: vocab size {}",
            model.kind_name(),
            vocab.len()
        );
        Ok((model, vocab))
    }

    /// The model kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::WordPiece(_) => "WordPiece",
            Self::Bpe(_) => "BPE",
            Self::Unigram(_) => "Unigram",
            Self::Legacy(_) => "Legacy",
        }
    }

    /// Are runs of unknown tokens fused into one?
    ///
    /// Always true for Unigram.
    pub fn fuse_unk(&self) -> bool {
        match self {
            Self::WordPiece(m) => m.fuse_unk(),
            Self::Bpe(m) => m.fuse_unk(),
            Self::Unigram(_) => true,
            Self::Legacy(m) => m.fuse_unk(),
        }
    }

    /// The suffix marking the end of a word, if the model uses one.
    pub fn end_of_word_suffix(&self) -> Option<&str> {
        match self {
            Self::Bpe(m) => m.end_of_word_suffix(),
            _ => None,
        }
    }

    /// Tokenize pre-tokenized words into subword tokens.
    ///
    /// Unknown input is emitted as text, not ids: WordPiece emits its
    /// `unk_token`, Unigram emits the raw span. When the vocabulary has
    /// no unknown id, such tokens fail id conversion with
    /// [`WordchiselError::UnknownToken`](crate::WordchiselError::UnknownToken).
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary, including added tokens.
    /// * `words` - the pieces from pre-tokenization.
    ///
    /// ## Returns
    /// The subword tokens for all words, in order; with unknown runs fused
    /// when [`fuse_unk`](Self::fuse_unk).
    pub fn tokenize<T: TokenType, S: AsRef<str>>(
        &self,
        vocab: &TokenVocab<T>,
        words: &[S],
    ) -> WCResult<Vec<String>> {
        let mut tokens = Vec::new();
        for word in words {
            let word = word.as_ref();
            match self {
                Self::WordPiece(m) => m.tokenize_append(vocab, word, &mut tokens),
                Self::Bpe(m) => m.tokenize_append(vocab, word, &mut tokens)?,
                Self::Unigram(m) => m.tokenize_append(word, &mut tokens),
                Self::Legacy(_) => tokens.push(word.to_string()),
            }
        }
        if self.fuse_unk() {
            tokens = vocab.fuse_unknown(tokens);
        }
        Ok(tokens)
    }
}
