//! # Pre-Tokenizers
//!
//! Pre-tokenizers cut normalized text into the pieces that the model
//! tokenizes independently of one another.
//!
//! The `section_index` threaded through [`PreTokenizer::pre_tokenize`] is the
//! position of the text among the sections produced by added-token splitting;
//! [`MetaspacePreTokenizer`]'s `first` prepend scheme keys off it.

pub mod byte_level;
pub mod match_splitters;
pub mod metaspace;
pub mod split;

#[doc(inline)]
pub use byte_level::ByteLevelPreTokenizer;
#[doc(inline)]
pub use match_splitters::MatchSplitter;
#[doc(inline)]
pub use metaspace::{MetaspacePreTokenizer, PrependScheme};
#[doc(inline)]
pub use split::{SplitDelimiterBehavior, SplitPreTokenizer};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::{parse_component, required_component_type, unknown_type},
    errors::WCResult,
    normalizers::ReplaceNormalizer,
};

const COMPONENT: &str = "pre_tokenizer";

/// A pre-tokenizer.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum PreTokenizer {
    /// Runs of non-space-non-punctuation, and single punctuation chars.
    Bert(MatchSplitter),

    /// Byte-level mapping; see [`ByteLevelPreTokenizer`].
    ByteLevel(ByteLevelPreTokenizer),

    /// Sentinel space replacement; see [`MetaspacePreTokenizer`].
    Metaspace(MetaspacePreTokenizer),

    /// Generic pattern split; see [`SplitPreTokenizer`].
    Split(SplitPreTokenizer),

    /// Runs of punctuation, and runs of everything else.
    Punctuation(MatchSplitter),

    /// Runs of (ASCII) digits, or single digits, and runs of everything else.
    Digits(MatchSplitter),

    /// Non-whitespace runs.
    WhitespaceSplit(MatchSplitter),

    /// Word-char runs, and runs of non-word-non-space chars.
    Whitespace(MatchSplitter),

    /// Find-and-replace over the whole piece.
    Replace(ReplaceNormalizer),

    /// Apply each pre-tokenizer to every piece of the previous one.
    Sequence(Vec<PreTokenizer>),
}

#[derive(Deserialize)]
struct SequenceConfig {
    pretokenizers: Vec<Value>,
}

#[derive(Deserialize)]
struct DigitsConfig {
    #[serde(default)]
    individual_digits: bool,
}

impl PreTokenizer {
    /// Build a pre-tokenizer from its config.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        Ok(match required_component_type(config, COMPONENT)? {
            "BertPreTokenizer" => Self::Bert(MatchSplitter::bert()?),
            "ByteLevel" => Self::ByteLevel(ByteLevelPreTokenizer::from_config(config)?),
            "Metaspace" => Self::Metaspace(parse_component(config)?),
            "Split" => Self::Split(SplitPreTokenizer::from_config(config)?),
            "Punctuation" => Self::Punctuation(MatchSplitter::punctuation()?),
            "Digits" => {
                let digits: DigitsConfig = parse_component(config)?;
                Self::Digits(MatchSplitter::digits(digits.individual_digits)?)
            }
            "WhitespaceSplit" => Self::WhitespaceSplit(MatchSplitter::whitespace_split()?),
            "Whitespace" => Self::Whitespace(MatchSplitter::whitespace()?),
            "Replace" => Self::Replace(ReplaceNormalizer::from_config(config)?),
            "Sequence" => {
                let seq: SequenceConfig = parse_component(config)?;
                Self::Sequence(
                    seq.pretokenizers
                        .iter()
                        .map(Self::from_config)
                        .collect::<WCResult<_>>()?,
                )
            }
            other => return Err(unknown_type(COMPONENT, other)),
        })
    }

    /// Pre-tokenize a text section.
    ///
    /// ## Arguments
    /// * `text` - the normalized section text.
    /// * `section_index` - the section's index among the added-token sections.
    ///
    /// ## Returns
    /// The pieces, in order.
    pub fn pre_tokenize(
        &self,
        text: &str,
        section_index: usize,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        self.pre_tokenize_append(text, section_index, &mut pieces);
        pieces
    }

    /// Pre-tokenize a text section, appending the pieces to `pieces`.
    pub fn pre_tokenize_append(
        &self,
        text: &str,
        section_index: usize,
        pieces: &mut Vec<String>,
    ) {
        match self {
            Self::Bert(splitter) => splitter.split_append(text.trim(), pieces),
            Self::ByteLevel(p) => p.pre_tokenize_append(text, pieces),
            Self::Metaspace(p) => p.pre_tokenize_append(text, section_index, pieces),
            Self::Split(p) => p.pre_tokenize_append(text, pieces),
            Self::Punctuation(splitter)
            | Self::Digits(splitter)
            | Self::WhitespaceSplit(splitter)
            | Self::Whitespace(splitter) => splitter.split_append(text, pieces),
            Self::Replace(replace) => pieces.push(replace.normalize(text)),
            Self::Sequence(seq) => {
                let mut current = vec![text.to_string()];
                for p in seq {
                    let mut next = Vec::with_capacity(current.len());
                    for piece in &current {
                        p.pre_tokenize_append(piece, section_index, &mut next);
                    }
                    current = next;
                }
                pieces.extend(current);
            }
        }
    }
}
