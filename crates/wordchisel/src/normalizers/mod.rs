//! # Normalizers
//!
//! Pure `text -> text` transforms, applied to each non-added-token section
//! before pre-tokenization.
//!
//! [`Normalizer::from_config`] is the single factory for the family; it
//! dispatches on the config's `type` field.

pub mod bert_normalizer;
pub mod precompiled;
pub mod text_normalizers;

#[doc(inline)]
pub use bert_normalizer::BertNormalizer;
#[doc(inline)]
pub use precompiled::PrecompiledNormalizer;
#[doc(inline)]
pub use text_normalizers::{ReplaceNormalizer, StripNormalizer};

use serde::Deserialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::{
    config::{parse_component, required_component_type, unknown_type},
    errors::WCResult,
};

const COMPONENT: &str = "normalizer";

/// Remove combining diacritical marks (``U+0300..=U+036F``).
///
/// This does not decompose; pair with NFD to strip accents from precomposed chars.
pub fn remove_combining_marks(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

/// Lowercase, then remove combining marks.
pub fn lowercase_and_remove_accent(text: &str) -> String {
    remove_combining_marks(&text.to_lowercase())
}

/// A text normalizer.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Normalizer {
    /// BERT text cleanup; see [`BertNormalizer`].
    Bert(BertNormalizer),

    /// SentencePiece charsmap approximation; see [`PrecompiledNormalizer`].
    Precompiled(PrecompiledNormalizer),

    /// Apply each normalizer in order.
    Sequence(Vec<Normalizer>),

    /// Find-and-replace; see [`ReplaceNormalizer`].
    Replace(ReplaceNormalizer),

    /// Unicode NFC.
    Nfc,

    /// Unicode NFD.
    Nfd,

    /// Unicode NFKC.
    Nfkc,

    /// Unicode NFKD.
    Nfkd,

    /// Trim whitespace; see [`StripNormalizer`].
    Strip(StripNormalizer),

    /// Remove combining marks.
    StripAccents,

    /// Lowercase.
    Lowercase,

    /// Prepend a fixed string.
    Prepend(String),
}

#[derive(Deserialize)]
struct SequenceConfig {
    normalizers: Vec<Value>,
}

#[derive(Deserialize)]
struct PrependConfig {
    prepend: String,
}

impl Normalizer {
    /// Build a normalizer from its config.
    ///
    /// ## Returns
    /// [`WordchiselError::UnknownComponentType`](crate::errors::WordchiselError::UnknownComponentType) for unrecognized types.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        Ok(match required_component_type(config, COMPONENT)? {
            "BertNormalizer" => Self::Bert(parse_component(config)?),
            "Precompiled" => Self::Precompiled(PrecompiledNormalizer),
            "Sequence" => {
                let seq: SequenceConfig = parse_component(config)?;
                Self::Sequence(
                    seq.normalizers
                        .iter()
                        .map(Self::from_config)
                        .collect::<WCResult<_>>()?,
                )
            }
            "Replace" => Self::Replace(ReplaceNormalizer::from_config(config)?),
            "NFC" => Self::Nfc,
            "NFD" => Self::Nfd,
            "NFKC" => Self::Nfkc,
            "NFKD" => Self::Nfkd,
            "Strip" => Self::Strip(parse_component(config)?),
            "StripAccents" => Self::StripAccents,
            "Lowercase" => Self::Lowercase,
            "Prepend" => Self::Prepend(parse_component::<PrependConfig>(config)?.prepend),
            other => return Err(unknown_type(COMPONENT, other)),
        })
    }

    /// Normalize text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        match self {
            Self::Bert(n) => n.normalize(text),
            Self::Precompiled(n) => n.normalize(text),
            Self::Sequence(seq) => seq
                .iter()
                .fold(text.to_string(), |acc, n| n.normalize(&acc)),
            Self::Replace(n) => n.normalize(text),
            Self::Nfc => text.nfc().collect(),
            Self::Nfd => text.nfd().collect(),
            Self::Nfkc => text.nfkc().collect(),
            Self::Nfkd => text.nfkd().collect(),
            Self::Strip(n) => n.normalize(text),
            Self::StripAccents => remove_combining_marks(text),
            Self::Lowercase => text.to_lowercase(),
            Self::Prepend(prefix) => format!("{prefix}{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::WordchiselError;

    #[test]
    fn test_sequence_order() {
        let n = Normalizer::from_config(&json!({
            "type": "Sequence",
            "normalizers": [
                {"type": "Prepend", "prepend": "▁"},
                {"type": "Replace", "pattern": {"String": " "}, "content": "▁"},
                {"type": "Lowercase"},
            ]
        }))
        .unwrap();
        assert_eq!(n.normalize("Hello World"), "▁hello▁world");

        // Order matters: replacing first, then prepending.
        let n = Normalizer::from_config(&json!({
            "type": "Sequence",
            "normalizers": [
                {"type": "Replace", "pattern": {"String": "▁"}, "content": "_"},
                {"type": "Prepend", "prepend": "▁"},
            ]
        }))
        .unwrap();
        assert_eq!(n.normalize("a▁b"), "▁a_b");
    }

    #[test]
    fn test_unicode_forms() {
        let composed = "\u{00e9}";
        let decomposed = "e\u{0301}";
        let nfc = Normalizer::from_config(&json!({"type": "NFC"})).unwrap();
        let nfd = Normalizer::from_config(&json!({"type": "NFD"})).unwrap();
        let nfkc = Normalizer::from_config(&json!({"type": "NFKC"})).unwrap();
        let nfkd = Normalizer::from_config(&json!({"type": "NFKD"})).unwrap();

        assert_eq!(nfc.normalize(decomposed), composed);
        assert_eq!(nfd.normalize(composed), decomposed);
        assert_eq!(nfkc.normalize("ﬁ"), "fi");
        assert_eq!(nfkd.normalize("ﬁ\u{00e9}"), "fie\u{0301}");
    }

    #[test]
    fn test_strip_accents() {
        let n = Normalizer::from_config(&json!({
            "type": "Sequence",
            "normalizers": [{"type": "NFD"}, {"type": "StripAccents"}]
        }))
        .unwrap();
        assert_eq!(n.normalize("Café"), "Cafe");

        assert_eq!(lowercase_and_remove_accent("E\u{0301}T\u{0301}E"), "ete");
    }

    #[test]
    fn test_unknown_type() {
        assert!(matches!(
            Normalizer::from_config(&json!({"type": "Squash"})),
            Err(WordchiselError::UnknownComponentType {
                component: "normalizer",
                ..
            })
        ));
    }
}
