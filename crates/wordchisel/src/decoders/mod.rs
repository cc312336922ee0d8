//! # Decoders
//!
//! Decoders turn token strings back into text, undoing the artifacts of
//! pre-tokenization and the model.
//!
//! Every decoder maps a list of fragments to a list of fragments
//! ([`Decoder::decode_chain`]); so decoders compose in a `Sequence`, and the
//! final text is the concatenation of the last fragments ([`Decoder::decode`]).

pub mod byte_decoders;
pub mod cleanup;
pub mod decode_context;
pub mod text_decoders;

#[doc(inline)]
pub use byte_decoders::{byte_fallback_decode_chain, byte_level_decode_chain, parse_byte_token};
#[doc(inline)]
pub use cleanup::clean_up_tokenization;
#[doc(inline)]
pub use decode_context::DecodeContext;
#[doc(inline)]
pub use text_decoders::{
    BpeSuffixDecoder, CtcDecoder, MetaspaceDecoder, StripDecoder, WordPieceDecoder,
};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::{parse_component, required_component_type, unknown_type},
    errors::WCResult,
    normalizers::ReplaceNormalizer,
};

const COMPONENT: &str = "decoder";

#[derive(Deserialize)]
struct SequenceConfig {
    decoders: Vec<Value>,
}

/// A decoder.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Decoder {
    /// See [`WordPieceDecoder`].
    WordPiece(WordPieceDecoder),

    /// See [`MetaspaceDecoder`].
    Metaspace(MetaspaceDecoder),

    /// See [`byte_level_decode_chain`].
    ByteLevel,

    /// Pattern replacement on each fragment.
    Replace(ReplaceNormalizer),

    /// See [`byte_fallback_decode_chain`].
    ByteFallback,

    /// Join all fragments into one.
    Fuse,

    /// See [`StripDecoder`].
    Strip(StripDecoder),

    /// See [`CtcDecoder`].
    Ctc(CtcDecoder),

    /// See [`BpeSuffixDecoder`].
    BpeSuffix(BpeSuffixDecoder),

    /// Apply decoders in order.
    Sequence(Vec<Decoder>),
}

impl Decoder {
    /// Build a decoder from its config.
    ///
    /// ## Returns
    /// [`WordchiselError::UnknownComponentType`](crate::errors::WordchiselError::UnknownComponentType)
    /// for an unrecognized `type`.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        Ok(match required_component_type(config, COMPONENT)? {
            "WordPiece" => Self::WordPiece(parse_component(config)?),
            "Metaspace" => Self::Metaspace(parse_component(config)?),
            "ByteLevel" => Self::ByteLevel,
            "Replace" => Self::Replace(ReplaceNormalizer::from_config(config)?),
            "ByteFallback" => Self::ByteFallback,
            "Fuse" => Self::Fuse,
            "Strip" => Self::Strip(parse_component(config)?),
            "CTC" => Self::Ctc(parse_component(config)?),
            "BPEDecoder" => Self::BpeSuffix(parse_component(config)?),
            "Sequence" => {
                let cfg: SequenceConfig = parse_component(config)?;
                Self::Sequence(
                    cfg.decoders
                        .iter()
                        .map(Self::from_config)
                        .collect::<WCResult<_>>()?,
                )
            }
            other => return Err(unknown_type(COMPONENT, other)),
        })
    }

    /// Decode token strings into text fragments.
    ///
    /// ## Arguments
    /// * `tokens` - the token strings (or fragments of an earlier decoder).
    /// * `ctx` - tokenizer state; added tokens for byte-level decoding.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
        ctx: &DecodeContext,
    ) -> Vec<String> {
        match self {
            Self::WordPiece(d) => d.decode_chain(tokens),
            Self::Metaspace(d) => d.decode_chain(tokens),
            Self::ByteLevel => byte_level_decode_chain(tokens, ctx),
            Self::Replace(r) => tokens.iter().map(|t| r.normalize(t)).collect(),
            Self::ByteFallback => byte_fallback_decode_chain(tokens),
            Self::Fuse => vec![tokens.concat()],
            Self::Strip(d) => d.decode_chain(tokens),
            Self::Ctc(d) => d.decode_chain(tokens),
            Self::BpeSuffix(d) => d.decode_chain(tokens),
            Self::Sequence(decoders) => decoders
                .iter()
                .fold(tokens, |tokens, d| d.decode_chain(tokens, ctx)),
        }
    }

    /// Decode token strings into text.
    pub fn decode(
        &self,
        tokens: Vec<String>,
        ctx: &DecodeContext,
    ) -> String {
        self.decode_chain(tokens, ctx).concat()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::WordchiselError;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_llama_sequence() {
        let decoder = Decoder::from_config(&json!({
            "type": "Sequence",
            "decoders": [
                {"type": "Replace", "pattern": {"String": "▁"}, "content": " "},
                {"type": "ByteFallback"},
                {"type": "Fuse"},
                {"type": "Strip", "content": " ", "start": 1, "stop": 0}
            ]
        }))
        .unwrap();

        let tokens = strings(&["▁Hello", "▁w", "orld", "<0x21>", "▁", "<0xE2>", "<0x9C>", "<0x93>"]);
        assert_eq!(
            decoder.decode(tokens, &DecodeContext::empty()),
            "Hello world! ✓"
        );
    }

    #[test]
    fn test_unknown_type() {
        assert!(matches!(
            Decoder::from_config(&json!({"type": "Sequence", "decoders": [{"type": "Bogus"}]})),
            Err(WordchiselError::UnknownComponentType { component: "decoder", .. })
        ));
        assert!(matches!(
            Decoder::from_config(&json!({"content": " "})),
            Err(WordchiselError::MissingComponentType { component: "decoder" })
        ));
    }
}
