//! # Post-Processors
//!
//! Post-processors assemble the token sequences of one text (or a text
//! pair) into the final token list, inserting special tokens and
//! assigning segment (token type) ids.
//!
//! * [`TemplateProcessor`] - declarative single/pair templates.
//! * [`SpecialWrapProcessor`] - `[CLS] A [SEP] B [SEP]` style wrapping;
//!   the `RobertaProcessing` flavor doubles the separator between sequences.
//! * `ByteLevel` - plain concatenation, with no segment ids.

pub mod special_wrap;
pub mod template;

#[doc(inline)]
pub use special_wrap::SpecialWrapProcessor;
#[doc(inline)]
pub use template::{SequenceId, TemplatePiece, TemplateProcessor};

use serde_json::Value;

use crate::{
    config::{parse_component, required_component_type, unknown_type},
    errors::WCResult,
};

const COMPONENT: &str = "post_processor";

/// The output of post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessed {
    /// The assembled tokens.
    pub tokens: Vec<String>,

    /// Segment ids, one per token; when the processor assigns them.
    pub token_type_ids: Option<Vec<u32>>,
}

impl PostProcessed {
    /// Concatenate the sequences, with no special tokens or segment ids.
    pub fn concat(
        tokens: Vec<String>,
        tokens_pair: Option<Vec<String>>,
    ) -> Self {
        let mut tokens = tokens;
        tokens.extend(tokens_pair.unwrap_or_default());
        Self {
            tokens,
            token_type_ids: None,
        }
    }
}

/// A post-processor.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PostProcessor {
    /// See [`TemplateProcessor`].
    Template(TemplateProcessor),

    /// See [`SpecialWrapProcessor`].
    SpecialWrap(SpecialWrapProcessor),

    /// Concatenation only.
    ByteLevel,
}

impl PostProcessor {
    /// Build a post-processor from its config.
    ///
    /// ## Returns
    /// [`WordchiselError::UnknownComponentType`](crate::errors::WordchiselError::UnknownComponentType)
    /// for an unrecognized `type`.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        Ok(match required_component_type(config, COMPONENT)? {
            "TemplateProcessing" => Self::Template(parse_component(config)?),
            "BertProcessing" => {
                Self::SpecialWrap(SpecialWrapProcessor::from_config(config, false)?)
            }
            "RobertaProcessing" => {
                Self::SpecialWrap(SpecialWrapProcessor::from_config(config, true)?)
            }
            "ByteLevel" => Self::ByteLevel,
            other => return Err(unknown_type(COMPONENT, other)),
        })
    }

    /// Assemble one or two token sequences.
    ///
    /// ## Arguments
    /// * `tokens` - the first sequence.
    /// * `tokens_pair` - the optional second sequence.
    /// * `add_special_tokens` - when false, only concatenate (segment ids are kept).
    pub fn post_process(
        &self,
        tokens: Vec<String>,
        tokens_pair: Option<Vec<String>>,
        add_special_tokens: bool,
    ) -> PostProcessed {
        match self {
            Self::Template(p) => p.post_process(tokens, tokens_pair, add_special_tokens),
            Self::SpecialWrap(p) => p.post_process(tokens, tokens_pair, add_special_tokens),
            Self::ByteLevel => PostProcessed::concat(tokens, tokens_pair),
        }
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
    fn test_factory() {
        let bert = PostProcessor::from_config(&json!({
            "type": "BertProcessing",
            "cls": ["[CLS]", 101],
            "sep": ["[SEP]", 102],
        }))
        .unwrap();
        let out = bert.post_process(strings(&["a", "b"]), Some(strings(&["c"])), true);
        assert_eq!(out.tokens, strings(&["[CLS]", "a", "b", "[SEP]", "c", "[SEP]"]));
        assert_eq!(out.token_type_ids, Some(vec![0, 0, 0, 0, 1, 1]));

        assert!(matches!(
            PostProcessor::from_config(&json!({"type": "Nope"})),
            Err(WordchiselError::UnknownComponentType { .. })
        ));
    }

    #[test]
    fn test_byte_level_concat() {
        let p = PostProcessor::from_config(&json!({"type": "ByteLevel", "trim_offsets": true}))
            .unwrap();
        let out = p.post_process(strings(&["a"]), Some(strings(&["b"])), true);
        assert_eq!(out, PostProcessed::concat(strings(&["a", "b"]), None));
    }
}
