//! # Template Post-Processing

use serde::Deserialize;

use crate::processors::PostProcessed;

/// Which input sequence a template slot refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display)]
pub enum SequenceId {
    /// The first sequence.
    A,

    /// The second (pair) sequence.
    B,
}

/// One instruction of a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TemplatePiece {
    /// Insert a special token.
    SpecialToken {
        /// The token string.
        id: String,

        /// The segment id of the token.
        type_id: u32,
    },

    /// Insert an input sequence.
    Sequence {
        /// The sequence to insert.
        id: SequenceId,

        /// The segment id of every token of the sequence.
        type_id: u32,
    },
}

/// Template-driven post-processor.
///
/// The `single` template is used for one sequence; `pair` for two.
/// When no `pair` template is configured, a pair is the `single` template
/// followed by the second sequence with segment id 1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateProcessor {
    single: Vec<TemplatePiece>,

    #[serde(default)]
    pair: Option<Vec<TemplatePiece>>,
}

impl TemplateProcessor {
    /// Create a processor from templates.
    pub fn new(
        single: Vec<TemplatePiece>,
        pair: Option<Vec<TemplatePiece>>,
    ) -> Self {
        Self { single, pair }
    }

    /// See [`PostProcessor::post_process`](crate::processors::PostProcessor::post_process).
    pub fn post_process(
        &self,
        tokens: Vec<String>,
        tokens_pair: Option<Vec<String>>,
        add_special_tokens: bool,
    ) -> PostProcessed {
        let fallback;
        let template = match (&tokens_pair, &self.pair) {
            (None, _) => &self.single,
            (Some(_), Some(pair)) => pair,
            (Some(_), None) => {
                fallback = self
                    .single
                    .iter()
                    .cloned()
                    .chain(std::iter::once(TemplatePiece::Sequence {
                        id: SequenceId::B,
                        type_id: 1,
                    }))
                    .collect::<Vec<_>>();
                &fallback
            }
        };

        let sequences = [Some(tokens), tokens_pair];
        let mut out = Vec::new();
        let mut type_ids = Vec::new();
        for piece in template {
            match piece {
                TemplatePiece::SpecialToken { id, type_id } => {
                    if add_special_tokens {
                        out.push(id.clone());
                        type_ids.push(*type_id);
                    }
                }
                TemplatePiece::Sequence { id, type_id } => {
                    let slot = match id {
                        SequenceId::A => 0,
                        SequenceId::B => 1,
                    };
                    if let Some(sequence) = &sequences[slot] {
                        type_ids.extend(std::iter::repeat_n(*type_id, sequence.len()));
                        out.extend(sequence.iter().cloned());
                    }
                }
            }
        }
        PostProcessed {
            tokens: out,
            token_type_ids: Some(type_ids),
        }
    }
}
