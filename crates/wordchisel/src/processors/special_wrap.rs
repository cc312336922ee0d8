//! # Special-Token Wrapping

use serde::Deserialize;
use serde_json::Value;

use crate::{config::parse_component, errors::WCResult, processors::PostProcessed};

#[derive(Debug, Deserialize)]
struct SpecialWrapConfig {
    cls: (String, u64),
    sep: (String, u64),
}

/// Wraps sequences as `CLS A SEP` and `CLS A SEP B SEP`.
///
/// With `double_sep` (RoBERTa), a pair is `CLS A SEP SEP B SEP`.
/// Segment ids are 0 through the first sequence's `SEP`, and 1 after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialWrapProcessor {
    cls: String,
    sep: String,
    double_sep: bool,
}

impl SpecialWrapProcessor {
    /// Create a processor.
    pub fn new(
        cls: impl Into<String>,
        sep: impl Into<String>,
        double_sep: bool,
    ) -> Self {
        Self {
            cls: cls.into(),
            sep: sep.into(),
            double_sep,
        }
    }

    /// Build from a `BertProcessing`/`RobertaProcessing` config.
    pub fn from_config(
        config: &Value,
        double_sep: bool,
    ) -> WCResult<Self> {
        let cfg: SpecialWrapConfig = parse_component(config)?;
        Ok(Self::new(cfg.cls.0, cfg.sep.0, double_sep))
    }

    /// See [`PostProcessor::post_process`](crate::processors::PostProcessor::post_process).
    pub fn post_process(
        &self,
        tokens: Vec<String>,
        tokens_pair: Option<Vec<String>>,
        add_special_tokens: bool,
    ) -> PostProcessed {
        let mut out = Vec::with_capacity(tokens.len() + 4);
        if add_special_tokens {
            out.push(self.cls.clone());
        }
        out.extend(tokens);
        if add_special_tokens {
            out.push(self.sep.clone());
        }
        let first_len = out.len();

        if let Some(pair) = tokens_pair {
            if add_special_tokens && self.double_sep {
                out.push(self.sep.clone());
            }
            out.extend(pair);
            if add_special_tokens {
                out.push(self.sep.clone());
            }
        }

        let mut type_ids = vec![0; first_len];
        type_ids.resize(out.len(), 1);
        PostProcessed {
            tokens: out,
            token_type_ids: Some(type_ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_single() {
        let p = SpecialWrapProcessor::new("[CLS]", "[SEP]", false);
        let out = p.post_process(strings(&["a"]), None, true);
        assert_eq!(out.tokens, strings(&["[CLS]", "a", "[SEP]"]));
        assert_eq!(out.token_type_ids, Some(vec![0, 0, 0]));
    }

    #[test]
    fn test_roberta_pair() {
        let p = SpecialWrapProcessor::new("<s>", "</s>", true);
        let out = p.post_process(strings(&["a"]), Some(strings(&["b"])), true);
        assert_eq!(out.tokens, strings(&["<s>", "a", "</s>", "</s>", "b", "</s>"]));
        assert_eq!(out.token_type_ids, Some(vec![0, 0, 0, 1, 1, 1]));
    }

    #[test]
    fn test_without_special_tokens() {
        let p = SpecialWrapProcessor::new("<s>", "</s>", true);
        let out = p.post_process(strings(&["a", "b"]), Some(strings(&["c"])), false);
        assert_eq!(out.tokens, strings(&["a", "b", "c"]));
        assert_eq!(out.token_type_ids, Some(vec![0, 0, 1]));
    }
}
