//! # Tokenizer Definition

use serde::Deserialize;
use serde_json::Value;

use crate::{errors::WCResult, vocab::AddedToken};

/// The tokenizer definition (`tokenizer.json`).
///
/// Component configs are kept as raw JSON; each component family's
/// `from_config` factory interprets its own config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenizerConfig {
    /// Normalizer config; `null` for none.
    #[serde(default)]
    pub normalizer: Option<Value>,

    /// Pre-tokenizer config; `null` for none.
    #[serde(default)]
    pub pre_tokenizer: Option<Value>,

    /// Model config.
    pub model: Value,

    /// Post-processor config; `null` for none.
    #[serde(default)]
    pub post_processor: Option<Value>,

    /// Decoder config; `null` for none.
    #[serde(default)]
    pub decoder: Option<Value>,

    /// Tokens registered outside the base vocabulary.
    #[serde(default)]
    pub added_tokens: Vec<AddedToken>,
}

impl TokenizerConfig {
    /// Parse a `tokenizer.json` document.
    pub fn from_json_str(json: &str) -> WCResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
