//! # Legacy Model

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::TokenizerSettings,
    errors::{WCResult, WordchiselError},
    types::TokenType,
    vocab::TokenVocab,
};

/// Pass-through model over a bare vocabulary.
///
/// Words are emitted unchanged; the vocabulary may be nested per target
/// language, selected by the `target_lang` setting.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyModel {
    fuse_unk: bool,
}

impl LegacyModel {
    /// Build the model and its vocabulary from an untyped model config.
    ///
    /// ## Arguments
    /// * `config` - a model config with a `vocab` object.
    /// * `settings` - supplies `unk_token` and `target_lang`.
    pub fn from_config<T: TokenType>(
        config: &Value,
        settings: &TokenizerSettings,
    ) -> WCResult<(Self, TokenVocab<T>)> {
        let mut vocab = config
            .get("vocab")
            .ok_or_else(|| WordchiselError::InvalidConfig("model has no vocab".to_string()))?;

        if let Some(lang) = &settings.target_lang {
            vocab = vocab.get(lang).ok_or_else(|| {
                WordchiselError::InvalidConfig(format!(
                    "target_lang {lang:?} not found in vocab"
                ))
            })?;
        }

        let entries = HashMap::<String, usize>::deserialize(vocab)?;
        let vocab = TokenVocab::from_entries(entries)?.with_unk_token(settings.unk_token()?);

        let fuse_unk = config
            .get("fuse_unk")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok((Self { fuse_unk }, vocab))
    }

    /// Fuse runs of unknown tokens?
    pub fn fuse_unk(&self) -> bool {
        self.fuse_unk
    }
}
