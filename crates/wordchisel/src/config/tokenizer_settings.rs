//! # Tokenizer Settings
//!
//! Orchestration-level settings (`tokenizer_config.json`).

use serde::Deserialize;

use crate::{
    errors::{WCResult, WordchiselError},
    tokenizer::PaddingSide,
};

/// Tokenizer classes whose encodings carry token type ids.
const TOKEN_TYPE_ID_CLASSES: &[&str] = &[
    "AlbertTokenizer",
    "BertTokenizer",
    "ConvBertTokenizer",
    "DebertaTokenizer",
    "DebertaV2Tokenizer",
    "ElectraTokenizer",
    "HerbertTokenizer",
    "MobileBertTokenizer",
    "RoFormerTokenizer",
    "SqueezeBertTokenizer",
    "XLMTokenizer",
];

/// A named special token setting.
///
/// Either a plain string, or an `AddedToken` object carrying a `content` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenSetting {
    /// The token text.
    Plain(String),

    /// A serialized added token.
    Object {
        /// Object kind marker; must be `"AddedToken"`.
        #[serde(rename = "__type", default)]
        kind: Option<String>,

        /// The token text.
        #[serde(default)]
        content: Option<String>,
    },
}

impl TokenSetting {
    /// The token text.
    ///
    /// ## Returns
    /// An error for objects which are not `AddedToken` objects.
    pub fn content(&self) -> WCResult<&str> {
        match self {
            Self::Plain(content) => Ok(content),
            Self::Object {
                kind: Some(kind),
                content: Some(content),
            } if kind == "AddedToken" => Ok(content),
            Self::Object { kind, .. } => Err(WordchiselError::InvalidConfig(format!(
                "unknown token setting object (__type: {kind:?})"
            ))),
        }
    }
}

/// Tokenizer settings.
///
/// Every field is optional; absent fields take the documented defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenizerSettings {
    /// Unknown token.
    pub unk_token: Option<TokenSetting>,

    /// Padding token; falls back to `eos_token`.
    pub pad_token: Option<TokenSetting>,

    /// Mask token.
    pub mask_token: Option<TokenSetting>,

    /// Separator token.
    pub sep_token: Option<TokenSetting>,

    /// Classifier token.
    pub cls_token: Option<TokenSetting>,

    /// Beginning-of-sequence token.
    pub bos_token: Option<TokenSetting>,

    /// End-of-sequence token.
    pub eos_token: Option<TokenSetting>,

    /// Extra tokens to treat as special when decoding.
    pub additional_special_tokens: Vec<TokenSetting>,

    /// Longest sequence the model accepts.
    ///
    /// Often serialized as a huge float (e.g. `1e30`) to mean "unbounded".
    pub model_max_length: Option<f64>,

    /// Which side batch padding is applied to.
    pub padding_side: Option<PaddingSide>,

    /// Apply [`crate::decoders::clean_up_tokenization`] when decoding; default `true`.
    pub clean_up_tokenization_spaces: Option<bool>,

    /// Trim and collapse whitespace runs before normalization.
    pub remove_space: bool,

    /// Lowercase and strip combining accents before normalization.
    pub do_lowercase_and_remove_accent: bool,

    /// Attach token type ids to encodings.
    ///
    /// When unset, this is inferred from [`tokenizer_class`](Self::tokenizer_class).
    pub return_token_type_ids: Option<bool>,

    /// The tokenizer class name.
    pub tokenizer_class: Option<String>,

    /// Language key selecting a nested legacy vocabulary.
    pub target_lang: Option<String>,
}

impl TokenizerSettings {
    /// Parse a `tokenizer_config.json` document.
    pub fn from_json_str(json: &str) -> WCResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn first_token(settings: &[&Option<TokenSetting>]) -> WCResult<Option<String>> {
        for setting in settings.iter().copied().flatten() {
            let content = setting.content()?;
            if !content.is_empty() {
                return Ok(Some(content.to_string()));
            }
        }
        Ok(None)
    }

    /// The configured unknown token.
    pub fn unk_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.unk_token])
    }

    /// The configured padding token; falls back to the end-of-sequence token.
    pub fn pad_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.pad_token, &self.eos_token])
    }

    /// The configured mask token.
    pub fn mask_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.mask_token])
    }

    /// The configured separator token.
    pub fn sep_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.sep_token])
    }

    /// The configured classifier token.
    pub fn cls_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.cls_token])
    }

    /// The configured beginning-of-sequence token.
    pub fn bos_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.bos_token])
    }

    /// The configured end-of-sequence token.
    pub fn eos_token(&self) -> WCResult<Option<String>> {
        Self::first_token(&[&self.eos_token])
    }

    /// The additional special tokens, in config order.
    pub fn additional_special_tokens(&self) -> WCResult<Vec<String>> {
        self.additional_special_tokens
            .iter()
            .map(|setting| setting.content().map(str::to_string))
            .collect()
    }

    /// The model max length; `None` when unbounded.
    pub fn model_max_length(&self) -> Option<usize> {
        self.model_max_length
            .filter(|len| len.is_finite() && *len >= 0.0 && *len < usize::MAX as f64)
            .map(|len| len as usize)
    }

    /// The padding side; default [`PaddingSide::Right`].
    pub fn padding_side(&self) -> PaddingSide {
        self.padding_side.unwrap_or_default()
    }

    /// Whether decode cleans up tokenization spaces by default.
    pub fn clean_up_tokenization_spaces(&self) -> bool {
        self.clean_up_tokenization_spaces.unwrap_or(true)
    }

    /// Whether encodings carry token type ids.
    pub fn return_token_type_ids(&self) -> bool {
        if let Some(flag) = self.return_token_type_ids {
            return flag;
        }
        self.tokenizer_class.as_deref().is_some_and(|class| {
            let class = class.strip_suffix("Fast").unwrap_or(class);
            TOKEN_TYPE_ID_CLASSES.contains(&class)
        })
    }
}
