//! # Encode / Decode Options

use serde::Deserialize;

/// Which side of a sequence receives padding.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaddingSide {
    /// Pad before the tokens.
    Left,

    /// Pad after the tokens.
    #[default]
    Right,
}

/// Batch padding strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Padding {
    /// No padding.
    #[default]
    None,

    /// Pad to the longest item (or to `max_length`, when given).
    Longest,

    /// Pad to `max_length`, else the model max length.
    MaxLength,
}

impl Padding {
    /// Is any padding requested?
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Options for [`Tokenizer::encode_batch`](crate::Tokenizer::encode_batch)
/// and [`Tokenizer::encode_plus`](crate::Tokenizer::encode_plus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    add_special_tokens: bool,
    padding: Padding,
    truncation: bool,
    max_length: Option<usize>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            add_special_tokens: true,
            padding: Padding::None,
            truncation: false,
            max_length: None,
        }
    }
}

impl EncodeOptions {
    /// Gets the configured special-token insertion; default `true`.
    pub fn add_special_tokens(&self) -> bool {
        self.add_special_tokens
    }

    /// Sets the configured special-token insertion.
    pub fn set_add_special_tokens(
        &mut self,
        add_special_tokens: bool,
    ) {
        self.add_special_tokens = add_special_tokens;
    }

    /// Sets the configured special-token insertion.
    pub fn with_add_special_tokens(
        mut self,
        add_special_tokens: bool,
    ) -> Self {
        self.set_add_special_tokens(add_special_tokens);
        self
    }

    /// Gets the configured padding strategy.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Sets the configured padding strategy.
    pub fn set_padding(
        &mut self,
        padding: Padding,
    ) {
        self.padding = padding;
    }

    /// Sets the configured padding strategy.
    pub fn with_padding(
        mut self,
        padding: Padding,
    ) -> Self {
        self.set_padding(padding);
        self
    }

    /// Gets the configured truncation.
    pub fn truncation(&self) -> bool {
        self.truncation
    }

    /// Sets the configured truncation.
    pub fn set_truncation(
        &mut self,
        truncation: bool,
    ) {
        self.truncation = truncation;
    }

    /// Sets the configured truncation.
    pub fn with_truncation(
        mut self,
        truncation: bool,
    ) -> Self {
        self.set_truncation(truncation);
        self
    }

    /// Gets the configured max length.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Sets the configured max length.
    ///
    /// Only applies when padding or truncation is enabled.
    pub fn set_max_length(
        &mut self,
        max_length: Option<usize>,
    ) {
        self.max_length = max_length;
    }

    /// Sets the configured max length.
    pub fn with_max_length(
        mut self,
        max_length: Option<usize>,
    ) -> Self {
        self.set_max_length(max_length);
        self
    }
}

/// Options for [`Tokenizer::decode`](crate::Tokenizer::decode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    skip_special_tokens: bool,
    clean_up_tokenization_spaces: Option<bool>,
}

impl DecodeOptions {
    /// Gets whether special tokens are dropped; default `false`.
    pub fn skip_special_tokens(&self) -> bool {
        self.skip_special_tokens
    }

    /// Sets whether special tokens are dropped.
    pub fn set_skip_special_tokens(
        &mut self,
        skip_special_tokens: bool,
    ) {
        self.skip_special_tokens = skip_special_tokens;
    }

    /// Sets whether special tokens are dropped.
    pub fn with_skip_special_tokens(
        mut self,
        skip_special_tokens: bool,
    ) -> Self {
        self.set_skip_special_tokens(skip_special_tokens);
        self
    }

    /// Gets the cleanup override; `None` defers to the tokenizer settings.
    ///
    /// See [`clean_up_tokenization`](crate::decoders::clean_up_tokenization).
    pub fn clean_up_tokenization_spaces(&self) -> Option<bool> {
        self.clean_up_tokenization_spaces
    }

    /// Sets the cleanup override.
    pub fn set_clean_up_tokenization_spaces(
        &mut self,
        clean_up: Option<bool>,
    ) {
        self.clean_up_tokenization_spaces = clean_up;
    }

    /// Sets the cleanup override.
    pub fn with_clean_up_tokenization_spaces(
        mut self,
        clean_up: Option<bool>,
    ) -> Self {
        self.set_clean_up_tokenization_spaces(clean_up);
        self
    }
}
