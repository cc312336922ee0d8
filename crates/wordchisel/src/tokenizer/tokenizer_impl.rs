//! # Tokenizer
//!
//! The orchestrator: added-token splitting, then per section
//! normalizer => pre-tokenizer => model; then id conversion and
//! post-processing. Decoding reverses the model and pre-tokenizer
//! artifacts through the decoder.

use std::{borrow::Cow, path::Path};

use crate::{
    config::{TokenizerConfig, TokenizerSettings},
    decoders::{DecodeContext, Decoder, clean_up_tokenization},
    errors::{WCResult, WordchiselError},
    models::TokenizerModel,
    normalizers::{Normalizer, lowercase_and_remove_accent},
    pre_tokenizers::PreTokenizer,
    processors::{PostProcessed, PostProcessor},
    tokenizer::{BatchEncoding, DecodeOptions, EncodeOptions, Encoding, Padding},
    types::{TokenType, WCHashSet, hash_set_new},
    vocab::{AddedToken, AddedTokenSplitter, TextSection, TokenVocab},
};

/// A configured tokenizer.
///
/// Immutable after construction, apart from the model's internal caches;
/// so a tokenizer can be shared across threads.
#[derive(Debug)]
pub struct Tokenizer<T: TokenType> {
    vocab: TokenVocab<T>,
    model: TokenizerModel,
    normalizer: Option<Normalizer>,
    pre_tokenizer: Option<PreTokenizer>,
    post_processor: Option<PostProcessor>,
    decoder: Option<Decoder>,

    added_tokens: Vec<AddedToken>,
    added_contents: WCHashSet<String>,
    special_tokens: WCHashSet<String>,
    splitter: AddedTokenSplitter,

    settings: TokenizerSettings,
    pad_token_id: Option<T>,
    mask_token: Option<String>,
    return_token_type_ids: bool,
}

impl<T: TokenType> Tokenizer<T> {
    /// Build a tokenizer from parsed configuration.
    ///
    /// ## Arguments
    /// * `config` - the tokenizer definition.
    /// * `settings` - the tokenizer settings.
    ///
    /// ## Returns
    /// An error if any component config is invalid, or names an unknown type.
    pub fn from_config(
        config: &TokenizerConfig,
        settings: TokenizerSettings,
    ) -> WCResult<Self> {
        let normalizer = config
            .normalizer
            .as_ref()
            .map(Normalizer::from_config)
            .transpose()?;
        let pre_tokenizer = config
            .pre_tokenizer
            .as_ref()
            .map(PreTokenizer::from_config)
            .transpose()?;
        let (model, mut vocab) = TokenizerModel::from_config::<T>(&config.model, &settings)?;
        let post_processor = config
            .post_processor
            .as_ref()
            .map(PostProcessor::from_config)
            .transpose()?;
        let decoder = config
            .decoder
            .as_ref()
            .map(Decoder::from_config)
            .transpose()?;

        let mut added_contents = hash_set_new();
        let mut special_tokens = hash_set_new();
        for token in &config.added_tokens {
            vocab.insert(token.content.clone(), token.id)?;
            added_contents.insert(token.content.clone());
            if token.special {
                special_tokens.insert(token.content.clone());
            }
        }
        special_tokens.extend(settings.additional_special_tokens()?);

        let splitter = AddedTokenSplitter::new(&config.added_tokens)?;

        let pad_token_id = settings
            .pad_token()?
            .and_then(|token| vocab.lookup_id(&token));
        let mask_token = settings.mask_token()?;
        let return_token_type_ids = settings.return_token_type_ids();

        log::debug!(
            "built tokenizer: {} model, vocab size {}, {} added tokens",
            model.kind_name(),
            vocab.len(),
            config.added_tokens.len()
        );

        Ok(Self {
            vocab,
            model,
            normalizer,
            pre_tokenizer,
            post_processor,
            decoder,
            added_tokens: config.added_tokens.clone(),
            added_contents,
            special_tokens,
            splitter,
            settings,
            pad_token_id,
            mask_token,
            return_token_type_ids,
        })
    }

    /// Build a tokenizer from JSON documents.
    ///
    /// ## Arguments
    /// * `tokenizer_json` - the tokenizer definition (`tokenizer.json`).
    /// * `settings_json` - the optional tokenizer settings (`tokenizer_config.json`).
    pub fn from_json_str(
        tokenizer_json: &str,
        settings_json: Option<&str>,
    ) -> WCResult<Self> {
        let config = TokenizerConfig::from_json_str(tokenizer_json)?;
        let settings = match settings_json {
            Some(json) => TokenizerSettings::from_json_str(json)?,
            None => TokenizerSettings::default(),
        };
        Self::from_config(&config, settings)
    }

    /// Build a tokenizer from JSON files.
    ///
    /// See [`from_json_str`](Self::from_json_str).
    pub fn from_files<P: AsRef<Path>>(
        tokenizer_path: P,
        settings_path: Option<P>,
    ) -> WCResult<Self> {
        let tokenizer_json = std::fs::read_to_string(tokenizer_path)?;
        let settings_json = settings_path.map(std::fs::read_to_string).transpose()?;
        Self::from_json_str(&tokenizer_json, settings_json.as_deref())
    }

    /// The vocabulary, including added tokens.
    pub fn vocab(&self) -> &TokenVocab<T> {
        &self.vocab
    }

    /// The model.
    pub fn model(&self) -> &TokenizerModel {
        &self.model
    }

    /// The tokenizer settings.
    pub fn settings(&self) -> &TokenizerSettings {
        &self.settings
    }

    /// The added tokens, in configuration order.
    pub fn added_tokens(&self) -> &[AddedToken] {
        &self.added_tokens
    }

    /// Is `token` dropped by `skip_special_tokens`?
    pub fn is_special_token(
        &self,
        token: &str,
    ) -> bool {
        self.special_tokens.contains(token)
    }

    /// The padding token id, if configured and present.
    pub fn pad_token_id(&self) -> Option<T> {
        self.pad_token_id
    }

    /// The mask token id.
    ///
    /// ## Returns
    /// [`WordchiselError::MissingToken`] when the mask token is not
    /// configured, or not in the vocabulary.
    pub fn mask_token_id(&self) -> WCResult<T> {
        self.mask_token
            .as_deref()
            .and_then(|token| self.vocab.lookup_id(token))
            .ok_or(WordchiselError::MissingToken { name: "mask_token" })
    }

    /// Do encodings carry token type ids?
    pub fn return_token_type_ids(&self) -> bool {
        self.return_token_type_ids
    }

    /// Convert tokens to ids; unmapped tokens take the unknown id.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WCResult<Vec<T>> {
        self.vocab.tokens_to_ids(tokens)
    }

    /// Convert ids to tokens; unmapped ids take the unknown token.
    pub fn convert_ids_to_tokens(
        &self,
        ids: &[T],
    ) -> WCResult<Vec<String>> {
        self.vocab.ids_to_tokens(ids)
    }

    /// Tokenize one text into token strings, without special tokens.
    pub fn encode_text(
        &self,
        text: &str,
    ) -> WCResult<Vec<String>> {
        let mut tokens = Vec::new();
        for (section_index, section) in self.splitter.split(text).into_iter().enumerate() {
            match section {
                TextSection::Added(content) => tokens.push(content.to_string()),
                TextSection::Text(text) => {
                    let text = self.prepare_section(text);
                    let mut pieces = match &self.pre_tokenizer {
                        Some(p) => p.pre_tokenize(&text, section_index),
                        None => vec![text.into_owned()],
                    };
                    pieces.retain(|piece| !piece.is_empty());
                    tokens.extend(self.model.tokenize(&self.vocab, &pieces)?);
                }
            }
        }
        Ok(tokens)
    }

    fn prepare_section<'a>(
        &self,
        text: &'a str,
    ) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(text);
        if self.settings.remove_space {
            text = Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        if self.settings.do_lowercase_and_remove_accent {
            text = Cow::Owned(lowercase_and_remove_accent(&text));
        }
        if let Some(normalizer) = &self.normalizer {
            text = Cow::Owned(normalizer.normalize(&text));
        }
        text
    }

    /// Encode one text, or text pair.
    ///
    /// ## Arguments
    /// * `text` - the first sequence.
    /// * `text_pair` - the optional second sequence.
    /// * `add_special_tokens` - insert the post-processor's special tokens.
    ///
    /// ## Returns
    /// The encoding; [`WordchiselError::UnknownToken`] when a token has no
    /// id and the vocabulary has no unknown token to fall back on.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn encode_plus(
        &self,
        text: &str,
        text_pair: Option<&str>,
        add_special_tokens: bool,
    ) -> WCResult<Encoding<T>> {
        let tokens = self.encode_text(text)?;
        let tokens_pair = text_pair.map(|t| self.encode_text(t)).transpose()?;

        let processed = match &self.post_processor {
            Some(p) => p.post_process(tokens, tokens_pair, add_special_tokens),
            None => PostProcessed::concat(tokens, tokens_pair),
        };

        let input_ids = self.vocab.tokens_to_ids(&processed.tokens)?;
        let token_type_ids = processed
            .token_type_ids
            .filter(|_| self.return_token_type_ids);
        Ok(Encoding::new(input_ids, token_type_ids))
    }

    /// Encode one text, or text pair, to ids.
    ///
    /// See [`encode_plus`](Self::encode_plus).
    pub fn encode(
        &self,
        text: &str,
        text_pair: Option<&str>,
        add_special_tokens: bool,
    ) -> WCResult<Vec<T>> {
        Ok(self
            .encode_plus(text, text_pair, add_special_tokens)?
            .input_ids)
    }

    /// Encode a batch, with optional padding and truncation.
    ///
    /// The target length is `max_length` when given; else the model max
    /// length under [`Padding::MaxLength`]; else the longest item. It is
    /// then capped at the model max length.
    ///
    /// ## Arguments
    /// * `texts` - the first sequences.
    /// * `text_pairs` - optional second sequences; one per text.
    /// * `options` - special tokens, padding, truncation and max length.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, texts, text_pairs)))]
    pub fn encode_batch(
        &self,
        texts: &[&str],
        text_pairs: Option<&[&str]>,
        options: &EncodeOptions,
    ) -> WCResult<BatchEncoding<T>> {
        if texts.is_empty() {
            return Err(WordchiselError::EmptyBatch);
        }
        if let Some(pairs) = text_pairs
            && pairs.len() != texts.len()
        {
            return Err(WordchiselError::BatchLengthMismatch {
                text: texts.len(),
                text_pair: pairs.len(),
            });
        }

        let items: Vec<(&str, Option<&str>)> = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| (*text, text_pairs.map(|pairs| pairs[idx])))
            .collect();
        let mut encodings = self.encode_items(&items, options.add_special_tokens())?;

        let model_max_length = self.settings.model_max_length();
        let longest = encodings.iter().map(Encoding::len).max().unwrap_or(0);
        let max_length = match options.max_length() {
            Some(max_length) => {
                if !options.truncation() {
                    log::warn!(
                        "max_length is set but truncation is not; \
                         use truncation to truncate examples to max length"
                    );
                }
                max_length
            }
            None => match (options.padding(), model_max_length) {
                (Padding::MaxLength, Some(model_max)) => model_max,
                _ => longest,
            },
        };
        let max_length = model_max_length.map_or(max_length, |m| max_length.min(m));

        let padding = options.padding().is_enabled();
        let side = self.settings.padding_side();
        for encoding in &mut encodings {
            if encoding.len() > max_length && options.truncation() {
                encoding.truncate(max_length);
            } else if encoding.len() < max_length && padding {
                let pad_id = self
                    .pad_token_id
                    .ok_or(WordchiselError::MissingToken { name: "pad_token" })?;
                encoding.pad(max_length, pad_id, side);
            }
        }

        Ok(BatchEncoding { encodings })
    }

    fn encode_items(
        &self,
        items: &[(&str, Option<&str>)],
        add_special_tokens: bool,
    ) -> WCResult<Vec<Encoding<T>>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                items
                    .par_iter()
                    .map(|(text, pair)| self.encode_plus(text, *pair, add_special_tokens))
                    .collect()
            } else {
                items
                    .iter()
                    .map(|(text, pair)| self.encode_plus(text, *pair, add_special_tokens))
                    .collect()
            }
        }
    }

    /// Decode ids to text.
    ///
    /// ## Arguments
    /// * `ids` - the token ids; must be non-empty.
    /// * `options` - special-token skipping and cleanup.
    ///
    /// ## Returns
    /// [`WordchiselError::EmptyTokenIds`] for an empty id list.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ids)))]
    pub fn decode(
        &self,
        ids: &[T],
        options: &DecodeOptions,
    ) -> WCResult<String> {
        if ids.is_empty() {
            return Err(WordchiselError::EmptyTokenIds);
        }

        let mut tokens = self.vocab.ids_to_tokens(ids)?;
        if options.skip_special_tokens() {
            tokens.retain(|token| !self.special_tokens.contains(token));
        }

        let mut decoded = match &self.decoder {
            Some(decoder) => {
                let decoded = decoder.decode(tokens, &DecodeContext::new(&self.added_contents));
                match self.model.end_of_word_suffix() {
                    Some(suffix) => {
                        let decoded = decoded.replace(suffix, " ");
                        if options.skip_special_tokens() {
                            decoded.trim().to_string()
                        } else {
                            decoded
                        }
                    }
                    None => decoded,
                }
            }
            None => tokens.join(" "),
        };

        let clean_up = options
            .clean_up_tokenization_spaces()
            .unwrap_or_else(|| self.settings.clean_up_tokenization_spaces());
        if clean_up {
            decoded = clean_up_tokenization(&decoded);
        }
        Ok(decoded)
    }

    /// Decode a batch of id sequences.
    ///
    /// See [`decode`](Self::decode).
    pub fn batch_decode<S: AsRef<[T]> + Sync>(
        &self,
        batch: &[S],
        options: &DecodeOptions,
    ) -> WCResult<Vec<String>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                batch
                    .par_iter()
                    .map(|ids| self.decode(ids.as_ref(), options))
                    .collect()
            } else {
                batch
                    .iter()
                    .map(|ids| self.decode(ids.as_ref(), options))
                    .collect()
            }
        }
    }
}
