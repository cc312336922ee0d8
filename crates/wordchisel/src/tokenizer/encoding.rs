//! # Encodings
//!
//! [`Encoding`] is the result of encoding one text (or text pair);
//! [`BatchEncoding`] collects a batch, and can be packed into a
//! rectangular [`TensorBatch`].

use crate::{
    errors::{WCResult, WordchiselError},
    tokenizer::PaddingSide,
    types::TokenType,
};

/// The encoding of one text, or text pair.
///
/// All present arrays have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding<T: TokenType> {
    /// The token ids.
    pub input_ids: Vec<T>,

    /// 1 for real tokens, 0 for padding.
    pub attention_mask: Vec<u32>,

    /// Segment ids; when requested and assigned by the post-processor.
    pub token_type_ids: Option<Vec<u32>>,
}

impl<T: TokenType> Encoding<T> {
    /// Build an unpadded encoding; the attention mask is all ones.
    pub fn new(
        input_ids: Vec<T>,
        token_type_ids: Option<Vec<u32>>,
    ) -> Self {
        let attention_mask = vec![1; input_ids.len()];
        Self {
            input_ids,
            attention_mask,
            token_type_ids,
        }
    }

    /// The sequence length.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Is the sequence empty?
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Hard-cut every array to at most `max_length`.
    pub fn truncate(
        &mut self,
        max_length: usize,
    ) {
        self.input_ids.truncate(max_length);
        self.attention_mask.truncate(max_length);
        if let Some(type_ids) = &mut self.token_type_ids {
            type_ids.truncate(max_length);
        }
    }

    /// Pad every array up to `length`.
    ///
    /// `input_ids` are filled with `pad_id`; the other arrays with 0.
    pub fn pad(
        &mut self,
        length: usize,
        pad_id: T,
        side: PaddingSide,
    ) {
        let diff = length.saturating_sub(self.len());
        if diff == 0 {
            return;
        }
        pad_vec(&mut self.input_ids, diff, pad_id, side);
        pad_vec(&mut self.attention_mask, diff, 0, side);
        if let Some(type_ids) = &mut self.token_type_ids {
            pad_vec(type_ids, diff, 0, side);
        }
    }
}

fn pad_vec<V: Copy>(
    values: &mut Vec<V>,
    diff: usize,
    fill: V,
    side: PaddingSide,
) {
    match side {
        PaddingSide::Right => values.extend(std::iter::repeat_n(fill, diff)),
        PaddingSide::Left => {
            values.splice(0..0, std::iter::repeat_n(fill, diff));
        }
    }
}

/// The encodings of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEncoding<T: TokenType> {
    /// The per-item encodings.
    pub encodings: Vec<Encoding<T>>,
}

/// A rectangular, row-major batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorBatch<T: TokenType> {
    /// `[batch_size, seq_len]`.
    pub dims: [usize; 2],

    /// Token ids.
    pub input_ids: Vec<T>,

    /// Attention mask.
    pub attention_mask: Vec<u32>,

    /// Segment ids; when every item carries them.
    pub token_type_ids: Option<Vec<u32>>,
}

impl<T: TokenType> BatchEncoding<T> {
    /// The batch size.
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// The per-item token ids.
    pub fn input_ids(&self) -> Vec<Vec<T>> {
        self.encodings.iter().map(|e| e.input_ids.clone()).collect()
    }

    /// The per-item attention masks.
    pub fn attention_mask(&self) -> Vec<Vec<u32>> {
        self.encodings
            .iter()
            .map(|e| e.attention_mask.clone())
            .collect()
    }

    /// Pack the batch into a rectangular buffer.
    ///
    /// The `token_type_ids` column is packed only when every item has one;
    /// a batch where only some items carry them drops the column with a warning.
    ///
    /// ## Returns
    /// [`WordchiselError::RaggedBatch`] when item lengths differ.
    pub fn into_tensor(self) -> WCResult<TensorBatch<T>> {
        let seq_len = self.encodings.first().map_or(0, Encoding::len);
        if self.encodings.iter().any(|e| e.len() != seq_len) {
            return Err(WordchiselError::RaggedBatch);
        }

        let batch_size = self.encodings.len();
        let typed = self
            .encodings
            .iter()
            .filter(|e| e.token_type_ids.is_some())
            .count();
        let with_types = typed == batch_size;
        if typed > 0 && !with_types {
            log::warn!(
                "dropping token_type_ids: only {typed} of {batch_size} batch items carry them"
            );
        }

        let mut tensor = TensorBatch {
            dims: [batch_size, seq_len],
            input_ids: Vec::with_capacity(batch_size * seq_len),
            attention_mask: Vec::with_capacity(batch_size * seq_len),
            token_type_ids: with_types.then(|| Vec::with_capacity(batch_size * seq_len)),
        };
        for encoding in self.encodings {
            tensor.input_ids.extend(encoding.input_ids);
            tensor.attention_mask.extend(encoding.attention_mask);
            if let (Some(out), Some(type_ids)) = (&mut tensor.token_type_ids, encoding.token_type_ids)
            {
                out.extend(type_ids);
            }
        }
        Ok(tensor)
    }
}
