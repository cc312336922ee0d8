//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from wordchisel operations.
#[derive(Debug, thiserror::Error)]
pub enum WordchiselError {
    /// A component config names a `type` this crate does not implement.
    #[error("unknown {component} type: {type_name}")]
    UnknownComponentType {
        /// The component family (e.g. "normalizer").
        component: &'static str,

        /// The unrecognized type name.
        type_name: String,
    },

    /// A component config has no `type` discriminator.
    #[error("{component} config is missing a \"type\" field")]
    MissingComponentType {
        /// The component family.
        component: &'static str,
    },

    /// Structurally invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed JSON input.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A configured pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] ErrorWrapper),

    /// Decode was called with no token ids.
    #[error("token_ids must be a non-empty array of integers")]
    EmptyTokenIds,

    /// Batch encode was called with no items.
    #[error("batch must contain at least one item")]
    EmptyBatch,

    /// `text` and `text_pair` batches differ in length.
    #[error("text and text_pair must have the same length ({text} != {text_pair})")]
    BatchLengthMismatch {
        /// Number of primary texts.
        text: usize,

        /// Number of paired texts.
        text_pair: usize,
    },

    /// A rectangular batch was requested over items of differing lengths.
    #[error(
        "unable to create tensor, you should probably activate truncation and/or padding \
         with 'padding=true' and 'truncation=true' to have batched tensors with the same length"
    )]
    RaggedBatch,

    /// A named special token is not configured, or not in the vocabulary.
    #[error("{name} is not configured or not in the vocabulary")]
    MissingToken {
        /// The settings name of the token (e.g. "mask_token").
        name: &'static str,
    },

    /// A token has no id, and there is no unknown token to fall back on.
    #[error("token {token:?} is not in the vocabulary")]
    UnknownToken {
        /// The unmapped token.
        token: String,
    },

    /// A token id has no token, and there is no unknown token to fall back on.
    #[error("token id {id} is out of range")]
    TokenOutOfRange {
        /// The unmapped id.
        id: usize,
    },

    /// Internal BPE merge bookkeeping is inconsistent; the merge table is corrupt.
    #[error("bpe invariant violated: {0}")]
    BpeInvariant(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for wordchisel operations.
pub type WCResult<T> = core::result::Result<T, WordchiselError>;
