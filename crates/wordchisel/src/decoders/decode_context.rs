//! # Decode Context

use crate::types::WCHashSet;

/// Tokenizer state visible to decoders.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    added_tokens: Option<&'a WCHashSet<String>>,
}

impl<'a> DecodeContext<'a> {
    /// A context with no added tokens.
    pub fn empty() -> Self {
        Self { added_tokens: None }
    }

    /// A context over the added-token contents.
    pub fn new(added_tokens: &'a WCHashSet<String>) -> Self {
        Self {
            added_tokens: Some(added_tokens),
        }
    }

    /// Is `token` the content of an added token?
    pub fn is_added(
        &self,
        token: &str,
    ) -> bool {
        self.added_tokens.is_some_and(|set| set.contains(token))
    }
}
