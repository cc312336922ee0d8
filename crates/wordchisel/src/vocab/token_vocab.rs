//! # Token Vocabulary

use crate::{
    errors::{WCResult, WordchiselError},
    types::{TokenType, WCHashMap, hash_map_with_capacity},
};

/// Bidirectional token <=> id table.
///
/// Ids are dense and 0-based; the reverse table has a slot for every id
/// below [`len`](Self::len). Slots may be empty when the source mapping
/// skips ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenVocab<T: TokenType> {
    token_ids: WCHashMap<String, T>,
    id_tokens: Vec<Option<String>>,
    unk_token: Option<String>,
    unk_id: Option<T>,
}

impl<T: TokenType> Default for TokenVocab<T> {
    fn default() -> Self {
        Self {
            token_ids: Default::default(),
            id_tokens: Vec::new(),
            unk_token: None,
            unk_id: None,
        }
    }
}

impl<T: TokenType> TokenVocab<T> {
    /// Build a vocabulary from `(token, id)` entries.
    ///
    /// ## Arguments
    /// * `entries` - token/id pairs; later entries overwrite earlier ones.
    ///
    /// ## Returns
    /// An error if an id does not fit `T`.
    pub fn from_entries<I, S>(entries: I) -> WCResult<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let mut vocab = Self {
            token_ids: hash_map_with_capacity(entries.size_hint().0),
            ..Default::default()
        };
        for (token, id) in entries {
            vocab.insert(token, id)?;
        }
        Ok(vocab)
    }

    /// Insert or overwrite a token.
    ///
    /// The reverse table grows to cover `id`. An overwritten id's previous
    /// token keeps its forward mapping.
    pub fn insert<S: Into<String>>(
        &mut self,
        token: S,
        id: usize,
    ) -> WCResult<()> {
        let token = token.into();
        let tid = T::from_usize(id).ok_or(WordchiselError::TokenOutOfRange { id })?;
        if id >= self.id_tokens.len() {
            self.id_tokens.resize(id + 1, None);
        }
        self.id_tokens[id] = Some(token.clone());
        if self.unk_token.as_deref() == Some(token.as_str()) {
            self.unk_id = Some(tid);
        }
        self.token_ids.insert(token, tid);
        Ok(())
    }

    /// Set the unknown-token fallback.
    ///
    /// The id is resolved now, and re-resolved on later [`insert`](Self::insert)s.
    pub fn set_unk_token(
        &mut self,
        unk_token: Option<String>,
    ) {
        self.unk_id = unk_token.as_deref().and_then(|t| self.lookup_id(t));
        self.unk_token = unk_token;
    }

    /// Builder form of [`set_unk_token`](Self::set_unk_token).
    pub fn with_unk_token(
        mut self,
        unk_token: Option<String>,
    ) -> Self {
        self.set_unk_token(unk_token);
        self
    }

    /// The unknown token, if configured.
    pub fn unk_token(&self) -> Option<&str> {
        self.unk_token.as_deref()
    }

    /// The unknown token's id, if configured and present.
    pub fn unk_id(&self) -> Option<T> {
        self.unk_id
    }

    /// The size of the id space.
    pub fn len(&self) -> usize {
        self.id_tokens.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.id_tokens.is_empty()
    }

    /// Does the vocabulary map this token?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_ids.contains_key(token)
    }

    /// Look up a token's id.
    pub fn lookup_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_ids.get(token).copied()
    }

    /// Look up an id's token.
    pub fn lookup_token(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_tokens.get(id.to_usize()?)?.as_deref()
    }

    /// Convert a token to an id, substituting the unknown id.
    ///
    /// ## Returns
    /// [`WordchiselError::UnknownToken`] when the token is unmapped and
    /// there is no unknown token.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> WCResult<T> {
        self.lookup_id(token)
            .or(self.unk_id)
            .ok_or_else(|| WordchiselError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// Convert an id to a token, substituting the unknown token.
    ///
    /// ## Returns
    /// [`WordchiselError::TokenOutOfRange`] when the id is unmapped and
    /// there is no unknown token.
    pub fn id_to_token(
        &self,
        id: T,
    ) -> WCResult<&str> {
        self.lookup_token(id)
            .or(self.unk_token.as_deref())
            .ok_or_else(|| WordchiselError::TokenOutOfRange {
                id: id.to_usize().unwrap_or(usize::MAX),
            })
    }

    /// Convert tokens to ids; see [`token_to_id`](Self::token_to_id).
    pub fn tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WCResult<Vec<T>> {
        tokens.iter().map(|t| self.token_to_id(t.as_ref())).collect()
    }

    /// Convert ids to tokens; see [`id_to_token`](Self::id_to_token).
    pub fn ids_to_tokens(
        &self,
        ids: &[T],
    ) -> WCResult<Vec<String>> {
        ids.iter()
            .map(|&id| self.id_to_token(id).map(str::to_string))
            .collect()
    }

    /// Fuse runs of unknown tokens.
    ///
    /// A token is "unknown" when it maps (directly, or via the fallback)
    /// to the unknown id; for each run of unknown tokens only the first is kept.
    /// Without an unknown id, nothing is fused.
    pub fn fuse_unknown(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        let Some(unk_id) = self.unk_id else {
            return tokens;
        };
        let is_unk = |t: &str| self.lookup_id(t).unwrap_or(unk_id) == unk_id;

        let mut fused = Vec::with_capacity(tokens.len());
        let mut in_run = false;
        for token in tokens {
            if is_unk(&token) {
                if !in_run {
                    fused.push(token);
                }
                in_run = true;
            } else {
                fused.push(token);
                in_run = false;
            }
        }
        fused
    }
}
