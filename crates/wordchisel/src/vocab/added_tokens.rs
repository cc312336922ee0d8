//! # Added Tokens
//!
//! Added tokens are matched verbatim in raw text, before normalization;
//! the text between them flows through the normal pipeline.

use serde::Deserialize;

use crate::{
    errors::WCResult,
    regex::{RegexWrapper, StrippedAlternative, stripped_union_regex_pattern},
};

/// A token registered outside the base vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddedToken {
    /// The token id.
    pub id: usize,

    /// The token text.
    pub content: String,

    /// Only match as a whole word.
    ///
    /// Parsed for completeness; matching does not enforce it.
    #[serde(default)]
    pub single_word: bool,

    /// Consume whitespace to the left of a match.
    #[serde(default)]
    pub lstrip: bool,

    /// Consume whitespace to the right of a match.
    #[serde(default)]
    pub rstrip: bool,

    /// Match against normalized text.
    ///
    /// Parsed for completeness; matching is always against raw text.
    #[serde(default)]
    pub normalized: Option<bool>,

    /// Is this a special (control) token?
    #[serde(default)]
    pub special: bool,
}

impl AddedToken {
    /// Create a plain added token.
    pub fn new<S: Into<String>>(
        id: usize,
        content: S,
        special: bool,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            single_word: false,
            lstrip: false,
            rstrip: false,
            normalized: None,
            special,
        }
    }

    /// Set the strip flags.
    pub fn with_strip(
        mut self,
        lstrip: bool,
        rstrip: bool,
    ) -> Self {
        self.lstrip = lstrip;
        self.rstrip = rstrip;
        self
    }
}

/// One section of text, cut on added-token boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSection<'a> {
    /// An added token, matched verbatim.
    Added(&'a str),

    /// Ordinary text.
    Text(&'a str),
}

/// Splits text on added-token boundaries.
#[derive(Debug, Clone, Default)]
pub struct AddedTokenSplitter {
    regex: Option<RegexWrapper>,
}

impl AddedTokenSplitter {
    /// Build the boundary pattern for the given tokens.
    ///
    /// Earlier tokens take priority when matches overlap.
    pub fn new(tokens: &[AddedToken]) -> WCResult<Self> {
        if tokens.is_empty() {
            return Ok(Self::default());
        }
        let alts = tokens
            .iter()
            .map(|t| StrippedAlternative {
                content: &t.content,
                lstrip: t.lstrip,
                rstrip: t.rstrip,
            })
            .collect::<Vec<_>>();
        Ok(Self {
            regex: Some(stripped_union_regex_pattern(&alts).compile()?),
        })
    }

    /// Cut `text` into sections.
    ///
    /// Whitespace consumed by strip flags is dropped, as are empty sections.
    /// With no added tokens, the whole text is a single section.
    pub fn split<'a>(
        &self,
        text: &'a str,
    ) -> Vec<TextSection<'a>> {
        let Some(regex) = &self.regex else {
            return vec![TextSection::Text(text)];
        };

        let mut sections = Vec::new();
        let mut last = 0;
        for (whole, content) in regex.first_group_ranges(text) {
            if last < whole.start {
                sections.push(TextSection::Text(&text[last..whole.start]));
            }
            if !content.is_empty() {
                sections.push(TextSection::Added(&text[content]));
            }
            last = whole.end;
        }
        if last < text.len() {
            sections.push(TextSection::Text(&text[last..]));
        }
        sections
    }
}
