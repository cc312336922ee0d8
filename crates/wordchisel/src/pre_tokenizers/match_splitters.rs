//! # Match Splitters
//!
//! Pre-tokenizers whose pieces are exactly the matches of a fixed pattern.

use crate::{
    errors::WCResult,
    regex::{RegexWrapper, RegexWrapperPattern},
};

/// Unicode punctuation plus every ASCII symbol, as a char-class body.
const PUNCTUATION_CLASS: &str = r"\p{P}\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E";

/// Emits every match of a pattern as a piece; text between matches is dropped.
#[derive(Debug, Clone)]
pub struct MatchSplitter {
    regex: RegexWrapper,
}

impl MatchSplitter {
    /// Build a splitter over an arbitrary pattern.
    pub fn new<P: Into<RegexWrapperPattern>>(pattern: P) -> WCResult<Self> {
        Ok(Self {
            regex: pattern.into().compile()?,
        })
    }

    /// BERT: runs of non-space-non-punctuation, or single punctuation chars.
    pub fn bert() -> WCResult<Self> {
        Self::new(RegexWrapperPattern::Basic(format!(
            r"[^\s{PUNCTUATION_CLASS}]+|[{PUNCTUATION_CLASS}]"
        )))
    }

    /// Runs of punctuation, or runs of anything else.
    pub fn punctuation() -> WCResult<Self> {
        Self::new(RegexWrapperPattern::Basic(format!(
            r"[^{PUNCTUATION_CLASS}]+|[{PUNCTUATION_CLASS}]+"
        )))
    }

    /// Runs of non-digits, and runs of (or, `individual`, single) ASCII digits.
    pub fn digits(individual: bool) -> WCResult<Self> {
        Self::new(RegexWrapperPattern::Basic(format!(
            "[^0-9]+|[0-9]{}",
            if individual { "" } else { "+" }
        )))
    }

    /// Runs of non-whitespace.
    pub fn whitespace_split() -> WCResult<Self> {
        Self::new(RegexWrapperPattern::Basic(r"\S+".to_string()))
    }

    /// Runs of word chars, or runs of non-word-non-space chars.
    pub fn whitespace() -> WCResult<Self> {
        Self::new(RegexWrapperPattern::Basic(r"\w+|[^\w\s]+".to_string()))
    }

    /// Append every non-empty match of `text` to `pieces`.
    pub fn split_append(
        &self,
        text: &str,
        pieces: &mut Vec<String>,
    ) {
        pieces.extend(
            self.regex
                .find_pieces(text)
                .filter(|range| !range.is_empty())
                .map(|range| text[range].to_string()),
        );
    }
}
