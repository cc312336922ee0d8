//! # Split Pre-Tokenizer

use core::ops::Range;

use serde::Deserialize;
use serde_json::Value;

use crate::{config::PatternConfig, errors::WCResult, regex::RegexWrapper};

/// What to do with the delimiter matches of a split.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
pub enum SplitDelimiterBehavior {
    /// Drop delimiters.
    Removed,

    /// Keep each delimiter as its own piece.
    #[default]
    Isolated,

    /// Append each delimiter to the preceding piece.
    MergedWithPrevious,

    /// Prepend each delimiter to the following piece.
    MergedWithNext,

    /// Keep delimiters as pieces, merging adjacent delimiters into one.
    Contiguous,
}

#[derive(Deserialize)]
struct SplitConfig {
    pattern: PatternConfig,

    #[serde(default)]
    behavior: SplitDelimiterBehavior,

    #[serde(default)]
    invert: bool,
}

/// Splits text on a literal or regex pattern.
///
/// With `invert`, only the matches are kept, each as a piece.
/// Otherwise, the matches are delimiters handled per `behavior`.
#[derive(Debug, Clone)]
pub struct SplitPreTokenizer {
    regex: RegexWrapper,
    behavior: SplitDelimiterBehavior,
    invert: bool,
}

impl SplitPreTokenizer {
    /// Build a split pre-tokenizer.
    pub fn new(
        regex: RegexWrapper,
        behavior: SplitDelimiterBehavior,
        invert: bool,
    ) -> Self {
        Self {
            regex,
            behavior,
            invert,
        }
    }

    /// Build from a `Split` config.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        let config = SplitConfig::deserialize(config)?;
        Ok(Self::new(
            config.pattern.compile()?,
            config.behavior,
            config.invert,
        ))
    }

    /// Pre-tokenize `text`, appending the pieces to `pieces`.
    pub fn pre_tokenize_append(
        &self,
        text: &str,
        pieces: &mut Vec<String>,
    ) {
        if self.invert {
            pieces.extend(
                self.regex
                    .find_pieces(text)
                    .filter(|range| !range.is_empty())
                    .map(|range| text[range].to_string()),
            );
            return;
        }

        let matches: Vec<Range<usize>> = self
            .regex
            .find_iter(text)
            .filter(|range| !range.is_empty())
            .collect();

        // (range, is_delimiter) segments covering all of `text`.
        let mut segments: Vec<(Range<usize>, bool)> = Vec::with_capacity(matches.len() * 2 + 1);
        let mut last = 0;
        for range in matches {
            if last < range.start {
                segments.push((last..range.start, false));
            }
            last = range.end;
            segments.push((range, true));
        }
        if last < text.len() {
            segments.push((last..text.len(), false));
        }

        let mut out: Vec<Range<usize>> = Vec::with_capacity(segments.len());
        let mut pending_next: Option<usize> = None;
        let mut prev_was_delim = false;
        for (range, is_delim) in segments {
            match (self.behavior, is_delim) {
                (SplitDelimiterBehavior::Removed, true) => {}
                (SplitDelimiterBehavior::MergedWithPrevious, true) => match out.last_mut() {
                    Some(prev) if !prev_was_delim => prev.end = range.end,
                    _ => out.push(range),
                },
                (SplitDelimiterBehavior::MergedWithNext, true) => {
                    if let Some(start) = pending_next.replace(range.start) {
                        out.push(start..range.start);
                    }
                }
                (SplitDelimiterBehavior::MergedWithNext, false) => {
                    let start = pending_next.take().unwrap_or(range.start);
                    out.push(start..range.end);
                }
                (SplitDelimiterBehavior::Contiguous, true) if prev_was_delim => {
                    if let Some(prev) = out.last_mut() {
                        prev.end = range.end;
                    }
                }
                _ => out.push(range),
            }
            prev_was_delim = is_delim;
        }
        if let Some(start) = pending_next {
            out.push(start..text.len());
        }

        pieces.extend(out.into_iter().map(|range| text[range].to_string()));
    }
}
