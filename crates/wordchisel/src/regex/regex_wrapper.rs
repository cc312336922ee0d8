//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex` and `fancy_regex` types.

use core::ops::Range;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ErrorWrapper {
    /// Error from `regex`.
    Basic(regex::Error),

    /// Error from `fancy_regex`.
    Fancy(fancy_regex::Error),
}

impl From<regex::Error> for ErrorWrapper {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err)
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err)
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

/// Label for regex patterns.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegexWrapperPattern {
    /// This is a pattern for the `regex` crate.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex` crate first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexWrapperPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexWrapperPattern {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) => pattern,
            Self::Fancy(pattern) => pattern,
            Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the regex pattern into a `RegexWrapper`.
    ///
    /// ## Returns
    /// A `Result` containing the compiled `RegexWrapper` or an `ErrorWrapper`.
    /// For `Adaptive` patterns, the reported error is the `fancy_regex` one.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        match self {
            Self::Basic(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Fancy(pattern) => fancy_regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Adaptive(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .or_else(|basic_err| {
                    log::debug!("pattern {pattern:?} needs fancy_regex: {basic_err}");
                    fancy_regex::Regex::new(pattern)
                        .map(RegexWrapper::from)
                        .map_err(ErrorWrapper::from)
                }),
        }
    }
}

/// Remove redundant backslash escapes from a config regex.
///
/// Patterns exported from Python may escape punctuation (`\#`, `\&`, `\~`)
/// which carries no meaning there, but which stricter engines reject.
/// Escaped backslashes (`\\#`) are left untouched.
///
/// ## Arguments
/// * `pattern` - the pattern as found in the config.
///
/// ## Returns
/// The pattern with those escapes removed.
pub fn unescape_config_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('#' | '&' | '~') => {}
            Some(_) => {
                out.push(c);
                // Keep the escaped char paired with its backslash.
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            None => out.push(c),
        }
    }
    out
}

/// Wrapper for regex patterns.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Iterate over the byte ranges of all non-overlapping matches.
    ///
    /// A `fancy_regex` runtime failure (e.g. the backtrack limit) is logged,
    /// and ends the iteration; the unsearched remainder is not reported.
    /// Callers which treat the text between matches as content keep it.
    ///
    /// ## Arguments
    /// * `haystack` - The string to search in.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchRanges<'r, 'h> {
        MatchRanges::new(self, haystack, false)
    }

    /// Iterate over match ranges as pieces of `haystack`.
    ///
    /// Like [`find_iter`](Self::find_iter), except that a `fancy_regex`
    /// runtime failure yields the remainder after the last match as one
    /// final piece, so no input is lost by splitters which keep only matches.
    ///
    /// ## Arguments
    /// * `haystack` - The string to search in.
    pub fn find_pieces<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchRanges<'r, 'h> {
        MatchRanges::new(self, haystack, true)
    }

    /// Find every match, returning the whole-match range and the range
    /// of the first capture group which participated in the match.
    ///
    /// Matches with no participating group report the whole match twice.
    /// A `fancy_regex` runtime failure ends the search; the caller keeps the
    /// text after the last reported match.
    ///
    /// ## Arguments
    /// * `haystack` - The string to search in.
    pub fn first_group_ranges(
        &self,
        haystack: &str,
    ) -> Vec<(Range<usize>, Range<usize>)> {
        match self {
            Self::Basic(regex) => regex
                .captures_iter(haystack)
                .filter_map(|caps| {
                    let whole = caps.get(0)?.range();
                    let group = caps
                        .iter()
                        .skip(1)
                        .flatten()
                        .next()
                        .map_or(whole.clone(), |m| m.range());
                    Some((whole, group))
                })
                .collect(),
            Self::Fancy(regex) => {
                let mut out = Vec::new();
                for caps in regex.captures_iter(haystack) {
                    let caps = match caps {
                        Ok(caps) => caps,
                        Err(err) => {
                            log::warn!("regex {:?} aborted: {err}", regex.as_str());
                            break;
                        }
                    };
                    let Some(whole) = caps.get(0).map(|m| m.range()) else {
                        continue;
                    };
                    let group = (1..caps.len())
                        .find_map(|i| caps.get(i))
                        .map_or(whole.clone(), |m| m.range());
                    out.push((whole, group));
                }
                out
            }
        }
    }

    /// Replace every match with a literal string.
    ///
    /// `$` in `content` is not expanded.
    pub fn replace_all(
        &self,
        haystack: &str,
        content: &str,
    ) -> String {
        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        for range in self.find_iter(haystack) {
            out.push_str(&haystack[last..range.start]);
            out.push_str(content);
            last = range.end;
        }
        out.push_str(&haystack[last..]);
        out
    }
}

/// Iterator over match byte ranges.
pub struct MatchRanges<'r, 'h> {
    matches: Matches<'r, 'h>,
    last_end: usize,
    haystack_len: usize,
    keep_tail: bool,
}

enum Matches<'r, 'h> {
    Basic(regex::Matches<'r, 'h>),
    Fancy(fancy_regex::Matches<'r, 'h>),
    Done,
}

impl<'r, 'h> MatchRanges<'r, 'h> {
    fn new(
        regex: &'r RegexWrapper,
        haystack: &'h str,
        keep_tail: bool,
    ) -> Self {
        let matches = match regex {
            RegexWrapper::Basic(regex) => Matches::Basic(regex.find_iter(haystack)),
            RegexWrapper::Fancy(regex) => Matches::Fancy(regex.find_iter(haystack)),
        };
        Self {
            matches,
            last_end: 0,
            haystack_len: haystack.len(),
            keep_tail,
        }
    }
}

impl Iterator for MatchRanges<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let found = match &mut self.matches {
            Matches::Basic(matches) => {
                matches.next().map(|m| Ok::<_, fancy_regex::Error>(m.range()))
            }
            Matches::Fancy(matches) => matches.next().map(|r| r.map(|m| m.range())),
            Matches::Done => None,
        };
        match found? {
            Ok(range) => {
                self.last_end = range.end;
                Some(range)
            }
            Err(err) => {
                log::warn!("fancy regex search aborted: {err}");
                self.matches = Matches::Done;
                let tail = self.last_end..self.haystack_len;
                (self.keep_tail && !tail.is_empty()).then_some(tail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_falls_up_to_fancy() {
        let basic = RegexWrapperPattern::from(r"\d+").compile().unwrap();
        assert!(!basic.is_fancy());

        let fancy = RegexWrapperPattern::from(r"\s+(?!\S)").compile().unwrap();
        assert!(fancy.is_fancy());
        assert_eq!(fancy.as_str(), r"\s+(?!\S)");

        assert!(RegexWrapperPattern::Basic(r"\s+(?!\S)".to_string()).compile().is_err());
    }

    #[test]
    fn test_find_iter_ranges() {
        let re = RegexWrapperPattern::Fancy(r"\w+".to_string()).compile().unwrap();
        assert_eq!(re.find_iter("ab cd").collect::<Vec<_>>(), vec![0..2, 3..5]);
    }

    #[test]
    fn test_backtrack_limit_keeps_remainder() {
        let regex = fancy_regex::RegexBuilder::new(r"(?i)(a|b|ab)*(?=c)")
            .backtrack_limit(1)
            .build()
            .unwrap();
        let re = RegexWrapper::from(regex);
        let text = "abababababababababababababababab";

        assert_eq!(re.find_iter(text).count(), 0);
        assert_eq!(re.find_pieces(text).collect::<Vec<_>>(), vec![0..text.len()]);
        assert_eq!(re.replace_all(text, "x"), text);
    }

    #[test]
    fn test_find_pieces_matches_find_iter() {
        let re = RegexWrapperPattern::Fancy(r"\w+(?=\s)".to_string()).compile().unwrap();
        assert_eq!(re.find_pieces("ab cd ef").collect::<Vec<_>>(), vec![0..2, 3..5]);
    }

    #[test]
    fn test_replace_all_is_literal() {
        let re = RegexWrapperPattern::from("a").compile().unwrap();
        assert_eq!(re.replace_all("banana", "$0"), "b$0n$0n$0");
    }

    #[test]
    fn test_first_group_ranges() {
        let re = RegexWrapperPattern::from(r"\s*(x)|(y)\s*").compile().unwrap();
        let got = re.first_group_ranges("a  x y  b");
        assert_eq!(got, vec![(1..4, 3..4), (5..8, 5..6)]);
    }

    #[test]
    fn test_unescape_config_regex() {
        assert_eq!(unescape_config_regex(r"\#\&\~"), "#&~");
        assert_eq!(unescape_config_regex(r"\\#"), r"\\#");
        assert_eq!(unescape_config_regex(r"\s+\."), r"\s+\.");
        assert_eq!(unescape_config_regex("tail\\"), "tail\\");
    }
}
