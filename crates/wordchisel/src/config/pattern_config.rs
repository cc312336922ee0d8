//! # Config Patterns
//!
//! Patterns in component configs are `{"String": "..."}` (a literal) or
//! `{"Regex": "..."}` (a regex).

use serde::Deserialize;

use crate::{
    errors::WCResult,
    regex::{RegexWrapper, RegexWrapperPattern, unescape_config_regex},
};

/// A literal or regex pattern from a component config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum PatternConfig {
    /// Match the string literally.
    String(String),

    /// Match a regex.
    Regex(String),
}

impl PatternConfig {
    /// Compile the pattern.
    ///
    /// Literals are escaped; regexes have redundant punctuation escapes removed,
    /// and compile adaptively.
    pub fn compile(&self) -> WCResult<RegexWrapper> {
        let pattern = match self {
            Self::String(literal) => RegexWrapperPattern::Basic(regex::escape(literal)),
            Self::Regex(regex) => RegexWrapperPattern::Adaptive(unescape_config_regex(regex)),
        };
        Ok(pattern.compile()?)
    }
}
