//! # Regex Utilities
//!
//! Tokenizer configs carry patterns written for a Python/Oniguruma flavored engine;
//! many compile with the standard [`regex`] crate, but some (notably the GPT-2
//! word pattern, with its `\s+(?!\S)` lookahead) require [`fancy_regex`].
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]
//!
//! [`RegexWrapper`] exposes match ranges (not match objects) so that both
//! engines present a single iterator type.

pub mod regex_wrapper;
pub mod union_patterns;

#[doc(inline)]
pub use regex_wrapper::{ErrorWrapper, RegexWrapper, RegexWrapperPattern, unescape_config_regex};
#[doc(inline)]
pub use union_patterns::{StrippedAlternative, stripped_union_regex_pattern};
