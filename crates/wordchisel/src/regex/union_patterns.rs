//! # Stripped Union Patterns
//!
//! Builds the boundary pattern used to cut text on added tokens.

use crate::regex::regex_wrapper::RegexWrapperPattern;

/// One literal alternative of a stripped union pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrippedAlternative<'a> {
    /// The literal text to match.
    pub content: &'a str,

    /// Also consume whitespace before the literal.
    pub lstrip: bool,

    /// Also consume whitespace after the literal.
    pub rstrip: bool,
}

/// Create a union pattern of exact matches, each optionally wrapped
/// in whitespace-consuming `\s*` guards.
///
/// Every alternative carries exactly one capture group around its literal,
/// so the literal can be recovered from a match that also consumed whitespace.
///
/// This will always be a [`RegexWrapperPattern::Basic`] variant.
///
/// ## Arguments
/// * `alts` - the alternatives, in priority order.
///
/// ## Returns
/// A new `RegexWrapperPattern::Basic` containing the union pattern.
pub fn stripped_union_regex_pattern(alts: &[StrippedAlternative<'_>]) -> RegexWrapperPattern {
    let parts = alts
        .iter()
        .map(|alt| {
            format!(
                "{}({}){}",
                if alt.lstrip { r"\s*" } else { "" },
                regex::escape(alt.content),
                if alt.rstrip { r"\s*" } else { "" },
            )
        })
        .collect::<Vec<_>>();
    RegexWrapperPattern::Basic(parts.join("|"))
}
