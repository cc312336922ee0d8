//! # Precompiled (SentencePiece) Normalizer
//!
//! SentencePiece models ship a compiled normalization charsmap. Nearly all of
//! them are built from the `nmt_nfkc` rule, which this normalizer implements
//! directly instead of interpreting the charsmap bytes.

use unicode_normalization::UnicodeNormalization;

/// Chars the `nmt_nfkc` rule removes.
fn is_removed_control(c: char) -> bool {
    matches!(
        c,
        '\u{0001}'..='\u{0008}'
            | '\u{000B}'
            | '\u{000E}'..='\u{001F}'
            | '\u{007F}'
            | '\u{008F}'
            | '\u{009F}'
    )
}

/// Chars the `nmt_nfkc` rule maps to U+0020.
fn is_space_like(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{1680}'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{2581}'
            | '\u{FEFF}'
            | '\u{FFFD}'
    )
}

/// Fullwidth tilde; NFKC would fold it to `~`, `nmt_nfkc` keeps it.
const FULLWIDTH_TILDE: char = '\u{FF5E}';

/// `nmt_nfkc` normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrecompiledNormalizer;

impl PrecompiledNormalizer {
    /// Normalize text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let cleaned: String = text
            .chars()
            .filter(|&c| !is_removed_control(c))
            .map(|c| if is_space_like(c) { ' ' } else { c })
            .collect();

        cleaned
            .split(FULLWIDTH_TILDE)
            .map(|part| part.nfkc().collect::<String>())
            .collect::<Vec<_>>()
            .join(&FULLWIDTH_TILDE.to_string())
    }
}
