//! # BERT Normalizer

use serde::Deserialize;
use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

use crate::normalizers::remove_combining_marks;

fn default_true() -> bool {
    true
}

/// BERT text normalization.
///
/// Applied in order:
/// 1. `clean_text`: drop NUL, U+FFFD and control chars; map whitespace to U+0020.
/// 2. `handle_chinese_chars`: surround CJK ideographs with spaces.
/// 3. `lowercase`: lowercase; also strip accents unless `strip_accents` is `false`.
///    Without `lowercase`, accents are stripped only if `strip_accents` is `true`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BertNormalizer {
    /// Remove control chars, normalize whitespace.
    #[serde(default = "default_true")]
    pub clean_text: bool,

    /// Isolate CJK ideographs.
    #[serde(default = "default_true")]
    pub handle_chinese_chars: bool,

    /// Strip accents; `None` follows `lowercase`.
    #[serde(default)]
    pub strip_accents: Option<bool>,

    /// Lowercase the text.
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

impl Default for BertNormalizer {
    fn default() -> Self {
        Self {
            clean_text: true,
            handle_chinese_chars: true,
            strip_accents: None,
            lowercase: true,
        }
    }
}

/// Is `c` a control char, by BERT's definition?
///
/// `\t`, `\n` and `\r` count as whitespace, not control.
fn is_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
    )
}

/// Is `c` a CJK Unified Ideograph (or compatibility ideograph)?
pub fn is_chinese_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}

impl BertNormalizer {
    fn clean_text(text: &str) -> String {
        text.chars()
            .filter(|&c| c != '\0' && c != char::REPLACEMENT_CHARACTER && !is_control(c))
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect()
    }

    fn pad_chinese_chars(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if is_chinese_char(c) {
                out.push(' ');
                out.push(c);
                out.push(' ');
            } else {
                out.push(c);
            }
        }
        out
    }

    fn strip_accents(text: &str) -> String {
        remove_combining_marks(&text.nfd().collect::<String>())
    }

    /// Normalize text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let mut text = if self.clean_text {
            Self::clean_text(text)
        } else {
            text.to_string()
        };

        if self.handle_chinese_chars {
            text = Self::pad_chinese_chars(&text);
        }

        if self.lowercase {
            text = text.to_lowercase();
            if self.strip_accents != Some(false) {
                text = Self::strip_accents(&text);
            }
        } else if self.strip_accents == Some(true) {
            text = Self::strip_accents(&text);
        }

        text
    }
}
