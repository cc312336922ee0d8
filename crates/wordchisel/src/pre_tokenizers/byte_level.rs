//! # Byte-Level Pre-Tokenizer

use serde::Deserialize;
use serde_json::Value;

use crate::{
    errors::WCResult,
    regex::{RegexWrapper, RegexWrapperPattern},
    vocab::ByteTable,
};

/// The GPT-2 contraction/word-boundary pattern.
pub const GPT2_WORD_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

#[derive(Deserialize)]
struct ByteLevelConfig {
    #[serde(default)]
    add_prefix_space: bool,

    #[serde(default = "default_use_regex")]
    use_regex: bool,
}

fn default_use_regex() -> bool {
    true
}

/// Chunks text with the GPT-2 word pattern, then maps every UTF-8 byte
/// of each chunk through [`ByteTable::gpt2`].
#[derive(Debug, Clone)]
pub struct ByteLevelPreTokenizer {
    add_prefix_space: bool,
    word_regex: Option<RegexWrapper>,
}

impl ByteLevelPreTokenizer {
    /// Build a byte-level pre-tokenizer.
    ///
    /// ## Arguments
    /// * `add_prefix_space` - prepend a space to text which does not start with one.
    /// * `use_regex` - chunk with the GPT-2 word pattern; otherwise map the text whole.
    pub fn new(
        add_prefix_space: bool,
        use_regex: bool,
    ) -> WCResult<Self> {
        let word_regex = if use_regex {
            Some(RegexWrapperPattern::Fancy(GPT2_WORD_PATTERN.to_string()).compile()?)
        } else {
            None
        };
        Ok(Self {
            add_prefix_space,
            word_regex,
        })
    }

    /// Build from a `ByteLevel` config.
    pub fn from_config(config: &Value) -> WCResult<Self> {
        let config = ByteLevelConfig::deserialize(config)?;
        Self::new(config.add_prefix_space, config.use_regex)
    }

    /// Pre-tokenize `text`, appending the mapped chunks to `pieces`.
    pub fn pre_tokenize_append(
        &self,
        text: &str,
        pieces: &mut Vec<String>,
    ) {
        let prefixed;
        let text = if self.add_prefix_space && !text.starts_with(' ') {
            prefixed = format!(" {text}");
            prefixed.as_str()
        } else {
            text
        };

        let table = ByteTable::gpt2();
        match &self.word_regex {
            Some(regex) => pieces.extend(
                regex
                    .find_pieces(text)
                    .filter(|range| !range.is_empty())
                    .map(|range| table.encode_str(&text[range])),
            ),
            None => {
                if !text.is_empty() {
                    pieces.push(table.encode_str(text))
                }
            }
        }
    }
}
