//! # Byte/Char Mapping Table
//!
//! Byte-level pipelines represent every byte as a printable char, so that
//! arbitrary byte sequences have a textual form before BPE.

use std::sync::LazyLock;

use crate::types::{WCHashMap, hash_map_with_capacity};

static GPT2_BYTE_TABLE: LazyLock<ByteTable> = LazyLock::new(ByteTable::build_gpt2);

/// ``0..=255`` Byte/Char Bijection Table
///
/// Printable Latin-1 bytes (``!..=~``, ``¡..=¬``, ``®..=ÿ``) map to themselves;
/// the remaining bytes map, in byte order, to ``U+0100`` and up.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteTable {
    /// Table mapping from byte ordinal (position) to char.
    byte_chars: [char; 256],

    /// Hash map from char to byte ordinal value.
    char_bytes: WCHashMap<char, u8>,
}

impl ByteTable {
    /// The shared GPT-2 style table.
    pub fn gpt2() -> &'static ByteTable {
        &GPT2_BYTE_TABLE
    }

    fn build_gpt2() -> Self {
        let is_printable = |b: u8| matches!(b, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF);

        let mut byte_chars = ['\0'; 256];
        let mut shifted = 0u32;
        for b in 0..=255u8 {
            byte_chars[b as usize] = if is_printable(b) {
                char::from(b)
            } else {
                shifted += 1;
                // 256 + n is always a valid scalar value.
                char::from_u32(255 + shifted).unwrap_or(char::REPLACEMENT_CHARACTER)
            };
        }

        let mut char_bytes = hash_map_with_capacity(256);
        for (b, &c) in byte_chars.iter().enumerate() {
            char_bytes.insert(c, b as u8);
        }

        Self {
            byte_chars,
            char_bytes,
        }
    }

    /// Get the char for a byte.
    pub fn byte_to_char(
        &self,
        byte: u8,
    ) -> char {
        self.byte_chars[byte as usize]
    }

    /// Get the byte for a char, if the char is in the table.
    pub fn char_to_byte(
        &self,
        c: char,
    ) -> Option<u8> {
        self.char_bytes.get(&c).copied()
    }

    /// Map every UTF-8 byte of `text` to its table char.
    pub fn encode_str(
        &self,
        text: &str,
    ) -> String {
        text.bytes().map(|b| self.byte_to_char(b)).collect()
    }

    /// Append the bytes for every char of `text` to `buf`.
    ///
    /// Chars outside the table contribute their own UTF-8 bytes.
    pub fn decode_append(
        &self,
        text: &str,
        buf: &mut Vec<u8>,
    ) {
        for c in text.chars() {
            match self.char_to_byte(c) {
                Some(b) => buf.push(b),
                None => {
                    let mut tmp = [0u8; 4];
                    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
                }
            }
        }
    }
}
