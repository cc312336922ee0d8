//! # Byte Decoders
//!
//! Decoders that reassemble raw bytes and decode them as (lossy) UTF-8.

use crate::{decoders::DecodeContext, vocab::ByteTable};

/// Decode byte-level tokens through the inverse byte table.
///
/// Runs of ordinary tokens are mapped and decoded together; added tokens
/// pass through verbatim as their own fragments.
pub fn byte_level_decode_chain(
    tokens: Vec<String>,
    ctx: &DecodeContext,
) -> Vec<String> {
    let table = ByteTable::gpt2();
    let mut fragments = Vec::new();
    let mut buf: Vec<u8> = Vec::new();
    let mut pending = false;

    for token in tokens {
        if ctx.is_added(&token) {
            if pending {
                fragments.push(String::from_utf8_lossy(&buf).into_owned());
                buf.clear();
                pending = false;
            }
            fragments.push(token);
        } else {
            table.decode_append(&token, &mut buf);
            pending = true;
        }
    }
    if pending {
        fragments.push(String::from_utf8_lossy(&buf).into_owned());
    }
    fragments
}

/// Parse a `<0xNN>` byte token.
pub fn parse_byte_token(token: &str) -> Option<u8> {
    let hex = token.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Reassemble runs of `<0xNN>` byte tokens.
///
/// Each run becomes one fragment; other tokens are unchanged.
pub fn byte_fallback_decode_chain(tokens: Vec<String>) -> Vec<String> {
    let mut fragments = Vec::with_capacity(tokens.len());
    let mut buf: Vec<u8> = Vec::new();

    for token in tokens {
        match parse_byte_token(&token) {
            Some(b) => buf.push(b),
            None => {
                if !buf.is_empty() {
                    fragments.push(String::from_utf8_lossy(&buf).into_owned());
                    buf.clear();
                }
                fragments.push(token);
            }
        }
    }
    if !buf.is_empty() {
        fragments.push(String::from_utf8_lossy(&buf).into_owned());
    }
    fragments
}
