/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Escape transcoding for reserved separator characters.
//!
//! A well-formed escape sequence is `<esc><code><esc>` where `<code>` is one
//! of `F` (field), `S` (component), `T` (sub-component), `R` (repetition), or
//! `E` (the escape character itself). Unknown or unterminated sequences are
//! not a fatal condition: they render literally, since upstream data quality
//! varies across message producers.

use ironhl7_core::Separators;
use memchr::memchr;

/// Replaces every reserved character in `text` with its escape sequence.
///
/// A single left-to-right scan over the input, so escape characters
/// introduced by one substitution are never re-escaped.
#[must_use]
pub fn escape(text: &str, separators: &Separators) -> String {
    if !text.chars().any(|c| separators.is_reserved(c)) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match escape_code(c, separators) {
            Some(code) => {
                out.push(separators.escape);
                out.push(code);
                out.push(separators.escape);
            }
            None => out.push(c),
        }
    }
    out
}

/// Restores reserved characters from their escape sequences.
///
/// Scans for the escape character; each complete `<esc><code><esc>` sequence
/// with a known code is replaced by the character it stands for. Unknown
/// codes are emitted verbatim including both delimiters, and an unterminated
/// sequence renders the remainder of the input literally.
#[must_use]
pub fn unescape(text: &str, separators: &Separators) -> String {
    let esc = separators.escape;
    if !esc.is_ascii() {
        // constructors reject non-ascii separators; nothing to transcode
        return text.to_string();
    }
    let esc_byte = esc as u8;
    let bytes = text.as_bytes();

    let mut out = String::with_capacity(text.len());
    let mut offset = 0;
    while offset < bytes.len() {
        let Some(rel) = memchr(esc_byte, &bytes[offset..]) else {
            out.push_str(&text[offset..]);
            break;
        };
        let start = offset + rel;
        out.push_str(&text[offset..start]);

        let Some(close_rel) = memchr(esc_byte, &bytes[start + 1..]) else {
            out.push_str(&text[start..]);
            break;
        };
        let close = start + 1 + close_rel;
        let code = &text[start + 1..close];
        match unescape_code(code, separators) {
            Some(c) => out.push(c),
            None => {
                tracing::debug!(code, "unknown escape sequence passed through");
                out.push_str(&text[start..=close]);
            }
        }
        offset = close + 1;
    }
    out
}

fn escape_code(c: char, separators: &Separators) -> Option<char> {
    if c == separators.field {
        Some('F')
    } else if c == separators.component {
        Some('S')
    } else if c == separators.subcomponent {
        Some('T')
    } else if c == separators.repetition {
        Some('R')
    } else if c == separators.escape {
        Some('E')
    } else {
        None
    }
}

fn unescape_code(code: &str, separators: &Separators) -> Option<char> {
    match code {
        "F" => Some(separators.field),
        "S" => Some(separators.component),
        "T" => Some(separators.subcomponent),
        "R" => Some(separators.repetition),
        "E" => Some(separators.escape),
        _ => None,
    }
}
