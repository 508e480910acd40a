//! Continuation cursors for paged `list` calls.
//!
//! A cursor remembers the last key returned and its offset. Resuming
//! prefers the anchor key's current position, so deletes ahead of the
//! anchor between pages do not skip or repeat rows.

use crate::{
    db::index::EntityIndex,
    error::InternalError,
    serialize::{deserialize, serialize},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

// Decode bound for untrusted cursor input.
const MAX_CURSOR_TOKEN_HEX_LEN: usize = 8 * 1024;

///
/// CursorDecodeError
///

#[derive(Debug, Eq, ThisError, PartialEq)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} hex chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token must have an even number of hex characters")]
    OddLength,

    #[error("invalid hex character at position {position}")]
    InvalidHex { position: usize },

    #[error("cursor payload is malformed: {0}")]
    Payload(String),
}

impl From<CursorDecodeError> for InternalError {
    fn from(err: CursorDecodeError) -> Self {
        Self::cursor_invalid(err.to_string())
    }
}

///
/// ListCursor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListCursor {
    /// Index position just after the anchor when the cursor was issued.
    pub offset: u64,
    /// Last key returned on the previous page.
    pub anchor: String,
}

impl ListCursor {
    #[must_use]
    pub const fn new(offset: u64, anchor: String) -> Self {
        Self { offset, anchor }
    }

    pub fn encode(&self) -> Result<String, InternalError> {
        let bytes = serialize(self)?;

        Ok(encode_cursor(&bytes))
    }

    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        let bytes = decode_cursor(token)?;

        deserialize(&bytes).map_err(|err| CursorDecodeError::Payload(err.to_string()))
    }

    /// Index position to resume from.
    #[must_use]
    pub fn resume_position(&self, index: &EntityIndex) -> usize {
        index.position(&self.anchor).map_or_else(
            || usize::try_from(self.offset).unwrap_or(usize::MAX).min(index.len()),
            |pos| pos + 1,
        )
    }
}

/// Encode raw cursor bytes as a lowercase hex token.
#[must_use]
pub fn encode_cursor(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decode a lowercase/uppercase hex cursor token into raw bytes.
///
/// The token may include surrounding whitespace, which is trimmed.
pub fn decode_cursor(token: &str) -> Result<Vec<u8>, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_HEX_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_HEX_LEN,
        });
    }

    if !token.len().is_multiple_of(2) {
        return Err(CursorDecodeError::OddLength);
    }

    let mut out = Vec::with_capacity(token.len() / 2);
    let bytes = token.as_bytes();

    for idx in (0..bytes.len()).step_by(2) {
        let hi = decode_hex_nibble(bytes[idx])
            .ok_or(CursorDecodeError::InvalidHex { position: idx + 1 })?;

        let lo = decode_hex_nibble(bytes[idx + 1])
            .ok_or(CursorDecodeError::InvalidHex { position: idx + 2 })?;

        out.push((hi << 4) | lo);
    }

    Ok(out)
}

const fn decode_hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
