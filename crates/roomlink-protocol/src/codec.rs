//! Newline-delimited JSON framing.
//!
//! The session stream is plain TCP, and TCP is a byte stream with no
//! message boundaries: one `read` can return half a message, or three
//! messages and the first few bytes of a fourth. This module restores the
//! boundaries. Every message is one JSON object followed by a single `\n`,
//! and [`LineCodec`] reassembles complete lines no matter how the bytes
//! were chunked by the network.
//!
//! Encoding is the easy direction: serde_json escapes any newline inside a
//! string value (`"\n"` on the wire, never a raw byte 0x0A), so appending
//! one `\n` after the serialized object is always an unambiguous frame
//! delimiter.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes one value as a newline-terminated JSON frame, ready to write to
/// the socket in a single call.
///
/// # Errors
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    let mut bytes = serde_json::to_vec(value).map_err(ProtocolError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parses one complete frame (without its trailing newline) into a value.
///
/// Used for one-shot payloads like discovery replies, where the datagram
/// already is a whole message and no reassembly is needed.
///
/// # Errors
/// Returns [`ProtocolError::Decode`] if the bytes are not valid JSON for `T`.
pub fn decode_line<T: DeserializeOwned>(line: &[u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(line).map_err(ProtocolError::Decode)
}

// ---------------------------------------------------------------------------
// LineCodec
// ---------------------------------------------------------------------------

/// Streaming decoder for newline-delimited frames.
///
/// Feed it raw bytes as they arrive with [`push`](Self::push), then drain
/// complete frames with [`next_frame`](Self::next_frame). Bytes after the
/// last newline are retained in the accumulator until a later `push`
/// completes the line, so chunk boundaries never matter: feeding a byte
/// stream one byte at a time yields exactly the same frames as feeding it
/// all at once.
///
/// A frame that fails to parse is reported as an error for that frame
/// alone. The accumulator has already advanced past its newline, so the
/// caller can keep draining and the surrounding frames are unaffected.
#[derive(Debug, Default)]
pub struct LineCodec {
    buf: Vec<u8>,
}

impl LineCodec {
    /// Creates a codec with an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends newly read bytes to the accumulator.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Splits off and parses the next complete frame, if one is buffered.
    ///
    /// Returns `None` when no full line is available yet (the partial tail
    /// stays buffered), `Some(Ok(frame))` for a parsed frame, and
    /// `Some(Err(..))` for a line that was complete but malformed.
    pub fn next_frame<T: DeserializeOwned>(
        &mut self,
    ) -> Option<Result<T, ProtocolError>> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=pos).collect();
        // Drop the delimiter itself before parsing.
        Some(decode_line(&line[..pos]))
    }

    /// Number of bytes currently buffered (partial frame included).
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}
