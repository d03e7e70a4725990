//! Error types for the protocol layer.
//!
//! Each crate in Roomlink defines its own error enum. This keeps errors
//! specific and meaningful: a `ProtocolError` always means a problem with
//! serialization or framing, never with networking or connection state.

/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// truncated message. The receive loop treats this as a soft failure —
    /// the bad frame is skipped and later frames still decode.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
