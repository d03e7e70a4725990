//! Wire protocol for Roomlink.
//!
//! This crate defines the "language" that the client and the game server
//! speak:
//!
//! - **Types** ([`ServerMessage`], [`InputMessage`], [`PlayerState`],
//!   [`RoomInfo`]) — the structures that travel on the wire.
//! - **Codec** ([`LineCodec`], [`encode_frame`]) — how those messages are
//!   converted to/from newline-delimited JSON bytes, including reassembly
//!   of frames that arrive split across TCP reads.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below the session client. It doesn't know about
//! sockets, tasks, or connection state — it only knows how to turn messages
//! into bytes and bytes back into messages.
//!
//! ```text
//! Socket (bytes) → Protocol (frames) → Session client (game state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{decode_line, encode_frame, LineCodec};
pub use error::ProtocolError;
pub use types::{InputMessage, PlayerState, RoomInfo, ServerMessage};

/// UDP port the server listens on for discovery probes.
pub const DISCOVERY_PORT: u16 = 50001;

/// TCP port the server accepts session connections on.
pub const SESSION_PORT: u16 = 50000;

/// The fixed payload a client broadcasts when looking for a room.
/// Servers answer anything else with silence.
pub const DISCOVERY_PROBE: &[u8] = b"DISCOVER_ROOM";
