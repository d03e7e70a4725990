//! Core wire types for Roomlink's session and discovery protocols.
//!
//! Everything in this module is serialized as JSON. Field names here must
//! match the server's wire format exactly, so renaming a field is a
//! protocol change, not a refactor.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// One discovered room, built from a server's discovery reply.
///
/// The server answers a broadcast probe with a small JSON record telling the
/// client where to connect back. `host` is the only required field;
/// `room_code` is a human-friendly label some servers include so players can
/// confirm they joined the right game.
///
/// A `RoomInfo` is immutable once created. A single discovery scan may
/// return the same room more than once (broadcast replies can be duplicated
/// by the network); the scan deliberately does not deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    /// Address the client should open its session connection to.
    pub host: String,

    /// Optional human-readable room label, e.g. `"ABCD"`.
    pub room_code: Option<String>,
}

impl fmt::Display for RoomInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.room_code {
            Some(code) => write!(f, "{} ({})", self.host, code),
            None => write!(f, "{}", self.host),
        }
    }
}

// ---------------------------------------------------------------------------
// Session stream: server → client
// ---------------------------------------------------------------------------

/// One player's authoritative position, as reported by the server.
///
/// Entries are transient: every `state` frame carries the full player list
/// and replaces the previous one wholesale. Nothing is patched
/// field-by-field, so a player missing from a frame simply disappears from
/// the client's view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Server-assigned player id. Matches the `id` from the welcome
    /// message for the local player.
    pub id: u64,
    /// Horizontal position in world units.
    pub x: f32,
    /// Vertical position in world units.
    pub y: f32,
}

/// A message from the server on the session stream.
///
/// The wire format is internally tagged: every frame is a JSON object with
/// a `"type"` field naming the variant, lowercase. `#[serde(tag = "type")]`
/// makes serde read that tag and pick the matching variant.
///
/// The `Unknown` catch-all keeps old clients alive when a newer server
/// introduces a message kind we don't understand: the frame deserializes
/// into `Unknown` instead of failing, and the receive loop skips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Sent once, right after the server accepts the connection. Carries
    /// the id the server assigned to this client. `room_code` is optional;
    /// when absent the client keeps whatever code it already knows.
    Welcome {
        id: u64,
        room_code: Option<String>,
    },

    /// Sent once per server tick: the full authoritative player list.
    State { players: Vec<PlayerState> },

    /// Any `type` tag this client doesn't recognize.
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Session stream: client → server
// ---------------------------------------------------------------------------

/// The per-tick input message a client sends while connected.
///
/// Note the asymmetry with [`ServerMessage`]: outbound input frames carry
/// no `"type"` tag. The server only ever receives one message shape from a
/// client, so the protocol doesn't spend bytes naming it. Delivery is
/// fire-and-forget — no acknowledgement, no retry. A lost frame means that
/// tick's movement is lost, which the game tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    /// Horizontal movement for this tick, in world units.
    pub dx: i32,
    /// Vertical movement for this tick, in world units.
    pub dy: i32,
}
