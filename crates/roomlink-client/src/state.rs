//! Client-side state: what the presentation layer reads every tick.
//!
//! None of these types travel on the wire. They are derived from inbound
//! frames by the receive loop and handed to the game loop by value, so a
//! reader can never observe a half-updated composite.

use std::fmt;

use roomlink_protocol::PlayerState;

// ---------------------------------------------------------------------------
// ConnectionStatus
// ---------------------------------------------------------------------------

/// The connection lifecycle, as a state machine:
///
/// ```text
///   Searching ──(connect)──→ Connecting ──(welcome)──→ Connected
///       │                        │                         │
///       └────────────────────────┴──── (error / close / ───┘
///                                       shutdown)
///                                          │
///                                          ▼
///                                    Disconnected
/// ```
///
/// Exactly one value holds at any time. `Disconnected` is terminal for a
/// connection instance: there is no automatic reconnect, a caller that
/// wants back in runs discovery and builds a new client.
///
/// Note that a successful TCP connect is only `Connecting` — the client
/// doesn't count itself in until the server's welcome frame arrives and an
/// id has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No connection attempt yet (or discovery still running).
    #[default]
    Searching,
    /// Stream opened, waiting for the server's welcome.
    Connecting,
    /// Welcome received; input flows out, snapshots flow in.
    Connected,
    /// The stream failed, closed, or was shut down. Terminal.
    Disconnected,
}

/// Rendered as-is in the status overlay.
impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Searching => "searching",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        };
        f.write_str(text)
    }
}

// ---------------------------------------------------------------------------
// ClientIdentity
// ---------------------------------------------------------------------------

/// Who the server says we are.
///
/// Populated by the welcome handshake and then effectively immutable for
/// the lifetime of the connection. `local_id` is what the renderer uses to
/// highlight the local player's rectangle; `room_code` feeds the text
/// overlay.
///
/// A welcome without a `room_code` keeps the previously known code (the
/// discovery reply may have carried one already).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientIdentity {
    /// Server-assigned id for this client. `None` until the welcome lands.
    pub local_id: Option<u64>,
    /// Human-readable room label, if the server shared one.
    pub room_code: Option<String>,
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// The latest authoritative world state.
///
/// Replaced wholesale on every inbound `state` frame, preserving the
/// server's ordering. Consumers get a clone and may hold it as long as
/// they like; the receive loop never mutates a published snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// Every connected player, in the order the server listed them.
    pub players: Vec<PlayerState>,
}

impl SessionSnapshot {
    /// Looks up one player by id. Handy for the "where am I" case.
    pub fn player(&self, id: u64) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }
}
