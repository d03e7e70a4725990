//! # Roomlink
//!
//! Networking core for a LAN real-time multiplayer game client.
//!
//! Roomlink finds a game server on the local subnet (UDP broadcast
//! discovery), opens a persistent session stream to it (newline-delimited
//! JSON over TCP), and keeps the latest authoritative world snapshot
//! available to the game loop through non-blocking accessors. Rendering,
//! input polling, and frame timing belong to the host game; Roomlink only
//! does the wire.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use roomlink::prelude::*;
//!
//! # async fn run() -> Result<(), roomlink::RoomlinkError> {
//! roomlink::init_logging();
//!
//! // Find a room and join it (blocks up to the discovery timeout).
//! let (mut client, room) =
//!     roomlink::discover_and_join(Duration::from_millis(1500)).await?;
//! println!("joined {room}");
//!
//! // Then, once per game tick:
//! client.send_input(-5, 0).await;
//! let snapshot = client.snapshot();
//! for player in &snapshot.players {
//!     let is_me = Some(player.id) == client.local_id();
//!     // draw the player ...
//!     let _ = is_me;
//! }
//!
//! client.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod error;

pub use bootstrap::{discover_and_join, discover_and_join_with};
pub use error::RoomlinkError;

// Re-export the layer crates so a game only needs one dependency.
pub use roomlink_client::{
    ClientConfig, ClientError, ClientIdentity, ConnectionStatus,
    SessionClient, SessionSnapshot,
};
pub use roomlink_discovery::{
    discover_rooms, discover_rooms_with, DiscoveryConfig, DiscoveryError,
};
pub use roomlink_protocol::{
    InputMessage, PlayerState, ProtocolError, RoomInfo, ServerMessage,
    DISCOVERY_PORT, SESSION_PORT,
};

/// One-line glob import for game code.
pub mod prelude {
    pub use crate::{
        discover_and_join, discover_rooms, ClientConfig, ClientIdentity,
        ConnectionStatus, PlayerState, RoomInfo, RoomlinkError,
        SessionClient, SessionSnapshot,
    };
}

/// Installs a `tracing` subscriber reading the `RUST_LOG` environment
/// variable, defaulting to `info`.
///
/// Convenience for host binaries; library code only emits events and never
/// installs a subscriber. Safe to call when a subscriber is already
/// installed (it simply does nothing then).
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
