//! The Roomlink session client.
//!
//! [`SessionClient`] owns one TCP connection to a game server and keeps
//! three pieces of shared state current for the presentation layer:
//!
//! - the latest world [`SessionSnapshot`] (who is where),
//! - the [`ClientIdentity`] assigned by the server's welcome handshake,
//! - the [`ConnectionStatus`] state machine.
//!
//! A single background task reads the stream and is the sole writer of all
//! three; the game loop reads them (and sends input) from its own context
//! without ever blocking. See the [`session`] module docs for the
//! concurrency contract.

mod error;
pub mod session;
mod state;

pub use error::ClientError;
pub use session::{ClientConfig, SessionClient};
pub use state::{ClientIdentity, ConnectionStatus, SessionSnapshot};
