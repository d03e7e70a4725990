//! Room discovery for Roomlink.
//!
//! Finds game servers on the local subnet without any prior configuration:
//! the client broadcasts a fixed probe on a well-known UDP port and
//! collects whatever replies come back within a wall-clock budget.
//!
//! Discovery is deliberately best-effort. UDP broadcast can drop probes,
//! drop replies, or deliver the same reply twice, so the scan neither
//! retries a specific server nor deduplicates — it reports exactly what it
//! heard and lets the caller decide. An empty result is a normal outcome
//! ("no game running right now"), not an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use roomlink_discovery::discover_rooms;
//!
//! # async fn run() -> Result<(), roomlink_discovery::DiscoveryError> {
//! let rooms = discover_rooms(Duration::from_millis(1500)).await?;
//! match rooms.first() {
//!     Some(room) => println!("joining {room}"),
//!     None => println!("no rooms found"),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod scan;

pub use config::DiscoveryConfig;
pub use error::DiscoveryError;
pub use scan::{discover_rooms, discover_rooms_with};
