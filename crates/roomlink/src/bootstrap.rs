//! The discover-then-join bootstrap flow.
//!
//! This is the whole "CLI surface" of a Roomlink game: no flags, no
//! environment variables, no host prompt. The client scans, takes the
//! first room it heard, and connects to it.

use std::time::Duration;

use tracing::info;

use roomlink_client::{ClientConfig, SessionClient};
use roomlink_discovery::{discover_rooms_with, DiscoveryConfig};
use roomlink_protocol::RoomInfo;

use crate::RoomlinkError;

/// Discovers rooms for up to `timeout` and connects to the first one.
///
/// Returns the connected client together with the room it joined (the
/// room's `room_code`, if any, is worth showing in the overlay before the
/// welcome arrives).
///
/// # Errors
/// [`RoomlinkError::NoRoomsFound`] if the scan came back empty, otherwise
/// whatever the scan or the connect reported.
pub async fn discover_and_join(
    timeout: Duration,
) -> Result<(SessionClient, RoomInfo), RoomlinkError> {
    discover_and_join_with(
        &DiscoveryConfig::default(),
        ClientConfig::default(),
        timeout,
    )
    .await
}

/// [`discover_and_join`] with explicit configs for both layers.
pub async fn discover_and_join_with(
    discovery: &DiscoveryConfig,
    client_config: ClientConfig,
    timeout: Duration,
) -> Result<(SessionClient, RoomInfo), RoomlinkError> {
    let rooms = discover_rooms_with(discovery, timeout).await?;
    info!(count = rooms.len(), "discovery finished");

    // First responder wins. Duplicates and ordering are whatever the
    // network produced; there is nothing to rank rooms by.
    let Some(room) = rooms.into_iter().next() else {
        return Err(RoomlinkError::NoRoomsFound);
    };

    let mut client = SessionClient::with_config(client_config);
    client.connect(&room.host).await?;
    info!(%room, "joined");

    Ok((client, room))
}
