//! The broadcast scan loop.

use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time;
use tracing::{debug, trace};

use roomlink_protocol::{decode_line, RoomInfo, DISCOVERY_PROBE};

use crate::{DiscoveryConfig, DiscoveryError};

/// Replies larger than this are not discovery replies.
const REPLY_BUF_SIZE: usize = 1024;

/// Scans the local subnet for active rooms using the default configuration.
///
/// Blocks the calling task for up to `timeout` (plus at most one receive
/// slice) and returns every reply heard in that window, duplicates
/// included. An empty result means no server answered — a valid outcome,
/// not an error.
///
/// # Errors
/// Returns [`DiscoveryError::Bind`] if the broadcast socket can't be set
/// up, or [`DiscoveryError::Io`] on an unexpected socket failure mid-scan.
pub async fn discover_rooms(
    timeout: Duration,
) -> Result<Vec<RoomInfo>, DiscoveryError> {
    discover_rooms_with(&DiscoveryConfig::default(), timeout).await
}

/// Scans for rooms with an explicit [`DiscoveryConfig`].
///
/// The loop alternates "send one probe, wait one receive slice" until the
/// wall-clock deadline passes:
///
/// - a reply that parses as [`RoomInfo`] is collected;
/// - a reply that doesn't parse is logged and ignored (some other LAN
///   chatter may land on our ephemeral port);
/// - a receive slice that times out just means nobody answered this probe,
///   so the loop re-probes — servers that start mid-scan still get heard;
/// - a real socket error aborts the scan. This is the one failure that is
///   NOT swallowed: a broken socket would otherwise spin until the
///   deadline doing nothing.
pub async fn discover_rooms_with(
    config: &DiscoveryConfig,
    timeout: Duration,
) -> Result<Vec<RoomInfo>, DiscoveryError> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(DiscoveryError::Bind)?;
    socket.set_broadcast(true).map_err(DiscoveryError::Bind)?;

    debug!(probe_addr = %config.probe_addr, ?timeout, "starting room scan");

    let deadline = Instant::now() + timeout;
    let mut found = Vec::new();
    let mut buf = [0u8; REPLY_BUF_SIZE];

    while Instant::now() < deadline {
        socket
            .send_to(DISCOVERY_PROBE, config.probe_addr)
            .await
            .map_err(DiscoveryError::Io)?;

        match time::timeout(config.recv_slice, socket.recv_from(&mut buf))
            .await
        {
            // Slice elapsed with no reply. Normal scan rhythm.
            Err(_) => continue,
            Ok(Err(e)) => return Err(DiscoveryError::Io(e)),
            Ok(Ok((len, from))) => {
                match decode_line::<RoomInfo>(&buf[..len]) {
                    Ok(room) => {
                        debug!(%from, %room, "discovery reply");
                        found.push(room);
                    }
                    Err(e) => {
                        trace!(
                            %from,
                            error = %e,
                            "ignoring malformed discovery reply"
                        );
                    }
                }
            }
        }
    }

    debug!(count = found.len(), "room scan finished");
    Ok(found)
}
