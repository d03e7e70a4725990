//! Discovery scan configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use roomlink_protocol::DISCOVERY_PORT;

/// Configuration for a discovery scan.
///
/// The defaults implement the standard protocol: probe the subnet
/// broadcast address on the well-known discovery port, waiting 400 ms per
/// receive attempt. Tests (and unusual network setups) can point the probe
/// at a specific address instead of the broadcast address.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Where probes are sent. Default: `255.255.255.255:50001`.
    pub probe_addr: SocketAddr,

    /// How long one receive attempt may block before the loop re-checks
    /// the overall deadline and sends the next probe. This slice is fixed
    /// and independent of the scan's total timeout, which keeps the loop
    /// responsive even for long scans.
    pub recv_slice: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            probe_addr: SocketAddr::new(
                IpAddr::V4(Ipv4Addr::BROADCAST),
                DISCOVERY_PORT,
            ),
            recv_slice: Duration::from_millis(400),
        }
    }
}
