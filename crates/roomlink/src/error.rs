use roomlink_client::ClientError;
use roomlink_discovery::DiscoveryError;

/// Top-level error for the discover-and-join flow.
///
/// Wraps the per-layer errors so game code can use one error type. The
/// `#[from]` attributes generate the `From` impls that make `?` work
/// across the layer boundaries.
#[derive(Debug, thiserror::Error)]
pub enum RoomlinkError {
    /// The discovery scan itself failed (socket trouble, not silence).
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Connecting to the chosen room failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The scan finished without hearing from any server. Not fatal —
    /// there is simply no game to join right now. Scan again later.
    #[error("no rooms found on the local network")]
    NoRoomsFound,
}
