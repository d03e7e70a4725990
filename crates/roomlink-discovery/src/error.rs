/// Errors that can occur during a discovery scan.
///
/// A scan that finds nothing is NOT an error — it returns an empty list.
/// These variants cover the socket itself failing, which is a different
/// situation from "nobody answered".
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The broadcast socket could not be created or configured.
    #[error("discovery socket setup failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Sending a probe or receiving a reply failed at the socket level.
    ///
    /// This is an unexpected I/O failure, not a receive timeout. Timeouts
    /// are part of the normal scan rhythm and are handled internally.
    #[error("discovery I/O failed: {0}")]
    Io(#[source] std::io::Error),
}
