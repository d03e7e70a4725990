/// Errors surfaced by the session client's public API.
///
/// Deliberately short: most runtime failures (a malformed frame, a failed
/// input write, the peer vanishing) are absorbed by the client and show up
/// as a [`ConnectionStatus`](crate::ConnectionStatus) change instead of an
/// error value. Only `connect` itself reports failure synchronously.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Opening the stream connection failed. The client's status is left
    /// exactly as it was before the attempt.
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    /// `connect` was called on a client that already has a live
    /// connection. One connection per instance; construct a new client
    /// to join again.
    #[error("client is already connected")]
    AlreadyConnected,
}
