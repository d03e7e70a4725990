//! The session client and its background receive loop.
//!
//! # Concurrency contract
//!
//! Two contexts touch a connected client:
//!
//! - the **caller's context** (the game loop): calls
//!   [`SessionClient::send_input`] and reads status/identity/snapshot once
//!   per tick;
//! - the **receive task**: exactly one per connection, spawned by
//!   `connect`. It is the sole writer of the shared state.
//!
//! The split is also a socket split: the caller only ever writes, the task
//! only ever reads, so the two never contend on the stream itself. Shared
//! state is published through `tokio::sync::watch` channels — each update
//! swaps in a complete new value, so a reader sees either the old value or
//! the new one, never a torn mix.
//!
//! Nothing here blocks the caller: `send_input` is one bounded write, the
//! accessors are a channel borrow plus a clone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use roomlink_protocol::{
    encode_frame, InputMessage, LineCodec, ServerMessage, SESSION_PORT,
};

use crate::{ClientError, ClientIdentity, ConnectionStatus, SessionSnapshot};

/// One read's worth of stream data. Frames are typically far smaller; a
/// frame larger than this simply spans multiple reads.
const READ_BUF_SIZE: usize = 4096;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Knobs for the session client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// TCP port to connect to. Default: the protocol's well-known
    /// session port.
    pub session_port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_port: SESSION_PORT,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared between the client handle and its receive task.
///
/// The watch senders live here so both sides can publish: the caller's
/// context flips the status on `connect`/`shutdown`, the receive task
/// owns every update after that.
struct Shared {
    status: watch::Sender<ConnectionStatus>,
    identity: watch::Sender<ClientIdentity>,
    snapshot: watch::Sender<SessionSnapshot>,
    /// Cleared by `shutdown` so a receive task that is between reads
    /// exits instead of issuing another one.
    running: AtomicBool,
}

// ---------------------------------------------------------------------------
// SessionClient
// ---------------------------------------------------------------------------

/// A client for one game session: one stream connection, one receive task.
///
/// Construct it, `connect` it to a discovered host, then drive it from the
/// game loop: `send_input` every tick, read `snapshot`/`identity`/`status`
/// every tick. Stop it with `shutdown`. A `SessionClient` is not reusable
/// after disconnect — discovery plus a fresh instance is the way back in.
///
/// ```rust,no_run
/// use roomlink_client::SessionClient;
///
/// # async fn run() -> Result<(), roomlink_client::ClientError> {
/// let mut client = SessionClient::new();
/// client.connect("192.168.1.4").await?;
/// // ... per tick:
/// client.send_input(-5, 0).await;
/// for player in &client.snapshot().players {
///     // draw player ...
///     let _ = player;
/// }
/// client.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct SessionClient {
    config: ClientConfig,
    shared: Arc<Shared>,
    /// Write half of the stream. Only the caller's context touches it.
    writer: Option<Box<dyn AsyncWrite + Send + Unpin>>,
    recv_task: Option<JoinHandle<()>>,
}

impl SessionClient {
    /// Creates a disconnected client in the `Searching` state.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with an explicit config.
    pub fn with_config(config: ClientConfig) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Searching);
        let (identity, _) = watch::channel(ClientIdentity::default());
        let (snapshot, _) = watch::channel(SessionSnapshot::default());
        Self {
            config,
            shared: Arc::new(Shared {
                status,
                identity,
                snapshot,
                running: AtomicBool::new(false),
            }),
            writer: None,
            recv_task: None,
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Opens a TCP connection to `host` on the configured session port and
    /// starts the receive task.
    ///
    /// The status passes through `Connecting` while the dial is in flight
    /// and stays there on success — `Connected` is the receive task's call,
    /// made when the server's welcome arrives.
    ///
    /// # Errors
    /// [`ClientError::Connect`] if the dial fails; the status is restored
    /// to whatever it was before the attempt. [`ClientError::AlreadyConnected`]
    /// if this instance already has a live connection.
    pub async fn connect(&mut self, host: &str) -> Result<(), ClientError> {
        if self.recv_task.is_some() {
            return Err(ClientError::AlreadyConnected);
        }

        let prev = *self.shared.status.borrow();
        self.shared.status.send_replace(ConnectionStatus::Connecting);

        let addr = (host, self.config.session_port);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                info!(host, port = self.config.session_port, "connected");
                self.attach(stream);
                Ok(())
            }
            Err(e) => {
                warn!(host, error = %e, "connect failed");
                self.shared.status.send_replace(prev);
                Err(ClientError::Connect(e))
            }
        }
    }

    /// Starts a session over an already-established byte stream.
    ///
    /// This is `connect` minus the TCP dial: same state transitions, same
    /// receive task. It exists so tests (and alternative transports) can
    /// drive the client over an in-memory duplex stream.
    pub fn connect_stream<S>(&mut self, stream: S) -> Result<(), ClientError>
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        if self.recv_task.is_some() {
            return Err(ClientError::AlreadyConnected);
        }
        self.shared.status.send_replace(ConnectionStatus::Connecting);
        self.attach(stream);
        Ok(())
    }

    /// Splits the stream and spawns the receive task.
    fn attach<S>(&mut self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (reader, writer) = io::split(stream);
        self.writer = Some(Box::new(writer));
        self.shared.running.store(true, Ordering::Release);

        let shared = Arc::clone(&self.shared);
        self.recv_task = Some(tokio::spawn(recv_loop(shared, reader)));
    }

    /// Stops the client: closes the write side, cancels the receive task,
    /// and marks the connection `Disconnected`.
    ///
    /// This is the only supported way to stop a client, and it is safe to
    /// call at any time, in any state, more than once.
    pub async fn shutdown(&mut self) {
        self.shared.running.store(false, Ordering::Release);

        if let Some(mut writer) = self.writer.take() {
            // Best effort; the peer may already be gone.
            let _ = writer.shutdown().await;
        }
        if let Some(task) = self.recv_task.take() {
            // The task may be parked in a blocking read with nothing
            // left to wake it. Cancellation is how that read ends.
            task.abort();
            let _ = task.await;
        }

        self.shared
            .status
            .send_replace(ConnectionStatus::Disconnected);
        debug!("session client shut down");
    }

    // -- per-tick operations --------------------------------------------------

    /// Sends this tick's movement input to the server.
    ///
    /// Best-effort by design: unless the status is `Connected` this is a
    /// silent no-op (not an error — the game loop calls it every tick,
    /// including during the handshake), and a failed write is only logged.
    /// A lost input frame means one tick of movement is lost; the next
    /// failed *read* is what flips the status to `Disconnected`.
    pub async fn send_input(&mut self, dx: i32, dy: i32) {
        if *self.shared.status.borrow() != ConnectionStatus::Connected {
            return;
        }
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let frame = match encode_frame(&InputMessage { dx, dy }) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "failed to encode input frame");
                return;
            }
        };
        if let Err(e) = writer.write_all(&frame).await {
            warn!(error = %e, "input send failed");
        }
    }

    // -- accessors (non-blocking, torn-read free) -----------------------------

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        *self.shared.status.borrow()
    }

    /// Identity assigned by the server's welcome, if it has arrived.
    pub fn identity(&self) -> ClientIdentity {
        self.shared.identity.borrow().clone()
    }

    /// The server-assigned id for the local player, if known.
    pub fn local_id(&self) -> Option<u64> {
        self.shared.identity.borrow().local_id
    }

    /// The latest world snapshot, by value.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// A receiver that is notified on every status change. For callers
    /// that want to await a transition instead of polling each tick.
    pub fn watch_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.shared.status.subscribe()
    }

    /// A receiver that is notified on every new snapshot.
    pub fn watch_snapshot(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.snapshot.subscribe()
    }
}

impl Default for SessionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A dropped client must not leak its receive task.
impl Drop for SessionClient {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(task) = self.recv_task.take() {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Receive loop
// ---------------------------------------------------------------------------

/// The background half of the client: read, reframe, apply, repeat.
///
/// Exit paths, all of which end in `Disconnected`:
/// - a zero-length read (the peer closed cleanly),
/// - a read error (the peer vanished, or `shutdown` closed the socket),
/// - the running flag cleared between reads.
///
/// Per-frame problems are NOT exit paths: a frame that fails to decode, or
/// decodes to a message kind this client doesn't know, is logged and
/// skipped. No single frame is fatal.
async fn recv_loop<R>(shared: Arc<Shared>, mut reader: R)
where
    R: AsyncRead + Send + Unpin,
{
    let mut codec = LineCodec::new();
    let mut buf = [0u8; READ_BUF_SIZE];

    while shared.running.load(Ordering::Acquire) {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                debug!("server closed the stream");
                break;
            }
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "stream read failed");
                break;
            }
        };

        codec.push(&buf[..n]);
        while let Some(frame) = codec.next_frame::<ServerMessage>() {
            match frame {
                Ok(msg) => apply_message(&shared, msg),
                Err(e) => {
                    debug!(error = %e, "skipping malformed frame");
                }
            }
        }
    }

    shared
        .status
        .send_replace(ConnectionStatus::Disconnected);
}

/// Applies one decoded server message to the shared state.
fn apply_message(shared: &Shared, msg: ServerMessage) {
    match msg {
        ServerMessage::Welcome { id, room_code } => {
            shared.identity.send_modify(|identity| {
                identity.local_id = Some(id);
                // Absent means "no news", not "no room code".
                if room_code.is_some() {
                    identity.room_code = room_code.clone();
                }
            });
            shared.status.send_replace(ConnectionStatus::Connected);
            info!(id, "welcome received, session established");
        }
        ServerMessage::State { players } => {
            // Full replace, server order preserved. A player the server
            // stopped listing disappears from the very next snapshot.
            shared
                .snapshot
                .send_replace(SessionSnapshot { players });
        }
        ServerMessage::Unknown => {
            trace!("skipping unrecognized message type");
        }
    }
}
