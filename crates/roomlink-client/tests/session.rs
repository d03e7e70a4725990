//! Integration tests for the session client.
//!
//! Most tests drive the client over `tokio::io::duplex` — an in-memory
//! byte stream with the same read/write semantics as a TCP socket
//! (including EOF on drop). That gives us a "fake server" end we can write
//! frames into and read input frames out of, with no real networking. The
//! connect tests use a real loopback `TcpListener` since the dial itself
//! is what's under test there.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::timeout;

use roomlink_client::{ClientConfig, ConnectionStatus, SessionClient};

const TICK: Duration = Duration::from_millis(500);

/// Waits (bounded) until the watched status equals `expected`.
async fn wait_for_status(
    rx: &mut watch::Receiver<ConnectionStatus>,
    expected: ConnectionStatus,
) {
    let result = timeout(TICK, async {
        loop {
            if *rx.borrow_and_update() == expected {
                return;
            }
            rx.changed().await.expect("status channel closed");
        }
    })
    .await;
    assert!(
        result.is_ok(),
        "timed out waiting for status {expected:?}"
    );
}

/// Connects a client over an in-memory stream and returns the server end.
fn connect_in_memory(client: &mut SessionClient) -> DuplexStream {
    let (client_end, server_end) = tokio::io::duplex(4096);
    client
        .connect_stream(client_end)
        .expect("fresh client should accept a stream");
    server_end
}

// =========================================================================
// Handshake and identity
// =========================================================================

#[tokio::test]
async fn test_welcome_sets_connected_and_identity() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut server = connect_in_memory(&mut client);

    assert_eq!(client.status(), ConnectionStatus::Connecting);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":7,\"room_code\":\"ABCD\"}\n")
        .await
        .unwrap();

    wait_for_status(&mut status, ConnectionStatus::Connected).await;
    let identity = client.identity();
    assert_eq!(identity.local_id, Some(7));
    assert_eq!(identity.room_code.as_deref(), Some("ABCD"));

    client.shutdown().await;
}

#[tokio::test]
async fn test_welcome_without_room_code_keeps_previous() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut server = connect_in_memory(&mut client);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1,\"room_code\":\"ZZZZ\"}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    // A later welcome with no room_code must not erase the known one.
    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();

    let mut snapshots = client.watch_snapshot();
    server
        .write_all(b"{\"type\":\"state\",\"players\":[]}\n")
        .await
        .unwrap();
    // The state frame arriving proves the second welcome was processed
    // (frames are applied in order).
    timeout(TICK, snapshots.changed())
        .await
        .expect("should receive a snapshot")
        .unwrap();

    assert_eq!(client.identity().room_code.as_deref(), Some("ZZZZ"));

    client.shutdown().await;
}

// =========================================================================
// Snapshot semantics
// =========================================================================

#[tokio::test]
async fn test_state_frames_replace_the_snapshot_wholesale() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut snapshots = client.watch_snapshot();
    let mut server = connect_in_memory(&mut client);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    server
        .write_all(
            b"{\"type\":\"state\",\"players\":[{\"id\":1,\"x\":10,\"y\":20}]}\n",
        )
        .await
        .unwrap();
    timeout(TICK, snapshots.changed()).await.unwrap().unwrap();
    assert_eq!(client.snapshot().players.len(), 1);

    server
        .write_all(
            b"{\"type\":\"state\",\"players\":[{\"id\":1,\"x\":15,\"y\":20},{\"id\":2,\"x\":0,\"y\":0}]}\n",
        )
        .await
        .unwrap();
    timeout(TICK, snapshots.changed()).await.unwrap().unwrap();

    // Full replace, not merge: exactly the two players from the second
    // frame, in server order.
    let snapshot = client.snapshot();
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.players[0].id, 1);
    assert_eq!(snapshot.players[0].x, 15.0);
    assert_eq!(snapshot.players[1].id, 2);

    client.shutdown().await;
}

#[tokio::test]
async fn test_bad_and_unknown_frames_are_skipped() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut snapshots = client.watch_snapshot();
    let mut server = connect_in_memory(&mut client);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    // Garbage, then a message kind we don't know, then a real state frame.
    // The first two must not kill the loop or the connection.
    server.write_all(b"\x00\x01 not json\n").await.unwrap();
    server
        .write_all(b"{\"type\":\"chat\",\"text\":\"gl hf\"}\n")
        .await
        .unwrap();
    server
        .write_all(
            b"{\"type\":\"state\",\"players\":[{\"id\":9,\"x\":1,\"y\":2}]}\n",
        )
        .await
        .unwrap();

    timeout(TICK, snapshots.changed()).await.unwrap().unwrap();
    assert_eq!(client.snapshot().players[0].id, 9);
    assert_eq!(client.status(), ConnectionStatus::Connected);

    client.shutdown().await;
}

// =========================================================================
// Input sending
// =========================================================================

#[tokio::test]
async fn test_send_input_writes_nothing_before_connected() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut server = connect_in_memory(&mut client);

    // Still Connecting: these must not reach the wire.
    client.send_input(1, 1).await;
    client.send_input(2, 2).await;

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    client.send_input(-5, 0).await;

    // The very first bytes on the wire are the post-welcome frame; the
    // gated calls left nothing in front of it.
    let mut buf = vec![0u8; 64];
    let n = timeout(TICK, server.read(&mut buf))
        .await
        .expect("input frame should arrive")
        .unwrap();
    assert_eq!(&buf[..n], b"{\"dx\":-5,\"dy\":0}\n");

    client.shutdown().await;
}

#[tokio::test]
async fn test_send_input_while_searching_is_a_silent_noop() {
    // No connection at all: must return immediately without error.
    let mut client = SessionClient::new();
    assert_eq!(client.status(), ConnectionStatus::Searching);
    client.send_input(5, 0).await;
    assert_eq!(client.status(), ConnectionStatus::Searching);
}

// =========================================================================
// Disconnect paths
// =========================================================================

#[tokio::test]
async fn test_peer_close_transitions_to_disconnected() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut server = connect_in_memory(&mut client);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    // Dropping the server end is EOF: the next read returns 0 bytes and
    // the receive task exits on its own.
    drop(server);
    wait_for_status(&mut status, ConnectionStatus::Disconnected).await;

    // Input after disconnect is dropped silently.
    client.send_input(1, 0).await;

    client.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_is_idempotent_and_terminal() {
    let mut client = SessionClient::new();
    let mut status = client.watch_status();
    let mut server = connect_in_memory(&mut client);

    server
        .write_all(b"{\"type\":\"welcome\",\"id\":1}\n")
        .await
        .unwrap();
    wait_for_status(&mut status, ConnectionStatus::Connected).await;

    client.shutdown().await;
    assert_eq!(client.status(), ConnectionStatus::Disconnected);

    // Again, from an already-stopped client.
    client.shutdown().await;
    assert_eq!(client.status(), ConnectionStatus::Disconnected);
}

// =========================================================================
// TCP connect
// =========================================================================

#[tokio::test]
async fn test_connect_dials_and_waits_in_connecting() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket
            .write_all(b"{\"type\":\"welcome\",\"id\":7}\n")
            .await
            .unwrap();
        // Hold the socket open so the client doesn't see EOF.
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let mut client =
        SessionClient::with_config(ClientConfig { session_port: port });
    let mut status = client.watch_status();
    client.connect("127.0.0.1").await.expect("dial should work");

    wait_for_status(&mut status, ConnectionStatus::Connected).await;
    assert_eq!(client.local_id(), Some(7));

    // A second connect on a live client is refused.
    assert!(client.connect("127.0.0.1").await.is_err());

    client.shutdown().await;
    server.abort();
}

#[tokio::test]
async fn test_connect_failure_surfaces_and_keeps_status() {
    // Bind a port, then free it: nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut client =
        SessionClient::with_config(ClientConfig { session_port: port });
    let result = client.connect("127.0.0.1").await;

    assert!(result.is_err(), "dialing a dead port should fail");
    assert_eq!(
        client.status(),
        ConnectionStatus::Searching,
        "status is restored when the dial fails"
    );
}
