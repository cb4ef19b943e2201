//! Per-connection handler: greet, read actions, write events.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register an outbound queue with the gateway → `connected` is queued
//!   2. Spawn a writer task that drains the queue onto the socket
//!   3. Loop: receive frames → decode → dispatch through the gateway
//!   4. On close, the guard runs the disconnect (same as `leaveGame`)

use std::sync::Arc;

use tilehall_protocol::{ClientAction, Codec, ServerEvent};
use tilehall_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::TilehallError;
use crate::gateway::EventReceiver;
use crate::server::ServerState;

/// Drop guard that removes a connection from its room when the handler
/// exits, including on panic.
///
/// `Drop` is synchronous, so the async lock is taken in a spawned task.
struct DisconnectGuard<C: Codec> {
    connection: ConnectionId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for DisconnectGuard<C> {
    fn drop(&mut self) {
        let connection = self.connection;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.gateway.lock().await.disconnect(connection);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), TilehallError> {
    let connection = conn.id();
    tracing::info!(%connection, peer = %conn.peer_addr(), "connection opened");

    let conn = Arc::new(conn);
    let (events, queue) = mpsc::unbounded_channel();

    state.gateway.lock().await.connect(connection, events);
    let guard = DisconnectGuard {
        connection,
        state: Arc::clone(&state),
    };

    let writer = tokio::spawn(write_events(Arc::clone(&conn), Arc::clone(&state), queue));

    loop {
        let frame = match conn.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!(%connection, "connection closed cleanly");
                break;
            }
            Err(e) if !e.is_fatal() => {
                tracing::debug!(%connection, error = %e, "unreadable frame");
                state
                    .gateway
                    .lock()
                    .await
                    .send_error(connection, format!("invalid message: {e}"));
                continue;
            }
            Err(e) => {
                tracing::debug!(%connection, error = %e, "recv error");
                break;
            }
        };

        match state.codec.decode::<ClientAction>(&frame) {
            Ok(action) => {
                tracing::debug!(%connection, ?action, "action received");
                state.gateway.lock().await.handle(connection, action);
            }
            Err(e) => {
                tracing::debug!(%connection, error = %e, "failed to decode action");
                state
                    .gateway
                    .lock()
                    .await
                    .send_error(connection, format!("invalid message: {e}"));
            }
        }
    }

    // The writer stops once the gateway drops this connection's sender.
    drop(guard);
    if let Err(e) = writer.await {
        tracing::debug!(%connection, error = %e, "writer task failed");
    }
    Ok(())
}

/// Drains `queue` onto the socket until the gateway forgets the
/// connection or a send fails.
async fn write_events<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    mut queue: EventReceiver,
) {
    let connection = conn.id();
    while let Some(event) = queue.recv().await {
        if let Err(e) = send_event(&conn, &state.codec, &event).await {
            tracing::debug!(%connection, error = %e, "failed to deliver event");
            break;
        }
    }
    if let Err(e) = conn.close().await {
        tracing::debug!(%connection, error = %e, "close failed");
    }
}

async fn send_event(
    conn: &WebSocketConnection,
    codec: &impl Codec,
    event: &ServerEvent,
) -> Result<(), TilehallError> {
    let frame = codec.encode(event)?;
    conn.send(&frame).await?;
    Ok(())
}
