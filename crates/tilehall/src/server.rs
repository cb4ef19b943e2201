//! `TilehallServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → gateway → registry.

use std::net::SocketAddr;
use std::sync::Arc;

use tilehall_protocol::{Codec, JsonCodec};
use tilehall_room::{RoomConfig, RoomRegistry};
use tilehall_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{Gateway, ServerConfig, TilehallError};

/// Shared server state passed to each connection handler task.
///
/// One lock around the gateway serializes every room operation and the
/// fan-out that follows it.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) gateway: Mutex<Gateway>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a tilehall server.
///
/// # Example
///
/// ```rust,no_run
/// use tilehall::prelude::*;
///
/// # async fn run() -> Result<(), TilehallError> {
/// let server = TilehallServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct TilehallServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
}

impl TilehallServerBuilder {
    /// Creates a new builder listening on [`ServerConfig::default`].
    pub fn new() -> Self {
        Self {
            bind_addr: ServerConfig::default().bind_addr(),
            room_config: RoomConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Takes the bind address from a [`ServerConfig`].
    pub fn config(self, config: &ServerConfig) -> Self {
        self.bind(&config.bind_addr())
    }

    /// Sets capacity, hand size and default names for every room.
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Binds the socket. Uses `JsonCodec` over `WebSocketTransport`.
    pub async fn build(self) -> Result<TilehallServer<JsonCodec>, TilehallError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            gateway: Mutex::new(Gateway::new(RoomRegistry::new(self.room_config))),
            codec: JsonCodec,
        });

        Ok(TilehallServer { transport, state })
    }
}

impl Default for TilehallServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound tilehall server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TilehallServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl TilehallServer<JsonCodec> {
    pub fn builder() -> TilehallServerBuilder {
        TilehallServerBuilder::new()
    }
}

impl<C: Codec> TilehallServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, TilehallError> {
        Ok(self.transport.local_addr()?)
    }

    /// Runs the accept loop until the process is terminated.
    ///
    /// A failed accept or WebSocket upgrade is logged and skipped.
    pub async fn run(mut self) -> Result<(), TilehallError> {
        tracing::info!(addr = %self.local_addr()?, "tilehall server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
