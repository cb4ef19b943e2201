//! # Tilehall
//!
//! Real-time room server for a Rummy tile game.
//!
//! Players open a WebSocket, create or join a room by its five-character
//! code, and the host deals a shuffled 106-tile set. Every change to a
//! room is pushed to all of its members as a full snapshot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tilehall::prelude::*;
//!
//! # async fn run() -> Result<(), TilehallError> {
//! let config = ServerConfig::from_env()?;
//! let server = TilehallServer::builder().config(&config).build().await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod gateway;
mod handler;
mod server;

pub use config::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use error::TilehallError;
pub use gateway::{EventReceiver, EventSender, Gateway};
pub use server::{TilehallServer, TilehallServerBuilder};

pub use tilehall_protocol as protocol;
pub use tilehall_room as room;
pub use tilehall_transport as transport;

/// Everything needed to run a server or drive a [`Gateway`] directly.
pub mod prelude {
    pub use crate::{
        ConfigError, Gateway, ServerConfig, TilehallError, TilehallServer, TilehallServerBuilder,
    };
    pub use tilehall_protocol::{ClientAction, Codec, JoinRequest, JsonCodec, ServerEvent};
    pub use tilehall_room::{
        Color, LeaveOutcome, Player, Room, RoomCode, RoomConfig, RoomError, RoomRegistry,
        RoomStatus, Tile, TileId,
    };
    pub use tilehall_transport::ConnectionId;
}
