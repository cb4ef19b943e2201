//! Room lifecycle and dealing for tilehall.
//!
//! Everything here is synchronous and transport-agnostic: operations take
//! an opaque [`ConnectionId`](tilehall_transport::ConnectionId) and return
//! room snapshots or typed errors. Delivering them is the caller's job.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: create / join / start / leave
//! - [`Room`], [`Player`]: the snapshot clients see
//! - [`RoomStore`]: where the registry keeps its rooms
//! - [`RandomSource`]: injectable randomness for shuffles and codes
//! - [`build_tile_set`], [`shuffle`], [`CodeGenerator`]

mod code;
mod config;
mod error;
mod registry;
mod room;
mod shuffle;
mod store;
mod tile;

pub use code::{CODE_ALPHABET, CODE_LENGTH, CodeGenerator, RoomCode};
pub use config::{RoomConfig, RoomStatus};
pub use error::RoomError;
pub use registry::{LeaveOutcome, RoomRegistry};
pub use room::{Meld, Player, Room};
pub use shuffle::{RandomSource, shuffle};
pub use store::{InMemoryRoomStore, RoomStore};
pub use tile::{Color, JOKER_VALUE, MAX_VALUE, TILE_SET_SIZE, Tile, TileId, build_tile_set};
