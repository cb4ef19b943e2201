//! Error types for the room layer.

use tilehall_transport::ConnectionId;

use crate::RoomCode;

/// Errors that can occur during room operations.
///
/// Every operation that returns one of these leaves the registry exactly
/// as it found it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No live room has this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room already seats the maximum number of players.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// Only the host (the first seated player) may start the game.
    #[error("{0} is not the host of room {1}")]
    NotHost(ConnectionId, RoomCode),

    /// The connection already holds a seat in a room.
    #[error("{0} is already seated in room {1}")]
    AlreadySeated(ConnectionId, RoomCode),

    /// The tiles have already been dealt in this room.
    #[error("game in room {0} has already started")]
    AlreadyStarted(RoomCode),
}
