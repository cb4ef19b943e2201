//! Messages exchanged between browser clients and the server.
//!
//! Every frame is an adjacently tagged object:
//!
//! ```text
//! { "event": "joinGame", "data": { "roomCode": "K7MPQ", "playerName": "Ana" } }
//! ```
//!
//! Event names are camelCase to match what the web client emits and
//! listens for.

use serde::{Deserialize, Serialize};
use tilehall_room::{Room, RoomCode};
use tilehall_transport::ConnectionId;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Payload of a `joinGame` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub room_code: RoomCode,
    #[serde(default)]
    pub player_name: Option<String>,
}

/// An action sent by a player's connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientAction {
    /// Open a new room and take the host seat. Carries the player name.
    CreateGame(Option<String>),

    /// Take a seat in an existing room.
    JoinGame(JoinRequest),

    /// Deal the tiles. Only honored for the host.
    StartGame(RoomCode),

    /// Give up this connection's seat.
    LeaveGame,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// An event pushed to one or more connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Sent once when the socket opens, so the client can recognize its
    /// own seat (and whether it is host) in later snapshots.
    Connected { id: ConnectionId },

    /// Full room snapshot after a create, join, or leave.
    GameUpdate(Room),

    /// Full room snapshot right after the deal.
    GameStarted(Room),

    /// Human-readable failure, sent only to the connection that caused it.
    Error(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tilehall_room::Player;

    use super::*;

    fn decode(value: serde_json::Value) -> ClientAction {
        serde_json::from_value(value).unwrap()
    }

    // =====================================================================
    // ClientAction
    // =====================================================================

    #[test]
    fn test_create_game_with_and_without_name() {
        assert_eq!(
            decode(json!({ "event": "createGame", "data": "Ana" })),
            ClientAction::CreateGame(Some("Ana".into()))
        );
        assert_eq!(
            decode(json!({ "event": "createGame", "data": null })),
            ClientAction::CreateGame(None)
        );
    }

    #[test]
    fn test_join_game_payload() {
        assert_eq!(
            decode(json!({
                "event": "joinGame",
                "data": { "roomCode": "K7MPQ", "playerName": "Beto" }
            })),
            ClientAction::JoinGame(JoinRequest {
                room_code: RoomCode::from("K7MPQ"),
                player_name: Some("Beto".into()),
            })
        );
    }

    #[test]
    fn test_join_game_name_is_optional() {
        let action = decode(json!({ "event": "joinGame", "data": { "roomCode": "K7MPQ" } }));
        match action {
            ClientAction::JoinGame(req) => assert_eq!(req.player_name, None),
            other => panic!("expected JoinGame, got {other:?}"),
        }
    }

    #[test]
    fn test_start_game_carries_room_code() {
        assert_eq!(
            decode(json!({ "event": "startGame", "data": "K7MPQ" })),
            ClientAction::StartGame(RoomCode::from("K7MPQ"))
        );
    }

    #[test]
    fn test_leave_game_needs_no_data() {
        assert_eq!(decode(json!({ "event": "leaveGame" })), ClientAction::LeaveGame);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result: Result<ClientAction, _> =
            serde_json::from_value(json!({ "event": "drawTile", "data": null }));
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    #[test]
    fn test_game_update_wraps_room_snapshot() {
        let room = Room::new(
            RoomCode::from("K7MPQ"),
            Player::new(ConnectionId::new(3), "Ana".into()),
        );
        let json = serde_json::to_value(ServerEvent::GameUpdate(room)).unwrap();

        assert_eq!(json["event"], "gameUpdate");
        assert_eq!(json["data"]["gameId"], "K7MPQ");
        assert_eq!(json["data"]["players"][0]["id"], 3);
    }

    #[test]
    fn test_error_is_a_plain_message() {
        let json = serde_json::to_value(ServerEvent::Error("room K7MPQ is full".into())).unwrap();
        assert_eq!(json, json!({ "event": "error", "data": "room K7MPQ is full" }));
    }

    #[test]
    fn test_connected_carries_connection_id() {
        let json = serde_json::to_value(ServerEvent::Connected {
            id: ConnectionId::new(12),
        })
        .unwrap();
        assert_eq!(json, json!({ "event": "connected", "data": { "id": 12 } }));
    }
}
