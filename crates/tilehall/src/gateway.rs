//! Routes player actions to the room registry and fans snapshots out.
//!
//! The gateway never touches a socket. Every connection registers an
//! [`EventSender`]; the gateway pushes [`ServerEvent`]s into those
//! channels and the per-connection writer task does the I/O. Because the
//! push happens inside the same `&mut self` call that mutated the room,
//! every member of a room sees its snapshots in the order the actions were
//! accepted.

use std::collections::HashMap;

use rand::rngs::StdRng;
use tilehall_protocol::{ClientAction, JoinRequest, ServerEvent};
use tilehall_room::{
    InMemoryRoomStore, LeaveOutcome, RandomSource, Room, RoomCode, RoomRegistry, RoomStore,
};
use tilehall_transport::ConnectionId;
use tokio::sync::mpsc;

/// Outbound queue for one connection.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Receiving half of an [`EventSender`].
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// Dispatches [`ClientAction`]s and delivers the resulting events.
pub struct Gateway<S = InMemoryRoomStore, R = StdRng> {
    registry: RoomRegistry<S, R>,
    subscribers: HashMap<ConnectionId, EventSender>,
}

impl<S: RoomStore, R: RandomSource> Gateway<S, R> {
    pub fn new(registry: RoomRegistry<S, R>) -> Self {
        Self {
            registry,
            subscribers: HashMap::new(),
        }
    }

    /// Registers a connection's outbound queue and greets it with its id.
    pub fn connect(&mut self, connection: ConnectionId, events: EventSender) {
        self.subscribers.insert(connection, events);
        self.send_to(connection, ServerEvent::Connected { id: connection });
        tracing::debug!(%connection, subscribers = self.subscribers.len(), "subscribed");
    }

    /// Handles one inbound action from `connection`.
    pub fn handle(&mut self, connection: ConnectionId, action: ClientAction) {
        match action {
            ClientAction::CreateGame(name) => self.create_game(connection, name.as_deref()),
            ClientAction::JoinGame(request) => self.join_game(connection, request),
            ClientAction::StartGame(code) => self.start_game(connection, &code),
            ClientAction::LeaveGame => self.leave(connection),
        }
    }

    /// Treats a closed socket like `leaveGame`, then forgets the connection.
    pub fn disconnect(&mut self, connection: ConnectionId) {
        self.leave(connection);
        self.subscribers.remove(&connection);
        tracing::debug!(%connection, subscribers = self.subscribers.len(), "unsubscribed");
    }

    /// Sends an `error` event to `connection` only.
    pub fn send_error(&self, connection: ConnectionId, message: impl Into<String>) {
        self.send_to(connection, ServerEvent::Error(message.into()));
    }

    pub fn registry(&self) -> &RoomRegistry<S, R> {
        &self.registry
    }

    pub fn is_connected(&self, connection: ConnectionId) -> bool {
        self.subscribers.contains_key(&connection)
    }

    fn create_game(&mut self, connection: ConnectionId, name: Option<&str>) {
        if let Err(e) = self.registry.check_unseated(connection) {
            self.send_error(connection, e.to_string());
            return;
        }
        let room = self.registry.create_room(connection, name);
        self.broadcast(&room, ServerEvent::GameUpdate(room.clone()));
    }

    fn join_game(&mut self, connection: ConnectionId, request: JoinRequest) {
        let joined = self.registry.check_unseated(connection).and_then(|()| {
            self.registry
                .join_room(&request.room_code, connection, request.player_name.as_deref())
        });
        match joined {
            Ok(room) => self.broadcast(&room, ServerEvent::GameUpdate(room.clone())),
            Err(e) => {
                tracing::debug!(%connection, error = %e, "join rejected");
                self.send_error(connection, e.to_string());
            }
        }
    }

    fn start_game(&mut self, connection: ConnectionId, code: &RoomCode) {
        match self.registry.start_game(code, connection) {
            Ok(room) => self.broadcast(&room, ServerEvent::GameStarted(room.clone())),
            // Rejected starts produce no event.
            Err(e) => tracing::debug!(%connection, error = %e, "start ignored"),
        }
    }

    fn leave(&mut self, connection: ConnectionId) {
        match self.registry.leave_room(connection) {
            Some(LeaveOutcome::Left(room)) => {
                self.broadcast(&room, ServerEvent::GameUpdate(room.clone()));
            }
            Some(LeaveOutcome::RoomRemoved(_)) | None => {}
        }
    }

    fn broadcast(&self, room: &Room, event: ServerEvent) {
        for connection in room.connections() {
            self.send_to(connection, event.clone());
        }
    }

    fn send_to(&self, connection: ConnectionId, event: ServerEvent) {
        let Some(events) = self.subscribers.get(&connection) else {
            return;
        };
        if events.send(event).is_err() {
            tracing::debug!(%connection, "event dropped, writer gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use tilehall_room::{RoomConfig, RoomStatus, TILE_SET_SIZE};

    use super::*;

    type TestGateway = Gateway<InMemoryRoomStore, StdRng>;

    fn gateway() -> TestGateway {
        Gateway::new(RoomRegistry::with_parts(
            InMemoryRoomStore::new(),
            StdRng::seed_from_u64(11),
            RoomConfig::default(),
        ))
    }

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    /// Connects `id` and returns its queue with the greeting consumed.
    fn subscribe(gw: &mut TestGateway, id: u64) -> EventReceiver {
        let (tx, mut rx) = mpsc::unbounded_channel();
        gw.connect(conn(id), tx);
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::Connected { id: conn(id) });
        rx
    }

    fn drain(rx: &mut EventReceiver) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn update(rx: &mut EventReceiver) -> Room {
        match rx.try_recv().unwrap() {
            ServerEvent::GameUpdate(room) => room,
            other => panic!("expected gameUpdate, got {other:?}"),
        }
    }

    fn join(code: &RoomCode, name: &str) -> ClientAction {
        ClientAction::JoinGame(JoinRequest {
            room_code: code.clone(),
            player_name: Some(name.into()),
        })
    }

    fn open_room(gw: &mut TestGateway, host: &mut EventReceiver) -> RoomCode {
        gw.handle(conn(1), ClientAction::CreateGame(Some("Ana".into())));
        update(host).code
    }

    // =====================================================================
    // create / join
    // =====================================================================

    #[test]
    fn test_create_game_updates_only_the_creator() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);

        let code = open_room(&mut gw, &mut a);

        assert_eq!(gw.registry().get(&code).unwrap().players[0].name, "Ana");
        assert!(drain(&mut b).is_empty());
    }

    #[test]
    fn test_join_game_broadcasts_to_every_member() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);
        let code = open_room(&mut gw, &mut a);

        gw.handle(conn(2), join(&code, "Beto"));

        let seen_by_a = update(&mut a);
        let seen_by_b = update(&mut b);
        assert_eq!(seen_by_a, seen_by_b);
        assert_eq!(seen_by_a.players.len(), 2);
        assert_eq!(seen_by_a.players[1].name, "Beto");
    }

    #[test]
    fn test_join_unknown_room_errors_to_requester_only() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);
        open_room(&mut gw, &mut a);

        gw.handle(conn(2), join(&RoomCode::from("ZZZZZ"), "Beto"));

        assert!(matches!(b.try_recv().unwrap(), ServerEvent::Error(msg) if msg.contains("ZZZZZ")));
        assert!(drain(&mut a).is_empty());
    }

    #[test]
    fn test_join_full_room_errors_and_leaves_room_unchanged() {
        let mut gw = gateway();
        let mut host = subscribe(&mut gw, 1);
        let code = open_room(&mut gw, &mut host);
        for id in 2..=4 {
            subscribe(&mut gw, id);
            gw.handle(conn(id), join(&code, "P"));
        }
        let before = gw.registry().get(&code).unwrap().clone();
        drain(&mut host);

        let mut late = subscribe(&mut gw, 5);
        gw.handle(conn(5), join(&code, "Late"));

        assert!(matches!(late.try_recv().unwrap(), ServerEvent::Error(_)));
        assert_eq!(gw.registry().get(&code).unwrap(), &before);
        assert!(drain(&mut host).is_empty());
    }

    #[test]
    fn test_seated_connection_cannot_create_or_join_again() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let code = open_room(&mut gw, &mut a);

        gw.handle(conn(1), ClientAction::CreateGame(None));
        assert!(matches!(a.try_recv().unwrap(), ServerEvent::Error(_)));

        gw.handle(conn(1), join(&code, "Again"));
        assert!(matches!(a.try_recv().unwrap(), ServerEvent::Error(_)));

        assert_eq!(gw.registry().room_count(), 1);
        assert_eq!(gw.registry().get(&code).unwrap().players.len(), 1);
    }

    // =====================================================================
    // start
    // =====================================================================

    #[test]
    fn test_host_start_sends_game_started_to_all() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);
        let code = open_room(&mut gw, &mut a);
        gw.handle(conn(2), join(&code, "Beto"));
        drain(&mut a);
        drain(&mut b);

        gw.handle(conn(1), ClientAction::StartGame(code.clone()));

        for rx in [&mut a, &mut b] {
            match rx.try_recv().unwrap() {
                ServerEvent::GameStarted(room) => {
                    assert_eq!(room.status, RoomStatus::InProgress);
                    assert_eq!(room.tiles().count(), TILE_SET_SIZE);
                }
                other => panic!("expected gameStarted, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejected_start_is_silent() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);
        let code = open_room(&mut gw, &mut a);
        gw.handle(conn(2), join(&code, "Beto"));
        drain(&mut a);
        drain(&mut b);

        gw.handle(conn(2), ClientAction::StartGame(code.clone()));
        gw.handle(conn(1), ClientAction::StartGame(RoomCode::from("ZZZZZ")));

        assert!(drain(&mut a).is_empty());
        assert!(drain(&mut b).is_empty());
        assert_eq!(gw.registry().get(&code).unwrap().status, RoomStatus::Waiting);
    }

    // =====================================================================
    // leave / disconnect
    // =====================================================================

    #[test]
    fn test_leave_updates_remaining_players() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let mut b = subscribe(&mut gw, 2);
        let code = open_room(&mut gw, &mut a);
        gw.handle(conn(2), join(&code, "Beto"));
        drain(&mut a);
        drain(&mut b);

        gw.handle(conn(1), ClientAction::LeaveGame);

        let room = update(&mut b);
        assert_eq!(room.players.len(), 1);
        assert!(room.is_host(conn(2)));
        assert!(drain(&mut a).is_empty());
        assert!(gw.is_connected(conn(1)));
    }

    #[test]
    fn test_disconnect_of_last_player_removes_room() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        open_room(&mut gw, &mut a);

        gw.disconnect(conn(1));

        assert_eq!(gw.registry().room_count(), 0);
        assert!(!gw.is_connected(conn(1)));
    }

    #[test]
    fn test_leave_when_not_seated_is_a_no_op() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);

        gw.handle(conn(1), ClientAction::LeaveGame);

        assert!(drain(&mut a).is_empty());
    }

    #[test]
    fn test_closed_queue_does_not_break_broadcast() {
        let mut gw = gateway();
        let mut a = subscribe(&mut gw, 1);
        let code = open_room(&mut gw, &mut a);
        let b = subscribe(&mut gw, 2);
        gw.handle(conn(2), join(&code, "Beto"));
        drop(b);

        gw.handle(conn(1), ClientAction::StartGame(code));

        assert!(matches!(a.try_recv().unwrap(), ServerEvent::GameUpdate(_)));
        assert!(matches!(a.try_recv().unwrap(), ServerEvent::GameStarted(_)));
    }
}
