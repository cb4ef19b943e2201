//! Storage for live rooms.

use std::collections::HashMap;

use tilehall_transport::ConnectionId;

use crate::{Room, RoomCode};

/// A code → room map the registry keeps its rooms in.
///
/// The registry owns its store, so every test can build an isolated one.
/// Only process memory is provided; nothing is persisted across restarts.
pub trait RoomStore: Send + 'static {
    fn get(&self, code: &RoomCode) -> Option<&Room>;

    fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room>;

    /// Inserts `room` under its own code, replacing any room already there.
    fn insert(&mut self, room: Room);

    fn remove(&mut self, code: &RoomCode) -> Option<Room>;

    /// Iterates over all live rooms, in no particular order.
    fn rooms(&self) -> Box<dyn Iterator<Item = &Room> + '_>;

    fn contains(&self, code: &RoomCode) -> bool {
        self.get(code).is_some()
    }

    /// Code of the room where `connection` holds a seat.
    fn find_connection(&self, connection: ConnectionId) -> Option<RoomCode> {
        self.rooms()
            .find(|room| room.seat_of(connection).is_some())
            .map(|room| room.code.clone())
    }

    fn len(&self) -> usize {
        self.rooms().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The default [`RoomStore`]: a `HashMap` in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    rooms: HashMap<RoomCode, Room>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomStore for InMemoryRoomStore {
    fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    fn insert(&mut self, room: Room) {
        self.rooms.insert(room.code.clone(), room);
    }

    fn remove(&mut self, code: &RoomCode) -> Option<Room> {
        self.rooms.remove(code)
    }

    fn rooms(&self) -> Box<dyn Iterator<Item = &Room> + '_> {
        Box::new(self.rooms.values())
    }

    fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    fn len(&self) -> usize {
        self.rooms.len()
    }
}
