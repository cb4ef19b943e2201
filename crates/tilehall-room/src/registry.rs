//! Room registry: creates rooms, seats players, deals, and tears rooms down.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilehall_transport::ConnectionId;

use crate::{
    CodeGenerator, InMemoryRoomStore, Player, RandomSource, Room, RoomCode,
    RoomConfig, RoomError, RoomStatus, RoomStore, build_tile_set, shuffle,
};

/// What happened when a connection left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The player was removed; the room lives on with the others.
    Left(Room),
    /// The player was the last one; the room no longer exists.
    RoomRemoved(RoomCode),
}

/// Owns every live room and is the only thing that mutates them.
///
/// The registry is not internally synchronized: each operation runs to
/// completion on `&mut self`, and callers serving many connections put it
/// behind a single lock. Operations return clones of the affected room so
/// the caller can broadcast them without holding a borrow.
pub struct RoomRegistry<S = InMemoryRoomStore, R = StdRng> {
    store: S,
    rng: R,
    codes: CodeGenerator,
    config: RoomConfig,
}

impl RoomRegistry {
    /// Creates an empty in-memory registry seeded from the OS.
    pub fn new(config: RoomConfig) -> Self {
        Self::with_parts(InMemoryRoomStore::new(), StdRng::from_os_rng(), config)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

impl<S: RoomStore, R: RandomSource> RoomRegistry<S, R> {
    /// Creates a registry over the given store and random source.
    ///
    /// `config` is passed through [`RoomConfig::clamped`] first.
    pub fn with_parts(store: S, rng: R, config: RoomConfig) -> Self {
        let clamped = config.clamped();
        if clamped != config {
            tracing::warn!(?config, ?clamped, "room config adjusted to fit one tile set");
        }
        Self {
            store,
            rng,
            codes: CodeGenerator,
            config: clamped,
        }
    }

    /// Opens a new room with `connection` as its host.
    ///
    /// Always succeeds. An absent or empty `host_name` becomes the default
    /// name for seat 1.
    pub fn create_room(&mut self, connection: ConnectionId, host_name: Option<&str>) -> Room {
        let store = &self.store;
        let code = self.codes.next(&mut self.rng, |c| store.contains(c));
        let name = self.player_name(host_name, 1);

        let room = Room::new(code.clone(), Player::new(connection, name));
        self.store.insert(room.clone());

        tracing::info!(%code, %connection, "room created");
        room
    }

    /// Seats `connection` in the room with `code`.
    ///
    /// Joining does not depend on the room's status.
    pub fn join_room(
        &mut self,
        code: &RoomCode,
        connection: ConnectionId,
        player_name: Option<&str>,
    ) -> Result<Room, RoomError> {
        let max_players = self.config.max_players;
        let seat = {
            let room = self
                .store
                .get(code)
                .ok_or_else(|| RoomError::NotFound(code.clone()))?;
            if room.player_count() >= max_players {
                return Err(RoomError::RoomFull(code.clone()));
            }
            room.player_count() + 1
        };
        let name = self.player_name(player_name, seat);

        let room = self
            .store
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        room.players.push(Player::new(connection, name));

        tracing::info!(
            %code,
            %connection,
            players = room.player_count(),
            "player joined"
        );
        Ok(room.clone())
    }

    /// Deals a fresh shuffled set if `requester` is the host.
    ///
    /// Fails without touching anything when the room is missing, the
    /// requester isn't `players[0]`, or the tiles were already dealt.
    pub fn start_game(
        &mut self,
        code: &RoomCode,
        requester: ConnectionId,
    ) -> Result<Room, RoomError> {
        let room = self
            .store
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        if !room.is_host(requester) {
            return Err(RoomError::NotHost(requester, code.clone()));
        }
        if !room.status.can_transition_to(RoomStatus::InProgress) {
            return Err(RoomError::AlreadyStarted(code.clone()));
        }

        let mut deck = build_tile_set();
        shuffle(&mut deck, &mut self.rng);
        room.deal(deck, self.config.hand_size);

        tracing::info!(
            %code,
            players = room.player_count(),
            draw_pile = room.draw_pile.len(),
            "game started"
        );
        Ok(room.clone())
    }

    /// Removes `connection` from whichever room seats it.
    ///
    /// Returns `None` if it isn't seated anywhere. The remaining players
    /// keep their hands and scores; the host becomes whoever now sits
    /// first. `current_player_index` is left as it was.
    pub fn leave_room(&mut self, connection: ConnectionId) -> Option<LeaveOutcome> {
        let code = self.store.find_connection(connection)?;
        let room = self.store.get_mut(&code)?;
        let seat = room.seat_of(connection)?;
        room.players.remove(seat);

        tracing::info!(
            %code,
            %connection,
            players = room.player_count(),
            "player left"
        );

        if room.players.is_empty() {
            self.store.remove(&code);
            tracing::info!(%code, "room removed, no players left");
            return Some(LeaveOutcome::RoomRemoved(code));
        }
        Some(LeaveOutcome::Left(room.clone()))
    }

    /// Returns a live room by code.
    pub fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.store.get(code)
    }

    /// Returns the room where `connection` holds a seat.
    pub fn room_of(&self, connection: ConnectionId) -> Option<&Room> {
        let code = self.store.find_connection(connection)?;
        self.store.get(&code)
    }

    /// Fails with [`RoomError::AlreadySeated`] if `connection` already
    /// holds a seat somewhere.
    pub fn check_unseated(&self, connection: ConnectionId) -> Result<(), RoomError> {
        match self.store.find_connection(connection) {
            Some(code) => Err(RoomError::AlreadySeated(connection, code)),
            None => Ok(()),
        }
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.store.len()
    }

    /// Codes of all live rooms.
    pub fn codes(&self) -> Vec<RoomCode> {
        self.store.rooms().map(|r| r.code.clone()).collect()
    }

    fn player_name(&self, requested: Option<&str>, seat: usize) -> String {
        match requested {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.config.default_name(seat),
        }
    }
}
