//! Room and player state.
//!
//! These are plain data: the [`RoomRegistry`](crate::RoomRegistry) is the
//! only thing that mutates them, and what it hands out are clones. The
//! serialized form is the snapshot every room member receives.

use serde::{Deserialize, Serialize};
use tilehall_transport::ConnectionId;

use crate::{RoomCode, RoomStatus, Tile};

/// A player seated in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The connection this seat belongs to. Only ever compared.
    #[serde(rename = "id")]
    pub connection: ConnectionId,
    pub name: String,
    pub score: u32,
    pub hand: Vec<Tile>,
}

impl Player {
    pub fn new(connection: ConnectionId, name: String) -> Self {
        Self {
            connection,
            name,
            score: 0,
            hand: Vec::new(),
        }
    }
}

/// A group of tiles laid on the shared board. Stored, never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meld(pub Vec<Tile>);

/// One game session.
///
/// Invariants held by the registry:
/// - between 1 and `max_players` players while the room is live;
/// - `players[0]` is the host, whoever that currently is;
/// - from the deal until the first player leaves, hands + piles + board
///   hold each tile of one set exactly once. A leaving player's hand
///   leaves with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "gameId")]
    pub code: RoomCode,
    pub status: RoomStatus,
    /// Join order.
    pub players: Vec<Player>,
    /// Drawing pops from the end.
    pub draw_pile: Vec<Tile>,
    /// The last tile is the top of the pile.
    pub discard_pile: Vec<Tile>,
    pub main_board: Vec<Meld>,
    /// Set to 0 on creation and never advanced; nothing past the
    /// opening deal is modelled.
    pub current_player_index: usize,
}

impl Room {
    /// Creates a waiting room with `host` in the first seat.
    pub fn new(code: RoomCode, host: Player) -> Self {
        Self {
            code,
            status: RoomStatus::Waiting,
            players: vec![host],
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            main_board: Vec::new(),
            current_player_index: 0,
        }
    }

    /// The player allowed to start the game: whoever sits first.
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn is_host(&self, connection: ConnectionId) -> bool {
        self.host().is_some_and(|p| p.connection == connection)
    }

    /// Seat index of the player on `connection`, if seated here.
    pub fn seat_of(&self, connection: ConnectionId) -> Option<usize> {
        self.players.iter().position(|p| p.connection == connection)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Connections that should receive this room's updates.
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.players.iter().map(|p| p.connection)
    }

    /// Every tile currently in the room, wherever it sits.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.players
            .iter()
            .flat_map(|p| p.hand.iter())
            .chain(self.draw_pile.iter())
            .chain(self.discard_pile.iter())
            .chain(self.main_board.iter().flat_map(|m| m.0.iter()))
    }

    /// Deals a shuffled `deck`: `hand_size` tiles off the front to each
    /// player in seat order, one tile off the end face-up as the opening
    /// discard, the remainder as the draw pile. Advances the status one
    /// step.
    ///
    /// Hands come up short if the deck runs out; the registry's clamped
    /// [`RoomConfig`](crate::RoomConfig) keeps that from happening.
    ///
    /// Everything is computed before any field is touched, so the room
    /// goes straight from its old state to the fully dealt one.
    pub(crate) fn deal(&mut self, mut deck: Vec<Tile>, hand_size: usize) {
        let hands: Vec<Vec<Tile>> = self
            .players
            .iter()
            .map(|_| {
                let take = hand_size.min(deck.len());
                deck.drain(..take).collect()
            })
            .collect();
        let discard: Vec<Tile> = deck.pop().into_iter().collect();

        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.discard_pile = discard;
        self.draw_pile = deck;
        if let Some(next) = self.status.next() {
            self.status = next;
        }
    }
}
