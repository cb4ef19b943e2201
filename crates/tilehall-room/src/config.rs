//! Room configuration and status state machine.

use serde::{Deserialize, Serialize};

use crate::TILE_SET_SIZE;

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every room in a registry.
///
/// One tile set has to cover a full table: `max_players * hand_size + 1`
/// may not exceed [`TILE_SET_SIZE`]. [`clamped`](Self::clamped) enforces
/// that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum players seated in one room.
    pub max_players: usize,

    /// Tiles dealt to each player when the game starts.
    pub hand_size: usize,

    /// Prefix for generated names of players who didn't give one.
    /// The 1-based seat number is appended: `"Jugador 2"`.
    pub default_name_prefix: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            hand_size: 14,
            default_name_prefix: "Jugador".to_string(),
        }
    }
}

impl RoomConfig {
    /// Returns the name for a player taking `seat` (1-based) who
    /// didn't supply one.
    pub fn default_name(&self, seat: usize) -> String {
        format!("{} {seat}", self.default_name_prefix)
    }

    /// Returns a copy with at least one seat and a hand size small enough
    /// that a full table still leaves a tile for the discard pile.
    pub fn clamped(&self) -> Self {
        let max_players = self.max_players.clamp(1, TILE_SET_SIZE - 1);
        let hand_size = self.hand_size.min((TILE_SET_SIZE - 1) / max_players);
        Self {
            max_players,
            hand_size,
            default_name_prefix: self.default_name_prefix.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The lifecycle status of a room.
///
/// ```text
/// Waiting → InProgress
/// ```
///
/// - **Waiting**: players can join, nothing has been dealt.
/// - **InProgress**: tiles are dealt. Terminal: no turn cycle or
///   game-over state exists yet.
///
/// Serialized as `"waiting"` / `"in-progress"`, the strings browser
/// clients switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    Waiting,
    InProgress,
}

impl RoomStatus {
    /// Returns the next status, or `None` from the terminal status.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::InProgress),
            Self::InProgress => None,
        }
    }

    /// Returns `true` if moving to `target` is a legal transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::InProgress => write!(f, "in-progress"),
        }
    }
}
