//! Tiles and the canonical 106-tile set.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of tiles in a complete set.
pub const TILE_SET_SIZE: usize = 106;

/// Highest face value of a suited tile.
pub const MAX_VALUE: u8 = 13;

/// Face value carried by jokers.
pub const JOKER_VALUE: u8 = 0;

/// Copies of every color/value pair in the set.
const COPIES: usize = 2;

/// Jokers appended after the suited tiles.
const JOKERS: usize = 2;

/// Tile colors. Jokers have their own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Black,
    Yellow,
    Joker,
}

impl Color {
    /// The suited colors, in dealing-set order.
    pub const SUITS: [Color; 4] = [Color::Red, Color::Blue, Color::Black, Color::Yellow];
}

/// Identity of one physical tile. Unique within a set.
///
/// Travels as `"tile-N"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u16);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.strip_prefix("tile-")
            .and_then(|n| n.parse().ok())
            .map(TileId)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid tile id {raw:?}")))
    }
}

/// A single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// 1–13 for suited tiles, 0 for jokers.
    pub value: u8,
    pub color: Color,
}

impl Tile {
    pub fn is_joker(&self) -> bool {
        self.color == Color::Joker
    }
}

/// Builds the canonical tile set in a fixed order.
///
/// Two passes over red, blue, black, yellow, each color 1..=13, with ids
/// assigned sequentially from 0; then two jokers. The order is fully
/// deterministic; randomness is applied separately by [`shuffle`].
///
/// [`shuffle`]: crate::shuffle
pub fn build_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TILE_SET_SIZE);
    let mut next_id = 0u16;
    let mut push = |tiles: &mut Vec<Tile>, value, color| {
        tiles.push(Tile {
            id: TileId(next_id),
            value,
            color,
        });
        next_id += 1;
    };

    for _ in 0..COPIES {
        for color in Color::SUITS {
            for value in 1..=MAX_VALUE {
                push(&mut tiles, value, color);
            }
        }
    }
    for _ in 0..JOKERS {
        push(&mut tiles, JOKER_VALUE, Color::Joker);
    }

    tiles
}
