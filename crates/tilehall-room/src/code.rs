//! Room codes: short, human-typeable identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RandomSource;

/// Characters a room code may contain. `O` and `0` are left out so a code
/// read aloud or off a screen is never ambiguous.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNPQRSTUVWXYZ123456789";

/// Length of every generated code.
pub const CODE_LENGTH: usize = 5;

/// The code players type to join a room.
///
/// Client-supplied codes are wrapped as-is; an unknown code simply
/// doesn't match any room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Draws room codes that don't collide with live rooms.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
    /// Draws codes until one is not `taken`.
    ///
    /// `taken` is only read. Each attempt draws all five characters again
    /// rather than patching the colliding one.
    pub fn next<S, F>(&self, rng: &mut S, taken: F) -> RoomCode
    where
        S: RandomSource + ?Sized,
        F: Fn(&RoomCode) -> bool,
    {
        loop {
            let code = Self::draw(rng);
            if !taken(&code) {
                return code;
            }
            tracing::debug!(%code, "room code collision, redrawing");
        }
    }

    fn draw<S: RandomSource + ?Sized>(rng: &mut S) -> RoomCode {
        let code: String = (0..CODE_LENGTH)
            .map(|_| char::from(CODE_ALPHABET[rng.index(CODE_ALPHABET.len() - 1)]))
            .collect();
        RoomCode(code)
    }
}
