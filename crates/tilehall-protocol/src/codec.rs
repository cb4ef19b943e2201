//! Codec trait and the JSON implementation.
//!
//! The server only ever talks to a [`Codec`]; which text format sits
//! underneath is a single type parameter.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts between message types and text frames.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one frame.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Parses one frame.
    fn decode<T: DeserializeOwned>(&self, frame: &str) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ```rust
/// use tilehall_protocol::{ClientAction, Codec, JsonCodec};
///
/// let action: ClientAction = JsonCodec
///     .decode(r#"{"event":"startGame","data":"K7MPQ"}"#)
///     .unwrap();
/// assert!(matches!(action, ClientAction::StartGame(_)));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, frame: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Decode)
    }
}
