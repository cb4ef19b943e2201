//! Wire protocol for tilehall.
//!
//! - **Messages** ([`ClientAction`], [`ServerEvent`]): what travels on
//!   the socket.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how messages become
//!   text frames.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (text frames) → Protocol (ClientAction / ServerEvent) → Gateway
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientAction, JoinRequest, ServerEvent};
