/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The peer went away while we were talking to it.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Writing a frame failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// A frame arrived that is not text. The connection is still usable.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Binding the listener or upgrading a TCP stream failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),
}

impl TransportError {
    /// Returns `true` if the connection cannot be used after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidFrame(_))
    }
}
