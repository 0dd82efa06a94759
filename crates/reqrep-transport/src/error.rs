use thiserror::Error;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while moving bytes
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The endpoint can no longer carry messages
    #[error("Transport closed")]
    Closed,

    /// A reply was attempted with no connected peer to receive it
    #[error("No connected peer")]
    NoPeer,

    /// The strict send/receive alternation was broken
    #[error("Out of order: {0}")]
    OutOfOrder(&'static str),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl TransportError {
    /// Whether the endpoint is unusable from here on
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransportError::Closed)
    }
}
