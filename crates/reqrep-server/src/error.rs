use reqrep_transport::TransportError;
use thiserror::Error;

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that end (or prevent) serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The transport became unusable while serving
    #[error("Transport closed")]
    TransportClosed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server already stopped")]
    AlreadyStopped,
}
