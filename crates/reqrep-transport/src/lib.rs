//! # Request/Reply Transports
//!
//! A minimal async interface for moving opaque byte buffers between a client
//! and a server, plus the concrete endpoints used by the server and client
//! crates.
//!
//! - **Byte-oriented**: a transport knows nothing about envelopes or JSON.
//! - **Request/reply**: the serving end replies exactly once per receive,
//!   before receiving again.
//!
//! | Endpoint | Side | Use |
//! |----------|------|-----|
//! | [`ChannelTransport`] | both | in-process, tests and embedding |
//! | [`TcpReplySocket`] | server | length-delimited frames over TCP |
//! | [`TcpRequestSocket`] | client | length-delimited frames over TCP |

use async_trait::async_trait;
use bytes::Bytes;

pub mod channel;
pub mod config;
pub mod error;
pub mod tcp;

pub use channel::ChannelTransport;
pub use config::{DEFAULT_MAX_FRAME_LENGTH, FrameConfig};
pub use error::{TransportError, TransportResult};
pub use tcp::{TcpReplySocket, TcpRequestSocket};

/// A blocking (from the caller's task) send/receive endpoint.
#[async_trait]
pub trait Transport: Send {
    /// Send one message
    async fn send(&mut self, payload: Bytes) -> TransportResult<()>;

    /// Wait for the next message
    async fn receive(&mut self) -> TransportResult<Bytes>;

    /// Human-readable endpoint description for logs
    fn describe(&self) -> String {
        "transport".to_string()
    }
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn send(&mut self, payload: Bytes) -> TransportResult<()> {
        (**self).send(payload).await
    }

    async fn receive(&mut self) -> TransportResult<Bytes> {
        (**self).receive().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
