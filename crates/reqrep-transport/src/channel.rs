//! In-process transport over tokio channels.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::Transport;
use crate::error::{TransportError, TransportResult};

/// A duplex channel transport.
///
/// Messages sent on one end of a [`pair`](ChannelTransport::pair) are received
/// by the other. When either end is dropped the survivor sees
/// [`TransportError::Closed`].
#[derive(Debug)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Bytes>,
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::UnboundedSender<Bytes>, rx: mpsc::UnboundedReceiver<Bytes>) -> Self {
        Self { tx, rx }
    }

    /// Creates two transports connected to each other.
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();

        (Self::new(tx_a, rx_b), Self::new(tx_b, rx_a))
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, payload: Bytes) -> TransportResult<()> {
        self.tx.send(payload).map_err(|_| TransportError::Closed)
    }

    async fn receive(&mut self) -> TransportResult<Bytes> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }

    fn describe(&self) -> String {
        "channel".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pair_is_duplex() {
        let (mut a, mut b) = ChannelTransport::pair();

        a.send(Bytes::from_static(b"ping")).await.unwrap();
        assert_eq!(b.receive().await.unwrap(), Bytes::from_static(b"ping"));

        b.send(Bytes::from_static(b"pong")).await.unwrap();
        assert_eq!(a.receive().await.unwrap(), Bytes::from_static(b"pong"));
    }

    #[tokio::test]
    async fn test_dropped_peer_closes_transport() {
        let (mut a, b) = ChannelTransport::pair();
        drop(b);

        assert!(matches!(a.receive().await, Err(TransportError::Closed)));
        assert!(matches!(
            a.send(Bytes::from_static(b"x")).await,
            Err(TransportError::Closed)
        ));
    }
}
