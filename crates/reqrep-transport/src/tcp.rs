//! Length-delimited TCP request/reply sockets.
//!
//! [`TcpReplySocket`] is the serving end: it accepts one peer at a time and
//! answers each request on the connection it arrived on. When the peer hangs
//! up the socket goes back to accepting. [`TcpRequestSocket`] is the calling
//! end. Both enforce strict alternation of send and receive.

use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::{debug, info, warn};

use crate::Transport;
use crate::config::FrameConfig;
use crate::error::{TransportError, TransportResult};

struct Peer {
    addr: SocketAddr,
    framed: Framed<TcpStream, LengthDelimitedCodec>,
}

/// Serving end of a TCP request/reply pair
pub struct TcpReplySocket {
    listener: TcpListener,
    frame: FrameConfig,
    peer: Option<Peer>,
    reply_pending: bool,
}

impl TcpReplySocket {
    /// Bind and start listening on `addr`
    pub async fn bind(addr: impl ToSocketAddrs, frame: FrameConfig) -> TransportResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Reply socket listening");
        Ok(Self {
            listener,
            frame,
            peer: None,
            reply_pending: false,
        })
    }

    pub fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Address of the currently connected peer, if any
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer.as_ref().map(|peer| peer.addr)
    }

    async fn accept(&self) -> TransportResult<Peer> {
        let (stream, addr) = self.listener.accept().await?;
        debug!(peer = %addr, "Accepted connection");
        Ok(Peer {
            addr,
            framed: Framed::new(stream, self.frame.codec()),
        })
    }

    fn drop_peer(&mut self) {
        self.peer = None;
        self.reply_pending = false;
    }
}

#[async_trait]
impl Transport for TcpReplySocket {
    async fn send(&mut self, payload: Bytes) -> TransportResult<()> {
        if !self.reply_pending {
            return Err(TransportError::OutOfOrder("reply without a request"));
        }
        let Some(peer) = self.peer.as_mut() else {
            return Err(TransportError::NoPeer);
        };
        let addr = peer.addr;
        if let Err(e) = peer.framed.send(payload).await {
            warn!(peer = %addr, error = %e, "Failed to send reply, dropping connection");
            self.drop_peer();
            return Err(e.into());
        }
        self.reply_pending = false;
        Ok(())
    }

    async fn receive(&mut self) -> TransportResult<Bytes> {
        if self.reply_pending {
            return Err(TransportError::OutOfOrder("request before the previous reply"));
        }
        loop {
            if self.peer.is_none() {
                self.peer = Some(self.accept().await?);
            }
            let Some(peer) = self.peer.as_mut() else {
                continue;
            };
            let addr = peer.addr;
            match peer.framed.next().await {
                Some(Ok(frame)) => {
                    self.reply_pending = true;
                    return Ok(frame.freeze());
                }
                Some(Err(e)) => {
                    warn!(peer = %addr, error = %e, "Failed to read request, dropping connection");
                    self.drop_peer();
                    return Err(e.into());
                }
                None => {
                    debug!(peer = %addr, "Peer disconnected");
                    self.drop_peer();
                }
            }
        }
    }

    fn describe(&self) -> String {
        match self.listener.local_addr() {
            Ok(addr) => format!("tcp://{}", addr),
            Err(_) => "tcp://<unbound>".to_string(),
        }
    }
}

/// Calling end of a TCP request/reply pair
pub struct TcpRequestSocket {
    addr: SocketAddr,
    framed: Framed<TcpStream, LengthDelimitedCodec>,
    awaiting_reply: bool,
}

impl TcpRequestSocket {
    pub async fn connect(addr: impl ToSocketAddrs, frame: FrameConfig) -> TransportResult<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        let addr = stream.peer_addr()?;
        debug!(server = %addr, "Connected request socket");
        Ok(Self {
            addr,
            framed: Framed::new(stream, frame.codec()),
            awaiting_reply: false,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl Transport for TcpRequestSocket {
    async fn send(&mut self, payload: Bytes) -> TransportResult<()> {
        if self.awaiting_reply {
            return Err(TransportError::OutOfOrder("request before the previous reply"));
        }
        self.framed.send(payload).await?;
        self.awaiting_reply = true;
        Ok(())
    }

    async fn receive(&mut self) -> TransportResult<Bytes> {
        if !self.awaiting_reply {
            return Err(TransportError::OutOfOrder("receive without a request"));
        }
        match self.framed.next().await {
            Some(Ok(frame)) => {
                self.awaiting_reply = false;
                Ok(frame.freeze())
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(TransportError::Closed),
        }
    }

    fn describe(&self) -> String {
        format!("tcp://{}", self.addr)
    }
}
