//! RPC Server Implementation
//!
//! The serve loop is a small state machine:
//!
//! ```text
//! Idle -> AwaitingRequest -> Processing -> AwaitingRequest -> ... -> Stopped
//! ```
//!
//! Every received request produces exactly one response before the next
//! receive. The stop signal is only observed while awaiting a request.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqrep_json_rpc::{
    ErrorObject, MethodRegistry, ResponseEnvelope, codec, dispatch, parse_request,
};
use reqrep_transport::{TcpReplySocket, Transport, TransportError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::builder::RpcServerBuilder;
use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Sent when even an internal error response cannot be encoded
const FALLBACK_RESPONSE: &[u8] =
    br#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"},"id":null}"#;

/// Serve loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    AwaitingRequest,
    Processing,
    Stopped,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Idle => "idle",
            ServerState::AwaitingRequest => "awaiting-request",
            ServerState::Processing => "processing",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Remote control for a server: stop it and observe its state.
#[derive(Debug, Clone)]
pub struct ServerHandle {
    token: CancellationToken,
    state: watch::Receiver<ServerState>,
}

impl ServerHandle {
    /// Ask the serve loop to stop. A request already being processed still
    /// gets its response.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Wait until the server reaches `target`
    pub async fn wait_for(&mut self, target: ServerState) -> ServerState {
        let reached = match self.state.wait_for(|state| *state == target).await {
            Ok(state) => Some(*state),
            Err(_) => None,
        };
        // Server dropped: report its last known state.
        reached.unwrap_or_else(|| *self.state.borrow())
    }
}

/// A request/reply JSON-RPC server
pub struct RpcServer {
    name: String,
    config: ServerConfig,
    registry: Arc<MethodRegistry>,
    token: CancellationToken,
    state: watch::Sender<ServerState>,
}

impl RpcServer {
    /// Create a new server builder
    pub fn builder() -> RpcServerBuilder {
        RpcServerBuilder::new()
    }

    pub(crate) fn new(name: String, config: ServerConfig, registry: MethodRegistry) -> Self {
        let (state, _) = watch::channel(ServerState::Idle);
        Self {
            name,
            config,
            registry: Arc::new(registry),
            token: CancellationToken::new(),
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            token: self.token.clone(),
            state: self.state.subscribe(),
        }
    }

    fn set_state(&self, next: ServerState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            trace!(server = %self.name, from = %previous, to = %next, "State transition");
        }
    }

    /// Bind a TCP reply socket on the configured address and serve on it
    pub async fn run(&mut self) -> Result<()> {
        let socket = TcpReplySocket::bind(self.config.bind_address, self.config.frame).await?;
        self.serve(socket).await
    }

    /// Serve requests from `transport` until stopped or the transport closes.
    pub async fn serve<T>(&mut self, mut transport: T) -> Result<()>
    where
        T: Transport,
    {
        if self.state() == ServerState::Stopped {
            return Err(ServerError::AlreadyStopped);
        }

        let ctrl_c = self.config.stop_on_ctrl_c.then(|| self.spawn_ctrl_c_listener());

        info!(
            server = %self.name,
            endpoint = %transport.describe(),
            methods = self.registry.len(),
            "RPC server started"
        );
        self.set_state(ServerState::AwaitingRequest);

        let result = loop {
            let received = tokio::select! {
                biased;
                _ = self.token.cancelled() => None,
                received = transport.receive() => Some(received),
            };

            let Some(received) = received else {
                info!(server = %self.name, "RPC server stopped by user");
                break Ok(());
            };

            match received {
                Ok(request) => {
                    self.set_state(ServerState::Processing);
                    let response = self.handle_frame(&request);
                    let sent = transport.send(response).await;
                    self.set_state(ServerState::AwaitingRequest);
                    if let Err(e) = sent {
                        if let Some(stop) = self.on_transport_error(e, &mut transport).await {
                            break stop;
                        }
                    }
                }
                Err(e) => {
                    if let Some(stop) = self.on_transport_error(e, &mut transport).await {
                        break stop;
                    }
                }
            }
        };

        if let Some(listener) = ctrl_c {
            listener.abort();
        }
        self.set_state(ServerState::Stopped);
        result
    }

    /// Report a transport fault. Returns the loop result when serving must
    /// end, `None` to keep going.
    async fn on_transport_error<T>(
        &self,
        error: TransportError,
        transport: &mut T,
    ) -> Option<Result<()>>
    where
        T: Transport,
    {
        if error.is_fatal() {
            error!(server = %self.name, error = %error, "Transport unusable, stopping");
            return Some(Err(ServerError::TransportClosed));
        }

        warn!(server = %self.name, error = %error, "Transport fault");
        let response = encode_or_fallback(&ResponseEnvelope::error_without_id(
            ErrorObject::internal_error(error.to_string()),
        ));
        match transport.send(response).await {
            Ok(()) => None,
            Err(e) if e.is_fatal() => {
                error!(server = %self.name, error = %e, "Transport unusable, stopping");
                Some(Err(ServerError::TransportClosed))
            }
            Err(e) => {
                debug!(server = %self.name, error = %e, "Could not report transport fault");
                None
            }
        }
    }

    fn spawn_ctrl_c_listener(&self) -> JoinHandle<()> {
        let token = self.token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    }

    /// Turn one raw request into one raw response.
    ///
    /// Parse and validation faults are answered with a null id since the
    /// request id cannot be trusted at that point.
    pub fn handle_frame(&self, request: &[u8]) -> Bytes {
        let response = match parse_request(request) {
            Ok(request) => dispatch(&self.registry, request),
            Err(fault) => {
                warn!(server = %self.name, error = %fault, "Rejected request");
                ResponseEnvelope::error_without_id(fault.to_error_object())
            }
        };
        encode_or_fallback(&response)
    }
}

fn encode_or_fallback(response: &ResponseEnvelope) -> Bytes {
    match codec::to_bytes(response) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            Bytes::from_static(FALLBACK_RESPONSE)
        }
    }
}
