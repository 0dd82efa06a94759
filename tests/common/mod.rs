//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::net::SocketAddr;

use bytes::Bytes;
use reqrep_json_rpc::{MethodError, MethodResult, Params, typed};
use reqrep_server::{RpcServer, RpcServerBuilder, ServerError, ServerHandle};
use reqrep_transport::{ChannelTransport, FrameConfig, TcpReplySocket, Transport};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder with the methods used across the scenarios
pub fn test_server() -> RpcServerBuilder {
    RpcServer::builder()
        .name("integration")
        .stop_on_ctrl_c(false)
        .method(
            "hello",
            typed(|(name,): (String,)| Ok(format!("Hello, {}!", name))),
        )
        .method("add", typed(|(a, b): (i64, i64)| Ok(a + b)))
        .method("nothing", |_: Params| -> MethodResult { Ok(Value::Null) })
        .method("echo", |params: Params| -> MethodResult {
            Ok(params.to_value().unwrap_or(Value::Null))
        })
        .method("panics", |_: Params| -> MethodResult { panic!("handler blew up") })
        .method("faults", |_: Params| -> MethodResult {
            Err(MethodError::fault("disk on fire"))
        })
        .method("divide", |params: Params| -> MethodResult {
            let (a, b): (f64, f64) = params
                .bind()
                .map_err(|e| MethodError::invalid_params(e.to_string()))?;
            if b == 0.0 {
                return Err(MethodError::invalid_params("division by zero"));
            }
            Ok(json!(a / b))
        })
}

pub struct RunningServer<T> {
    pub handle: ServerHandle,
    pub task: JoinHandle<(RpcServer, Result<(), ServerError>)>,
    pub peer: T,
}

/// Serve `server` over an in-memory channel
pub fn serve_over_channel(mut server: RpcServer) -> RunningServer<ChannelTransport> {
    let (server_end, client_end) = ChannelTransport::pair();
    let handle = server.handle();
    let task = tokio::spawn(async move {
        let result = server.serve(server_end).await;
        (server, result)
    });
    RunningServer {
        handle,
        task,
        peer: client_end,
    }
}

/// Serve `server` over TCP on an ephemeral localhost port
pub async fn serve_over_tcp(mut server: RpcServer) -> RunningServer<SocketAddr> {
    let socket = TcpReplySocket::bind("127.0.0.1:0", FrameConfig::default())
        .await
        .expect("bind reply socket");
    let addr = socket.local_addr().expect("local address");
    let handle = server.handle();
    let task = tokio::spawn(async move {
        let result = server.serve(socket).await;
        (server, result)
    });
    RunningServer {
        handle,
        task,
        peer: addr,
    }
}

/// Send raw bytes and decode the reply as JSON
pub async fn exchange<T: Transport>(transport: &mut T, request: &[u8]) -> Value {
    transport
        .send(Bytes::copy_from_slice(request))
        .await
        .expect("send request");
    let reply = transport.receive().await.expect("receive response");
    serde_json::from_slice(&reply).expect("response is JSON")
}
