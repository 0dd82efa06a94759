//! Client/server round trips over length-delimited TCP on an ephemeral port.

mod common;

use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use common::{exchange, init_logging, serve_over_tcp, test_server};
use reqrep_client::{ClientConfig, ClientError, ErrorCode, Params, RequestId, RpcClient};
use reqrep_server::ServerState;
use reqrep_transport::{FrameConfig, TcpRequestSocket, Transport, TransportError};
use serde_json::json;
use tokio_test::assert_err;

fn client_config(addr: std::net::SocketAddr) -> ClientConfig {
    ClientConfig::default()
        .with_endpoint(addr.to_string())
        .with_request_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_client_calls_over_tcp() -> Result<()> {
    init_logging();
    let running = serve_over_tcp(test_server().build()?).await;
    let mut client = RpcClient::connect(client_config(running.peer)).await?;

    let greeting = client.call("hello", vec![json!("world")]).await?;
    assert_eq!(greeting, json!("Hello, world!"));

    let sum: i64 = client.call_typed("add", vec![json!(40), json!(2)]).await?;
    assert_eq!(sum, 42);

    let err = assert_err!(client.call("missing", Params::None).await);
    assert_eq!(err.error_code(), Some(ErrorCode::MethodNotFound));

    running.handle.shutdown();
    let (_, result) = running.task.await?;
    assert!(result.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_raw_request_with_explicit_id() -> Result<()> {
    let running = serve_over_tcp(test_server().build()?).await;
    let mut client = RpcClient::connect(client_config(running.peer)).await?;

    let params = Params::from(vec![json!("world")]);
    let response = client
        .request("hello", Some(&params), Some(RequestId::Number(1)))
        .await?;

    assert_eq!(
        serde_json::to_value(&response)?,
        json!({"jsonrpc": "2.0", "result": "Hello, world!", "id": 1})
    );
    Ok(())
}

#[tokio::test]
async fn test_one_response_per_request() -> Result<()> {
    let running = serve_over_tcp(test_server().build()?).await;
    let mut socket = TcpRequestSocket::connect(running.peer, FrameConfig::default()).await?;

    for n in 0..20 {
        let request = json!({"method": "add", "params": [n, 1], "id": n});
        let response = exchange(&mut socket, request.to_string().as_bytes()).await;
        assert_eq!(response["result"], json!(n + 1));
        assert_eq!(response["id"], json!(n));
    }

    // Sending twice without reading the reply breaks alternation
    socket.send(Bytes::from_static(br#"{"method": "add", "params": [1, 1], "id": 1}"#)).await?;
    let second = socket
        .send(Bytes::from_static(br#"{"method": "add", "params": [1, 1], "id": 2}"#))
        .await;
    assert!(matches!(second, Err(TransportError::OutOfOrder(_))));
    Ok(())
}

#[tokio::test]
async fn test_server_accepts_next_client_after_disconnect() -> Result<()> {
    let mut running = serve_over_tcp(test_server().build()?).await;

    for round in 0..3 {
        let mut client = RpcClient::connect(client_config(running.peer)).await?;
        let sum = client.call("add", vec![json!(round), json!(round)]).await?;
        assert_eq!(sum, json!(round * 2));
    }

    let state = running.handle.wait_for(ServerState::AwaitingRequest).await;
    assert_eq!(state, ServerState::AwaitingRequest);
    Ok(())
}

#[tokio::test]
async fn test_parse_error_over_tcp() -> Result<()> {
    let running = serve_over_tcp(test_server().build()?).await;
    let mut socket = TcpRequestSocket::connect(running.peer, FrameConfig::default()).await?;

    let response = exchange(&mut socket, b"{\"method\": \"hello\", ").await;
    assert_eq!(
        response,
        json!({
            "jsonrpc": "2.0",
            "error": {"code": -32700, "message": "Parse error"},
            "id": null
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_connect_to_closed_port_fails() -> Result<()> {
    // Bind then drop to find a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = match RpcClient::connect(client_config(addr)).await {
        Ok(_) => panic!("connected to a closed port"),
        Err(e) => e,
    };
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::ConnectionFailed(_))
    ));
    Ok(())
}
