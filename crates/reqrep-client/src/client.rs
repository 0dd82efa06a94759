//! RPC client implementation

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use reqrep_json_rpc::{Params, RequestId, ResponseEnvelope, codec};
use reqrep_transport::{TcpRequestSocket, Transport, TransportResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Request/reply JSON-RPC client.
///
/// Requests are strictly sequential: each call sends one request and waits
/// for its reply before the next can be sent.
pub struct RpcClient<T> {
    transport: T,
    config: ClientConfig,
    request_counter: AtomicU64,
}

impl RpcClient<TcpRequestSocket> {
    /// Connect to `config.endpoint` over TCP
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        info!(endpoint = %config.endpoint, "Connecting to RPC server");
        let socket = timeout(
            config.timeouts.connect,
            TcpRequestSocket::connect(config.endpoint.as_str(), config.frame),
        )
        .await
        .map_err(|_| ClientError::Timeout)??;
        info!(server = %socket.server_addr(), "Connected to RPC server");
        Ok(Self::new(socket, config))
    }
}

impl<T> RpcClient<T>
where
    T: Transport,
{
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Client over `transport` with default configuration
    pub fn with_transport(transport: T) -> Self {
        Self::new(transport, ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn next_request_id(&self) -> RequestId {
        let counter = self.request_counter.fetch_add(1, Ordering::SeqCst);
        RequestId::String(format!("{}_{}", self.config.id_prefix, counter))
    }

    /// Send one request and return the decoded response as-is.
    ///
    /// `params` and `id` are omitted from the envelope when `None`. Error
    /// responses are returned, not raised.
    pub async fn request(
        &mut self,
        method: &str,
        params: Option<&Params>,
        id: Option<RequestId>,
    ) -> ClientResult<ResponseEnvelope> {
        let payload = codec::encode_request(method, params, id)?;
        debug!(method = method, bytes = payload.len(), "Sending request");

        let reply = timeout(
            self.config.timeouts.request,
            round_trip(&mut self.transport, Bytes::from(payload)),
        )
        .await
        .map_err(|_| ClientError::Timeout)??;

        Ok(codec::decode_response(&reply)?)
    }

    /// Call `method` with a generated id and return its result.
    ///
    /// An error response becomes [`ClientError::Rpc`]; a missing result reads
    /// as `null`.
    pub async fn call(&mut self, method: &str, params: impl Into<Params>) -> ClientResult<Value> {
        let id = self.next_request_id();
        let params = params.into();
        let response = self.request(method, Some(&params), Some(id.clone())).await?;

        // Requests the server could not read are answered with a null id.
        let unreadable = response.is_error() && response.id.is_null();
        if response.id != id && !unreadable {
            warn!(expected = %id, actual = %response.id, "Response id mismatch");
            return Err(ClientError::IdMismatch {
                expected: id,
                actual: response.id,
            });
        }

        match response.into_result() {
            Ok(result) => Ok(result.unwrap_or(Value::Null)),
            Err(error) => {
                debug!(method = method, code = error.code.code(), "Server returned error");
                Err(error.into())
            }
        }
    }

    /// [`call`](Self::call), deserializing the result into `R`
    pub async fn call_typed<R>(&mut self, method: &str, params: impl Into<Params>) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        let value = self.call(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

async fn round_trip<T>(transport: &mut T, payload: Bytes) -> TransportResult<Bytes>
where
    T: Transport,
{
    transport.send(payload).await?;
    transport.receive().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqrep_json_rpc::ErrorCode;
    use reqrep_transport::ChannelTransport;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    /// Answer one request with `reply(request)`
    async fn answer_once<F>(server: &mut ChannelTransport, reply: F)
    where
        F: FnOnce(Value) -> Value,
    {
        let request: Value = serde_json::from_slice(&server.receive().await.unwrap()).unwrap();
        let response = serde_json::to_vec(&reply(request)).unwrap();
        server.send(Bytes::from(response)).await.unwrap();
    }

    #[tokio::test]
    async fn test_call_generates_sequential_ids() {
        let (client_end, mut server_end) = ChannelTransport::pair();
        let mut client = RpcClient::with_transport(client_end);

        let server = tokio::spawn(async move {
            for _ in 0..2 {
                answer_once(&mut server_end, |request| {
                    json!({"jsonrpc": "2.0", "result": request["id"], "id": request["id"]})
                })
                .await;
            }
        });

        let first = assert_ok!(client.call("echo_id", Params::None).await);
        let second = assert_ok!(client.call("echo_id", Params::None).await);
        assert_eq!(first, json!("req_0"));
        assert_eq!(second, json!("req_1"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_call_surfaces_error_response() {
        let (client_end, mut server_end) = ChannelTransport::pair();
        let mut client = RpcClient::with_transport(client_end);

        let server = tokio::spawn(async move {
            answer_once(&mut server_end, |request| {
                json!({
                    "jsonrpc": "2.0",
                    "error": {"code": -32601, "message": "Method not found"},
                    "id": request["id"]
                })
            })
            .await;
        });

        let err = assert_err!(client.call("missing", vec![json!(1)]).await);
        assert_eq!(err.error_code(), Some(ErrorCode::MethodNotFound));
        assert_eq!(err.to_string(), "Server error (code -32601): Method not found");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_call_detects_id_mismatch() {
        let (client_end, mut server_end) = ChannelTransport::pair();
        let mut client = RpcClient::with_transport(client_end);

        let server = tokio::spawn(async move {
            answer_once(&mut server_end, |_| {
                json!({"jsonrpc": "2.0", "result": "late", "id": "someone_else"})
            })
            .await;
        });

        let err = assert_err!(client.call("version", Params::None).await);
        assert!(matches!(
            err,
            ClientError::IdMismatch { ref expected, .. } if *expected == RequestId::from("req_0")
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_omits_absent_members() {
        let (client_end, mut server_end) = ChannelTransport::pair();
        let mut client = RpcClient::with_transport(client_end);

        let server = tokio::spawn(async move {
            answer_once(&mut server_end, |request| {
                assert_eq!(request, json!({"jsonrpc": "2.0", "method": "version"}));
                json!({
                    "jsonrpc": "2.0",
                    "error": {"code": -32600, "message": "Invalid request"},
                    "id": null
                })
            })
            .await;
        });

        let response = assert_ok!(client.request("version", None, None).await);
        assert_eq!(response.error_code(), Some(ErrorCode::InvalidRequest));
        assert!(response.id.is_null());
        server.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_times_out() {
        let (client_end, _silent_server) = ChannelTransport::pair();
        let config = ClientConfig::default().with_request_timeout(Duration::from_millis(100));
        let mut client = RpcClient::new(client_end, config);

        let err = assert_err!(client.call("version", Params::None).await);
        assert!(matches!(err, ClientError::Timeout));
    }

    #[tokio::test]
    async fn test_call_typed() {
        let (client_end, mut server_end) = ChannelTransport::pair();
        let mut client = RpcClient::new(client_end, ClientConfig::default().with_id_prefix("t"));

        let server = tokio::spawn(async move {
            answer_once(&mut server_end, |request| {
                assert_eq!(request["id"], json!("t_0"));
                json!({"jsonrpc": "2.0", "result": [1.5, 2.5], "id": request["id"]})
            })
            .await;
        });

        let values: Vec<f64> = assert_ok!(client.call_typed("proc", Params::None).await);
        assert_eq!(values, vec![1.5, 2.5]);
        server.await.unwrap();
    }
}
