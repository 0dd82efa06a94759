//! Envelope codec: JSON text in, JSON text out. No I/O, no validation.

use serde_json::{Map, Value};

use crate::error::{ErrorObject, ProtocolError};
use crate::request::{Params, RequestEnvelope};
use crate::response::ResponseEnvelope;
use crate::types::RequestId;

/// Build a request envelope. `params` and `id` are omitted when not supplied.
pub fn encode_request(
    method: &str,
    params: Option<&Params>,
    id: Option<RequestId>,
) -> Result<Vec<u8>, ProtocolError> {
    let envelope = RequestEnvelope::new(method, params, id);
    serde_json::to_vec(&envelope).map_err(ProtocolError::Encode)
}

/// Build a response envelope. `id` is always present; `result` and `error`
/// are omitted when not supplied.
pub fn encode_response(
    result: Option<Value>,
    error: Option<ErrorObject>,
    id: RequestId,
) -> Result<Vec<u8>, ProtocolError> {
    to_bytes(&ResponseEnvelope::new(result, error, id))
}

pub fn to_bytes(response: &ResponseEnvelope) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(response).map_err(ProtocolError::Encode)
}

/// Decode an envelope into its top-level mapping.
///
/// Anything that is not one complete JSON object (malformed, truncated,
/// trailing bytes, array or scalar at top level) is a parse error.
pub fn decode(bytes: &[u8]) -> Result<Map<String, Value>, ProtocolError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(ProtocolError::NotAnObject),
    }
}

/// Decode a response envelope on the client side.
pub fn decode_response(bytes: &[u8]) -> Result<ResponseEnvelope, ProtocolError> {
    let mut body = decode(bytes)?;

    // Present-but-null is a real (empty) result.
    let result = body.remove("result");

    let error = match body.remove("error") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<ErrorObject>(value)
                .map_err(|e| ProtocolError::InvalidResponse(e.to_string()))?,
        ),
    };

    let id = body.remove("id").map(RequestId::from).unwrap_or_default();

    Ok(ResponseEnvelope::new(result, error, id))
}
