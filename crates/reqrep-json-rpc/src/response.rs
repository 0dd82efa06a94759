use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorCode, ErrorObject};
use crate::types::{JsonRpcVersion, RequestId};

/// A JSON-RPC response envelope.
///
/// A well-formed response carries exactly one of `result`/`error`. Decoding is
/// lenient and also accepts neither, which callers read as "no usable result".
/// `result: Some(Value::Null)` is a successful call that returned nothing and is
/// distinct from an absent `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    pub id: RequestId,
}

impl ResponseEnvelope {
    pub fn new(result: Option<Value>, error: Option<ErrorObject>, id: RequestId) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            result,
            error,
            id,
        }
    }

    pub fn success(id: RequestId, result: Value) -> Self {
        Self::new(Some(result), None, id)
    }

    pub fn error(id: RequestId, error: ErrorObject) -> Self {
        Self::new(None, Some(error), id)
    }

    /// Error response for a request whose id could not be determined
    pub fn error_without_id(error: ErrorObject) -> Self {
        Self::error(RequestId::Null, error)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }

    /// Split into the caller's view: the error wins when both are present,
    /// `Ok(None)` when neither is.
    pub fn into_result(self) -> Result<Option<Value>, ErrorObject> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let response = ResponseEnvelope::success(RequestId::Number(1), json!("Hello, world!"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"jsonrpc": "2.0", "result": "Hello, world!", "id": 1})
        );
    }

    #[test]
    fn test_null_result_is_emitted() {
        let response = ResponseEnvelope::success(RequestId::from("a"), Value::Null);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""result":null"#));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_error_without_id_serializes_null_id() {
        let response = ResponseEnvelope::error_without_id(ErrorObject::parse_error());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32700, "message": "Parse error"},
                "id": null
            })
        );
        assert_eq!(response.error_code(), Some(ErrorCode::ParseError));
    }

    #[test]
    fn test_into_result() {
        let ok = ResponseEnvelope::success(RequestId::Number(1), json!(3));
        assert_eq!(ok.into_result(), Ok(Some(json!(3))));

        let empty = ResponseEnvelope::new(None, None, RequestId::Number(1));
        assert_eq!(empty.into_result(), Ok(None));

        let err = ResponseEnvelope::error(RequestId::Number(1), ErrorObject::method_not_found());
        assert_eq!(err.into_result(), Err(ErrorObject::method_not_found()));
    }
}
