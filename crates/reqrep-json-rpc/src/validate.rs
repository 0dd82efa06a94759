//! Request validation.
//!
//! Rejects envelopes that cannot be routed (no method, no correlation id,
//! un-indexable params) before any handler is touched.

use serde_json::{Map, Value};
use tracing::debug;

use crate::codec;
use crate::error::ProtocolError;
use crate::request::{Params, ValidatedRequest};
use crate::types::RequestId;

/// Classify a decoded envelope as routable or as a malformed request.
///
/// Rules, in order:
/// - `method` must be present (it may be `null`, which later dispatches as
///   "method not found");
/// - a non-null `method` must come with an `id` (`"id": null` counts as
///   present); a method that is not a string cannot name a handler and is
///   routed as "method not found";
/// - `params`, when present and non-null, must be an array or an object.
pub fn validate(mut body: Map<String, Value>) -> Result<ValidatedRequest, ProtocolError> {
    let method = match body.remove("method") {
        None => return Err(ProtocolError::InvalidRequest("missing method")),
        Some(value) => value,
    };

    let params = body.remove("params");
    let id = body.remove("id");

    if !method.is_null() && id.is_none() {
        return Err(ProtocolError::InvalidRequest("method call without id"));
    }

    let params = match params {
        None => Params::None,
        Some(value) => Params::from_value(value)
            .ok_or(ProtocolError::InvalidRequest("params must be an array or an object"))?,
    };

    let method = match method {
        Value::String(name) => Some(name),
        Value::Null => None,
        other => {
            // Never matches a registered name.
            debug!(method = %other, "Non-string method name");
            None
        }
    };

    let request = ValidatedRequest {
        method,
        params,
        id: id.map(RequestId::from).unwrap_or_default(),
    };
    debug!(method = request.method_name(), id = %request.id, "Validated request");
    Ok(request)
}

/// Decode and validate raw request bytes in one step
pub fn parse_request(bytes: &[u8]) -> Result<ValidatedRequest, ProtocolError> {
    validate(codec::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn check(value: Value) -> Result<ValidatedRequest, ProtocolError> {
        match value {
            Value::Object(map) => validate(map),
            other => panic!("test input must be an object, got {other}"),
        }
    }

    fn code_of(value: Value) -> ErrorCode {
        check(value).unwrap_err().code()
    }

    #[test]
    fn test_valid_positional_request() {
        let request = check(json!({"jsonrpc": "2.0", "method": "hello", "params": ["world"], "id": 1}))
            .unwrap();
        assert_eq!(request.method.as_deref(), Some("hello"));
        assert_eq!(request.params, Params::Positional(vec![json!("world")]));
        assert_eq!(request.id, RequestId::Number(1));
    }

    #[test]
    fn test_valid_named_request_without_params_member() {
        let request = check(json!({"method": "version", "id": "v"})).unwrap();
        assert!(request.params.is_none());
        assert_eq!(request.id, RequestId::from("v"));
    }

    #[test]
    fn test_missing_method_is_invalid() {
        assert_eq!(code_of(json!({"params": [], "id": 1})), ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_method_without_id_is_invalid() {
        assert_eq!(code_of(json!({"method": "hello"})), ErrorCode::InvalidRequest);
        assert_eq!(
            code_of(json!({"method": "hello", "params": ["world"]})),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_explicit_null_id_is_accepted() {
        let request = check(json!({"method": "hello", "id": null})).unwrap();
        assert!(request.id.is_null());
    }

    #[test]
    fn test_scalar_params_are_invalid() {
        for params in [json!("world"), json!(7), json!(2.5), json!(true)] {
            assert_eq!(
                code_of(json!({"method": "hello", "params": params, "id": 1})),
                ErrorCode::InvalidRequest,
                "params {params} should be rejected"
            );
        }
    }

    #[test]
    fn test_null_params_mean_no_params() {
        let request = check(json!({"method": "hello", "params": null, "id": 1})).unwrap();
        assert!(request.params.is_none());
    }

    #[test]
    fn test_null_method_passes_validation() {
        let request = check(json!({"method": null})).unwrap();
        assert_eq!(request.method, None);
        assert!(request.id.is_null());
    }

    #[test]
    fn test_non_string_method_is_routable() {
        let request = check(json!({"method": 5, "id": 1})).unwrap();
        assert_eq!(request.method, None);
        assert_eq!(request.id, RequestId::Number(1));

        // Still needs an id, like any non-null method
        assert_eq!(code_of(json!({"method": ["hello"]})), ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_parse_request_reports_parse_errors_first() {
        let err = parse_request(b"{\"method\": \"hello\", \"id\": 1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);

        let err = parse_request(b"{\"id\": 1}").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
