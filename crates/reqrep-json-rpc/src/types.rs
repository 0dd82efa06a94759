use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Correlation id linking a response to its request.
///
/// Any JSON value is accepted and echoed back unchanged. `Null` is a valid id
/// and is also what a response carries when the request id could not be
/// determined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
    #[default]
    Null,
    /// Floats, booleans and structured ids, kept opaque.
    Other(Value),
}

impl RequestId {
    pub fn is_null(&self) -> bool {
        matches!(self, RequestId::Null)
    }

    pub fn to_value(&self) -> Value {
        match self {
            RequestId::Number(n) => Value::from(*n),
            RequestId::String(s) => Value::String(s.clone()),
            RequestId::Null => Value::Null,
            RequestId::Other(v) => v.clone(),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
            RequestId::Null => write!(f, "null"),
            RequestId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl From<Value> for RequestId {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RequestId::Null,
            Value::String(s) => RequestId::String(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RequestId::Number(i),
                None => RequestId::Other(Value::Number(n)),
            },
            other => RequestId::Other(other),
        }
    }
}

/// Protocol version tag carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonRpcVersion {
    #[default]
    V2_0,
}

impl JsonRpcVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonRpcVersion::V2_0 => crate::JSONRPC_VERSION,
        }
    }
}

impl fmt::Display for JsonRpcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "2.0" => Ok(JsonRpcVersion::V2_0),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid JSON-RPC version: {}",
                s
            ))),
        }
    }
}
