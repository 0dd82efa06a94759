use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{JsonRpcVersion, RequestId};

/// Arguments of a call, resolved once from the `params` member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Positional arguments, in sequence order
    Positional(Vec<Value>),
    /// Keyword-style arguments
    Named(Map<String, Value>),
    /// No `params` member (or `params: null`)
    #[default]
    None,
}

impl Params {
    /// Resolve a `params` value. Scalars have no call shape and yield `None`
    /// here; the validator rejects them before this is reached.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Params::None),
            Value::Array(items) => Some(Params::Positional(items)),
            Value::Object(map) => Some(Params::Named(map)),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Params::None)
    }

    /// Get a parameter by name (named params only)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Params::Named(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a parameter by position (positional params only)
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Params::Positional(items) => items.get(index),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Positional(items) => items.len(),
            Params::Named(map) => map.len(),
            Params::None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wire value, `None` when the member should be omitted
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Params::Positional(items) => Some(Value::Array(items.clone())),
            Params::Named(map) => Some(Value::Object(map.clone())),
            Params::None => None,
        }
    }

    /// Bind the arguments to a typed argument list.
    ///
    /// Positional params bind to tuples, sequences or structs (fields in
    /// declaration order); named params bind to structs or maps; no params
    /// binds to `()` or `Option<T>`.
    pub fn bind<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        let value = match self {
            Params::Positional(items) => Value::Array(items),
            Params::Named(map) => Value::Object(map),
            Params::None => Value::Null,
        };
        serde_json::from_value(value)
    }
}

impl From<Vec<Value>> for Params {
    fn from(items: Vec<Value>) -> Self {
        Params::Positional(items)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Named(map)
    }
}

/// Outbound request envelope, as built by a client
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl RequestEnvelope {
    pub fn new(method: impl Into<String>, params: Option<&Params>, id: Option<RequestId>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method: method.into(),
            params: params.and_then(Params::to_value),
            id,
        }
    }
}

/// A request that passed validation and can be routed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// `None` when the envelope's `method` was `null` or not a string
    pub method: Option<String>,
    pub params: Params,
    pub id: RequestId,
}

impl ValidatedRequest {
    pub fn new(method: impl Into<String>, params: Params, id: RequestId) -> Self {
        Self {
            method: Some(method.into()),
            params,
            id,
        }
    }

    pub fn method_name(&self) -> &str {
        self.method.as_deref().unwrap_or("null")
    }
}
