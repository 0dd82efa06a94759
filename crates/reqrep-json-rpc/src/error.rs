use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;

/// JSON-RPC error codes
///
/// The set is closed: a code outside it is rejected when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::ParseError => error_codes::PARSE_ERROR,
            ErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            ErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            ErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            ErrorCode::InternalError => error_codes::INTERNAL_ERROR,
        }
    }

    /// Standard message sent when no more specific text is available
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i64> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            error_codes::PARSE_ERROR => Ok(ErrorCode::ParseError),
            error_codes::INVALID_REQUEST => Ok(ErrorCode::InvalidRequest),
            error_codes::METHOD_NOT_FOUND => Ok(ErrorCode::MethodNotFound),
            error_codes::INVALID_PARAMS => Ok(ErrorCode::InvalidParams),
            error_codes::INTERNAL_ERROR => Ok(ErrorCode::InternalError),
            other => Err(UnknownErrorCode(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown JSON-RPC error code {0}")]
pub struct UnknownErrorCode(pub i64);

/// JSON-RPC Error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorObject {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error object carrying the standard message for `code`
    pub fn standard(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }

    pub fn parse_error() -> Self {
        Self::standard(ErrorCode::ParseError)
    }

    pub fn invalid_request() -> Self {
        Self::standard(ErrorCode::InvalidRequest)
    }

    pub fn method_not_found() -> Self {
        Self::standard(ErrorCode::MethodNotFound)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC Error {}: {}", self.code.code(), self.message)
    }
}

/// Faults detected before a request reaches a handler, or while reading a
/// response on the client side.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Envelope is not a JSON object")]
    NotAnObject,

    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::Parse(_) | ProtocolError::NotAnObject => ErrorCode::ParseError,
            ProtocolError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            ProtocolError::Encode(_) | ProtocolError::InvalidResponse(_) => {
                ErrorCode::InternalError
            }
        }
    }

    /// Wire form of this fault. Always the standard message: details stay in
    /// the server log.
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject::standard(self.code())
    }
}
