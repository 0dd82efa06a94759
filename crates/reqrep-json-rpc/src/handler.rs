//! Method handlers and the values they return.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ErrorCode, ErrorObject};
use crate::request::Params;

/// What a handler hands back to the dispatcher
pub type MethodResult = Result<Value, MethodError>;

/// Failure returned by a handler.
///
/// `Declared` is an expected, client-facing failure (for example a bad
/// argument value) and is sent as-is. `Fault` is anything unexpected and is
/// reported as an internal error. Any `std::error::Error` converts into a
/// `Fault`, so `?` works inside handlers.
pub enum MethodError {
    Declared { code: ErrorCode, message: String },
    Fault(String),
}

impl MethodError {
    pub fn declared(code: ErrorCode, message: impl Into<String>) -> Self {
        MethodError::Declared {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::declared(ErrorCode::InvalidParams, message)
    }

    pub fn fault(description: impl Into<String>) -> Self {
        MethodError::Fault(description.into())
    }

    pub fn to_error_object(&self) -> ErrorObject {
        match self {
            MethodError::Declared { code, message } => ErrorObject::new(*code, message.clone()),
            MethodError::Fault(description) => ErrorObject::internal_error(description.clone()),
        }
    }
}

impl<E> From<E> for MethodError
where
    E: std::error::Error,
{
    fn from(error: E) -> Self {
        MethodError::Fault(error.to_string())
    }
}

impl fmt::Debug for MethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodError::Declared { code, message } => f
                .debug_struct("Declared")
                .field("code", code)
                .field("message", message)
                .finish(),
            MethodError::Fault(description) => f.debug_tuple("Fault").field(description).finish(),
        }
    }
}

impl fmt::Display for MethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodError::Declared { code, message } => write!(f, "{} ({})", message, code.code()),
            MethodError::Fault(description) => f.write_str(description),
        }
    }
}

/// A callable bound to a method name.
///
/// Handlers run synchronously on the serving task; a slow handler stalls the
/// loop. Any closure `Fn(Params) -> MethodResult` is a handler.
pub trait MethodHandler: Send + Sync {
    fn call(&self, params: Params) -> MethodResult;
}

impl<F> MethodHandler for F
where
    F: Fn(Params) -> MethodResult + Send + Sync,
{
    fn call(&self, params: Params) -> MethodResult {
        self(params)
    }
}

/// Handler with a typed argument list, see [`typed`]
pub struct TypedHandler<F, A, R> {
    func: F,
    _marker: PhantomData<fn(A) -> R>,
}

/// Wrap a function taking a typed argument list.
///
/// The request params are bound with [`Params::bind`]; a binding failure is
/// reported as a declared `InvalidParams`.
///
/// ```rust
/// use reqrep_json_rpc::handler::{typed, MethodHandler};
/// use reqrep_json_rpc::Params;
/// use serde_json::json;
///
/// let hello = typed(|(name,): (String,)| Ok(format!("Hello, {}!", name)));
/// let result = hello.call(Params::from(vec![json!("world")]));
/// assert_eq!(result.ok(), Some(json!("Hello, world!")));
/// ```
pub fn typed<A, R, F>(func: F) -> TypedHandler<F, A, R>
where
    A: DeserializeOwned,
    R: Serialize,
    F: Fn(A) -> Result<R, MethodError> + Send + Sync,
{
    TypedHandler {
        func,
        _marker: PhantomData,
    }
}

impl<F, A, R> MethodHandler for TypedHandler<F, A, R>
where
    A: DeserializeOwned,
    R: Serialize,
    F: Fn(A) -> Result<R, MethodError> + Send + Sync,
{
    fn call(&self, params: Params) -> MethodResult {
        let args: A = params
            .bind()
            .map_err(|e| MethodError::invalid_params(e.to_string()))?;
        let output = (self.func)(args)?;
        Ok(serde_json::to_value(output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Pair {
        a: f64,
        b: f64,
    }

    #[test]
    fn test_closure_is_a_handler() {
        let handler = |params: Params| -> MethodResult { Ok(json!(params.len())) };
        let result = MethodHandler::call(&handler, Params::from(vec![json!(1), json!(2)]));
        assert_eq!(result.ok(), Some(json!(2)));
    }

    #[test]
    fn test_typed_handler_binds_named_params() {
        let add = typed(|p: Pair| Ok(p.a + p.b));
        let params = Params::from_value(json!({"a": 5, "b": 3})).unwrap();
        assert_eq!(add.call(params).ok(), Some(json!(8.0)));
    }

    #[test]
    fn test_typed_handler_reports_bad_arguments_as_invalid_params() {
        let add = typed(|p: Pair| Ok(p.a + p.b));
        let params = Params::from_value(json!({"a": "five", "b": 3})).unwrap();
        let err = add.call(params).unwrap_err();
        assert_eq!(err.to_error_object().code, ErrorCode::InvalidParams);
    }

    #[test]
    fn test_std_errors_become_faults() {
        let parse = typed(|(text,): (String,)| Ok(text.parse::<i64>()?));
        let err = parse.call(Params::from(vec![json!("nope")])).unwrap_err();
        let object = err.to_error_object();
        assert_eq!(object.code, ErrorCode::InternalError);
        assert_eq!(object.message, "invalid digit found in string");
    }

    #[test]
    fn test_declared_error_keeps_code_and_message() {
        let err = MethodError::invalid_params("Wrong activity name");
        assert_eq!(
            err.to_error_object(),
            ErrorObject::new(ErrorCode::InvalidParams, "Wrong activity name")
        );
        assert_eq!(err.to_string(), "Wrong activity name (-32602)");
    }
}
