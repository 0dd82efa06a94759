//! Method dispatch: one validated request in, exactly one response out.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ErrorCode, ErrorObject};
use crate::handler::{MethodError, MethodHandler};
use crate::registry::MethodRegistry;
use crate::request::{Params, ValidatedRequest};
use crate::response::ResponseEnvelope;

/// Observed result of invoking a handler
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    Success(Value),
    DeclaredError { code: ErrorCode, message: String },
    UncaughtFault(String),
}

impl HandlerOutcome {
    /// Response fields `(result, error)` for this outcome
    pub fn into_parts(self) -> (Option<Value>, Option<ErrorObject>) {
        match self {
            HandlerOutcome::Success(value) => (Some(value), None),
            HandlerOutcome::DeclaredError { code, message } => {
                (None, Some(ErrorObject::new(code, message)))
            }
            HandlerOutcome::UncaughtFault(description) => {
                (None, Some(ErrorObject::internal_error(description)))
            }
        }
    }
}

/// Invoke a handler and classify what happened.
///
/// Panics are caught here and reported as uncaught faults carrying the panic
/// message; nothing unwinds past this call.
pub fn invoke(handler: &dyn MethodHandler, params: Params) -> HandlerOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.call(params))) {
        Ok(Ok(value)) => HandlerOutcome::Success(value),
        Ok(Err(MethodError::Declared { code, message })) => {
            HandlerOutcome::DeclaredError { code, message }
        }
        Ok(Err(MethodError::Fault(description))) => HandlerOutcome::UncaughtFault(description),
        Err(payload) => HandlerOutcome::UncaughtFault(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Route a validated request to its handler and build the response.
///
/// The response always echoes `request.id`. An unknown (or null) method
/// yields `MethodNotFound` with the standard message.
pub fn dispatch(registry: &MethodRegistry, request: ValidatedRequest) -> ResponseEnvelope {
    let ValidatedRequest { method, params, id } = request;

    let handler = method.as_deref().and_then(|name| registry.lookup(name));
    let Some(handler) = handler else {
        debug!(method = method.as_deref().unwrap_or("null"), id = %id, "Method not found");
        return ResponseEnvelope::error(id, ErrorObject::method_not_found());
    };

    let method = method.as_deref().unwrap_or_default();
    debug!(method, id = %id, params = params.len(), "Dispatching");

    let outcome = invoke(handler.as_ref(), params);
    match &outcome {
        HandlerOutcome::Success(_) => {}
        HandlerOutcome::DeclaredError { code, message } => {
            debug!(method, id = %id, code = code.code(), message = %message, "Handler declared an error");
        }
        HandlerOutcome::UncaughtFault(description) => {
            warn!(method, id = %id, fault = %description, "Handler fault");
        }
    }

    let (result, error) = outcome.into_parts();
    ResponseEnvelope::new(result, error, id)
}
