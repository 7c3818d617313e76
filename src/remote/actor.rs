use std::fmt;

use async_trait::async_trait;

use crate::core::operation::OperationKind;

/// Errors that can occur while talking to the calculator actor.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// No session is established (actor not connected). Not retryable.
    Unavailable,
    /// The actor or the transport rejected the call.
    CallFailed {
        operation: &'static str,
        message: String,
    },
}

impl RemoteError {
    pub fn call_failed(operation: &'static str, message: impl Into<String>) -> Self {
        RemoteError::CallFailed {
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Unavailable => write!(f, "calculator unavailable: no active session"),
            RemoteError::CallFailed { operation, message } => {
                write!(f, "{operation} failed: {message}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// The remote stateful calculator.
///
/// The actor holds an accumulator that `submit_number` and `calculate` mutate
/// in place, with no request ordering of its own: callers must await each call
/// before issuing the next.
#[async_trait]
pub trait CalculatorActor: Send + Sync {
    /// Short label for the status bar and logs.
    fn name(&self) -> &str;

    async fn submit_number(&self, value: f64) -> Result<(), RemoteError>;

    /// Applies `operation` to the accumulator and returns the new value.
    async fn calculate(&self, operation: OperationKind) -> Result<f64, RemoteError>;

    async fn clear(&self) -> Result<(), RemoteError>;
}
