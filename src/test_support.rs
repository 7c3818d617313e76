//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::core::action::{Action, Digit};
use crate::core::operation::OperationKind;
use crate::core::session::Calculator;
use crate::remote::{CalculatorActor, RemoteClient, RemoteError};

/// One call as seen by a `RecordingActor`.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Submit(f64),
    Calculate(OperationKind),
    Clear,
}

impl RemoteCall {
    fn operation(&self) -> &'static str {
        match self {
            RemoteCall::Submit(_) => "submit",
            RemoteCall::Calculate(_) => "calculate",
            RemoteCall::Clear => "clear",
        }
    }
}

/// Records every call and answers `calculate` from a queue of scripted results.
#[derive(Default)]
pub struct RecordingActor {
    calls: Mutex<Vec<RemoteCall>>,
    results: Mutex<VecDeque<f64>>,
    /// (calls to let through first, message)
    failure: Mutex<Option<(usize, String)>>,
}

impl RecordingActor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Queue a result for the next `calculate`. Unscripted calls return 0.
    pub fn push_result(&self, result: f64) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Make the very next call fail.
    pub fn fail_next(&self, message: &str) {
        self.fail_after(0, message);
    }

    /// Let `successes` calls through, then fail one.
    pub fn fail_after(&self, successes: usize, message: &str) {
        *self.failure.lock().unwrap() = Some((successes, message.to_string()));
    }

    fn record(&self, call: RemoteCall) -> Result<(), RemoteError> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        let mut failure = self.failure.lock().unwrap();
        match failure.take() {
            Some((0, message)) => Err(RemoteError::call_failed(operation, message)),
            Some((n, message)) => {
                *failure = Some((n - 1, message));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CalculatorActor for RecordingActor {
    fn name(&self) -> &str {
        "recording"
    }

    async fn submit_number(&self, value: f64) -> Result<(), RemoteError> {
        self.record(RemoteCall::Submit(value))
    }

    async fn calculate(&self, operation: OperationKind) -> Result<f64, RemoteError> {
        self.record(RemoteCall::Calculate(operation))?;
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn clear(&self) -> Result<(), RemoteError> {
        self.record(RemoteCall::Clear)
    }
}

/// An actor whose `calculate` parks until the returned `Notify` fires.
pub struct GatedActor {
    result: f64,
    gate: Arc<Notify>,
}

impl GatedActor {
    pub fn new(result: f64) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                result,
                gate: Arc::clone(&gate),
            },
            gate,
        )
    }
}

#[async_trait]
impl CalculatorActor for GatedActor {
    fn name(&self) -> &str {
        "gated"
    }

    async fn submit_number(&self, _value: f64) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn calculate(&self, _operation: OperationKind) -> Result<f64, RemoteError> {
        self.gate.notified().await;
        Ok(self.result)
    }

    async fn clear(&self) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// Creates a Calculator backed by a fresh RecordingActor.
pub fn recording_calculator() -> (Calculator, Arc<RecordingActor>) {
    let actor = Arc::new(RecordingActor::new());
    let calculator = Calculator::new(RemoteClient::new(actor.clone()));
    (calculator, actor)
}

/// Map a compact key string onto actions.
///
/// `0-9 .` digits and point, `+ - * /` operators, `=` equals, `C` clear,
/// `<` backspace, `~` sign, `%` percent.
pub fn key_action(c: char) -> Action {
    match c {
        '.' => Action::Decimal,
        '<' => Action::Backspace,
        '~' => Action::ToggleSign,
        '%' => Action::Percentage,
        '+' => Action::Operator(OperationKind::Add),
        '-' => Action::Operator(OperationKind::Subtract),
        '*' => Action::Operator(OperationKind::Multiply),
        '/' => Action::Operator(OperationKind::Divide),
        '=' => Action::Equals,
        'C' => Action::Clear,
        _ => Action::Digit(Digit::from_char(c).expect("unknown test key")),
    }
}

/// Press every key in order, stopping at the first remote error.
pub async fn press(calculator: &mut Calculator, keys: &str) -> Result<(), RemoteError> {
    for c in keys.chars() {
        calculator.dispatch(key_action(c)).await?;
    }
    Ok(())
}
