//! # Local Actor
//!
//! In-process stand-in for the remote calculator. Keeps the last two
//! submitted numbers in a pair of registers:
//!
//! ```text
//! submit(n):      lhs ← rhs, rhs ← n
//! calculate(op):  rhs ← lhs op rhs   (just rhs when lhs is empty), lhs ← empty
//!                 on failure: rhs ← lhs, lhs ← empty (the last submit is undone)
//! clear():        lhs ← empty, rhs ← empty
//! ```
//!
//! That is enough for the keypad's call pattern: `7 + 3 =` submits 7 and 3,
//! then applies `add` to get 10.

use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use crate::core::operation::OperationKind;
use crate::remote::actor::{CalculatorActor, RemoteError};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Registers {
    lhs: Option<f64>,
    rhs: Option<f64>,
}

#[derive(Debug, Default)]
pub struct LocalActor {
    registers: Mutex<Registers>,
}

impl LocalActor {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_registers<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Registers) -> Result<T, RemoteError>,
    ) -> Result<T, RemoteError> {
        let mut registers = self
            .registers
            .lock()
            .map_err(|_| RemoteError::call_failed(operation, "register lock poisoned"))?;
        f(&mut registers)
    }
}

fn apply(operation: OperationKind, a: f64, b: f64) -> Result<f64, RemoteError> {
    match operation {
        OperationKind::Add => Ok(a + b),
        OperationKind::Subtract => Ok(a - b),
        OperationKind::Multiply => Ok(a * b),
        OperationKind::Divide => {
            if b == 0.0 {
                return Err(RemoteError::call_failed("calculate", "Division by zero"));
            }
            Ok(a / b)
        }
    }
}

#[async_trait]
impl CalculatorActor for LocalActor {
    fn name(&self) -> &str {
        "local"
    }

    async fn submit_number(&self, value: f64) -> Result<(), RemoteError> {
        self.with_registers("submit", |r| {
            r.lhs = r.rhs.take();
            r.rhs = Some(value);
            debug!("local actor registers: {r:?}");
            Ok(())
        })
    }

    async fn calculate(&self, operation: OperationKind) -> Result<f64, RemoteError> {
        self.with_registers("calculate", |r| {
            let rhs = r
                .rhs
                .ok_or_else(|| RemoteError::call_failed("calculate", "no operand submitted"))?;
            let result = match r.lhs {
                Some(lhs) => match apply(operation, lhs, rhs) {
                    Ok(result) => result,
                    Err(e) => {
                        // Undo the submit that fed the failed operand
                        r.rhs = r.lhs.take();
                        debug!("local actor registers rolled back: {r:?}");
                        return Err(e);
                    }
                },
                None => rhs,
            };
            r.lhs = None;
            r.rhs = Some(result);
            Ok(result)
        })
    }

    async fn clear(&self) -> Result<(), RemoteError> {
        self.with_registers("clear", |r| {
            *r = Registers::default();
            Ok(())
        })
    }
}
