//! # Remote Calculator Client
//!
//! Thin proxy over a `CalculatorActor`. Adds two things the actor itself
//! doesn't know about:
//!
//! - **Session presence.** With no actor attached every call fails with
//!   `RemoteError::Unavailable` instead of being silently dropped.
//! - **Pending status.** One flag per operation kind, raised for the lifetime
//!   of the call. The render loop reads them through a shared `PendingStatus`
//!   to disable the keypad while a call is in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::core::operation::OperationKind;
use crate::remote::actor::{CalculatorActor, RemoteError};

/// In-flight flags shared between the session worker and the render loop.
#[derive(Debug, Default)]
pub struct PendingStatus {
    submitting: AtomicBool,
    calculating: AtomicBool,
    clearing: AtomicBool,
}

impl PendingStatus {
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::Acquire)
    }

    pub fn is_clearing(&self) -> bool {
        self.clearing.load(Ordering::Acquire)
    }

    /// True while any remote call is pending.
    pub fn is_loading(&self) -> bool {
        self.is_submitting() || self.is_calculating() || self.is_clearing()
    }
}

/// Raises a pending flag and lowers it on drop, including on early return or
/// when the call future is dropped mid-flight.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn raise(flag: &'a AtomicBool, operation: &str) -> Self {
        if flag.swap(true, Ordering::AcqRel) {
            warn!("Overlapping {operation} call: previous one still pending");
        }
        Self { flag }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct RemoteClient {
    actor: Option<Arc<dyn CalculatorActor>>,
    status: Arc<PendingStatus>,
}

impl RemoteClient {
    pub fn new(actor: Arc<dyn CalculatorActor>) -> Self {
        Self {
            actor: Some(actor),
            status: Arc::new(PendingStatus::default()),
        }
    }

    /// A client with no session. Every call reports `Unavailable`.
    pub fn disconnected() -> Self {
        Self {
            actor: None,
            status: Arc::new(PendingStatus::default()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.actor.is_some()
    }

    pub fn backend_name(&self) -> &str {
        self.actor.as_deref().map_or("offline", |actor| actor.name())
    }

    pub fn status(&self) -> Arc<PendingStatus> {
        Arc::clone(&self.status)
    }

    fn actor(&self) -> Result<&Arc<dyn CalculatorActor>, RemoteError> {
        self.actor.as_ref().ok_or(RemoteError::Unavailable)
    }

    pub async fn submit_number(&self, value: f64) -> Result<(), RemoteError> {
        let actor = self.actor()?;
        let _pending = PendingGuard::raise(&self.status.submitting, "submit");
        debug!("submit_number({value}) via {}", actor.name());
        actor.submit_number(value).await
    }

    /// Applies `operation` on the actor and returns the new accumulator value.
    pub async fn apply_operation(&self, operation: OperationKind) -> Result<f64, RemoteError> {
        let actor = self.actor()?;
        let _pending = PendingGuard::raise(&self.status.calculating, "calculate");
        debug!("calculate({operation}) via {}", actor.name());
        let result = actor.calculate(operation).await?;
        debug!("calculate({operation}) = {result}");
        Ok(result)
    }

    pub async fn clear(&self) -> Result<(), RemoteError> {
        let actor = self.actor()?;
        let _pending = PendingGuard::raise(&self.status.clearing, "clear");
        debug!("clear() via {}", actor.name());
        actor.clear().await
    }
}
