//! # Calculator Session
//!
//! Glues the pure state machine to the remote client. One `Calculator` per
//! UI instance; it owns the `DisplayState` and the only handle to the actor.
//!
//! `dispatch` takes `&mut self`, so two actions on the same session can never
//! interleave. The TUI goes one step further and funnels every action through
//! `run_worker`, a single task that processes a channel in order.
//!
//! Remote calls within one action are awaited one after another. The actor
//! mutates its accumulator in place, so `submit_number` must land before
//! `calculate` is issued.

use std::sync::{Arc, mpsc};

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::core::action::{
    Action, Effect, RemotePlan, commit_equals, commit_operator, reset, update,
};
use crate::core::state::DisplayState;
use crate::remote::{PendingStatus, RemoteClient, RemoteError};

pub struct Calculator {
    state: DisplayState,
    remote: RemoteClient,
}

impl Calculator {
    pub fn new(remote: RemoteClient) -> Self {
        Self {
            state: DisplayState::new(),
            remote,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    pub fn status(&self) -> Arc<PendingStatus> {
        self.remote.status()
    }

    /// Runs one action to completion.
    ///
    /// On a remote failure the local state is left as it was before the
    /// action, except for `Clear`, which always resets and still reports the
    /// error.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), RemoteError> {
        match update(&mut self.state, action) {
            Effect::None => Ok(()),
            Effect::Remote(plan) => {
                debug!("Running remote plan: {plan:?}");
                self.run(plan).await
            }
        }
    }

    async fn run(&mut self, plan: RemotePlan) -> Result<(), RemoteError> {
        match plan {
            RemotePlan::Operator { value, chain, next } => {
                self.remote.submit_number(value).await?;
                let chained = match chain {
                    Some(previous) => Some(self.remote.apply_operation(previous).await?),
                    None => None,
                };
                commit_operator(&mut self.state, next, chained);
                Ok(())
            }
            RemotePlan::Equals { value, operation } => {
                self.remote.submit_number(value).await?;
                let result = self.remote.apply_operation(operation).await?;
                commit_equals(&mut self.state, result);
                Ok(())
            }
            RemotePlan::Clear => {
                let outcome = self.remote.clear().await;
                if let Err(e) = &outcome {
                    warn!("Remote clear failed, resetting display anyway: {e}");
                }
                reset(&mut self.state);
                outcome
            }
        }
    }
}

/// Snapshot sent back to the render loop after every action.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub action: Action,
    pub state: DisplayState,
    pub error: Option<RemoteError>,
}

/// Single-flight queue: processes actions strictly in arrival order until the
/// sender side is dropped or the receiver of updates goes away.
pub async fn run_worker(
    mut calculator: Calculator,
    mut actions: UnboundedReceiver<Action>,
    updates: mpsc::Sender<SessionUpdate>,
) {
    info!(
        "Session worker started (backend: {})",
        calculator.remote().backend_name()
    );
    while let Some(action) = actions.recv().await {
        debug!("Worker received: {action:?}");
        let error = calculator.dispatch(action).await.err();
        if let Some(e) = &error {
            warn!("{action:?} failed: {e}");
        }
        let update = SessionUpdate {
            action,
            state: calculator.state().clone(),
            error,
        };
        if updates.send(update).is_err() {
            warn!("Failed to send session update: receiver dropped");
            break;
        }
    }
    info!("Session worker stopped");
}
