//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the calculator,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Threading
//!
//! ```text
//!  render loop ──Action──▶ session worker (tokio task, owns Calculator)
//!       ▲                        │ awaits remote calls in order
//!       └──────SessionUpdate─────┘
//! ```
//!
//! The render loop never touches the actor. It keeps the latest snapshot and
//! reads the shared `PendingStatus` to grey out the keypad while a call is in
//! flight.
//!
//! Local edits are also applied to the snapshot as soon as they are sent, so a
//! fast `5` then Backspace is gated against `"5"` and not the stale `"0"`.
//! Worker snapshots only replace it once no local edit is still queued.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (remote call in flight): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or worker updates.

mod component;
pub mod components;
pub mod event;
pub mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::Backend;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::{Calculator, SessionUpdate, run_worker};
use crate::core::state::DisplayState;
use crate::remote::{HttpActor, LocalActor, PendingStatus, RemoteClient};
use crate::tui::component::EventHandler;
use crate::tui::components::Keypad;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-side view of the session: the last snapshot plus progress flags.
pub struct TuiState {
    pub snapshot: DisplayState,
    pub backend: String,
    pub error: Option<String>,
    pub status: Arc<PendingStatus>,
    /// Remote actions sent to the worker but not yet acknowledged.
    pub queued_remote: usize,
    /// Local edits already applied to `snapshot` but not yet acknowledged.
    pub queued_local: usize,
}

impl TuiState {
    pub fn new(backend: String, status: Arc<PendingStatus>) -> Self {
        Self {
            snapshot: DisplayState::new(),
            backend,
            error: None,
            status,
            queued_remote: 0,
            queued_local: 0,
        }
    }

    /// Any remote exchange outstanding, including one still in the queue.
    pub fn is_loading(&self) -> bool {
        self.queued_remote > 0 || self.status.is_loading()
    }

    pub fn status_message(&self) -> &'static str {
        if self.status.is_clearing() {
            "Clearing…"
        } else if self.status.is_calculating() {
            "Calculating…"
        } else if self.is_loading() {
            "Sending…"
        } else {
            ""
        }
    }

    /// Records an action handed to the worker.
    pub fn sent(&mut self, action: Action) {
        if action.is_remote() {
            self.queued_remote += 1;
            return;
        }
        // Same pure transition the worker will run
        if update(&mut self.snapshot, action) != Effect::None {
            warn!("Local preview of {action:?} produced a remote effect");
        }
        self.queued_local += 1;
    }

    /// Folds a worker update into the view.
    pub fn apply(&mut self, update: SessionUpdate) {
        if update.action.is_remote() {
            self.queued_remote = self.queued_remote.saturating_sub(1);
            // A remote action settles the error line either way
            self.error = update.error.as_ref().map(ToString::to_string);
        } else {
            self.queued_local = self.queued_local.saturating_sub(1);
        }
        if self.queued_local == 0 {
            self.snapshot = update.state;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build a remote client from the resolved config.
///
/// A remote server that can't be reached yields a disconnected client, so the
/// UI still starts and every remote action reports the outage.
pub async fn build_client(config: &ResolvedConfig) -> (RemoteClient, Option<String>) {
    match config.backend {
        Backend::Local => (RemoteClient::new(Arc::new(LocalActor::new())), None),
        Backend::Remote => {
            match HttpActor::connect(&config.remote_base_url, config.remote_timeout).await {
                Ok(actor) => {
                    info!("Connected to {} (session {})", config.remote_base_url, actor.session_id());
                    (RemoteClient::new(Arc::new(actor)), None)
                }
                Err(e) => {
                    warn!("Could not open calculator session: {e}");
                    (RemoteClient::disconnected(), Some(e.to_string()))
                }
            }
        }
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (client, connect_error) = build_client(&config).await;

    let mut tui = TuiState::new(client.backend_name().to_string(), client.status());
    tui.error = connect_error;

    // Session worker: the only owner of the Calculator
    let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel::<Action>();
    let (update_tx, update_rx) = mpsc::channel::<SessionUpdate>();
    let worker = tokio::spawn(run_worker(Calculator::new(client), action_rx, update_tx));

    // The render loop blocks on terminal polling; keep it off the async workers
    let result = tokio::task::block_in_place(|| event_loop(&mut tui, &action_tx, &update_rx));

    drop(action_tx);
    if let Err(e) = worker.await {
        warn!("Session worker ended abnormally: {e}");
    }
    result
}

fn event_loop(
    tui: &mut TuiState,
    actions: &tokio::sync::mpsc::UnboundedSender<Action>,
    updates: &mpsc::Receiver<SessionUpdate>,
) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    let outcome = loop {
        let busy = tui.is_loading();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        let keypad_area = ui::areas(terminal.get_frame().area()).keypad;

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit | TuiEvent::InputChar('q') => {
                    should_quit = true;
                    break;
                }
                _ => {}
            }

            let mut keypad = Keypad {
                state: &tui.snapshot,
                loading: tui.is_loading(),
                calculating: false,
                clearing: false,
                spinner_frame: 0,
                area: keypad_area,
            };
            if let Some(action) = keypad.handle_event(&event) {
                if actions.send(action).is_err() {
                    warn!("Session worker gone; dropping {action:?}");
                    continue;
                }
                tui.sent(action);
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle worker updates
        while let Ok(update) = updates.try_recv() {
            needs_redraw = true;
            tui.apply(update);
        }
    };

    ratatui::restore();
    outcome
}
