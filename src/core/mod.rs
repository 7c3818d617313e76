//! # Core Application Logic
//!
//! The calculator's interaction state machine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • DisplayState         │
//!                    │  • Action (key presses) │
//!                    │  • update() / commit_*  │
//!                    │  • Calculator session   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Remote   │
//!     │  Adapter   │                          │   Client   │
//!     │ (ratatui)  │                          │ (actor)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `DisplayState` and the `Phase` of the input cycle
//! - [`action`]: the `Action` enum and the pure transitions
//! - [`session`]: `Calculator`, which runs remote plans against the actor
//! - [`numeral`]: parsing and rendering of the value line
//! - [`operation`]: the four operations and their glyphs
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod numeral;
pub mod operation;
pub mod session;
pub mod state;
