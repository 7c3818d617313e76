//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing backend, progress, and errors
//! - `Display`: the two-line expression/value panel
//!
//! ### Event-Driven Components
//!
//! - `Keypad`: the button grid; turns keys and clicks into core `Action`s
//!
//! Components receive external data as "props" (struct fields), never by
//! reaching into global state:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! Display { expression: &state.expression, value: &state.display }.render(frame, area);
//! ```

mod display;
pub mod keypad;
mod title_bar;

pub use display::Display;
pub use keypad::Keypad;
pub use title_bar::TitleBar;
