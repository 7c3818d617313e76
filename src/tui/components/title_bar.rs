//! # TitleBar Component
//!
//! Top status bar showing which backend is in use and what it is doing.
//!
//! ## Conditional Formatting
//!
//! 1. **Error**: `"Abacus (backend: remote) | ✗ calculate failed: HTTP 500"`
//! 2. **Status message**: `"Abacus (backend: remote) | Calculating… ◐"`
//! 3. **Default**: `"Abacus (backend: remote)"`
//!
//! A pending call outranks a stale error: once the user tries again, the bar
//! shows progress instead of the previous failure.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Backend label (e.g., "local", "remote", "offline")
    pub backend: String,
    /// Transient status (e.g., "Calculating…")
    pub status_message: String,
    /// Last remote error, if the most recent action failed
    pub error: Option<String>,
}

impl TitleBar {
    pub fn new(backend: String, status_message: String, error: Option<String>) -> Self {
        Self {
            backend,
            status_message,
            error,
        }
    }

    fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = vec![Span::raw(format!("Abacus (backend: {})", self.backend))];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        } else if let Some(error) = &self.error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("✗ {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        spans
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
