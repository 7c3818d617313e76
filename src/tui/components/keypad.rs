//! # Keypad Component
//!
//! The button grid, laid out like a phone calculator:
//!
//! ```text
//! ┌────┬────┬────┬────┐
//! │ AC │ ⌫  │ %  │ ÷  │
//! │ 7  │ 8  │ 9  │ ×  │
//! │ 4  │ 5  │ 6  │ −  │
//! │ 1  │ 2  │ 3  │ +  │
//! │ ±  │    0    │ .  │
//! │         =         │
//! └───────────────────┘
//! ```
//!
//! Every button maps to exactly one core `Action`. Keyboard input and mouse
//! clicks both go through `handle_event`, which drops anything that lands on a
//! disabled button. Disabled means: any remote call in flight, `⌫` while the
//! display is `0`, `=` with no pending operation.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::action::{Action, Digit};
use crate::core::operation::OperationKind;
use crate::core::state::DisplayState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    /// Relative width within its row.
    pub span: u16,
}

const fn button(label: &'static str, action: Action) -> Button {
    Button {
        label,
        action,
        span: 1,
    }
}

fn digit(d: usize) -> Button {
    let digit = Digit::ALL[d];
    let label = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"][d];
    button(label, Action::Digit(digit))
}

fn operator(op: OperationKind) -> Button {
    button(op.symbol(), Action::Operator(op))
}

/// The grid, top row first.
pub fn rows() -> Vec<Vec<Button>> {
    vec![
        vec![
            button("AC", Action::Clear),
            button("⌫", Action::Backspace),
            button("%", Action::Percentage),
            operator(OperationKind::Divide),
        ],
        vec![digit(7), digit(8), digit(9), operator(OperationKind::Multiply)],
        vec![digit(4), digit(5), digit(6), operator(OperationKind::Subtract)],
        vec![digit(1), digit(2), digit(3), operator(OperationKind::Add)],
        vec![
            button("±", Action::ToggleSign),
            Button {
                span: 2,
                ..digit(0)
            },
            button(".", Action::Decimal),
        ],
        vec![Button {
            span: 4,
            ..button("=", Action::Equals)
        }],
    ]
}

/// Screen rectangle of every button for a keypad drawn in `area`.
///
/// Shared by rendering and hit testing so the two can never disagree.
pub fn button_areas(area: Rect) -> Vec<(Rect, Button)> {
    let rows = rows();
    let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows.len()]).split(area);

    let mut areas = Vec::with_capacity(20);
    for (row, row_area) in rows.into_iter().zip(row_areas.iter()) {
        let cells = Layout::horizontal(row.iter().map(|b| Constraint::Fill(b.span))).split(*row_area);
        areas.extend(cells.iter().copied().zip(row));
    }
    areas
}

/// Which button, if any, sits under the given screen cell.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Button> {
    let position = Position::new(column, row);
    button_areas(area)
        .into_iter()
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, button)| button)
}

/// Keyboard shortcut for each action.
pub fn action_for_key(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar(c) => match c {
            '0'..='9' => Digit::from_char(*c).map(Action::Digit),
            '.' | ',' => Some(Action::Decimal),
            '+' => Some(Action::Operator(OperationKind::Add)),
            '-' => Some(Action::Operator(OperationKind::Subtract)),
            '*' | 'x' | 'X' => Some(Action::Operator(OperationKind::Multiply)),
            '/' => Some(Action::Operator(OperationKind::Divide)),
            '=' => Some(Action::Equals),
            '%' => Some(Action::Percentage),
            'n' | '_' => Some(Action::ToggleSign),
            'c' | 'C' => Some(Action::Clear),
            _ => None,
        },
        TuiEvent::Backspace => Some(Action::Backspace),
        TuiEvent::Submit => Some(Action::Equals),
        TuiEvent::Escape | TuiEvent::Delete => Some(Action::Clear),
        _ => None,
    }
}

/// Whether the button for `action` accepts input right now.
pub fn is_enabled(action: Action, state: &DisplayState, loading: bool) -> bool {
    if loading {
        return false;
    }
    match action {
        Action::Backspace => state.display != "0",
        Action::Equals => state.operation.is_some(),
        _ => true,
    }
}

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Props for one frame of the keypad.
pub struct Keypad<'a> {
    pub state: &'a DisplayState,
    /// Any remote call in flight.
    pub loading: bool,
    pub calculating: bool,
    pub clearing: bool,
    pub spinner_frame: usize,
    /// Where the keypad was laid out; used for click hit testing.
    pub area: Rect,
}

impl Keypad<'_> {
    fn label(&self, button: &Button) -> &'static str {
        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        match button.action {
            Action::Equals if self.calculating => spinner,
            Action::Clear if self.clearing => spinner,
            _ => button.label,
        }
    }

    fn style(&self, button: &Button) -> Style {
        if !is_enabled(button.action, self.state, self.loading) {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);
        }
        match button.action {
            Action::Operator(op) if self.state.highlighted_operation() == Some(op) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Action::Operator(_) => Style::default().fg(Color::Yellow),
            Action::Equals => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Action::Clear | Action::Backspace | Action::Percentage => {
                Style::default().fg(Color::Cyan)
            }
            _ => Style::default().fg(Color::White),
        }
    }
}

impl Component for Keypad<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        for (rect, button) in button_areas(area) {
            let style = self.style(&button);
            // Vertically center the label inside the bordered cell
            let pad = rect.height.saturating_sub(3) / 2;
            let mut lines = vec![""; pad as usize];
            lines.push(self.label(&button));
            let cell = Paragraph::new(lines.join("\n"))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered().border_style(style));
            frame.render_widget(cell, rect);
        }
    }
}

impl EventHandler for Keypad<'_> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        let action = match event {
            TuiEvent::MouseClick(column, row) => hit_test(self.area, *column, *row)?.action,
            other => action_for_key(other)?,
        };
        if is_enabled(action, self.state, self.loading) {
            Some(action)
        } else {
            log::debug!("Dropping {action:?}: button disabled");
            None
        }
    }
}
