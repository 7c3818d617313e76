use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Display, Keypad, TitleBar};

/// Width of the calculator column; centered in wider terminals.
const PANEL_WIDTH: u16 = 36;

const HELP_TEXT: &str = " 0-9 . + - * / = Enter · Bksp ⌫ · % · n ± · Esc AC · q quit ";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub title: Rect,
    pub display: Rect,
    pub keypad: Rect,
    pub help: Rect,
}

/// Computes the layout. Used for drawing and for mouse hit testing, so a click
/// always lands on what was drawn.
pub fn areas(frame_area: Rect) -> Areas {
    use Constraint::{Fill, Length, Min};
    let [title, display_row, keypad_row, help] =
        Layout::vertical([Length(1), Length(4), Min(0), Length(1)]).areas(frame_area);

    let center = |row: Rect| {
        let [_, column, _] =
            Layout::horizontal([Fill(1), Length(PANEL_WIDTH), Fill(1)]).areas(row);
        column
    };

    Areas {
        title,
        display: center(display_row),
        keypad: center(keypad_row),
        help,
    }
}

pub fn draw_ui(frame: &mut Frame, tui: &TuiState, spinner_frame: usize) {
    let areas = areas(frame.area());
    let state = &tui.snapshot;

    let mut status_message = tui.status_message().to_string();
    if !status_message.is_empty() {
        status_message.push(' ');
        status_message.push_str(spinner(spinner_frame));
    }
    TitleBar::new(tui.backend.clone(), status_message, tui.error.clone()).render(frame, areas.title);

    Display {
        expression: &state.expression,
        value: &state.display,
    }
    .render(frame, areas.display);

    Keypad {
        state,
        loading: tui.is_loading(),
        calculating: tui.status.is_calculating(),
        clearing: tui.status.is_clearing(),
        spinner_frame,
        area: areas.keypad,
    }
    .render(frame, areas.keypad);

    frame.render_widget(
        Line::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)).centered(),
        areas.help,
    );
}

fn spinner(frame: usize) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    FRAMES[frame % FRAMES.len()]
}
