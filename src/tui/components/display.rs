//! # Display Component
//!
//! Two right-aligned lines in a bordered panel: the expression line on top
//! (dim) and the current value below (bold). Both are stateless props.
//!
//! Text wider than the panel keeps its tail, which is the part the user is
//! editing, and gains a leading `…`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

/// Keeps the expression line's height when it is empty.
const BLANK: &str = "\u{00A0}";

pub struct Display<'a> {
    pub expression: &'a str,
    pub value: &'a str,
}

impl Component for Display<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;

        let expression = if self.expression.is_empty() {
            BLANK.to_string()
        } else {
            truncate_left(self.expression, width)
        };
        let value = truncate_left(self.value, width);

        let lines = vec![
            Line::styled(expression, Style::default().fg(Color::DarkGray)),
            Line::styled(
                value,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(panel, area);
    }
}

/// Shorten `text` to `max_width` columns, dropping from the front.
pub fn truncate_left(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis
    let budget = max_width - 1;
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    format!("…{}", &text[start..])
}
