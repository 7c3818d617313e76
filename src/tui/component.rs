//! Seams between the render loop and the pieces it draws.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something drawn into one region of the calculator screen.
///
/// Props are plain struct fields borrowed from the latest `DisplayState`
/// snapshot, so a component is rebuilt for every frame and holds nothing
/// between them.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns terminal input into something the session
/// understands. `None` means the event is not for this component, or is
/// currently disabled.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
