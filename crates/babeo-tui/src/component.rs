//! Component trait: the interface every page and panel implements.
//!
//! Design principles:
//! - Components own their view-only state (cursor position, input widget).
//! - Components receive `AppState` (read-only) for everything else.
//! - Components produce `Vec<Action>` and never mutate shared state directly.
//! - The App event-loop applies those actions to the controllers it owns.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event. Returns actions to be applied.
    /// Only called when this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Observe an action after the App applied it.
    fn on_action(&mut self, _action: &Action, _state: &AppState) {}

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
