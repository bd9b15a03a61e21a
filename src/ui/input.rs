use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{state::Tab, traits::Action};

/// Bindings that apply when the active panel did not consume the key.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) => Some(Action::Quit),
            (KeyCode::Char(c @ '1'..='9'), _) => c
                .to_digit(10)
                .and_then(|d| Tab::from_index(d as usize - 1))
                .map(Action::SwitchTab),
            _ => None,
        }
    }
}
