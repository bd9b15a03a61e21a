use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    event::events::Event,
    ui::{
        context::AppContext,
        state::{ShellState, Tab},
        views::search::SearchRequest,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchTab(Tab),
    ToggleTheme,
    Search(SearchRequest),
    TogglePlay,
    NextTrack,
    PreviousTrack,
    SelectTrack(usize),
    /// The key was consumed and nothing else needs to happen.
    None,
}

/// A panel rendered in the content area.
///
/// `handle_input` returns `None` when the key was not consumed, letting the
/// global key bindings see it.
pub trait View {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &ShellState, ctx: &AppContext);
    fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &ShellState,
        ctx: &AppContext,
    ) -> Option<Action>;
    fn on_event(&mut self, _event: &Event) {}
    fn on_paste(&mut self, _text: &str) {}
}
