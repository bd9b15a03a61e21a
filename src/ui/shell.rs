use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders},
};
use tracing::debug;

use crate::{
    event::events::Event,
    ui::{
        components::{
            background::Background,
            sidebar::{BRAND, Sidebar},
        },
        context::AppContext,
        state::{ShellState, Tab},
        traits::{Action, View},
        views::{Music, Search, Settings},
    },
    util::colors,
};

const SIDEBAR_WIDTH: u16 = 26;

/// Owns the three panels and the shell state (active tab, theme).
///
/// Panels live as long as the shell, so switching tabs keeps the search
/// answer and the playlist cursor where they were.
#[derive(Default)]
pub struct Shell {
    state: ShellState,
    search: Search,
    music: Music,
    settings: Settings,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    fn active_view(&mut self) -> &mut dyn View {
        match self.state.active_tab {
            Tab::Search => &mut self.search,
            Tab::Music => &mut self.music,
            Tab::Settings => &mut self.settings,
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.state.active_tab != tab {
            debug!(from = ?self.state.active_tab, to = ?tab, "tab_switched");
            self.state.active_tab = tab;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        debug!(theme = ?self.state.theme, "theme_toggled");
    }

    /// Applies shell-level actions and hands every other one back.
    pub fn apply(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::SwitchTab(tab) => self.switch_tab(tab),
            Action::ToggleTheme => self.toggle_theme(),
            Action::None => {}
            other => return Some(other),
        }
        None
    }

    /// Tab cycling first, then the active panel. `None` means nobody
    /// consumed the key.
    pub fn handle_input(&mut self, key: KeyEvent, ctx: &AppContext) -> Option<Action> {
        match key.code {
            KeyCode::Tab => return Some(Action::SwitchTab(self.state.active_tab.next())),
            KeyCode::BackTab => return Some(Action::SwitchTab(self.state.active_tab.prev())),
            _ => {}
        }
        let state = self.state;
        self.active_view().handle_input(key, &state, ctx)
    }

    pub fn on_event(&mut self, event: &Event) {
        self.search.on_event(event);
        self.music.on_event(event);
        self.settings.on_event(event);
    }

    pub fn on_paste(&mut self, text: &str) {
        self.active_view().on_paste(text);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, ctx: &AppContext) {
        f.render_widget(Background::new(self.state.theme), area);

        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .areas(area);

        let sidebar_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::SECONDARY))
            .title(BRAND)
            .title_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .title_alignment(Alignment::Center);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title(format!(" {} ", self.state.active_tab.label()));

        let sidebar_inner = sidebar_block.inner(sidebar_area);
        let content_inner = content_block.inner(content_area);

        f.render_widget(sidebar_block, sidebar_area);
        f.render_widget(content_block, content_area);
        f.render_widget(Sidebar::new(self.state.active_tab), sidebar_inner);

        let state = self.state;
        self.active_view().render(f, content_inner, &state, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::Theme;

    #[test]
    fn theme_toggle_twice_restores() {
        let mut shell = Shell::new();
        assert_eq!(shell.apply(Action::ToggleTheme), None);
        assert_eq!(shell.state().theme, Theme::Crosses);
        shell.apply(Action::ToggleTheme);
        assert_eq!(shell.state().theme, Theme::Default);
    }

    #[test]
    fn switch_tab_changes_only_the_tab() {
        let mut shell = Shell::new();
        shell.apply(Action::SwitchTab(Tab::Settings));
        assert_eq!(shell.state().active_tab, Tab::Settings);
        assert_eq!(shell.state().theme, Theme::Default);
    }

    #[test]
    fn non_shell_actions_are_returned() {
        let mut shell = Shell::new();
        assert_eq!(shell.apply(Action::NextTrack), Some(Action::NextTrack));
        assert_eq!(shell.apply(Action::Quit), Some(Action::Quit));
        assert_eq!(shell.apply(Action::None), None);
    }

    #[test]
    fn search_result_reaches_panel_while_another_tab_is_active() {
        let mut shell = Shell::new();
        shell.on_paste("slope");
        let request = shell.search.submit().unwrap();
        shell.switch_tab(Tab::Music);

        shell.on_event(&Event::SearchCompleted {
            generation: request.generation,
            result: crate::http::SearchResult::failed(),
        });
        assert!(!shell.search().is_loading());
        assert!(shell.search().result().is_some());
    }
}
