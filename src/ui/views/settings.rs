use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{
        context::AppContext,
        state::{ShellState, Theme},
        traits::{Action, View},
    },
    util::colors,
};

pub const VERSION_FOOTER: &str = concat!("Spirit Labs v", env!("CARGO_PKG_VERSION"));

#[derive(Default)]
pub struct Settings;

impl Settings {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleTheme),
            _ => None,
        }
    }
}

fn switch(on: bool) -> Span<'static> {
    if on {
        Span::styled(
            "[   ●]",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[●   ]", Style::default().fg(colors::NEUTRAL))
    }
}

fn row(label: &'static str, description: &'static str, on: bool) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            switch(on),
            Span::raw("  "),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::styled(
            format!("        {description}"),
            Style::default().fg(colors::MUTED),
        ),
        Line::default(),
    ]
}

impl View for Settings {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &ShellState, _ctx: &AppContext) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        f.render_widget(
            Paragraph::new(vec![
                Line::styled(
                    "Settings",
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::styled(
                    "Customize your experience.",
                    Style::default().fg(colors::MUTED),
                ),
            ]),
            header_area,
        );

        let mut lines = row("Neon Accents", "Always on.", true);
        lines.extend(row(
            "Crosses Background",
            "Draw a grid of crosses behind the content. Enter/Space toggles.",
            state.theme == Theme::Crosses,
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::SECONDARY))
            .title(" Appearance ");
        f.render_widget(Paragraph::new(lines).block(block), body_area);

        f.render_widget(
            Line::styled(VERSION_FOOTER, Style::default().fg(colors::NEUTRAL)).centered(),
            footer_area,
        );
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &ShellState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        self.handle_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_toggle_theme() {
        let mut settings = Settings::new();
        for code in [KeyCode::Enter, KeyCode::Char(' ')] {
            assert_eq!(
                settings.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(Action::ToggleTheme)
            );
        }
    }

    #[test]
    fn other_keys_fall_through() {
        let mut settings = Settings::new();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(settings.handle_key(q), None);
    }

    #[test]
    fn footer_carries_version() {
        assert!(VERSION_FOOTER.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
