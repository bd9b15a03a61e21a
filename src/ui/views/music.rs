use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    audio::{playlist::Track, system::AudioSystem, transport::Transport},
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::ShellState,
        traits::{Action, View},
        util::{format_duration, get_active_track_icon},
    },
    util::colors,
};

pub const AUDIO_UNAVAILABLE: &str = "■ AUDIO UNAVAILABLE";

/// Now-playing card and playlist.
#[derive(Default)]
pub struct Music {
    cursor: usize,
}

impl Music {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent, track_count: usize) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Char('n') | KeyCode::Right => Some(Action::NextTrack),
            KeyCode::Char('p') | KeyCode::Left => Some(Action::PreviousTrack),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < track_count {
                    self.cursor += 1;
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Enter if self.cursor < track_count => Some(Action::SelectTrack(self.cursor)),
            _ => None,
        }
    }

    fn render_now_playing<T: Transport>(
        &self,
        f: &mut Frame,
        area: Rect,
        audio: &AudioSystem<T>,
    ) {
        let track = audio.current_track();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::SECONDARY))
            .title(" Now Playing ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [info_area, status_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).areas(inner);

        let info = Paragraph::new(vec![
            Line::styled(
                track.title,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                track.artist.to_uppercase(),
                Style::default().fg(colors::PRIMARY),
            ),
            Line::styled(
                format!("cover: {}", track.cover),
                Style::default().fg(colors::NEUTRAL),
            ),
        ]);
        f.render_widget(info, info_area);

        if audio.is_buffering() && audio.is_playing() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("BUFFERING");
            f.render_widget(spinner, status_area);
            return;
        }

        let mut lines = vec![status_line(audio)];
        if let Some(error) = audio.error() {
            lines.push(Line::styled(
                format!("! {error}"),
                Style::default().fg(colors::ERROR),
            ));
        }
        f.render_widget(Paragraph::new(lines), status_area);
    }

    fn render_playlist<T: Transport>(&self, f: &mut Frame, area: Rect, audio: &AudioSystem<T>) {
        let current = audio.current_index();
        let items: Vec<ListItem> = audio
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| playlist_item(track, i == current, audio.is_playing()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(" Playlist ")
                    .border_style(Style::default().fg(colors::NEUTRAL)),
            )
            .highlight_style(Style::default().bg(colors::CROSSES))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.cursor));
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn status_line<T: Transport>(audio: &AudioSystem<T>) -> Line<'static> {
    if !audio.is_available() {
        return Line::styled(AUDIO_UNAVAILABLE, Style::default().fg(colors::ERROR));
    }

    let (icon, label) = if audio.is_playing() {
        ("▶", "PLAYING")
    } else {
        ("❚❚", "PAUSED")
    };
    Line::from(vec![
        Span::styled(format!("{icon} {label}  "), Style::default().fg(colors::PRIMARY)),
        Span::styled(
            format_duration(audio.position()),
            Style::default().fg(colors::MUTED),
        ),
    ])
}

fn playlist_item(track: &Track, is_current: bool, is_playing: bool) -> ListItem<'static> {
    if is_current {
        ListItem::new(format!(
            "{} {} - {}",
            get_active_track_icon(is_playing),
            track.title,
            track.artist
        ))
        .style(
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ListItem::new(format!("  {} - {}", track.title, track.artist))
            .style(Style::default().fg(colors::MUTED))
    }
}

impl View for Music {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &ShellState, ctx: &AppContext) {
        let [now_playing_area, hints_area, playlist_area] = Layout::vertical([
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(area);

        let audio = &ctx.audio_system;
        self.render_now_playing(f, now_playing_area, audio);

        let hints = Line::from(vec![
            Span::styled("⏮ p", Style::default().fg(colors::MUTED)),
            Span::raw("   "),
            Span::styled("⏯ space", Style::default().fg(colors::PRIMARY)),
            Span::raw("   "),
            Span::styled("n ⏭", Style::default().fg(colors::MUTED)),
        ])
        .centered();
        f.render_widget(hints, hints_area);

        self.render_playlist(f, playlist_area, audio);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &ShellState,
        ctx: &AppContext,
    ) -> Option<Action> {
        self.handle_key(key, ctx.audio_system.tracks().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::unavailable::NoOutput;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_actions() {
        let mut music = Music::new();
        let cases = [
            (KeyCode::Char(' '), Action::TogglePlay),
            (KeyCode::Char('n'), Action::NextTrack),
            (KeyCode::Right, Action::NextTrack),
            (KeyCode::Char('p'), Action::PreviousTrack),
            (KeyCode::Left, Action::PreviousTrack),
        ];
        for (code, action) in cases {
            assert_eq!(music.handle_key(key(code), 3), Some(action));
        }
    }

    #[test]
    fn cursor_stays_in_playlist() {
        let mut music = Music::new();
        music.handle_key(key(KeyCode::Up), 3);
        assert_eq!(music.cursor(), 0);

        for _ in 0..5 {
            music.handle_key(key(KeyCode::Down), 3);
        }
        assert_eq!(music.cursor(), 2);
        assert_eq!(
            music.handle_key(key(KeyCode::Enter), 3),
            Some(Action::SelectTrack(2))
        );
    }

    #[test]
    fn unbound_keys_fall_through() {
        let mut music = Music::new();
        assert_eq!(music.handle_key(key(KeyCode::Char('q')), 3), None);
        assert_eq!(music.handle_key(key(KeyCode::Char('2')), 3), None);
    }

    #[test]
    fn missing_output_is_shown_as_unavailable() {
        let (tx, _rx) = flume::unbounded();
        let audio = AudioSystem::new(NoOutput::new("Audio unavailable: no device", tx));
        let line = status_line(&audio);
        assert_eq!(line.spans[0].content, AUDIO_UNAVAILABLE);
    }
}
