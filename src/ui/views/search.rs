use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::{
    event::events::Event,
    http::SearchResult,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::ShellState,
        traits::{Action, View},
    },
    util::colors,
};

pub const SUGGESTIONS: [&str; 4] = [
    "Best unblocked games 2024",
    "How to play Slope unblocked",
    "Spirit Labs features",
    "Cool math games",
];

const PLACEHOLDER: &str = "Search for games, proxies, or anything...";
const PAGE: u16 = 10;
pub const MAX_QUERY_CHARS: usize = 4096;

/// A search the panel wants run. `generation` identifies the answer it
/// is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Default)]
pub struct Search {
    input: String,
    loading: bool,
    result: Option<SearchResult>,
    generation: u64,
    suggestion: Option<usize>,
    scroll: u16,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.suggestion
    }

    /// Starts a search for the trimmed input. Blank input and submits while a
    /// search is in flight do nothing.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if self.loading {
            return None;
        }
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.suggestion = None;
        self.scroll = 0;
        debug!(generation = self.generation, "search_submitted");
        Some(SearchRequest {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Copies a suggestion into the input without submitting it.
    pub fn apply_suggestion(&mut self, index: usize) {
        if let Some(text) = SUGGESTIONS.get(index) {
            self.input = text.to_string();
            self.suggestion = None;
        }
    }

    /// Returns `false` when the answer is for a search that is no longer the
    /// one being waited on.
    pub fn complete(&mut self, generation: u64, result: SearchResult) -> bool {
        if !self.loading || generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "stale_search_result_discarded"
            );
            return false;
        }
        self.result = Some(result);
        self.loading = false;
        self.scroll = 0;
        true
    }

    /// Appends pasted text, dropping control characters and anything past
    /// [`MAX_QUERY_CHARS`].
    pub fn insert_str(&mut self, text: &str) {
        let room = MAX_QUERY_CHARS.saturating_sub(self.input.chars().count());
        self.input
            .extend(text.chars().filter(|c| !c.is_control()).take(room));
        self.suggestion = None;
    }

    fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_QUERY_CHARS {
            self.input.push(c);
        }
        self.suggestion = None;
    }

    fn suggestions_visible(&self) -> bool {
        !self.loading && self.result.is_none()
    }

    fn move_highlight(&mut self, down: bool) {
        let last = SUGGESTIONS.len() - 1;
        self.suggestion = match (self.suggestion, down) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
            (Some(i), true) => Some((i + 1).min(last)),
        };
    }

    /// Key handling for the panel. Every key except Ctrl-modified ones is
    /// consumed so typing never triggers global bindings.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                if let Some(index) = self.suggestion.filter(|_| self.suggestions_visible()) {
                    self.apply_suggestion(index);
                    return Some(Action::None);
                }
                Some(
                    self.submit()
                        .map(Action::Search)
                        .unwrap_or(Action::None),
                )
            }
            KeyCode::Down if self.suggestions_visible() => {
                self.move_highlight(true);
                Some(Action::None)
            }
            KeyCode::Up if self.suggestions_visible() => {
                self.move_highlight(false);
                Some(Action::None)
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Some(Action::None)
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE);
                Some(Action::None)
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                Some(Action::None)
            }
            KeyCode::Esc => {
                self.suggestion = None;
                Some(Action::None)
            }
            KeyCode::Backspace => {
                self.input.pop();
                Some(Action::None)
            }
            KeyCode::Char(c) => {
                self.push_char(c);
                Some(Action::None)
            }
            _ => None,
        }
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let button = if self.loading {
            Span::styled(" Thinking... ", Style::default().fg(colors::MUTED))
        } else {
            Span::styled(
                " Search ",
                Style::default()
                    .fg(colors::BACKGROUND)
                    .bg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::SECONDARY))
            .title_bottom(Line::from(button).right_aligned());
        let inner = block.inner(area);

        let text = if self.input.is_empty() {
            Line::styled(PLACEHOLDER, Style::default().fg(colors::NEUTRAL))
        } else {
            Line::raw(self.input.as_str())
        };

        // Keep the tail of a long query visible.
        let width = u16::try_from(self.input.width()).unwrap_or(u16::MAX);
        let offset = width.saturating_sub(inner.width.saturating_sub(1));
        f.render_widget(Paragraph::new(text).block(block).scroll((0, offset)), area);

        if !inner.is_empty() {
            f.set_cursor_position(Position::new(inner.x + (width - offset), inner.y));
        }
    }

    fn render_suggestions(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = SUGGESTIONS
            .iter()
            .map(|s| ListItem::new(format!("  {s}  ›")))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(" Try asking ")
                    .border_style(Style::default().fg(colors::NEUTRAL)),
            )
            .style(Style::default().fg(colors::MUTED))
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default().with_selected(self.suggestion);
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_result(&self, f: &mut Frame, area: Rect, result: &SearchResult) {
        let mut lines: Vec<Line> = result.text.lines().map(Line::raw).collect();

        if !result.sources.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled(
                "SOURCES",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ));
            for source in &result.sources {
                lines.push(Line::from(vec![
                    Span::styled("↗ ", Style::default().fg(colors::PRIMARY)),
                    Span::raw(source.title.as_str()),
                ]));
                lines.push(Line::styled(
                    format!("  {}", source.uri),
                    Style::default().fg(colors::ACCENT),
                ));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(" Answer ")
                    .border_style(Style::default().fg(colors::NEUTRAL)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        f.render_widget(paragraph, area);
    }
}

impl View for Search {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &ShellState, _ctx: &AppContext) {
        let [header_area, input_area, body_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .areas(area);

        let header = Paragraph::new(vec![
            Line::styled(
                "Smart Search",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Powered by Gemini AI to find games and info.",
                Style::default().fg(colors::MUTED),
            ),
        ]);
        f.render_widget(header, header_area);

        self.render_input(f, input_area);

        if self.loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("SCANNING_THE_VOID...");
            f.render_widget(spinner, body_area);
        } else if let Some(result) = &self.result {
            self.render_result(f, body_area, result);
        } else {
            self.render_suggestions(f, body_area);
        }
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &ShellState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        self.handle_key(key)
    }

    fn on_event(&mut self, event: &Event) {
        if let Event::SearchCompleted { generation, result } = event {
            self.complete(*generation, result.clone());
        }
    }

    fn on_paste(&mut self, text: &str) {
        self.insert_str(text);
    }
}
