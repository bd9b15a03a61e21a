use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::search::SearchRequest,
    },
};

pub struct EventHandler;

impl EventHandler {
    /// Waits for the next terminal event, then drains application events.
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            should_render = Self::handle_event(app, evt, tui)?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_app_event(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => info!("ui_started"),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Paste(text) => app.shell.on_paste(&text),
            TerminalEvent::Resize(..) => {}
            TerminalEvent::Tick => return Ok(app.has_focus),
        }

        Ok(true)
    }

    pub fn handle_app_event(app: &mut App, evt: Event) {
        app.shell.on_event(&evt);

        let audio = &mut app.ctx.audio_system;
        match evt {
            Event::TrackStarted(generation) => audio.on_track_started(generation),
            Event::TrackEnded(generation) => audio.on_track_ended(generation),
            Event::TrackFailed { generation, reason } => {
                audio.on_track_failed(generation, reason)
            }
            Event::SearchCompleted { .. } => {}
        }
    }

    fn handle_key_event(app: &mut App, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            Self::dispatch_action(app, Action::Quit);
            return;
        }

        if let Some(action) = app.shell.handle_input(key, &app.ctx) {
            Self::dispatch_action(app, action);
            return;
        }

        if let Some(action) = InputHandler::handle_key(key) {
            Self::dispatch_action(app, action);
        }
    }

    fn dispatch_action(app: &mut App, action: Action) {
        let Some(action) = app.shell.apply(action) else {
            return;
        };

        match action {
            Action::Quit => {
                info!("quit_requested");
                app.should_quit = true;
            }
            Action::Search(request) => Self::spawn_search(app, request),
            Action::TogglePlay => app.ctx.audio_system.toggle_play(),
            Action::NextTrack => app.ctx.audio_system.next(),
            Action::PreviousTrack => app.ctx.audio_system.previous(),
            Action::SelectTrack(index) => app.ctx.audio_system.select(index),
            Action::SwitchTab(_) | Action::ToggleTheme | Action::None => {}
        }
    }

    fn spawn_search(app: &mut App, request: SearchRequest) {
        let client = app.ctx.search.clone();
        let tx = app.ctx.event_tx.clone();
        if app.task_manager.is_running("search") {
            warn!(generation = request.generation, "search_replaced_in_flight");
        }
        debug!(generation = request.generation, "search_spawned");

        app.task_manager.spawn(
            "search",
            tokio::spawn(async move {
                let result = client.search(&request.query).await;
                let _ = tx.send(Event::SearchCompleted {
                    generation: request.generation,
                    result,
                });
            }),
        );
    }
}
