use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tracing::info;

use crate::{
    audio::{system::AudioSystem, util::open_transport},
    config::Config,
    event::events::Event,
    http::{GeminiClient, SearchClient},
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    shell::Shell,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub shell: Shell,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    /// Must be called inside the tokio runtime: the playback monitor is
    /// spawned here.
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();

        info!(model = config.model.as_str(), "search_backend_configured");
        let search = SearchClient::new(Arc::new(GeminiClient::new(&config)?));
        let audio_system = AudioSystem::new(open_transport(event_tx.clone()));

        Ok(Self::with_context(
            AppContext {
                search,
                audio_system,
                event_tx,
            },
            event_rx,
        ))
    }

    /// `event_rx` must be the receiving end of `ctx.event_tx`.
    pub fn with_context(ctx: AppContext, event_rx: Receiver<Event>) -> Self {
        Self {
            event_rx,
            ctx,
            shell: Shell::new(),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.paste(true);
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui)?;
        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;
            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            self.shell.render(frame, area, &self.ctx);
        }
    }
}
