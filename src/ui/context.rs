use flume::Sender;

use crate::{
    audio::{system::AudioSystem, transport::Transport},
    event::events::Event,
    http::SearchClient,
};

/// Collaborators shared by every panel.
pub struct AppContext {
    pub search: SearchClient,
    pub audio_system: AudioSystem<Box<dyn Transport>>,
    pub event_tx: Sender<Event>,
}
