use flume::Sender;
use rodio::{OutputStream, OutputStreamBuilder, Sink, cpal::BufferSize};
use tracing::warn;

use super::{
    error::AudioError, playback::PlaybackEngine, transport::Transport, unavailable::NoOutput,
};
use crate::event::events::Event;

/// Opens the default output device, falling back to any working config.
pub fn construct_sink() -> Result<(OutputStream, Sink), AudioError> {
    let mut stream = OutputStreamBuilder::from_default_device()
        .map_err(|e| AudioError::Device(e.to_string()))?
        .with_buffer_size(BufferSize::Fixed(4096))
        .open_stream_or_fallback()
        .map_err(|e| AudioError::Device(e.to_string()))?;
    stream.log_on_drop(false);

    let sink = Sink::connect_new(stream.mixer());
    Ok((stream, sink))
}

/// The rodio engine, or [`NoOutput`] on machines without a usable device.
/// Must be called inside the tokio runtime.
pub fn open_transport(event_tx: Sender<Event>) -> Box<dyn Transport> {
    match PlaybackEngine::new(event_tx.clone()) {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            warn!(error = %e, "audio_output_unavailable");
            Box::new(NoOutput::new(format!("Audio unavailable: {e}"), event_tx))
        }
    }
}
