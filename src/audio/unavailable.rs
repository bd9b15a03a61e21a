use std::time::Duration;

use flume::Sender;
use tracing::debug;

use super::{playlist::Track, transport::Transport};
use crate::event::events::Event;

/// Transport used when no output device could be opened. Every load fails
/// straight away with `reason`, so the rest of the app keeps working.
pub struct NoOutput {
    reason: String,
    event_tx: Sender<Event>,
}

impl NoOutput {
    pub fn new(reason: impl Into<String>, event_tx: Sender<Event>) -> Self {
        Self {
            reason: reason.into(),
            event_tx,
        }
    }
}

impl Transport for NoOutput {
    fn load(&mut self, track: &'static Track, generation: u64, _autoplay: bool) {
        debug!(id = track.id, generation, "playback_load_without_output");
        let _ = self.event_tx.send(Event::TrackFailed {
            generation,
            reason: self.reason.clone(),
        });
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::playlist::TRACKS;

    #[test]
    fn load_reports_failure_for_the_same_generation() {
        let (tx, rx) = flume::unbounded();
        let mut output = NoOutput::new("Audio unavailable: no device", tx);
        assert!(!output.is_available());

        output.load(&TRACKS[0], 4, true);
        match rx.try_recv() {
            Ok(Event::TrackFailed { generation, reason }) => {
                assert_eq!(generation, 4);
                assert_eq!(reason, "Audio unavailable: no device");
            }
            other => panic!("expected TrackFailed, got {other:?}"),
        }
        assert_eq!(output.position(), Duration::ZERO);
    }
}
