use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU8, Ordering},
};
use std::time::Duration;

use flume::Sender;
use rodio::{Decoder, OutputStream, Sink};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{
    error::AudioError, playlist::Track, state::EngineState, transport::Transport,
    util::construct_sink,
};
use crate::{
    event::events::Event,
    stream::{HttpMediaSource, media_client},
};

const MONITOR_INTERVAL: Duration = Duration::from_millis(100);

/// rodio-backed [`Transport`]. Media is streamed over HTTP and decoded on the
/// output thread.
pub struct PlaybackEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
    state: Arc<AtomicU8>,
    // Guards the sink against a stale load appending after a newer one
    // cleared it.
    generation: Arc<Mutex<u64>>,
    event_tx: Sender<Event>,
    monitor: JoinHandle<()>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<Event>) -> Result<Self, AudioError> {
        let (stream, sink) = construct_sink()?;
        let sink = Arc::new(sink);
        let state = Arc::new(AtomicU8::new(EngineState::Idle as u8));
        let generation = Arc::new(Mutex::new(0));

        let monitor = Self::start_monitor(
            sink.clone(),
            state.clone(),
            generation.clone(),
            event_tx.clone(),
        );

        Ok(Self {
            _stream: stream,
            sink,
            state,
            generation,
            event_tx,
            monitor,
        })
    }

    /// Polls the sink and reports `TrackEnded` once loaded media has drained.
    /// A paused sink never counts as ended.
    fn start_monitor(
        sink: Arc<Sink>,
        state: Arc<AtomicU8>,
        generation: Arc<Mutex<u64>>,
        event_tx: Sender<Event>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(MONITOR_INTERVAL);
            loop {
                interval.tick().await;

                let ready = EngineState::from_u8(state.load(Ordering::SeqCst)) == EngineState::Ready;
                if !ready || sink.is_paused() || !sink.empty() {
                    continue;
                }

                let current = *lock(&generation);
                if state
                    .compare_exchange(
                        EngineState::Ready as u8,
                        EngineState::Idle as u8,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    )
                    .is_ok()
                {
                    debug!(generation = current, "playback_track_ended");
                    if event_tx.send(Event::TrackEnded(current)).is_err() {
                        break;
                    }
                }
            }
        })
    }

    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::SeqCst))
    }
}

impl Transport for PlaybackEngine {
    fn load(&mut self, track: &'static Track, generation: u64, autoplay: bool) {
        {
            let mut current = lock(&self.generation);
            *current = generation;
            self.state
                .store(EngineState::Buffering as u8, Ordering::SeqCst);
            self.sink.clear();
            if autoplay {
                self.sink.play();
            }
        }

        info!(id = track.id, title = track.title, generation, "playback_load");

        let sink = self.sink.clone();
        let state = self.state.clone();
        let current = self.generation.clone();
        let event_tx = self.event_tx.clone();

        tokio::task::spawn_blocking(move || {
            let opened = open_track(track);

            let current = lock(&current);
            if *current != generation {
                debug!(generation, latest = *current, "playback_load_superseded");
                return;
            }

            match opened {
                Ok(decoder) => {
                    sink.append(decoder);
                    state.store(EngineState::Ready as u8, Ordering::SeqCst);
                    drop(current);
                    info!(id = track.id, generation, "playback_track_started");
                    let _ = event_tx.send(Event::TrackStarted(generation));
                }
                Err(e) => {
                    state.store(EngineState::Idle as u8, Ordering::SeqCst);
                    drop(current);
                    warn!(id = track.id, error = %e, "playback_load_failed");
                    let _ = event_tx.send(Event::TrackFailed {
                        generation,
                        reason: e.to_string(),
                    });
                }
            }
        });
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Duration {
        match self.state() {
            EngineState::Ready => self.sink.get_pos(),
            _ => Duration::ZERO,
        }
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.monitor.abort();
        self.sink.stop();
    }
}

fn lock(generation: &Mutex<u64>) -> MutexGuard<'_, u64> {
    generation.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Blocking: HEAD, first range request and decoder setup.
fn open_track(track: &Track) -> Result<Decoder<HttpMediaSource>, AudioError> {
    let source = HttpMediaSource::open(media_client()?, track.url)?;
    let byte_len = source.total_bytes();

    Decoder::builder()
        .with_data(source)
        .with_byte_len(byte_len)
        .with_seekable(true)
        .with_hint("mp3")
        .build()
        .map_err(|e| AudioError::Decoding(e.to_string()))
}
