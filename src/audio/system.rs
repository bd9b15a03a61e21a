use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    playlist::{TRACKS, Track},
    transport::Transport,
};

/// Playback state for the music panel: which playlist entry is current and
/// whether the user wants it playing.
///
/// The index always stays within the playlist and wraps in both directions.
/// Every load is tagged with a fresh generation so notifications about media
/// that has since been replaced are ignored.
pub struct AudioSystem<T: Transport> {
    transport: T,
    tracks: &'static [Track],
    index: usize,
    playing: bool,
    generation: u64,
    loaded: Option<u64>,
    buffering: bool,
    error: Option<String>,
}

impl<T: Transport> AudioSystem<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tracks: &TRACKS,
            index: 0,
            playing: false,
            generation: 0,
            loaded: None,
            buffering: false,
            error: None,
        }
    }

    /// Returns `None` for an empty playlist.
    pub fn with_playlist(transport: T, tracks: &'static [Track]) -> Option<Self> {
        if tracks.is_empty() {
            return None;
        }
        Some(Self {
            tracks,
            ..Self::new(transport)
        })
    }

    pub fn toggle_play(&mut self) {
        if self.playing {
            self.playing = false;
            self.transport.pause();
        } else {
            self.playing = true;
            if self.loaded.is_some() {
                self.transport.play();
            } else {
                self.load_current();
            }
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.tracks.len();
        self.start_current();
    }

    pub fn previous(&mut self) {
        let len = self.tracks.len();
        self.index = (self.index + len - 1) % len;
        self.start_current();
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.tracks.len() {
            warn!(index, "playlist_index_out_of_range");
            return;
        }
        self.index = index;
        self.start_current();
    }

    pub fn on_track_started(&mut self, generation: u64) {
        if self.loaded == Some(generation) {
            self.buffering = false;
        }
    }

    pub fn on_track_ended(&mut self, generation: u64) {
        if self.loaded != Some(generation) {
            debug!(generation, "stale_track_ended_ignored");
            return;
        }
        self.next();
    }

    pub fn on_track_failed(&mut self, generation: u64, reason: String) {
        if self.loaded != Some(generation) {
            debug!(generation, "stale_track_failure_ignored");
            return;
        }
        self.playing = false;
        self.buffering = false;
        self.loaded = None;
        self.error = Some(reason);
    }

    fn start_current(&mut self) {
        self.playing = true;
        self.load_current();
    }

    fn load_current(&mut self) {
        self.generation += 1;
        self.loaded = Some(self.generation);
        self.buffering = true;
        self.error = None;

        let track = self.current_track();
        info!(id = track.id, index = self.index, "audio_track_selected");
        self.transport.load(track, self.generation, self.playing);
    }

    pub fn current_track(&self) -> &'static Track {
        &self.tracks[self.index]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn tracks(&self) -> &'static [Track] {
        self.tracks
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.transport.is_available()
    }

    pub fn position(&self) -> Duration {
        if self.loaded.is_some() {
            self.transport.position()
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Load {
            id: &'static str,
            generation: u64,
            autoplay: bool,
        },
        Play,
        Pause,
    }

    #[derive(Default)]
    struct RecordingTransport {
        calls: Vec<Call>,
    }

    impl Transport for RecordingTransport {
        fn load(&mut self, track: &'static Track, generation: u64, autoplay: bool) {
            self.calls.push(Call::Load {
                id: track.id,
                generation,
                autoplay,
            });
        }

        fn play(&mut self) {
            self.calls.push(Call::Play);
        }

        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }

        fn position(&self) -> Duration {
            Duration::from_secs(7)
        }
    }

    fn system() -> AudioSystem<RecordingTransport> {
        AudioSystem::new(RecordingTransport::default())
    }

    fn last_generation(system: &AudioSystem<RecordingTransport>) -> u64 {
        match system.transport.calls.last() {
            Some(Call::Load { generation, .. }) => *generation,
            other => panic!("expected a load, got {other:?}"),
        }
    }

    const fn track(id: &'static str) -> Track {
        Track {
            id,
            title: id,
            artist: "test",
            url: "http://127.0.0.1/track.mp3",
            cover: "http://127.0.0.1/cover.jpg",
        }
    }

    static ONE: [Track; 1] = [track("a")];
    static TWO: [Track; 2] = [track("a"), track("b")];
    static FIVE: [Track; 5] = [track("a"), track("b"), track("c"), track("d"), track("e")];

    #[test]
    fn starts_on_first_track_stopped() {
        let system = system();
        assert_eq!(system.current_track(), &TRACKS[0]);
        assert!(!system.is_playing());
        assert!(system.transport.calls.is_empty());
        assert_eq!(system.position(), Duration::ZERO);
    }

    #[test]
    fn next_wraps_after_full_cycle() {
        let playlists: [&'static [Track]; 4] = [&ONE, &TWO, &TRACKS, &FIVE];
        for tracks in playlists {
            let mut system =
                AudioSystem::with_playlist(RecordingTransport::default(), tracks).unwrap();
            for start in 0..tracks.len() {
                system.select(start);
                for _ in 0..tracks.len() {
                    system.next();
                    assert!(system.current_index() < tracks.len());
                }
                assert_eq!(system.current_index(), start);
            }
        }
    }

    #[test]
    fn previous_wraps_after_full_cycle() {
        let playlists: [&'static [Track]; 4] = [&ONE, &TWO, &TRACKS, &FIVE];
        for tracks in playlists {
            let mut system =
                AudioSystem::with_playlist(RecordingTransport::default(), tracks).unwrap();
            for start in 0..tracks.len() {
                system.select(start);
                for _ in 0..tracks.len() {
                    system.previous();
                    assert!(system.current_index() < tracks.len());
                }
                assert_eq!(system.current_index(), start);
            }
        }
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let mut system = system();
        system.previous();
        assert_eq!(system.current_track().id, "3");
    }

    #[test]
    fn next_and_previous_always_set_playing() {
        let mut system = system();
        system.next();
        assert!(system.is_playing());

        system.toggle_play();
        assert!(!system.is_playing());
        system.previous();
        assert!(system.is_playing());

        system.toggle_play();
        system.next();
        assert!(system.is_playing());
    }

    #[test]
    fn track_change_loads_with_autoplay() {
        let mut system = system();
        system.next();
        assert_eq!(
            system.transport.calls,
            vec![Call::Load {
                id: "2",
                generation: 1,
                autoplay: true
            }]
        );
        assert!(system.is_buffering());
    }

    #[test]
    fn first_toggle_loads_then_pauses_and_resumes() {
        let mut system = system();
        system.toggle_play();
        system.toggle_play();
        system.toggle_play();
        assert_eq!(
            system.transport.calls,
            vec![
                Call::Load {
                    id: "1",
                    generation: 1,
                    autoplay: true
                },
                Call::Pause,
                Call::Play,
            ]
        );
        assert!(system.is_playing());
    }

    #[test]
    fn ended_behaves_like_next() {
        let mut system = system();
        system.toggle_play();
        let generation = last_generation(&system);
        system.on_track_started(generation);
        assert!(!system.is_buffering());

        system.on_track_ended(generation);
        assert_eq!(system.current_track().id, "2");
        assert!(system.is_playing());
        assert!(matches!(
            system.transport.calls.last(),
            Some(Call::Load {
                id: "2",
                autoplay: true,
                ..
            })
        ));
    }

    #[test]
    fn stale_ended_is_ignored() {
        let mut system = system();
        system.toggle_play();
        let stale = last_generation(&system);
        system.next();

        system.on_track_ended(stale);
        assert_eq!(system.current_track().id, "2");
        assert_eq!(system.transport.calls.len(), 2);
    }

    #[test]
    fn failure_stops_and_next_play_reloads() {
        let mut system = system();
        system.toggle_play();
        let generation = last_generation(&system);

        system.on_track_failed(generation, "Network error: refused".into());
        assert!(!system.is_playing());
        assert!(!system.is_buffering());
        assert_eq!(system.error(), Some("Network error: refused"));

        system.toggle_play();
        assert!(matches!(
            system.transport.calls.last(),
            Some(Call::Load { id: "1", .. })
        ));
        assert_eq!(system.error(), None);
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut system = system();
        system.select(99);
        assert_eq!(system.current_index(), 0);
        assert!(!system.is_playing());
        assert!(system.transport.calls.is_empty());
    }

    #[test]
    fn select_plays_requested_entry() {
        let mut system = system();
        system.select(2);
        assert_eq!(system.current_track().title, "Ambient Void");
        assert!(system.is_playing());
        assert_eq!(system.position(), Duration::from_secs(7));
    }

    #[test]
    fn empty_playlist_is_rejected() {
        static EMPTY: [Track; 0] = [];
        assert!(AudioSystem::with_playlist(RecordingTransport::default(), &EMPTY).is_none());
    }
}
