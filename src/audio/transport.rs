use std::time::Duration;

use super::playlist::Track;

/// Media playback primitive driven by [`AudioSystem`](super::system::AudioSystem).
///
/// `load` is asynchronous: the transport reports back through
/// `Event::TrackStarted`, `Event::TrackFailed` and, once the media drains,
/// `Event::TrackEnded`, each tagged with the `generation` it was given.
pub trait Transport {
    /// Drops whatever is loaded and starts opening `track` from the
    /// beginning. Playback begins as soon as it is ready if `autoplay`.
    fn load(&mut self, track: &'static Track, generation: u64, autoplay: bool);
    fn play(&mut self);
    fn pause(&mut self);
    fn position(&self) -> Duration;

    /// `false` when there is no output to play through.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn load(&mut self, track: &'static Track, generation: u64, autoplay: bool) {
        (**self).load(track, generation, autoplay)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn position(&self) -> Duration {
        (**self).position()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
