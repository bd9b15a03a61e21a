pub mod handler;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const FRAME_STEP_MS: u128 = 100;

/// Milliseconds since the epoch, used to drive frame-based animations.
pub fn animation_clock() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Pulsing marker for the playlist entry that is currently loaded.
pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if !is_playing {
        return "•";
    }

    let step = (animation_clock() / FRAME_STEP_MS) as usize % 6;
    match step {
        0 | 5 => "·",
        1 | 4 => "•",
        _ => "●",
    }
}

/// `mm:ss`, or `h:mm:ss` past the hour.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_track_icon_is_static() {
        assert_eq!(get_active_track_icon(false), "•");
    }

    #[test]
    fn durations_are_zero_padded() {
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "01:05");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
    }
}
