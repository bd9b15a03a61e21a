use crate::http::SearchResult;

/// Completions delivered to the UI loop from background work.
#[derive(Debug, Clone)]
pub enum Event {
    SearchCompleted { generation: u64, result: SearchResult },

    // Transport notifications, tagged with the load generation.
    TrackStarted(u64),
    TrackEnded(u64),
    TrackFailed { generation: u64, reason: String },
}
