mod buffer;
mod source;

pub use self::source::{HttpMediaSource, media_client};
