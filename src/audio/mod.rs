pub mod error;
pub mod playback;
pub mod playlist;
pub mod state;
pub mod system;
pub mod transport;
pub mod unavailable;
pub mod util;
