pub mod audio;
pub mod config;
pub mod event;
pub mod http;
pub mod stream;
pub mod ui;
pub mod util;
