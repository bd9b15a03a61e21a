pub mod music;
pub mod search;
pub mod settings;

pub use music::Music;
pub use search::Search;
pub use settings::Settings;
