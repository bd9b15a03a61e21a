use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    Device(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Network error: {0}")]
    Network(String),
}
