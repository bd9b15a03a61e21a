/// Lifecycle of the media currently handed to the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EngineState {
    Idle = 0,
    Buffering = 1,
    Ready = 2,
}

impl EngineState {
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => EngineState::Buffering,
            2 => EngineState::Ready,
            _ => EngineState::Idle,
        }
    }
}
