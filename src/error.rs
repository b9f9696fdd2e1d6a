use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid tempo {0} bpm: tempo must be a finite, positive number")]
    InvalidTempo(f64),

    #[error("no microphone input device available")]
    NoInputDevice,

    #[error("microphone capture failed: {0}")]
    CaptureFailed(String),

    #[error("recording contains no audio")]
    EmptyRecording,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error means the visitor could not use the microphone.
    ///
    /// These are the only failures the kiosk shows on screen.
    pub fn is_microphone_denied(&self) -> bool {
        matches!(self, Error::NoInputDevice | Error::CaptureFailed(_))
    }
}
