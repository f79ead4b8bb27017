use thiserror::Error;

/// Errors originating from the audio module.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio input device found, or the device refused to open.
    #[error("no audio input device available")]
    DeviceUnavailable,

    /// The capture stream could not be built or started.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// The device stopped delivering samples.
    #[error("audio capture stalled: no samples for {0} ms")]
    Stalled(u64),
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(_: cpal::DefaultStreamConfigError) -> Self {
        Self::DeviceUnavailable
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(e: cpal::BuildStreamError) -> Self {
        Self::Stream(e.to_string())
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(e: cpal::PlayStreamError) -> Self {
        Self::Stream(e.to_string())
    }
}
