// Microphone capture and oscilloscope triggering for wavescope.

pub mod capture;
pub mod error;
pub mod trigger;

pub use capture::AudioCapture;
pub use error::AudioError;
pub use trigger::{find_trigger, triggered_window};
