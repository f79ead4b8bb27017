/// Configuration, types, and shared structures for wavescope.
///
/// This crate contains the scope configuration, the pixel frame buffer,
/// the fixed weight matrix, and the shared error type used across the
/// wavescope workspace.

pub mod config;
pub mod error;
pub mod frame;
pub mod weights;

pub use config::{ScopeConfig, Slope};
pub use error::CoreError;
pub use frame::{FrameBuffer, Rgb};
pub use weights::WeightMatrix;
