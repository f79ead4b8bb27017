/// Terminal rendering for wavescope.
///
/// Rasterizes waveform traces and the weight matrix into a pixel canvas,
/// blits the canvas to the terminal with half-block cells, and draws the
/// status bar and help overlay.

pub mod canvas;
pub mod fps;
pub mod scope;
pub mod ui;
