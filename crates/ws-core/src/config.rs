use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Lower bound for both display gains.
pub const GAIN_MIN: f32 = 1e-3;
/// Upper bound for both display gains. Repeated key presses saturate here.
pub const GAIN_MAX: f32 = 1e3;
/// Multiplicative step for a gain-up key press.
pub const GAIN_STEP_UP: f32 = 1.1;
/// Multiplicative step for a gain-down key press.
pub const GAIN_STEP_DOWN: f32 = 0.9;
/// Additive step applied per trigger-level key press.
pub const TRIGGER_STEP: f32 = 0.001;

/// Edge direction for the oscilloscope trigger.
///
/// # Example
/// ```
/// use ws_core::config::Slope;
/// assert_eq!(Slope::default(), Slope::Rising);
/// assert_eq!(Slope::Rising.flipped(), Slope::Falling);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Slope {
    /// Trigger on an upward crossing of the level.
    #[default]
    Rising,
    /// Trigger on a downward crossing of the level.
    Falling,
}

impl Slope {
    /// The opposite edge direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Rising => Self::Falling,
            Self::Falling => Self::Rising,
        }
    }
}

/// Complete scope configuration, including the runtime-mutable tuning
/// state (gains, trigger level). One instance is passed into the display
/// loop; there is no ambient tuning state anywhere else.
///
/// Serializable to TOML. Every field has a sane default.
///
/// # Example
/// ```
/// use ws_core::config::ScopeConfig;
/// let config = ScopeConfig::default();
/// assert_eq!(config.input_dim, 1024);
/// assert_eq!(config.output_dim, 800);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScopeConfig {
    // === Geometry ===
    /// Input dimension of the weight layer. Also the canvas width in pixels.
    pub input_dim: usize,
    /// Output dimension of the weight layer. Caps the output trace length.
    pub output_dim: usize,
    /// Canvas height in pixels. Baselines sit at h/4 (input) and 3h/4 (output).
    pub canvas_height: usize,

    // === Capture ===
    /// Capture sample rate in Hz.
    pub sample_rate: u32,
    /// Samples pulled from the microphone per frame. Kept larger than
    /// `input_dim` so a late trigger still fills most of the window.
    pub capture_len: usize,

    // === Trigger ===
    /// Trigger threshold on the raw mono signal.
    pub trigger_level: f32,
    /// Edge direction the trigger arms on.
    pub slope: Slope,

    // === Display ===
    /// Vertical gain applied to the input trace.
    pub input_gain: f32,
    /// Vertical gain applied to the activation trace.
    pub output_gain: f32,
    /// Target frames per second for the display loop.
    pub target_fps: u32,
    /// Draw traces in color (cyan input, green output). Off = white.
    pub color_enabled: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        let input_dim = 1024;
        Self {
            input_dim,
            output_dim: 800,
            canvas_height: 600,
            sample_rate: 44_100,
            // 1.5× the window, so zero-padding stays a safety net rather
            // than a visible artifact.
            capture_len: input_dim * 3 / 2,
            trigger_level: 0.01,
            slope: Slope::Rising,
            input_gain: 10.0,
            output_gain: 1.0,
            target_fps: 30,
            color_enabled: true,
        }
    }
}

impl ScopeConfig {
    /// Clamp all numeric fields to their valid ranges.
    ///
    /// Called after TOML deserialization and after every keyboard
    /// adjustment, so no key sequence can drive a value out of range or
    /// to a non-finite float.
    ///
    /// # Example
    /// ```
    /// use ws_core::config::{ScopeConfig, GAIN_MAX};
    /// let mut config = ScopeConfig::default();
    /// config.input_gain = f32::INFINITY;
    /// config.clamp_all();
    /// assert_eq!(config.input_gain, GAIN_MAX);
    /// ```
    pub fn clamp_all(&mut self) {
        self.input_dim = self.input_dim.clamp(16, 8192);
        self.output_dim = self.output_dim.clamp(16, 8192);
        self.canvas_height = self.canvas_height.clamp(64, 2048);
        self.sample_rate = self.sample_rate.clamp(8_000, 192_000);
        // The padded window must always fit in one capture.
        self.capture_len = self.capture_len.clamp(self.input_dim, self.input_dim * 8);
        self.trigger_level = clamp_finite(self.trigger_level, -1.0, 1.0, 0.01);
        self.input_gain = clamp_finite(self.input_gain, GAIN_MIN, GAIN_MAX, 10.0);
        self.output_gain = clamp_finite(self.output_gain, GAIN_MIN, GAIN_MAX, 1.0);
        self.target_fps = self.target_fps.clamp(5, 120);
    }
}

/// Clamp to [lo, hi], replacing NaN with a fallback. `f32::clamp` already
/// saturates infinities; NaN is the only value it lets through.
fn clamp_finite(v: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if v.is_nan() { fallback } else { v.clamp(lo, hi) }
}

/// Intermediate TOML structure, all fields optional for partial override.
#[derive(Deserialize)]
struct ConfigFile {
    scope: Option<ScopeSection>,
    controls: Option<ControlsSection>,
}

/// Scope section of the TOML config.
#[derive(Deserialize)]
struct ScopeSection {
    input_dim: Option<usize>,
    output_dim: Option<usize>,
    canvas_height: Option<usize>,
    sample_rate: Option<u32>,
    capture_len: Option<usize>,
    target_fps: Option<u32>,
    color_enabled: Option<bool>,
}

/// Controls section of the TOML config.
#[derive(Deserialize)]
struct ControlsSection {
    trigger_level: Option<f32>,
    slope: Option<Slope>,
    input_gain: Option<f32>,
    output_gain: Option<f32>,
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ws_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ScopeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("TOML parse error in {}", path.display()))
}

/// Parse TOML content and merge it over the defaults.
///
/// # Errors
/// Returns an error if the content is not valid TOML.
pub fn parse_config(content: &str) -> Result<ScopeConfig> {
    let file: ConfigFile = toml::from_str(content)?;

    let mut config = ScopeConfig::default();

    if let Some(s) = file.scope {
        if let Some(v) = s.input_dim {
            config.input_dim = v;
            // capture_len default tracks input_dim unless overridden below.
            // Saturating: clamp_all bounds both fields afterwards, this
            // only has to survive an absurd value in the file.
            config.capture_len = v.saturating_mul(3) / 2;
        }
        if let Some(v) = s.output_dim {
            config.output_dim = v;
        }
        if let Some(v) = s.canvas_height {
            config.canvas_height = v;
        }
        if let Some(v) = s.sample_rate {
            config.sample_rate = v;
        }
        if let Some(v) = s.capture_len {
            config.capture_len = v;
        }
        if let Some(v) = s.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = s.color_enabled {
            config.color_enabled = v;
        }
    }

    if let Some(c) = file.controls {
        if let Some(v) = c.trigger_level {
            config.trigger_level = v;
        }
        if let Some(v) = c.slope {
            config.slope = v;
        }
        if let Some(v) = c.input_gain {
            config.input_gain = v;
        }
        if let Some(v) = c.output_gain {
            config.output_gain = v;
        }
    }

    config.clamp_all();
    Ok(config)
}
