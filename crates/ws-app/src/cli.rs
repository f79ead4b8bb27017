use std::path::PathBuf;

use clap::Parser;
use ws_core::config::{ScopeConfig, Slope};

/// wavescope — oscilloscope-style activation visualizer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file. Missing file falls back to defaults.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Target display FPS.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Initial trigger level on the raw mono signal.
    #[arg(long)]
    pub trigger_level: Option<f32>,

    /// Trigger edge: "rising" or "falling".
    #[arg(long)]
    pub slope: Option<String>,

    /// Disable colored traces.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply CLI overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut ScopeConfig) {
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(level) = self.trigger_level {
            config.trigger_level = level;
        }
        if let Some(ref slope) = self.slope {
            match slope.as_str() {
                "rising" => config.slope = Slope::Rising,
                "falling" => config.slope = Slope::Falling,
                other => log::warn!("unknown slope '{other}', keeping {:?}", config.slope),
            }
        }
        if self.no_color {
            config.color_enabled = false;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_and_clamp() {
        let cli = Cli {
            config: PathBuf::from("unused.toml"),
            fps: Some(999),
            trigger_level: Some(5.0),
            slope: Some("falling".into()),
            no_color: true,
            log_level: "warn".into(),
        };
        let mut config = ScopeConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.target_fps, 120);
        assert_eq!(config.trigger_level, 1.0);
        assert_eq!(config.slope, Slope::Falling);
        assert!(!config.color_enabled);
    }
}
