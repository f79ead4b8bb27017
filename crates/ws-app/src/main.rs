use anyhow::{Context, Result};
use clap::Parser;
use ws_audio::capture::AudioCapture;
use ws_core::config::ScopeConfig;
use ws_core::weights::WeightMatrix;

pub mod app;
pub mod cli;

fn main() -> Result<()> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Initialize logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Load config and apply CLI overrides
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Build the transform weights.
    //    Synthetic sinusoidal pattern for now; loading a layer from a
    //    trained checkpoint goes here once the training side exports one.
    let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
    log::info!(
        "weights: {}×{} synthetic layer",
        weights.input_dim(),
        weights.output_dim()
    );

    // 5. Open the microphone before touching the terminal, so a missing
    //    device reports cleanly to stderr
    let capture = AudioCapture::start_default(config.sample_rate)
        .context("cannot start audio capture")?;

    // 6. Initialize the ratatui terminal
    let terminal = ratatui::init();

    // 7. Run the scope loop
    let mut app_instance = app::App::new(config, weights, capture);
    let result = app_instance.run(terminal);

    // 8. Restore the terminal (ALWAYS, error paths included)
    ratatui::restore();

    result
}

/// Resolve config: load the TOML file if it exists, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ScopeConfig> {
    if cli.config.exists() {
        ws_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "config not found: {}. Using defaults.",
            cli.config.display()
        );
        Ok(ScopeConfig::default())
    }
}
