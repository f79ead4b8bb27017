use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use ws_audio::capture::AudioCapture;
use ws_audio::trigger::{find_trigger, triggered_window};
use ws_core::config::{GAIN_STEP_DOWN, GAIN_STEP_UP, ScopeConfig, TRIGGER_STEP};
use ws_core::frame::FrameBuffer;
use ws_core::weights::WeightMatrix;
use ws_render::fps::FpsCounter;
use ws_render::ui::{self, RenderState};
use ws_render::scope;

/// Application state.
///
/// # Example
/// ```
/// use ws_app::app::AppState;
/// let state = AppState::Running;
/// assert!(matches!(state, AppState::Running));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Normal trigger-and-draw loop.
    Running,
    /// Weight matrix view (traces paused).
    Weights,
    /// Help overlay on top of the traces.
    Help,
    /// Shutting down; the loop exits on the next iteration.
    Quitting,
}

/// Main application struct holding all state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Tuning state, mutated only by key presses.
    pub config: ScopeConfig,
    weights: WeightMatrix,
    capture: AudioCapture,
    /// Pixel canvas, cleared and redrawn every iteration.
    canvas: FrameBuffer,
    /// Raw capture buffer, `capture_len` samples.
    capture_buf: Vec<f32>,
    /// Triggered window, always exactly `input_dim` samples.
    window: Vec<f32>,
    /// Activation scratch, reused by the renderer.
    activation: Vec<f32>,
    fps_counter: FpsCounter,
    /// Whether the last capture produced a trigger hit.
    triggered: bool,
    /// Weights view needs a redraw (entered the view or first frame).
    weights_dirty: bool,
}

impl App {
    /// Create the application around an already-running capture stream.
    #[must_use]
    pub fn new(config: ScopeConfig, weights: WeightMatrix, capture: AudioCapture) -> Self {
        let canvas = FrameBuffer::new(config.input_dim, config.canvas_height);
        let capture_buf = vec![0.0; config.capture_len];
        Self {
            state: AppState::Running,
            config,
            weights,
            capture,
            canvas,
            capture_buf,
            window: Vec::new(),
            activation: Vec::new(),
            fps_counter: FpsCounter::new(30),
            triggered: false,
            weights_dirty: true,
        }
    }

    /// Main loop: capture → trigger → render → draw → poll keys.
    ///
    /// Each iteration blocks on one full capture buffer, locates a
    /// trigger crossing, renders either the triggered zero-padded window
    /// or an all-zero trace, draws the terminal, then drains pending key
    /// events. A stalled capture device ends the loop with an error
    /// instead of hanging.
    ///
    /// # Errors
    /// Returns an error on capture stall or terminal failure. The caller
    /// restores the terminal in every case.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            if self.state == AppState::Quitting {
                break;
            }

            // === Capture one buffer (blocking, paces the loop) ===
            self.capture.read_exact(&mut self.capture_buf)?;

            // === Trigger search on the mono signal ===
            let trig = find_trigger(
                &self.capture_buf,
                self.config.trigger_level,
                self.config.slope,
            );
            self.triggered = trig.is_some();

            if let Some(start) = trig {
                triggered_window(
                    &self.capture_buf,
                    start,
                    self.config.input_dim,
                    &mut self.window,
                );
            } else {
                // No crossing: draw a flat zero line, as a real scope does
                // when the trigger is not armed.
                self.window.clear();
                self.window.resize(self.config.input_dim, 0.0);
            }

            // === Render into the pixel canvas ===
            if self.state == AppState::Weights {
                if self.weights_dirty {
                    scope::draw_weights(&mut self.canvas, &self.weights);
                    self.weights_dirty = false;
                }
            } else {
                scope::draw_activations(
                    &mut self.canvas,
                    &self.weights,
                    &self.window,
                    &self.config,
                    &mut self.activation,
                );
            }

            // === Terminal draw ===
            let render_state = match self.state {
                AppState::Weights => RenderState::Weights,
                AppState::Help => RenderState::Help,
                _ => RenderState::Running,
            };
            terminal.draw(|f| {
                ui::draw(
                    f,
                    &self.canvas,
                    &self.config,
                    &self.fps_counter,
                    &render_state,
                    self.triggered,
                );
            })?;
            self.fps_counter.tick();

            // === Drain pending key events (non-blocking) ===
            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            // === Cap the frame rate, staying responsive to keys ===
            let frame_duration =
                Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps));
            let elapsed = last_frame.elapsed();
            if elapsed < frame_duration && event::poll(frame_duration - elapsed)? {
                self.handle_event(&event::read()?);
            }
            last_frame = Instant::now();
        }

        Ok(())
    }

    /// Dispatch a terminal event. Only key presses are acted on.
    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = *event
        {
            self.handle_key(code);
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        apply_key(code, &mut self.state, &mut self.config, &mut self.weights_dirty);
    }
}

/// Apply one key press to the application and tuning state.
///
/// Gain keys step multiplicatively (×1.1 up, ×0.9 down), trigger keys
/// step by ±0.001; every change is clamped, so repeated presses are
/// monotone and bounded. Free function so the key table can be exercised
/// without a live capture device.
fn apply_key(code: KeyCode, state: &mut AppState, config: &mut ScopeConfig, weights_dirty: &mut bool) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            *state = AppState::Quitting;
            return;
        }
        KeyCode::Char('?') => {
            *state = if *state == AppState::Help {
                AppState::Running
            } else {
                AppState::Help
            };
            return;
        }
        KeyCode::Char('w') => {
            if *state == AppState::Weights {
                *state = AppState::Running;
            } else {
                *state = AppState::Weights;
                *weights_dirty = true;
            }
            return;
        }
        KeyCode::Char('=') => config.input_gain *= GAIN_STEP_UP,
        KeyCode::Char('\'') => config.input_gain *= GAIN_STEP_DOWN,
        KeyCode::Char(']') => config.output_gain *= GAIN_STEP_UP,
        KeyCode::Char('[') => config.output_gain *= GAIN_STEP_DOWN,
        KeyCode::Char('-') => config.trigger_level += TRIGGER_STEP,
        KeyCode::Char('p') => config.trigger_level -= TRIGGER_STEP,
        KeyCode::Char('s') => config.slope = config.slope.flipped(),
        _ => return,
    }

    config.clamp_all();
    log::debug!(
        "gains = [{:.3}, {:.3}], trig_level = {:.3} ({:?})",
        config.input_gain,
        config.output_gain,
        config.trigger_level,
        config.slope,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::config::{GAIN_MAX, GAIN_MIN, Slope};

    fn press(code: KeyCode, state: &mut AppState, config: &mut ScopeConfig) {
        let mut dirty = false;
        apply_key(code, state, config, &mut dirty);
    }

    #[test]
    fn quit_keys_enter_quitting() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut state = AppState::Running;
            let mut config = ScopeConfig::default();
            press(code, &mut state, &mut config);
            assert_eq!(state, AppState::Quitting);
        }
    }

    #[test]
    fn help_and_weights_toggle() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        press(KeyCode::Char('?'), &mut state, &mut config);
        assert_eq!(state, AppState::Help);
        press(KeyCode::Char('?'), &mut state, &mut config);
        assert_eq!(state, AppState::Running);

        press(KeyCode::Char('w'), &mut state, &mut config);
        assert_eq!(state, AppState::Weights);
        press(KeyCode::Char('w'), &mut state, &mut config);
        assert_eq!(state, AppState::Running);
    }

    #[test]
    fn entering_weights_view_marks_dirty() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        let mut dirty = false;
        apply_key(KeyCode::Char('w'), &mut state, &mut config, &mut dirty);
        assert!(dirty);
    }

    #[test]
    fn gain_keys_are_monotone_and_bounded() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        let mut prev = config.input_gain;
        for _ in 0..500 {
            press(KeyCode::Char('='), &mut state, &mut config);
            assert!(config.input_gain >= prev);
            assert!(config.input_gain.is_finite());
            prev = config.input_gain;
        }
        assert_eq!(config.input_gain, GAIN_MAX);

        for _ in 0..500 {
            press(KeyCode::Char('\''), &mut state, &mut config);
        }
        assert_eq!(config.input_gain, GAIN_MIN);

        for _ in 0..500 {
            press(KeyCode::Char(']'), &mut state, &mut config);
        }
        assert_eq!(config.output_gain, GAIN_MAX);
        for _ in 0..500 {
            press(KeyCode::Char('['), &mut state, &mut config);
        }
        assert_eq!(config.output_gain, GAIN_MIN);
    }

    #[test]
    fn trigger_steps_stay_in_range() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        for _ in 0..5000 {
            press(KeyCode::Char('-'), &mut state, &mut config);
        }
        assert_eq!(config.trigger_level, 1.0);
        for _ in 0..10_000 {
            press(KeyCode::Char('p'), &mut state, &mut config);
        }
        assert_eq!(config.trigger_level, -1.0);
    }

    #[test]
    fn slope_key_flips_edge() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        press(KeyCode::Char('s'), &mut state, &mut config);
        assert_eq!(config.slope, Slope::Falling);
        press(KeyCode::Char('s'), &mut state, &mut config);
        assert_eq!(config.slope, Slope::Rising);
    }

    #[test]
    fn unknown_keys_change_nothing() {
        let mut state = AppState::Running;
        let mut config = ScopeConfig::default();
        let before_gain = config.input_gain;
        press(KeyCode::Char('z'), &mut state, &mut config);
        assert_eq!(state, AppState::Running);
        assert!((config.input_gain - before_gain).abs() < f32::EPSILON);
    }
}
