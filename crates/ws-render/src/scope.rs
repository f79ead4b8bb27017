use ws_core::config::ScopeConfig;
use ws_core::frame::{FrameBuffer, Rgb};
use ws_core::weights::WeightMatrix;

/// Input trace color (cyan).
pub const COLOR_IN: Rgb = (0, 255, 255);
/// Output trace color (green).
pub const COLOR_OUT: Rgb = (0, 255, 0);
/// Trace color when color is disabled.
pub const COLOR_MONO: Rgb = (230, 230, 230);

/// Render the triggered window and its activation onto the canvas.
///
/// Clears the canvas, computes `activation = window · weights` into
/// `activation` (scratch, reused across frames), then draws two connected
/// polylines: the raw input around the `h/4` baseline and the activation
/// around the `3h/4` baseline, each scaled by its gain, clipped to
/// [−1, 1], with a peak amplitude of `h/5` pixels. The subtraction is
/// because pixel y grows downward.
///
/// The output trace never exceeds `output_dim` points regardless of the
/// canvas width.
pub fn draw_activations(
    canvas: &mut FrameBuffer,
    weights: &WeightMatrix,
    window: &[f32],
    config: &ScopeConfig,
    activation: &mut Vec<f32>,
) {
    canvas.clear();
    weights.forward(window, activation);

    let h = canvas.height;
    let (color_in, color_out) = if config.color_enabled {
        (COLOR_IN, COLOR_OUT)
    } else {
        (COLOR_MONO, COLOR_MONO)
    };

    draw_trace(canvas, window, config.input_gain, h / 4, color_in);
    let out_cols = activation.len().min(weights.output_dim());
    draw_trace(
        canvas,
        &activation[..out_cols],
        config.output_gain,
        3 * h / 4,
        color_out,
    );
}

/// Render the weight matrix as a grayscale magnitude image.
///
/// The matrix is sampled nearest-neighbor onto the canvas: input rows map
/// to canvas rows, output columns to canvas columns. Brightness is
/// `|w| · 255`, clipped.
pub fn draw_weights(canvas: &mut FrameBuffer, weights: &WeightMatrix) {
    canvas.clear();
    let (w, h) = (canvas.width, canvas.height);
    if w == 0 || h == 0 {
        return;
    }
    for y in 0..h {
        let row = y * weights.input_dim() / h;
        for x in 0..w {
            let col = x * weights.output_dim() / w;
            let v = (weights.get(row, col).abs() * 255.0).clamp(0.0, 255.0) as u8;
            canvas.set_pixel(x, y, (v, v, v));
        }
    }
}

/// Draw one connected polyline around a horizontal baseline.
///
/// One sample per pixel column; neighboring points are joined with a
/// vertical span, which is all a one-column step needs.
fn draw_trace(canvas: &mut FrameBuffer, samples: &[f32], gain: f32, baseline: usize, color: Rgb) {
    if canvas.width == 0 || canvas.height == 0 {
        return;
    }
    let max_amp = canvas.height as f32 / 5.0;
    let cols = samples.len().min(canvas.width);
    let mut prev_y: Option<usize> = None;

    for (x, &sample) in samples.iter().take(cols).enumerate() {
        let amp = (gain * sample).clamp(-1.0, 1.0);
        let y = (baseline as f32 - max_amp * amp)
            .round()
            .clamp(0.0, (canvas.height - 1) as f32) as usize;
        match prev_y {
            Some(py) => canvas.vline(x, py, y, color),
            None => canvas.set_pixel(x, y, color),
        }
        prev_y = Some(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::config::ScopeConfig;

    fn small_config() -> ScopeConfig {
        let mut config = ScopeConfig {
            input_dim: 16,
            output_dim: 16,
            canvas_height: 64,
            capture_len: 24,
            ..ScopeConfig::default()
        };
        config.clamp_all();
        config
    }

    #[test]
    fn zero_signal_draws_both_baselines() {
        let config = small_config();
        let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
        let mut canvas = FrameBuffer::new(config.input_dim, config.canvas_height);
        let mut activation = Vec::new();
        let window = vec![0.0f32; config.input_dim];

        draw_activations(&mut canvas, &weights, &window, &config, &mut activation);

        let h = config.canvas_height;
        // A zero input lands exactly on the h/4 baseline in cyan.
        assert_eq!(canvas.pixel(0, h / 4), COLOR_IN);
        // A zero activation lands on the 3h/4 baseline in green.
        assert_eq!(canvas.pixel(0, 3 * h / 4), COLOR_OUT);
    }

    #[test]
    fn canvas_is_cleared_between_draws() {
        let config = small_config();
        let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
        let mut canvas = FrameBuffer::new(config.input_dim, config.canvas_height);
        canvas.set_pixel(5, 5, (255, 0, 0));
        let mut activation = Vec::new();

        draw_activations(
            &mut canvas,
            &weights,
            &vec![0.0; config.input_dim],
            &config,
            &mut activation,
        );
        assert_eq!(canvas.pixel(5, 5), (0, 0, 0));
    }

    #[test]
    fn output_trace_capped_at_output_dim() {
        // Canvas wider than output_dim: columns past the activation must
        // stay black on the output baseline.
        let mut config = small_config();
        config.output_dim = 16;
        let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
        let mut canvas = FrameBuffer::new(64, config.canvas_height);
        let mut activation = Vec::new();

        draw_activations(
            &mut canvas,
            &weights,
            &vec![0.0; config.input_dim],
            &config,
            &mut activation,
        );

        let y_out = 3 * config.canvas_height / 4;
        assert_eq!(canvas.pixel(15, y_out), COLOR_OUT);
        assert_eq!(canvas.pixel(16, y_out), (0, 0, 0));
    }

    #[test]
    fn gain_clips_to_amplitude_limit() {
        let config = small_config();
        let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
        let mut canvas = FrameBuffer::new(config.input_dim, config.canvas_height);
        let mut activation = Vec::new();
        // Huge samples with a large gain: clipped to ±1, so the trace
        // peaks exactly max_amp above the baseline.
        let window = vec![100.0f32; config.input_dim];

        draw_activations(&mut canvas, &weights, &window, &config, &mut activation);

        let h = config.canvas_height;
        let y_peak = ((h / 4) as f32 - h as f32 / 5.0).round() as usize;
        assert_eq!(canvas.pixel(0, y_peak), COLOR_IN);
        // Nothing above the clipped peak.
        for y in 0..y_peak {
            assert_eq!(canvas.pixel(0, y), (0, 0, 0));
        }
    }

    #[test]
    fn degenerate_canvas_is_a_no_op() {
        let config = small_config();
        let weights = WeightMatrix::synthetic(config.input_dim, config.output_dim);
        let mut activation = Vec::new();
        let window = vec![0.5f32; config.input_dim];

        let mut flat = FrameBuffer::new(config.input_dim, 0);
        draw_activations(&mut flat, &weights, &window, &config, &mut activation);
        assert!(flat.data.is_empty());

        let mut thin = FrameBuffer::new(0, config.canvas_height);
        draw_activations(&mut thin, &weights, &window, &config, &mut activation);
        assert!(thin.data.is_empty());
    }

    #[test]
    fn weights_view_fills_canvas_grayscale() {
        let weights = WeightMatrix::synthetic(16, 16);
        let mut canvas = FrameBuffer::new(32, 32);
        draw_weights(&mut canvas, &weights);
        // Every pixel is gray (r == g == b).
        for y in 0..32 {
            for x in 0..32 {
                let (r, g, b) = canvas.pixel(x, y);
                assert_eq!(r, g);
                assert_eq!(g, b);
            }
        }
    }
}
