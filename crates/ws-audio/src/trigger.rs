use ws_core::config::Slope;

/// Find the first threshold crossing in `samples`.
///
/// Returns the index of the first sample that is past `level` in the
/// direction of `slope` while its predecessor is not. The predecessor of
/// index 0 is implicitly zero, so a signal that starts beyond a positive
/// level triggers immediately at 0.
///
/// # Example
/// ```
/// use ws_audio::trigger::find_trigger;
/// use ws_core::config::Slope;
/// let samples = [0.0, 0.0, 0.03, 0.03];
/// assert_eq!(find_trigger(&samples, 0.02, Slope::Rising), Some(2));
/// assert_eq!(find_trigger(&[0.0; 4], 0.02, Slope::Rising), None);
/// ```
#[must_use]
pub fn find_trigger(samples: &[f32], level: f32, slope: Slope) -> Option<usize> {
    let mut prev = 0.0f32;
    for (i, &s) in samples.iter().enumerate() {
        let crossed = match slope {
            Slope::Rising => s >= level && prev <= level,
            Slope::Falling => s <= level && prev >= level,
        };
        if crossed {
            return Some(i);
        }
        prev = s;
    }
    None
}

/// Copy `len` samples starting at `start` into `out`, zero-padding the
/// tail when the capture runs out early.
///
/// `out` always ends up exactly `len` long — the invariant the activation
/// renderer relies on.
///
/// # Example
/// ```
/// use ws_audio::trigger::triggered_window;
/// let mut out = Vec::new();
/// triggered_window(&[1.0, 2.0, 3.0], 1, 4, &mut out);
/// assert_eq!(out, vec![2.0, 3.0, 0.0, 0.0]);
/// ```
pub fn triggered_window(samples: &[f32], start: usize, len: usize, out: &mut Vec<f32>) {
    out.clear();
    out.resize(len, 0.0);
    if start >= samples.len() {
        return;
    }
    let end = (start + len).min(samples.len());
    out[..end - start].copy_from_slice(&samples[start..end]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_crossing_at_index_two() {
        let samples = [0.0, 0.0, 0.03, 0.03];
        assert_eq!(find_trigger(&samples, 0.02, Slope::Rising), Some(2));
    }

    #[test]
    fn no_crossing_returns_none() {
        assert_eq!(find_trigger(&[0.0, 0.0, 0.0, 0.0], 0.02, Slope::Rising), None);
        assert_eq!(find_trigger(&[], 0.02, Slope::Rising), None);
    }

    #[test]
    fn first_sample_compares_against_implicit_zero() {
        // Already past a positive level at index 0: predecessor is 0 ≤ level,
        // so the crossing is at 0.
        assert_eq!(find_trigger(&[0.5, 0.5], 0.02, Slope::Rising), Some(0));
        // Negative level with a falling slope, same rule mirrored.
        assert_eq!(find_trigger(&[-0.5, -0.5], -0.02, Slope::Falling), Some(0));
    }

    #[test]
    fn falling_crossing() {
        let samples = [0.1, 0.05, -0.03, -0.05];
        assert_eq!(find_trigger(&samples, 0.0, Slope::Falling), Some(2));
    }

    #[test]
    fn rising_never_fires_when_level_is_never_reached() {
        let samples = [0.5, 0.4, 0.3];
        assert_eq!(find_trigger(&samples, 0.6, Slope::Rising), None);
    }

    #[test]
    fn window_pads_with_trailing_zeros() {
        let mut out = Vec::new();
        triggered_window(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, 4, &mut out);
        assert_eq!(out, vec![4.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn window_truncates_long_capture() {
        let mut out = Vec::new();
        triggered_window(&[1.0, 2.0, 3.0, 4.0, 5.0], 0, 3, &mut out);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn window_start_past_end_is_all_zero() {
        let mut out = Vec::new();
        triggered_window(&[1.0, 2.0], 10, 4, &mut out);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn window_length_is_always_exact() {
        let mut out = vec![9.0; 100];
        triggered_window(&[1.0; 8], 2, 5, &mut out);
        assert_eq!(out.len(), 5);
    }
}
