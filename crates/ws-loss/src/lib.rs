//! Training losses for the signal-transformation network.
//!
//! Scalar losses over equal-length f32 slices: mean-absolute, mean-squared,
//! log-cosh, Huber, and the composite objective combining a log-cosh
//! reconstruction term with an L1-style regularization on the predicted
//! magnitudes, optionally frequency-weighted and optionally log-cosh
//! smoothed.
//!
//! All functions assume finite inputs; no NaN/Inf guarding is performed.

/// Mean of `f` over elementwise pairs. Returns 0.0 for empty slices so an
/// empty batch contributes nothing to an objective.
#[inline]
fn mean_zip(x: &[f32], y: &[f32], f: impl Fn(f32, f32) -> f32) -> f32 {
    debug_assert_eq!(x.len(), y.len(), "loss inputs must have equal length");
    if x.is_empty() {
        return 0.0;
    }
    let sum: f32 = x.iter().zip(y).map(|(&a, &b)| f(a, b)).sum();
    sum / x.len() as f32
}

/// Mean over a single slice, same empty-slice convention.
#[inline]
fn mean_map(x: &[f32], f: impl Fn(f32) -> f32) -> f32 {
    if x.is_empty() {
        return 0.0;
    }
    let sum: f32 = x.iter().map(|&a| f(a)).sum();
    sum / x.len() as f32
}

/// Mean absolute error: `mean(|x − x̂|)`.
///
/// # Example
/// ```
/// use ws_loss::mae;
/// assert_eq!(mae(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
/// assert!((mae(&[0.0, 0.0], &[1.0, -1.0]) - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn mae(x: &[f32], x_hat: &[f32]) -> f32 {
    mean_zip(x, x_hat, |a, b| (a - b).abs())
}

/// Mean squared error: `mean((x − x̂)²)`.
///
/// # Example
/// ```
/// use ws_loss::mse;
/// assert_eq!(mse(&[3.0], &[3.0]), 0.0);
/// assert!((mse(&[0.0], &[2.0]) - 4.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn mse(x: &[f32], x_hat: &[f32]) -> f32 {
    mean_zip(x, x_hat, |a, b| (a - b) * (a - b))
}

/// Log-cosh loss: `mean(ln cosh(y − ŷ))`.
///
/// Behaves like `x²/2` for small errors and like `|x| − ln 2` for large
/// ones: a smooth, outlier-robust objective.
///
/// Computed as `|d| + ln(1 + e^(−2|d|)) − ln 2` to avoid `cosh` overflow
/// for large differences.
///
/// # Example
/// ```
/// use ws_loss::logcosh;
/// assert!(logcosh(&[0.5, -0.5], &[0.5, -0.5]).abs() < 1e-6);
/// ```
#[must_use]
pub fn logcosh(y_hat: &[f32], y: &[f32]) -> f32 {
    mean_zip(y_hat, y, |a, b| ln_cosh(b - a))
}

/// Numerically stable `ln(cosh(d))`.
#[inline]
fn ln_cosh(d: f32) -> f32 {
    let a = d.abs();
    a + (-2.0 * a).exp().ln_1p() - std::f32::consts::LN_2
}

/// Huber loss: quadratic below `delta`, linear above.
///
/// `mean(0.5·d²)` where `|d| ≤ delta`, `mean(delta·|d| − 0.5·delta²)`
/// elsewhere.
///
/// # Example
/// ```
/// use ws_loss::smooth_l1;
/// // Small error: quadratic region, 0.5 · 0.1² = 0.005.
/// assert!((smooth_l1(&[0.0], &[0.1], 0.5) - 0.005).abs() < 1e-6);
/// ```
#[must_use]
pub fn smooth_l1(x: &[f32], x_hat: &[f32], delta: f32) -> f32 {
    mean_zip(x, x_hat, |a, b| {
        let d = (a - b).abs();
        if d <= delta {
            0.5 * d * d
        } else {
            delta * d - 0.5 * delta * delta
        }
    })
}

/// Regularization policy for [`calc_loss`].
///
/// # Example
/// ```
/// use ws_loss::Regularizer;
/// let reg = Regularizer::default();
/// assert!((reg.l1_lambda - 2e-5).abs() < 1e-12);
/// assert!(!reg.logcosh);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Regularizer {
    /// Regularization strength λ.
    pub l1_lambda: f32,
    /// Smooth the magnitude penalty with `ln cosh` instead of `| · |`.
    pub logcosh: bool,
}

impl Default for Regularizer {
    fn default() -> Self {
        Self {
            l1_lambda: 2e-5,
            logcosh: false,
        }
    }
}

/// Composite objective: log-cosh reconstruction plus a magnitude penalty
/// that damps high-frequency noise in the prediction.
///
/// The penalty is selected by `reg.logcosh` × `scale_by_freq`:
///
/// | `reg.logcosh` | `scale_by_freq` | penalty |
/// |---|---|---|
/// | false | `None`    | `λ · mean(\|mag\|)` |
/// | false | `Some(s)` | `λ/10 · mean(\|mag · s\|)` |
/// | true  | `None`    | `λ · mean(ln cosh(mag))` |
/// | true  | `Some(s)` | `λ/10 · mean(s · ln cosh(mag))` |
///
/// The λ/10 factor on the frequency-scaled arms is kept exactly as the
/// training runs used it.
///
/// # Panics
/// Debug builds assert that `y_hat`/`y` and `mag_hat`/`scale_by_freq`
/// have matching lengths.
///
/// # Example
/// ```
/// use ws_loss::{calc_loss, Regularizer};
/// let reg = Regularizer { l1_lambda: 0.0, logcosh: false };
/// let loss = calc_loss(&[1.0, 2.0], &[1.0, 2.0], &[0.5, 0.5], None, &reg);
/// assert!(loss.abs() < 1e-6);
/// ```
#[must_use]
pub fn calc_loss(
    y_hat: &[f32],
    y: &[f32],
    mag_hat: &[f32],
    scale_by_freq: Option<&[f32]>,
    reg: &Regularizer,
) -> f32 {
    let recon = logcosh(y_hat, y);

    let penalty = match (reg.logcosh, scale_by_freq) {
        (false, None) => reg.l1_lambda * mean_map(mag_hat, f32::abs),
        (false, Some(scale)) => {
            reg.l1_lambda / 10.0 * mean_zip(mag_hat, scale, |m, s| (m * s).abs())
        }
        (true, None) => reg.l1_lambda * mean_map(mag_hat, ln_cosh),
        (true, Some(scale)) => {
            reg.l1_lambda / 10.0 * mean_zip(mag_hat, scale, |m, s| s * ln_cosh(m))
        }
    };

    recon + penalty
}
