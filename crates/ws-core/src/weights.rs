use rand::Rng;

use crate::error::CoreError;

/// Fixed weight matrix mapping an audio window to an activation trace.
///
/// Shape is `input_dim × output_dim`, row-major. Built once at startup
/// and read-only for the lifetime of the scope session.
///
/// # Example
/// ```
/// use ws_core::weights::WeightMatrix;
/// let w = WeightMatrix::synthetic(8, 4);
/// assert_eq!(w.input_dim(), 8);
/// assert_eq!(w.output_dim(), 4);
/// ```
pub struct WeightMatrix {
    data: Vec<f32>,
    input_dim: usize,
    output_dim: usize,
}

impl WeightMatrix {
    /// Build a matrix from row-major data.
    ///
    /// # Errors
    /// Returns an error if the data length does not match the dimensions
    /// or either dimension is zero.
    pub fn from_data(data: Vec<f32>, input_dim: usize, output_dim: usize) -> Result<Self, CoreError> {
        if input_dim == 0 || output_dim == 0 || data.len() != input_dim * output_dim {
            return Err(CoreError::InvalidDimensions {
                rows: input_dim,
                cols: output_dim,
            });
        }
        Ok(Self {
            data,
            input_dim,
            output_dim,
        })
    }

    /// Synthetic layer: a sinusoidal interference pattern plus uniform
    /// noise. Stands in for weights loaded from a trained checkpoint.
    ///
    /// `w[i][j] = 0.2·sin(8π·yᵢ)·sin(8π·xⱼ) + 0.1·U[0,1)` with x, y
    /// sampled on a [0, 1] grid.
    #[must_use]
    pub fn synthetic(input_dim: usize, output_dim: usize) -> Self {
        let mut rng = rand::rng();
        let mut data = Vec::with_capacity(input_dim * output_dim);
        for i in 0..input_dim {
            let y = grid_point(i, input_dim);
            let sy = (8.0 * std::f32::consts::PI * y).sin();
            for j in 0..output_dim {
                let x = grid_point(j, output_dim);
                let sx = (8.0 * std::f32::consts::PI * x).sin();
                data.push(0.2 * sy * sx + 0.1 * rng.random::<f32>());
            }
        }
        Self {
            data,
            input_dim,
            output_dim,
        }
    }

    /// Input dimension (expected audio window length).
    #[must_use]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Output dimension (activation trace length).
    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Weight at (row, col), row-major.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.output_dim + col]
    }

    /// Vector-matrix product: `out = window · W`.
    ///
    /// `out` is truncated or zero-extended to exactly `output_dim`. The
    /// window may be shorter than `input_dim`; missing rows contribute
    /// nothing, which matches a zero-padded window.
    ///
    /// # Example
    /// ```
    /// use ws_core::weights::WeightMatrix;
    /// let w = WeightMatrix::from_data(vec![1.0, 0.0, 0.0, 1.0], 2, 2).unwrap();
    /// let mut out = Vec::new();
    /// w.forward(&[3.0, 4.0], &mut out);
    /// assert_eq!(out, vec![3.0, 4.0]);
    /// ```
    pub fn forward(&self, window: &[f32], out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.output_dim, 0.0);
        let rows = window.len().min(self.input_dim);
        for (i, &sample) in window.iter().take(rows).enumerate() {
            if sample == 0.0 {
                continue;
            }
            let row = &self.data[i * self.output_dim..(i + 1) * self.output_dim];
            for (acc, &w) in out.iter_mut().zip(row) {
                *acc += sample * w;
            }
        }
    }
}

/// Position of index `i` on a [0, 1] grid with `n` points.
fn grid_point(i: usize, n: usize) -> f32 {
    if n <= 1 {
        0.0
    } else {
        i as f32 / (n - 1) as f32
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_data_rejects_bad_shape() {
        assert!(WeightMatrix::from_data(vec![0.0; 5], 2, 2).is_err());
        assert!(WeightMatrix::from_data(vec![], 0, 4).is_err());
    }

    #[test]
    fn synthetic_has_bounded_values() {
        let w = WeightMatrix::synthetic(16, 8);
        for i in 0..16 {
            for j in 0..8 {
                let v = w.get(i, j);
                // 0.2·sin·sin ∈ [−0.2, 0.2], noise ∈ [0, 0.1)
                assert!((-0.2..0.31).contains(&v), "weight out of range: {v}");
            }
        }
    }

    #[test]
    fn forward_output_length_is_exactly_output_dim() {
        let w = WeightMatrix::synthetic(8, 5);
        let mut out = vec![9.0; 32];
        w.forward(&[1.0; 8], &mut out);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn forward_ignores_excess_window_samples() {
        let w = WeightMatrix::from_data(vec![1.0, 1.0], 2, 1).unwrap();
        let mut long = Vec::new();
        w.forward(&[1.0, 1.0, 100.0, 100.0], &mut long);
        let mut exact = Vec::new();
        w.forward(&[1.0, 1.0], &mut exact);
        assert_eq!(long, exact);
    }

    #[test]
    fn forward_short_window_acts_zero_padded() {
        let w = WeightMatrix::from_data(vec![2.0, 0.0, 0.0, 3.0], 2, 2).unwrap();
        let mut short = Vec::new();
        w.forward(&[1.0], &mut short);
        let mut padded = Vec::new();
        w.forward(&[1.0, 0.0], &mut padded);
        assert_eq!(short, padded);
        assert_eq!(short, vec![2.0, 0.0]);
    }
}
