//! Feature standardization.
//!
//! Fit once on training rows, then apply the same parameters at both train
//! and inference time. Refitting at inference would silently shift every
//! prediction, so the fitted parameters travel inside the model bundle.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A column whose standard deviation falls below this is treated as constant:
/// it is centered but not scaled (divisor 1.0), so no NaN or infinity can
/// leak into downstream predictions.
const MIN_STD: f64 = 1e-12;

/// Per-column standardization transform: (x - mean) / std
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Fit per-column mean and standard deviation from training rows.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        ensure!(!rows.is_empty(), "cannot fit scaler on an empty dataset");
        let n_cols = rows[0].len();
        ensure!(n_cols > 0, "cannot fit scaler on zero-width rows");
        ensure!(
            rows.iter().all(|row| row.len() == n_cols),
            "inconsistent row widths in training data"
        );

        let n = rows.len() as f64;
        let mut mean = vec![0.0; n_cols];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut std = vec![0.0; n_cols];
        for row in rows {
            for ((s, &m), &x) in std.iter_mut().zip(&mean).zip(row) {
                *s += (x - m).powi(2);
            }
        }
        for (i, s) in std.iter_mut().enumerate() {
            *s = (*s / n).sqrt();
            if *s < MIN_STD {
                warn!(column = i, "constant column: centering without scaling");
                *s = 1.0;
            }
        }

        Ok(Self { mean, std })
    }

    /// Standardize a single row using the fitted parameters.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        debug_assert_eq!(row.len(), self.mean.len());
        row.iter()
            .zip(&self.mean)
            .zip(&self.std)
            .map(|((&x, &m), &s)| (x - m) / s)
            .collect()
    }

    /// Standardize a batch of rows.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Map a standardized row back to the original feature space.
    pub fn inverse_transform_row(&self, row: &[f64]) -> Vec<f64> {
        debug_assert_eq!(row.len(), self.mean.len());
        row.iter()
            .zip(&self.mean)
            .zip(&self.std)
            .map(|((&z, &m), &s)| z * s + m)
            .collect()
    }

    /// Number of columns the scaler was fit on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Vec<f64>> {
        vec![
            vec![38.0, 0.0, 22.0],
            vec![39.0, 1.0, 18.0],
            vec![40.0, 0.0, 14.0],
            vec![41.0, 1.0, 10.0],
        ]
    }

    #[test]
    fn test_transform_centers_and_scales() {
        let scaler = StandardScaler::fit(&sample_rows()).unwrap();
        let scaled = scaler.transform(&sample_rows());

        for c in 0..3 {
            let mean: f64 = scaled.iter().map(|r| r[c]).sum::<f64>() / scaled.len() as f64;
            let var: f64 =
                scaled.iter().map(|r| (r[c] - mean).powi(2)).sum::<f64>() / scaled.len() as f64;
            assert!(mean.abs() < 1e-10);
            assert!((var - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let scaler = StandardScaler::fit(&sample_rows()).unwrap();

        for row in sample_rows() {
            let back = scaler.inverse_transform_row(&scaler.transform_row(&row));
            for (a, b) in row.iter().zip(&back) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_constant_column_produces_no_nan() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        let scaled = scaler.transform_row(&[5.0, 2.0]);
        assert!(scaled.iter().all(|v| v.is_finite()));
        // Constant column is centered to zero, not scaled
        assert_eq!(scaled[0], 0.0);
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        assert!(StandardScaler::fit(&[]).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let scaler = StandardScaler::fit(&sample_rows()).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        let restored: StandardScaler = serde_json::from_str(&json).unwrap();

        let row = vec![39.5, 1.0, 16.0];
        assert_eq!(scaler.transform_row(&row), restored.transform_row(&row));
    }
}
