//! Frequency-domain weighted energy metric
//!
//! The patch is windowed, transformed with a 2-D FFT, and the magnitudes of
//! one half of the spectrum are summed, each bin weighted by its distance
//! from the zero frequency. Sharp patches carry more energy at high spatial
//! frequencies and therefore score higher.
//!
//! Only the trailing `rows / 2` spectrum rows are used; the other half
//! mirrors it for real input. With an odd row count the half is taken with
//! floor division unless [`Halving::Strict`] is requested.

use super::CostFunction;
use crate::errors::{FocusError, Result};
use crate::window::cos_window;
use ndarray::{Array2, ArrayView2};
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// How an odd number of patch rows is halved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Halving {
    /// `rows / 2` rounded down
    #[default]
    Floor,
    /// Odd row counts are rejected
    Strict,
}

/// Frequency metric with an explicit halving convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyCost {
    pub halving: Halving,
}

impl CostFunction for FrequencyCost {
    fn name(&self) -> &str {
        "frequency"
    }

    fn score(&self, patch: ArrayView2<'_, f64>) -> Result<f64> {
        match self.halving {
            Halving::Floor => cost_frequency(patch),
            Halving::Strict => cost_frequency_strict(patch),
        }
    }

    fn windows_internally(&self) -> bool {
        true
    }
}

/// Weighted spectral energy, halving odd row counts with floor division
pub fn cost_frequency(patch: ArrayView2<'_, f64>) -> Result<f64> {
    weighted_half_spectrum(patch)
}

/// Weighted spectral energy; odd row counts are a dimension error
pub fn cost_frequency_strict(patch: ArrayView2<'_, f64>) -> Result<f64> {
    let (rows, cols) = patch.dim();
    if rows % 2 != 0 {
        return Err(FocusError::DimensionMismatch {
            expected: (rows - 1, cols),
            got: (rows, cols),
        });
    }
    weighted_half_spectrum(patch)
}

fn weighted_half_spectrum(patch: ArrayView2<'_, f64>) -> Result<f64> {
    let (rows, cols) = patch.dim();
    let half = rows / 2;
    if half == 0 || cols == 0 {
        return Err(FocusError::DimensionMismatch {
            expected: (2, 1),
            got: (rows, cols),
        });
    }

    let window = cos_window(rows, cols)?;
    let spectrum = fft_2d(&(&window * &patch));

    // u in [-cols/2, cols/2], |v| in [0, rows/2]
    let u: Vec<f64> = (0..cols).map(|j| signed_frequency(j, cols)).collect();

    let mut total = 0.0;
    for r in (rows - half)..rows {
        let v = signed_frequency(r, rows);
        let row = &spectrum[r * cols..(r + 1) * cols];
        for (bin, &uj) in row.iter().zip(u.iter()) {
            total += uj.hypot(v) * bin.norm();
        }
    }

    Ok(total)
}

/// Signed frequency of FFT bin `k` in a transform of length `n`
fn signed_frequency(k: usize, n: usize) -> f64 {
    if k <= n / 2 {
        k as f64
    } else {
        k as f64 - n as f64
    }
}

/// Row-major 2-D forward FFT via row then column passes
fn fft_2d(image: &Array2<f64>) -> Vec<Complex<f64>> {
    let (rows, cols) = image.dim();
    let mut planner = FftPlanner::<f64>::new();

    let mut data: Vec<Complex<f64>> = image.iter().map(|&v| Complex::new(v, 0.0)).collect();

    // rows are contiguous, one call transforms all of them
    planner.plan_fft_forward(cols).process(&mut data);

    let mut columns = vec![Complex::new(0.0, 0.0); rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            columns[c * rows + r] = data[r * cols + c];
        }
    }
    planner.plan_fft_forward(rows).process(&mut columns);

    for r in 0..rows {
        for c in 0..cols {
            data[r * cols + c] = columns[c * rows + r];
        }
    }
    data
}
