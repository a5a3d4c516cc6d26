//! Cosine apodization window
//!
//! Tapers a patch towards zero at its borders so that the hard edges of the
//! crop do not dominate gradient or frequency based scores.

use crate::errors::{FocusError, Result};
use ndarray::{Array1, Array2};
use std::f64::consts::{FRAC_PI_2, PI};

/// One dimensional cosine taper: `n` samples of `cos` over `[-pi/2, pi/2]`
///
/// The last sample is pinned to `pi/2` so both edges taper to the same value.
pub fn cos_taper(n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, (-FRAC_PI_2).cos());
    }
    let last = n.saturating_sub(1);
    Array1::from_shape_fn(n, |i| {
        if i == last {
            FRAC_PI_2
        } else {
            -FRAC_PI_2 + PI * i as f64 / last as f64
        }
    })
    .mapv(f64::cos)
}

/// Outer product of two cosine tapers, shaped `w` x `h`.
///
/// The first dimension is the row axis, so a patch of `rows` x `cols` pixels
/// takes `cos_window(rows, cols)`. A single sample degenerates to `cos(-pi/2)`.
pub fn cos_window(w: usize, h: usize) -> Result<Array2<f64>> {
    if w == 0 || h == 0 {
        return Err(FocusError::InvalidWindow(w, h));
    }

    let ww = cos_taper(w);
    let hw = cos_taper(h);
    Ok(Array2::from_shape_fn((w, h), |(i, j)| ww[i] * hw[j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shape() {
        let window = cos_window(7, 4).unwrap();
        assert_eq!(window.dim(), (7, 4));
    }

    #[test]
    fn test_window_center_and_edges() {
        let window = cos_window(9, 9).unwrap();
        assert!((window[[4, 4]] - 1.0).abs() < 1e-12);
        for k in 0..9 {
            assert!(window[[0, k]].abs() < 1e-12);
            assert!(window[[8, k]].abs() < 1e-12);
            assert!(window[[k, 0]].abs() < 1e-12);
            assert!(window[[k, 8]].abs() < 1e-12);
        }
    }

    #[test]
    fn test_window_is_outer_product() {
        let window = cos_window(5, 3).unwrap();
        let rows = cos_taper(5);
        let cols = cos_taper(3);
        for i in 0..5 {
            for j in 0..3 {
                assert_eq!(window[[i, j]], rows[i] * cols[j]);
            }
        }
        // middle column of a 3-wide taper is exactly 1
        assert_eq!(cols[1], 1.0);
    }

    #[test]
    fn test_window_symmetry() {
        let window = cos_window(6, 10).unwrap();
        for i in 0..6 {
            for j in 0..10 {
                assert!((window[[i, j]] - window[[5 - i, 9 - j]]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_taper_edges_mirror() {
        for n in 2..64 {
            let taper = cos_taper(n);
            assert_eq!(taper[0], taper[n - 1], "n = {}", n);
            assert!(taper.iter().all(|&v| (0.0..=1.0).contains(&v)), "n = {}", n);
        }
        let window = cos_window(26, 26).unwrap();
        assert!(window[[25, 13]] >= 0.0);
        assert_eq!(window[[0, 0]], window[[25, 25]]);

        let strip = cos_window(26, 1).unwrap();
        assert!(strip.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(strip[[0, 0]], strip[[25, 0]]);
    }

    #[test]
    fn test_single_sample_window() {
        let window = cos_window(1, 1).unwrap();
        assert_eq!(window.dim(), (1, 1));
        assert!(window[[0, 0]].abs() < 1e-12);
        assert!(matches!(cos_window(0, 3), Err(FocusError::InvalidWindow(0, 3))));
    }
}
