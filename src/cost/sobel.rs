/// Sobel gradient magnitude metric
use ndarray::{Array2, ArrayView2};

const SMOOTH: [f64; 3] = [1.0, 2.0, 1.0];

/// Sobel response along one axis with zero-valued samples outside the patch.
///
/// `axis == 0` differentiates along rows (and smooths across columns),
/// `axis == 1` differentiates along columns.
pub fn sobel(patch: ArrayView2<'_, f64>, axis: usize) -> Array2<f64> {
    let (rows, cols) = patch.dim();
    let at = |r: isize, c: isize| -> f64 {
        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
            0.0
        } else {
            patch[[r as usize, c as usize]]
        }
    };

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let (r, c) = (r as isize, c as isize);
        (-1..=1isize)
            .map(|k| {
                let weight = SMOOTH[(k + 1) as usize];
                let diff = if axis == 0 {
                    at(r + 1, c + k) - at(r - 1, c + k)
                } else {
                    at(r + k, c + 1) - at(r + k, c - 1)
                };
                weight * diff
            })
            .sum()
    })
}

/// Sum over the patch of `hypot(sobel_rows, sobel_cols)`
pub fn cost_sobel(patch: ArrayView2<'_, f64>) -> f64 {
    let sx = sobel(patch, 0);
    let sy = sobel(patch, 1);
    sx.iter().zip(sy.iter()).map(|(a, b)| a.hypot(*b)).sum()
}
