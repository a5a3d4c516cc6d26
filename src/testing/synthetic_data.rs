//! Synthetic focus stacks
//!
//! Builds scenes with known sharpness ordering so that metrics and the
//! optimizer can be exercised without image files. Defocus is modelled as a
//! separable Gaussian blur with clamped edges.

use crate::errors::Result;
use crate::types::ImageStack;
use ndarray::{Array2, ArrayView2, Axis};

/// Checkerboard of square `cell` x `cell` tiles alternating `low` and `high`
pub fn checkerboard(rows: usize, cols: usize, cell: usize, low: f64, high: f64) -> Array2<f64> {
    let cell = cell.max(1);
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        if (r / cell + c / cell) % 2 == 0 {
            low
        } else {
            high
        }
    })
}

/// Normalized 1-D Gaussian taps out to three sigma
///
/// A non-positive sigma yields the identity kernel.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (3.0 * sigma).ceil() as isize;
    let taps: Vec<f64> = (-radius..=radius)
        .map(|k| (-((k * k) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f64 = taps.iter().sum();
    taps.into_iter().map(|tap| tap / total).collect()
}

/// Separable Gaussian blur, rows then columns
pub fn gaussian_blur(image: ArrayView2<'_, f64>, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let horizontal = convolve_axis(image, &kernel, Axis(1));
    convolve_axis(horizontal.view(), &kernel, Axis(0))
}

fn convolve_axis(image: ArrayView2<'_, f64>, kernel: &[f64], axis: Axis) -> Array2<f64> {
    let radius = (kernel.len() / 2) as isize;
    let last = image.len_of(axis) as isize - 1;

    Array2::from_shape_fn(image.dim(), |(r, c)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, &tap)| {
                let offset = k as isize - radius;
                let index = if axis == Axis(0) {
                    [(r as isize + offset).clamp(0, last) as usize, c]
                } else {
                    [r, (c as isize + offset).clamp(0, last) as usize]
                };
                tap * image[index]
            })
            .sum()
    })
}

/// One frame per sigma, each the scene blurred by that amount
///
/// Sigma 0 keeps the scene sharp.
pub fn focus_sweep(scene: ArrayView2<'_, f64>, sigmas: &[f64]) -> Result<ImageStack> {
    let frames = sigmas
        .iter()
        .map(|&sigma| gaussian_blur(scene, sigma))
        .collect();
    ImageStack::from_frames(frames)
}

/// Stack `[blur_2, blur_1, sharp]` over an 8-bit checkerboard.
///
/// `blur_1` is the scene blurred with sigma 1 and `blur_2` is `blur_1`
/// blurred again with sigma 3, so frame 2 is the sharpest.
pub fn synthetic_focus_stack(rows: usize, cols: usize, cell: usize) -> Result<ImageStack> {
    let sharp = checkerboard(rows, cols, cell, 0.0, 255.0);
    let blur_1 = gaussian_blur(sharp.view(), 1.0);
    let blur_2 = gaussian_blur(blur_1.view(), 3.0);
    ImageStack::from_frames(vec![blur_2, blur_1, sharp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_tiles() {
        let board = checkerboard(4, 6, 2, 1.0, 9.0);
        assert_eq!(board[[0, 0]], 1.0);
        assert_eq!(board[[1, 1]], 1.0);
        assert_eq!(board[[0, 2]], 9.0);
        assert_eq!(board[[2, 2]], 1.0);
        assert_eq!(board[[3, 5]], 9.0);
    }

    #[test]
    fn test_kernel_normalized_and_symmetric() {
        let kernel = gaussian_kernel(1.5);
        assert_eq!(kernel.len(), 11);
        assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for k in 0..kernel.len() / 2 {
            assert!((kernel[k] - kernel[kernel.len() - 1 - k]).abs() < 1e-15);
        }
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
    }

    #[test]
    fn test_blur_preserves_constant() {
        let flat = Array2::from_elem((5, 7), 42.0);
        let blurred = gaussian_blur(flat.view(), 2.0);
        assert!(blurred.iter().all(|&v| (v - 42.0).abs() < 1e-9));
    }

    #[test]
    fn test_blur_lowers_contrast() {
        let board = checkerboard(16, 16, 2, 0.0, 100.0);
        let blurred = gaussian_blur(board.view(), 1.0);
        let range = |a: &Array2<f64>| {
            a.iter().cloned().fold(f64::MIN, f64::max) - a.iter().cloned().fold(f64::MAX, f64::min)
        };
        assert!(range(&blurred) < range(&board));
    }

    #[test]
    fn test_synthetic_stack_layout() {
        let stack = synthetic_focus_stack(12, 10, 3).unwrap();
        assert_eq!(stack.dims(), (12, 10));
        assert_eq!(stack.frame_count(), 3);
        assert_eq!(stack.frame(2).unwrap(), checkerboard(12, 10, 3, 0.0, 255.0));
    }

    #[test]
    fn test_focus_sweep_sharp_frame() {
        let scene = checkerboard(8, 8, 2, 0.0, 1.0);
        let stack = focus_sweep(scene.view(), &[2.0, 0.0]).unwrap();
        assert_eq!(stack.frame(1).unwrap(), scene);
    }
}
