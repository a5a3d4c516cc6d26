//! Testing utilities for crabfocus
//!
//! Provides synthetic focus stacks with a known sharpest frame for offline
//! testing and benchmarking.

pub mod synthetic_data;

pub use synthetic_data::{
    checkerboard, focus_sweep, gaussian_blur, gaussian_kernel, synthetic_focus_stack,
};
