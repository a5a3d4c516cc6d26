//! crabfocus: focus stack selection by region sharpness
//!
//! Given a stack of same-size frames taken at different focus distances and a
//! rectangular region of interest, score how sharp the region is in every frame
//! and report which frame is best focused there.
//!
//! # Features
//! - Five sharpness metrics: contrast ratio, Sobel magnitude, absolute and
//!   squared first differences, weighted spectral energy
//! - Cosine apodization of the region before scoring
//! - Pairwise frame comparison
//! - Glob-based stack loading for 8-bit, 16-bit and float images
//! - Optional parallel scoring
//!
//! # Usage
//! ```rust,no_run
//! use crabfocus::{argmax, load_image_stack, optimize, CostKind, Region};
//!
//! # fn main() -> crabfocus::Result<()> {
//! if let Some(stack) = load_image_stack("stack/*.png")? {
//!     let region = Region::new(120.0, 80.0, 64.0, 64.0);
//!     let scores = optimize(&stack, &region, &CostKind::Sobel)?;
//!     println!("sharpest frame: {:?}", argmax(&scores));
//! }
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod cost;
pub mod errors;
pub mod focus_stack;
pub mod region;
pub mod types;
pub mod window;

// Testing utilities - synthetic scenes for tests and benches
pub mod testing;

// Re-exports for convenience
pub use config::CrabFocusConfig;
pub use cost::{CostFunction, CostKind, Halving};
pub use errors::{FocusError, Result};
pub use focus_stack::{
    argmax, discriminate, load_image_stack, optimize, optimize_with, select_sharpest,
    DegeneratePolicy, OptimizerOptions, ScoreReport, WindowMode,
};
pub use region::{PixelRect, Region};
pub use types::ImageStack;
pub use window::cos_window;

/// Initialize logging for crabfocus
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "crabfocus=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        cost_functions: CostKind::ALL
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub cost_functions: Vec<String>,
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_crate_info() {
        let info = get_info();
        assert_eq!(info.name, "crabfocus");
        assert!(!info.version.is_empty());
        assert!(!info.description.is_empty());
        assert_eq!(info.cost_functions.len(), 5);
        assert!(info.cost_functions.contains(&"frequency".to_string()));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
