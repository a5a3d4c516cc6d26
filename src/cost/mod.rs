/// Sharpness cost functions
///
/// Each metric maps a 2-D intensity patch to one scalar; higher means sharper.
/// The built-in metrics are exposed both as plain functions and through the
/// [`CostFunction`] trait, which is what the optimizer consumes. Closures with
/// the signature `Fn(ArrayView2<f64>) -> Result<f64>` implement the trait too.
pub mod frequency;
pub mod gradient;
pub mod sobel;
pub mod stddev;

pub use frequency::{cost_frequency, cost_frequency_strict, FrequencyCost, Halving};
pub use gradient::{cost_abs_gradient, cost_squared_gradient};
pub use sobel::cost_sobel;
pub use stddev::cost_stddev;

use crate::errors::{FocusError, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pure sharpness metric over one patch
pub trait CostFunction: Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &str {
        "custom"
    }

    fn score(&self, patch: ArrayView2<'_, f64>) -> Result<f64>;

    /// True when the metric applies the cosine window itself
    fn windows_internally(&self) -> bool {
        false
    }
}

impl<F> CostFunction for F
where
    F: Fn(ArrayView2<'_, f64>) -> Result<f64> + Sync,
{
    fn score(&self, patch: ArrayView2<'_, f64>) -> Result<f64> {
        self(patch)
    }
}

/// The built-in metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    Stddev,
    #[default]
    Sobel,
    AbsGradient,
    SquaredGradient,
    Frequency,
}

impl CostKind {
    pub const ALL: [CostKind; 5] = [
        CostKind::Stddev,
        CostKind::Sobel,
        CostKind::AbsGradient,
        CostKind::SquaredGradient,
        CostKind::Frequency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostKind::Stddev => "stddev",
            CostKind::Sobel => "sobel",
            CostKind::AbsGradient => "abs_gradient",
            CostKind::SquaredGradient => "squared_gradient",
            CostKind::Frequency => "frequency",
        }
    }

    /// Boxed metric for this kind, honoring the frequency halving convention
    pub fn cost_function(self, halving: Halving) -> Box<dyn CostFunction> {
        match self {
            CostKind::Frequency => Box::new(FrequencyCost { halving }),
            other => Box::new(other),
        }
    }
}

impl CostFunction for CostKind {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn score(&self, patch: ArrayView2<'_, f64>) -> Result<f64> {
        match self {
            CostKind::Stddev => cost_stddev(patch),
            CostKind::Sobel => Ok(cost_sobel(patch)),
            CostKind::AbsGradient => Ok(cost_abs_gradient(patch)),
            CostKind::SquaredGradient => Ok(cost_squared_gradient(patch)),
            CostKind::Frequency => cost_frequency(patch),
        }
    }

    fn windows_internally(&self) -> bool {
        matches!(self, CostKind::Frequency)
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostKind {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "stddev" | "std" => Ok(CostKind::Stddev),
            "sobel" => Ok(CostKind::Sobel),
            "abs_gradient" | "gradient" => Ok(CostKind::AbsGradient),
            "squared_gradient" => Ok(CostKind::SquaredGradient),
            "frequency" | "frequencies" => Ok(CostKind::Frequency),
            _ => Err(FocusError::UnknownCostFunction(s.to_string())),
        }
    }
}
