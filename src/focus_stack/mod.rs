/// Focus Stack Selection Module
///
/// Finds the best focused frame of a focus stack inside a region of interest:
/// 1. Load same-size frames into a `[row, column, frame]` stack
/// 2. Crop the region from every frame and apply the cosine window
/// 3. Score each crop with a sharpness cost function
/// 4. Hand the score profile (or its arg-max) back to the caller
pub mod discriminate;
pub mod load;
pub mod optimize;

pub use discriminate::discriminate;
pub use load::{image_to_array, load_frame, load_image_stack};
pub use optimize::{argmax, optimize, optimize_with, select_sharpest};

use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Whether the optimizer windows the crop before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Window every crop, including for metrics that window again themselves
    #[default]
    Always,
    /// Leave the crop untouched for metrics that apply their own window
    SkipSelfWindowed,
}

/// What a frame scores when its metric reports degenerate input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Substitute `OptimizerOptions::degenerate_score`
    #[default]
    Sentinel,
    /// Propagate the error to the caller
    Fail,
}

/// Optimizer behaviour switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerOptions {
    pub window_mode: WindowMode,
    pub degenerate_policy: DegeneratePolicy,
    /// Score given to degenerate frames under `DegeneratePolicy::Sentinel`
    pub degenerate_score: f64,
    /// Score frames on the rayon thread pool
    pub parallel: bool,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            window_mode: WindowMode::Always,
            degenerate_policy: DegeneratePolicy::Sentinel,
            degenerate_score: 0.0,
            parallel: false,
        }
    }
}

/// Score profile of one stack, ready for display or serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Cost function name
    pub cost: String,

    pub region: Region,

    /// One score per frame, in stack order
    pub scores: Vec<f64>,

    /// Arg-max of `scores`
    pub best_frame: Option<usize>,
}

impl ScoreReport {
    pub fn new(cost: impl Into<String>, region: Region, scores: Vec<f64>) -> Self {
        let best_frame = argmax(&scores);
        Self {
            cost: cost.into(),
            region,
            scores,
            best_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = OptimizerOptions::default();
        assert_eq!(options.window_mode, WindowMode::Always);
        assert_eq!(options.degenerate_policy, DegeneratePolicy::Sentinel);
        assert_eq!(options.degenerate_score, 0.0);
        assert!(!options.parallel);
    }

    #[test]
    fn test_report_picks_best_frame() {
        let report = ScoreReport::new("sobel", Region::new(0.0, 0.0, 4.0, 4.0), vec![1.0, 3.0, 2.0]);
        assert_eq!(report.best_frame, Some(1));

        let empty = ScoreReport::new("sobel", Region::new(0.0, 0.0, 4.0, 4.0), Vec::new());
        assert_eq!(empty.best_frame, None);
    }

    #[test]
    fn test_report_json() {
        let report = ScoreReport::new("stddev", Region::new(1.0, 2.0, 3.0, 4.0), vec![0.5]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"cost\":\"stddev\""));
        assert!(json.contains("\"best_frame\":0"));
        let back: ScoreReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            serde_json::to_string(&WindowMode::SkipSelfWindowed).unwrap(),
            "\"skip_self_windowed\""
        );
        assert_eq!(
            serde_json::to_string(&DegeneratePolicy::Fail).unwrap(),
            "\"fail\""
        );
    }
}
