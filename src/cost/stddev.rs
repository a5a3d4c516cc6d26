/// Contrast ratio metric
///
/// Half the intensity range divided by the standard deviation of the patch.
use crate::errors::{FocusError, Result};
use ndarray::ArrayView2;

/// `((max - min) / 2) / std(patch)`, using the population standard deviation.
///
/// A uniform patch has no spread and yields [`FocusError::DegenerateInput`];
/// the optimizer decides how to score such frames.
pub fn cost_stddev(patch: ArrayView2<'_, f64>) -> Result<f64> {
    if patch.is_empty() {
        return Err(FocusError::DegenerateInput("empty patch".to_string()));
    }

    let n = patch.len() as f64;
    let mean = patch.sum() / n;
    let variance = patch.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let (min, max) = patch
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if std == 0.0 || max == min {
        return Err(FocusError::DegenerateInput(format!(
            "uniform patch of {} pixels at intensity {}",
            patch.len(),
            min
        )));
    }

    Ok((max - min) / 2.0 / std)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_two_sample_patch() {
        let patch = array![[-100.0, 100.0]];
        assert_eq!(cost_stddev(patch.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_uniform_patch_is_degenerate() {
        let patch = Array2::from_elem((8, 8), 42.0);
        assert!(matches!(
            cost_stddev(patch.view()),
            Err(FocusError::DegenerateInput(_))
        ));

        let empty = Array2::<f64>::zeros((0, 4));
        assert!(cost_stddev(empty.view()).is_err());
    }

    #[test]
    fn test_never_below_one() {
        // population std never exceeds half the range
        let patch = array![[0.0, 3.0, 9.0], [1.0, 1.0, 2.0]];
        assert!(cost_stddev(patch.view()).unwrap() >= 1.0);
    }

    #[test]
    fn test_outlier_raises_score() {
        let spread = array![[0.0, 10.0, 0.0, 10.0]];
        let outlier = array![[0.0, 0.0, 0.0, 10.0]];
        assert!(cost_stddev(outlier.view()).unwrap() > cost_stddev(spread.view()).unwrap());
    }
}
