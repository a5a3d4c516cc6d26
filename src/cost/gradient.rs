/// First-difference metrics along the column axis
///
/// Both metrics compare every pixel with its right neighbour. The difference
/// that would wrap from the last column back to the first is not counted.
use ndarray::{s, ArrayView2, Zip};

fn fold_right_differences(patch: ArrayView2<'_, f64>, f: impl Fn(f64) -> f64) -> f64 {
    if patch.ncols() < 2 {
        return 0.0;
    }

    let left = patch.slice(s![.., ..-1]);
    let right = patch.slice(s![.., 1..]);
    Zip::from(&left)
        .and(&right)
        .fold(0.0, |acc, &a, &b| acc + f(a - b))
}

/// Sum of absolute horizontal differences
pub fn cost_abs_gradient(patch: ArrayView2<'_, f64>) -> f64 {
    fold_right_differences(patch, f64::abs)
}

/// Sum of squared horizontal differences
pub fn cost_squared_gradient(patch: ArrayView2<'_, f64>) -> f64 {
    fold_right_differences(patch, |d| d * d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_abs_gradient_single_row() {
        let patch = array![[1.0, 2.0, 5.0, 2.0]];
        assert_eq!(cost_abs_gradient(patch.view()), 7.0);
    }

    #[test]
    fn test_squared_gradient_single_row() {
        let patch = array![[1.0, 2.0, 5.0, 2.0]];
        assert_eq!(cost_squared_gradient(patch.view()), 19.0);
    }

    #[test]
    fn test_vertical_changes_ignored() {
        let patch = array![[1.0, 1.0, 1.0], [9.0, 9.0, 9.0]];
        assert_eq!(cost_abs_gradient(patch.view()), 0.0);
        assert_eq!(cost_squared_gradient(patch.view()), 0.0);
    }

    #[test]
    fn test_narrow_patches() {
        let column = Array2::from_elem((5, 1), 3.0);
        assert_eq!(cost_abs_gradient(column.view()), 0.0);
        let empty = Array2::<f64>::zeros((3, 0));
        assert_eq!(cost_squared_gradient(empty.view()), 0.0);
    }

    #[test]
    fn test_rows_accumulate() {
        let patch = array![[0.0, 4.0], [4.0, 0.0], [1.0, 1.0]];
        assert_eq!(cost_abs_gradient(patch.view()), 8.0);
        assert_eq!(cost_squared_gradient(patch.view()), 32.0);
    }
}
