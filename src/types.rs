use crate::errors::{FocusError, Result};
use crate::region::PixelRect;
use image::{GrayImage, Luma};
use ndarray::{s, Array2, Array3, ArrayView2, ArrayView3, Axis};

/// A focus stack: same-size frames of one scene, indexed `[row, column, frame]`
///
/// The stack is read-only once built. Scoring borrows views into it and only
/// ever copies the cropped region of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStack {
    data: Array3<f64>,
}

impl ImageStack {
    /// Wrap an existing `[row, column, frame]` array.
    ///
    /// Fails on an empty frame axis or on NaN/infinite intensities.
    pub fn new(data: Array3<f64>) -> Result<Self> {
        let (rows, cols, frames) = data.dim();
        if frames == 0 || rows == 0 || cols == 0 {
            return Err(FocusError::EmptyStack);
        }

        if let Some(((row, col, frame), _)) =
            data.indexed_iter().find(|(_, value)| !value.is_finite())
        {
            return Err(FocusError::NonFiniteIntensity { row, col, frame });
        }

        Ok(Self { data })
    }

    /// Stack 2-D frames along a new trailing frame axis
    pub fn from_frames(frames: Vec<Array2<f64>>) -> Result<Self> {
        let first = frames.first().ok_or(FocusError::EmptyStack)?;
        let expected = first.dim();

        for frame in frames.iter().skip(1) {
            if frame.dim() != expected {
                return Err(FocusError::DimensionMismatch {
                    expected,
                    got: frame.dim(),
                });
            }
        }

        let views: Vec<ArrayView2<f64>> = frames.iter().map(|f| f.view()).collect();
        let data = ndarray::stack(Axis(2), &views).map_err(|_| FocusError::DimensionMismatch {
            expected,
            got: expected,
        })?;

        Self::new(data)
    }

    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    pub fn frame_count(&self) -> usize {
        self.data.dim().2
    }

    /// Frame size as `(rows, cols)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<f64> {
        self.data
    }

    pub fn check_frame(&self, index: usize) -> Result<()> {
        if index >= self.frame_count() {
            return Err(FocusError::FrameOutOfRange {
                index,
                frames: self.frame_count(),
            });
        }
        Ok(())
    }

    /// Full view of one frame
    pub fn frame(&self, index: usize) -> Result<ArrayView2<'_, f64>> {
        self.check_frame(index)?;
        Ok(self.data.index_axis(Axis(2), index))
    }

    /// Borrow the pixels of `bounds` in frame `index`
    pub fn crop(&self, bounds: &PixelRect, index: usize) -> Result<ArrayView2<'_, f64>> {
        self.check_frame(index)?;
        bounds.check_within(self.rows(), self.cols())?;
        Ok(self
            .data
            .slice(s![bounds.row0..bounds.row1, bounds.col0..bounds.col1, index]))
    }

    /// 8-bit grayscale rendering of a frame, intensities rounded and clamped to 0-255
    pub fn frame_image(&self, index: usize) -> Result<GrayImage> {
        let frame = self.frame(index)?;
        Ok(GrayImage::from_fn(
            self.cols() as u32,
            self.rows() as u32,
            |x, y| {
                let value = frame[[y as usize, x as usize]];
                Luma([value.round().clamp(0.0, 255.0) as u8])
            },
        ))
    }
}
