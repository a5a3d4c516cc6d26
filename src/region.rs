//! Region of interest handling
//!
//! A [`Region`] is the rectangle the caller wants judged for sharpness. It is
//! expressed in image coordinates: `x` runs along columns, `y` along rows.
//! Interactive selection may produce negative extents while dragging; those
//! must be normalized by the caller before the region reaches the core.

use crate::errors::{FocusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangle of interest: origin `(x, y)` and extents `(width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Integer pixel bounds of a region, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub row0: usize,
    pub row1: usize,
    pub col0: usize,
    pub col1: usize,
}

impl Region {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from the two corners of a pointer drag.
    ///
    /// The drag may run in any direction; the result is normalized.
    pub fn from_drag(start: (f64, f64), end: (f64, f64)) -> Self {
        Self::new(start.0, start.1, end.0 - start.0, end.1 - start.1).normalized()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rectangle as `(x0, y0, x1, y1)`
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Shift the origin so that both extents become non-negative
    pub fn normalized(&self) -> Self {
        let mut region = *self;
        if region.width < 0.0 {
            region.x += region.width;
            region.width = region.width.abs();
        }
        if region.height < 0.0 {
            region.y += region.height;
            region.height = region.height.abs();
        }
        region
    }

    /// Intersect with an image of `rows` x `cols` pixels.
    ///
    /// This is a caller-side helper for interactive selection; the scoring
    /// functions never clamp and reject regions outside the image instead.
    /// Returns `None` when nothing of the region lies inside the image.
    pub fn clamped_to(&self, rows: usize, cols: usize) -> Option<Self> {
        let (x0, y0, x1, y1) = self.normalized().rect();
        let x0 = x0.max(0.0);
        let y0 = y0.max(0.0);
        let x1 = x1.min(cols as f64);
        let y1 = y1.min(rows as f64);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Convert to integer pixel bounds.
    ///
    /// Fractional coordinates are truncated. The region must already be
    /// normalized and must cover at least one whole pixel on each axis.
    pub fn pixel_bounds(&self) -> Result<PixelRect> {
        let (x0, y0, x1, y1) = self.rect();
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(FocusError::InvalidRegion(format!(
                "non-finite coordinates in {:?}",
                self
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(FocusError::InvalidRegion(format!(
                "negative extents {}x{}, normalize the region first",
                self.width, self.height
            )));
        }
        if x0 < 0.0 || y0 < 0.0 {
            return Err(FocusError::InvalidRegion(format!(
                "origin ({}, {}) lies before the image",
                x0, y0
            )));
        }

        let bounds = PixelRect {
            row0: y0.trunc() as usize,
            row1: y1.trunc() as usize,
            col0: x0.trunc() as usize,
            col1: x1.trunc() as usize,
        };

        if bounds.rows() == 0 || bounds.cols() == 0 {
            return Err(FocusError::InvalidRegion(format!(
                "region {} covers no pixels",
                self
            )));
        }
        Ok(bounds)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (x0, y0, x1, y1) = self.rect();
        write!(
            f,
            "[{}:{}, {}:{}]",
            x0 as i64, x1 as i64, y0 as i64, y1 as i64
        )
    }
}

impl PixelRect {
    pub fn rows(&self) -> usize {
        self.row1.saturating_sub(self.row0)
    }

    pub fn cols(&self) -> usize {
        self.col1.saturating_sub(self.col0)
    }

    /// Fail unless the rectangle is non-empty and fits in an image of `rows` x `cols`
    pub fn check_within(&self, rows: usize, cols: usize) -> Result<()> {
        if self.row0 >= self.row1 || self.col0 >= self.col1 {
            return Err(FocusError::InvalidRegion(format!(
                "pixel rows {}..{}, cols {}..{} are empty or inverted",
                self.row0, self.row1, self.col0, self.col1
            )));
        }
        if self.row1 > rows || self.col1 > cols {
            return Err(FocusError::RegionOutOfBounds {
                row0: self.row0,
                row1: self.row1,
                col0: self.col0,
                col1: self.col1,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let region = Region::new(100.0, 100.0, 20.0, 30.0);
        assert_eq!(region.rect(), (100.0, 100.0, 120.0, 130.0));
    }

    #[test]
    fn test_from_drag_normalizes() {
        let region = Region::from_drag((50.0, 40.0), (30.0, 10.0));
        assert_eq!(region, Region::new(30.0, 10.0, 20.0, 30.0));

        let forward = Region::from_drag((30.0, 10.0), (50.0, 40.0));
        assert_eq!(forward, region);
    }

    #[test]
    fn test_display() {
        let region = Region::new(1.5, 2.0, 10.0, 20.9);
        assert_eq!(region.to_string(), "[1:11, 2:22]");
    }

    #[test]
    fn test_pixel_bounds() {
        let bounds = Region::new(2.0, 3.0, 4.0, 5.0).pixel_bounds().unwrap();
        assert_eq!(
            bounds,
            PixelRect {
                row0: 3,
                row1: 8,
                col0: 2,
                col1: 6
            }
        );
        assert_eq!(bounds.rows(), 5);
        assert_eq!(bounds.cols(), 4);
    }

    #[test]
    fn test_pixel_bounds_rejects_unnormalized() {
        let region = Region::new(10.0, 10.0, -5.0, 5.0);
        assert!(matches!(
            region.pixel_bounds(),
            Err(FocusError::InvalidRegion(_))
        ));
        assert!(region.normalized().pixel_bounds().is_ok());
    }

    #[test]
    fn test_pixel_bounds_rejects_empty_and_nan() {
        assert!(Region::new(0.0, 0.0, 0.0, 4.0).pixel_bounds().is_err());
        assert!(Region::new(0.0, 0.0, 0.5, 4.0).pixel_bounds().is_err());
        assert!(Region::new(f64::NAN, 0.0, 4.0, 4.0).pixel_bounds().is_err());
        assert!(Region::new(-1.0, 0.0, 4.0, 4.0).pixel_bounds().is_err());
    }

    #[test]
    fn test_check_within() {
        let bounds = Region::new(0.0, 0.0, 10.0, 10.0).pixel_bounds().unwrap();
        assert!(bounds.check_within(10, 10).is_ok());
        assert!(matches!(
            bounds.check_within(9, 10),
            Err(FocusError::RegionOutOfBounds { rows: 9, .. })
        ));
    }

    #[test]
    fn test_check_within_rejects_inverted() {
        let inverted = PixelRect {
            row0: 4,
            row1: 2,
            col0: 0,
            col1: 3,
        };
        assert!(matches!(
            inverted.check_within(10, 10),
            Err(FocusError::InvalidRegion(_))
        ));

        let empty = PixelRect {
            row0: 1,
            row1: 3,
            col0: 2,
            col1: 2,
        };
        assert!(matches!(
            empty.check_within(10, 10),
            Err(FocusError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_clamped_to() {
        let region = Region::new(-5.0, 90.0, 20.0, 20.0);
        let clamped = region.clamped_to(100, 100).unwrap();
        assert_eq!(clamped, Region::new(0.0, 90.0, 15.0, 10.0));

        assert!(Region::new(200.0, 0.0, 5.0, 5.0).clamped_to(100, 100).is_none());
    }
}
