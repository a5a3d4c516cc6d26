/// Stack loading from image files
///
/// Expands a glob pattern, decodes every match and stacks the frames in
/// lexicographic file name order.
use crate::errors::{FocusError, Result};
use crate::types::ImageStack;
use image::DynamicImage;
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Load all images matching `pattern` into one stack.
///
/// Returns `Ok(None)` when the pattern is empty or nothing matches. All
/// matches must decode to the same size.
pub fn load_image_stack(pattern: &str) -> Result<Option<ImageStack>> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }

    let mut paths: Vec<PathBuf> = glob::glob(pattern)?
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| FocusError::Io(e.into()))?;
    paths.sort();

    if paths.is_empty() {
        log::info!("No images match {}", pattern);
        return Ok(None);
    }

    log::info!("Loading {} images matching {}", paths.len(), pattern);

    let frames = paths
        .iter()
        .map(|path| load_frame(path))
        .collect::<Result<Vec<_>>>()?;

    ImageStack::from_frames(frames).map(Some)
}

/// Decode one image file into a `rows` x `cols` intensity array
pub fn load_frame(path: &Path) -> Result<Array2<f64>> {
    log::debug!("Decoding {:?}", path);
    let img = image::open(path)?;
    image_to_array(&img)
}

/// Intensities of a decoded image.
///
/// 8 and 16 bit grayscale keep their exact values, float images keep their
/// luma as floats, everything else is converted to 8 bit luma.
pub fn image_to_array(img: &DynamicImage) -> Result<Array2<f64>> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let values: Vec<f64> = match img {
        DynamicImage::ImageLuma8(buf) => buf.as_raw().iter().map(|&v| f64::from(v)).collect(),
        DynamicImage::ImageLuma16(buf) => buf.as_raw().iter().map(|&v| f64::from(v)).collect(),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => img
            .to_luma32f()
            .as_raw()
            .iter()
            .map(|&v| f64::from(v))
            .collect(),
        other => other
            .to_luma8()
            .as_raw()
            .iter()
            .map(|&v| f64::from(v))
            .collect(),
    };

    Array2::from_shape_vec((height, width), values).map_err(|_| FocusError::DimensionMismatch {
        expected: (height, width),
        got: (img.height() as usize, img.width() as usize),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn test_luma8_exact() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 10 + y * 100) as u8]));
        let array = image_to_array(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(array.dim(), (2, 3));
        assert_eq!(array[[0, 2]], 20.0);
        assert_eq!(array[[1, 1]], 110.0);
    }

    #[test]
    fn test_luma16_exact() {
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(2, 2, |x, y| Luma([(x * 1000 + y * 40000) as u16]));
        let array = image_to_array(&DynamicImage::ImageLuma16(img)).unwrap();
        assert_eq!(array[[1, 1]], 41000.0);
    }

    #[test]
    fn test_gray_rgb_converts_to_luma() {
        let img = RgbImage::from_pixel(4, 4, Rgb([77, 77, 77]));
        let array = image_to_array(&DynamicImage::ImageRgb8(img)).unwrap();
        assert!(array.iter().all(|&v| v == 77.0));
    }

    #[test]
    fn test_empty_pattern() {
        assert!(load_image_stack("").unwrap().is_none());
        assert!(load_image_stack("   ").unwrap().is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            load_image_stack("[unclosed"),
            Err(FocusError::Pattern(_))
        ));
    }
}
