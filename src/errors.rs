use thiserror::Error;

/// Errors reported by the focus selection core and its collaborators.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Patch has no spread (uniform intensities or empty), so a ratio metric is undefined
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Region extends past the image
    #[error("Region out of bounds: rows {row0}..{row1}, cols {col0}..{col1} exceed image {rows}x{cols}")]
    RegionOutOfBounds {
        row0: usize,
        row1: usize,
        col0: usize,
        col1: usize,
        rows: usize,
        cols: usize,
    },

    /// Region is empty, negative or not finite
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Frame index outside the stack
    #[error("Frame index out of range: {index} (stack has {frames} frames)")]
    FrameOutOfRange { index: usize, frames: usize },

    /// Frames or patches of incompatible shape
    #[error("Dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, got.0, got.1)]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A stack needs at least one frame
    #[error("Image stack is empty")]
    EmptyStack,

    /// NaN or infinite intensity in the stack
    #[error("Non-finite intensity at row {row}, col {col}, frame {frame}")]
    NonFiniteIntensity { row: usize, col: usize, frame: usize },

    /// Window sizes must be at least one sample
    #[error("Invalid window size {0}x{1}")]
    InvalidWindow(usize, usize),

    #[error("Unknown cost function: {0}")]
    UnknownCostFunction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FocusError>;
