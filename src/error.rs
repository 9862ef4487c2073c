use thiserror::Error;

/// Errors surfaced by the cosegmentation core.
///
/// Degenerate-but-recoverable conditions (all-zero histograms, empty
/// hint sets, out-of-range neighbor ids) are deliberately not errors;
/// they are handled in place and at most logged.
#[derive(Debug, Error)]
pub enum CosegError {
    /// Label map dimensions do not match the image it was produced for.
    #[error("label map is {found_w}x{found_h}, image is {expected_w}x{expected_h}")]
    LabelMapDimensions {
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },

    /// Labels do not densely cover `0..K`.
    #[error("labels must densely cover 0..K: found {count} distinct labels, max label {max}")]
    LabelMapNotDense { count: usize, max: u32 },

    /// A marking image is not aligned pixel-for-pixel with its source image.
    #[error("marking image is {found_w}x{found_h}, image is {expected_w}x{expected_h}")]
    MarkingDimensions {
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },

    #[error("failed to decode image")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
