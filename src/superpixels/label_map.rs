use crate::error::CosegError;

/// A dense per-pixel superpixel assignment.
///
/// One `u32` label per pixel in row-major order; labels cover `0..K`
/// where `K` is the number of superpixels. Produced by an external
/// over-segmentation step and immutable afterwards.
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    num_superpixels: u32,
}

impl LabelMap {
    /// Build a label map from raw per-pixel labels, validating that the
    /// labels densely cover `0..K`. Density matters: superpixel ids
    /// index histogram and adjacency vectors directly.
    pub fn new(width: u32, height: u32, labels: Vec<u32>) -> Result<Self, CosegError> {
        assert_eq!(labels.len(), (width * height) as usize);

        let max = labels.iter().copied().max().unwrap_or(0);
        let mut seen = vec![false; max as usize + 1];
        for &label in &labels {
            seen[label as usize] = true;
        }
        let count = seen.iter().filter(|&&s| s).count();
        if !labels.is_empty() && count != max as usize + 1 {
            return Err(CosegError::LabelMapNotDense { count, max });
        }

        let num_superpixels = if labels.is_empty() { 0 } else { max + 1 };
        Ok(Self {
            width,
            height,
            labels,
            num_superpixels,
        })
    }

    /// Check this map against the dimensions of the image it labels.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), CosegError> {
        if (self.width, self.height) != (width, height) {
            return Err(CosegError::LabelMapDimensions {
                expected_w: width,
                expected_h: height,
                found_w: self.width,
                found_h: self.height,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of superpixels `K`; labels are `0..K`.
    pub fn num_superpixels(&self) -> u32 {
        self.num_superpixels
    }

    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels[(y * self.width + x) as usize]
    }

    /// Row-major labels, one per pixel.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }
}
