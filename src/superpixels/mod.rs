mod files;
mod label_map;

pub use files::LabelMapFiles;
pub use label_map::LabelMap;

use anyhow::Result;
use image::RgbImage;
use std::path::Path;

/// Parameters handed to the external over-segmentation step.
///
/// Mirrors the collaborator contract: the algorithm returns a label
/// grid matching the image dimensions with labels densely covering
/// `0..K`.
#[derive(Debug, Clone)]
pub struct SuperpixelParams {
    /// Requested number of superpixels.
    pub num_segments: u32,
    /// Shape-regularity tradeoff: higher means more compact superpixels.
    pub compactness: f32,
    /// Iteration cap for the clustering loop.
    pub max_iterations: u32,
    /// Pre-smoothing kernel width, 0 to disable.
    pub smoothing_sigma: f32,
}

impl Default for SuperpixelParams {
    fn default() -> Self {
        Self {
            num_segments: 500,
            compactness: 20.0,
            max_iterations: 10,
            smoothing_sigma: 0.0,
        }
    }
}

/// Trait for superpixel label-map providers.
///
/// Allows swapping the external over-segmentation collaborator (an
/// on-disk label map, a SLIC binding, ...) without touching the core.
pub trait SuperpixelSource {
    /// Produce the label map for one image.
    fn superpixels(
        &self,
        image: &RgbImage,
        image_path: &Path,
        params: &SuperpixelParams,
    ) -> Result<LabelMap>;
}
