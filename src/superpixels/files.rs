use super::{LabelMap, SuperpixelParams, SuperpixelSource};
use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

/// Superpixel source backed by precomputed label-map files.
///
/// For an image `foo.png` this loads `foo.labels.png` from the same
/// directory: a 16-bit grayscale PNG whose pixel values are superpixel
/// ids, as written by an external SLIC tool. The over-segmentation
/// parameters are carried for sources that run the algorithm
/// themselves; here the labels are already fixed on disk.
pub struct LabelMapFiles;

impl SuperpixelSource for LabelMapFiles {
    fn superpixels(
        &self,
        image: &RgbImage,
        image_path: &Path,
        _params: &SuperpixelParams,
    ) -> Result<LabelMap> {
        let label_path = label_path_for(image_path);
        tracing::debug!("Loading label map from {}", label_path.display());

        let label_image = image::open(&label_path)
            .with_context(|| format!("Failed to open label map {}", label_path.display()))?
            .to_luma16();

        let labels = label_image.pixels().map(|p| p[0] as u32).collect();
        let map = LabelMap::new(label_image.width(), label_image.height(), labels)
            .with_context(|| format!("Invalid label map {}", label_path.display()))?;

        let (width, height) = image.dimensions();
        map.check_dimensions(width, height)
            .with_context(|| format!("Label map {} does not fit its image", label_path.display()))?;

        Ok(map)
    }
}

fn label_path_for(image_path: &Path) -> std::path::PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image_path.with_file_name(format!("{stem}.labels.png"))
}
