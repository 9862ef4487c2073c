use super::overlay::{apply_markings, side_by_side, superpixel_overlay};
use crate::session::ImageSession;
use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes per-image artifacts under an output directory:
/// `superpixel/` gets the boundary-annotated sources, `segmentation/`
/// the masks and review overlays.
pub struct ArtifactWriter {
    superpixel_dir: PathBuf,
    segmentation_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        let superpixel_dir = output_dir.join("superpixel");
        let segmentation_dir = output_dir.join("segmentation");
        for dir in [&superpixel_dir, &segmentation_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }
        Ok(Self {
            superpixel_dir,
            segmentation_dir,
        })
    }

    fn file_name(session: &ImageSession) -> String {
        session
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.png".into())
    }

    /// Source image with superpixel boundaries burned in.
    pub fn write_superpixel_image(&self, session: &ImageSession) -> Result<()> {
        let overlay = superpixel_overlay(&session.image, &session.label_map);
        let path = self.superpixel_dir.join(Self::file_name(session));
        overlay
            .save(&path)
            .with_context(|| format!("Failed to write superpixel image {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Binary mask plus the side-by-side review overlay. Skips quietly
    /// if the session has no result yet.
    pub fn write_segmentation(
        &self,
        session: &ImageSession,
        marking: Option<&RgbImage>,
    ) -> Result<()> {
        let Some(mask) = session.pixel_mask() else {
            tracing::warn!("{} has no segmentation result to write", session.path.display());
            return Ok(());
        };

        let name = Self::file_name(session);

        let mask_path = self.segmentation_dir.join(format!("mask_{name}"));
        mask.save(&mask_path)
            .with_context(|| format!("Failed to write mask {}", mask_path.display()))?;

        let mut annotated = superpixel_overlay(&session.image, &session.label_map);
        if let Some(marking) = marking {
            apply_markings(&mut annotated, marking);
        }
        let combined = side_by_side(&annotated, &mask);
        let overlay_path = self.segmentation_dir.join(&name);
        combined
            .save(&overlay_path)
            .with_context(|| format!("Failed to write overlay {}", overlay_path.display()))?;

        tracing::debug!("Wrote {} and {}", mask_path.display(), overlay_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::HistogramBins;
    use crate::session::SuperpixelLabels;
    use crate::superpixels::LabelMap;
    use image::Rgb;

    #[test]
    fn writes_mask_and_overlay_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();

        let image = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
        let map = LabelMap::new(4, 2, vec![0, 0, 1, 1, 0, 0, 1, 1]).unwrap();
        let mut session =
            ImageSession::new("scene.png".into(), image, map, HistogramBins::default());
        session.labels = Some(SuperpixelLabels(vec![true, false]));

        writer.write_superpixel_image(&session).unwrap();
        writer.write_segmentation(&session, None).unwrap();

        assert!(dir.path().join("superpixel/scene.png").exists());
        assert!(dir.path().join("segmentation/mask_scene.png").exists());
        assert!(dir.path().join("segmentation/scene.png").exists());
    }

    #[test]
    fn missing_result_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();

        let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let map = LabelMap::new(2, 2, vec![0, 0, 1, 1]).unwrap();
        let session = ImageSession::new("none.png".into(), image, map, HistogramBins::default());

        writer.write_segmentation(&session, None).unwrap();
        assert!(!dir.path().join("segmentation/mask_none.png").exists());
    }
}
