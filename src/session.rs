use crate::features::{HistogramBins, HsHistogram, HsPlane};
use crate::graph::RegionAdjacency;
use crate::hints::HintSet;
use crate::superpixels::LabelMap;
use std::path::PathBuf;

/// Per-superpixel binary labeling produced by a segmentation run.
///
/// For the graph-cut path `true` means foreground. The clustering path
/// has no foreground notion: `true` marks cluster class A and the
/// caller owns the mapping to a semantic class.
#[derive(Debug, Clone)]
pub struct SuperpixelLabels(pub Vec<bool>);

/// Everything one image carries through a segmentation run.
///
/// Replaces per-image lookups scattered across shared maps with one
/// record: source image, hue/saturation plane, label map, histograms,
/// adjacency, hints and the latest result. Derived fields are rebuilt
/// together whenever the label map changes; hints survive the rebuild.
pub struct ImageSession {
    pub path: PathBuf,
    pub image: image::RgbImage,
    pub plane: HsPlane,
    pub label_map: LabelMap,
    /// Raw per-superpixel histograms, indexed by superpixel id.
    pub histograms: Vec<HsHistogram>,
    /// Normalized per-superpixel histograms, same indexing.
    pub normalized: Vec<HsHistogram>,
    /// Whole-image histogram, kept for diagnostics.
    pub image_histogram: HsHistogram,
    pub adjacency: RegionAdjacency,
    pub hints: HintSet,
    pub labels: Option<SuperpixelLabels>,
    bins: HistogramBins,
}

impl ImageSession {
    /// Build a session from a decoded image and its label map,
    /// computing the hue/saturation plane, histograms and region
    /// adjacency up front.
    pub fn new(path: PathBuf, image: image::RgbImage, label_map: LabelMap, bins: HistogramBins) -> Self {
        let _span = tracing::debug_span!("session_build", path = %path.display()).entered();

        let plane = HsPlane::from_rgb(&image);
        let (histograms, normalized, image_histogram) =
            Self::derive_histograms(&plane, &label_map, bins);
        let adjacency = RegionAdjacency::from_label_map(&label_map);

        tracing::debug!(
            superpixels = label_map.num_superpixels(),
            histogram_mass = image_histogram.sum(),
            "Session ready for {}",
            path.display()
        );

        Self {
            path,
            image,
            plane,
            label_map,
            histograms,
            normalized,
            image_histogram,
            adjacency,
            hints: HintSet::new(),
            labels: None,
            bins,
        }
    }

    /// Swap in a new label map and rebuild every label-derived field.
    /// Hints are kept; the previous result is dropped since its ids no
    /// longer mean anything.
    pub fn replace_label_map(&mut self, label_map: LabelMap) {
        let (histograms, normalized, image_histogram) =
            Self::derive_histograms(&self.plane, &label_map, self.bins);
        self.histograms = histograms;
        self.normalized = normalized;
        self.image_histogram = image_histogram;
        self.adjacency = RegionAdjacency::from_label_map(&label_map);
        self.label_map = label_map;
        self.labels = None;
    }

    fn derive_histograms(
        plane: &HsPlane,
        label_map: &LabelMap,
        bins: HistogramBins,
    ) -> (Vec<HsHistogram>, Vec<HsHistogram>, HsHistogram) {
        let histograms = HsHistogram::per_superpixel(
            plane,
            label_map.as_slice(),
            label_map.num_superpixels(),
            bins,
        );
        let normalized = histograms.iter().map(HsHistogram::normalized).collect();
        let image_histogram = HsHistogram::of_plane(plane, bins);
        (histograms, normalized, image_histogram)
    }

    pub fn num_superpixels(&self) -> u32 {
        self.label_map.num_superpixels()
    }

    /// Expand the superpixel labeling to a pixel-resolution mask:
    /// every pixel takes the label of its superpixel, foreground as 255.
    pub fn pixel_mask(&self) -> Option<image::GrayImage> {
        let labels = self.labels.as_ref()?;
        let mask = image::GrayImage::from_fn(self.label_map.width(), self.label_map.height(), |x, y| {
            let id = self.label_map.label_at(x, y) as usize;
            image::Luma([if labels.0[id] { 255 } else { 0 }])
        });
        Some(mask)
    }
}
