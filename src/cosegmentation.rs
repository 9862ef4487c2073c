use crate::features::{HistogramBins, HsHistogram};
use crate::segmentation::{GraphCutSegmenter, KMeansSegmenter};
use crate::session::{ImageSession, SuperpixelLabels};
use rayon::prelude::*;

/// Which segmentation path to run over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// Hint-driven pairwise energy minimization, one min-cut per image.
    GraphCut,
    /// Unsupervised 2-means over the pooled histograms.
    KMeans,
}

/// Drives co-segmentation over an image collection.
///
/// Owns one [`ImageSession`] per image. The cumulative foreground and
/// background histograms are pooled across every image's hints once per
/// run and treated as an immutable snapshot; after that the per-image
/// cuts are independent and run in parallel.
pub struct Cosegmentation {
    sessions: Vec<ImageSession>,
    bins: HistogramBins,
}

impl Cosegmentation {
    pub fn new(sessions: Vec<ImageSession>, bins: HistogramBins) -> Self {
        Self { sessions, bins }
    }

    pub fn sessions(&self) -> &[ImageSession] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut [ImageSession] {
        &mut self.sessions
    }

    /// Pool the raw histograms of every image's hinted superpixels into
    /// one cumulative foreground and one cumulative background
    /// distribution. Hint ids outside `0..K` are skipped.
    pub fn pool_hint_histograms(&self) -> (HsHistogram, HsHistogram) {
        let mut foreground = HsHistogram::zeros(self.bins);
        let mut background = HsHistogram::zeros(self.bins);

        for session in &self.sessions {
            let count = session.histograms.len() as u32;
            for &id in session.hints.foreground() {
                if id < count {
                    foreground.merge(&session.histograms[id as usize]);
                }
            }
            for &id in session.hints.background() {
                if id < count {
                    background.merge(&session.histograms[id as usize]);
                }
            }
        }

        (foreground.normalized(), background.normalized())
    }

    pub fn run(&mut self, mode: SegmentationMode) {
        match mode {
            SegmentationMode::GraphCut => self.run_graph_cut(),
            SegmentationMode::KMeans => self.run_kmeans(),
        }
    }

    /// Graph-cut path: pool the cumulative histograms, then cut every
    /// image against them. The per-image stage is data-parallel; each
    /// cut owns its flow network exclusively.
    pub fn run_graph_cut(&mut self) {
        if self.sessions.iter().all(|s| s.hints.is_empty()) {
            tracing::warn!(
                "no foreground/background hints anywhere; unary costs degrade to \
                 appearance against empty pools (consider the kmeans mode)"
            );
        }

        let (cumulative_fg, cumulative_bg) = self.pool_hint_histograms();
        let segmenter = GraphCutSegmenter::default();

        self.sessions.par_iter_mut().for_each(|session| {
            session.labels = Some(segmenter.segment(session, &cumulative_fg, &cumulative_bg));
        });
    }

    /// Clustering path: every image's normalized histograms are pooled
    /// in image order, clustered into two classes, and sliced back to
    /// the images by cumulative index ranges.
    ///
    /// The resulting labels are cluster identities (`true` = class A),
    /// not foreground/background.
    pub fn run_kmeans(&mut self) {
        let features: Vec<Vec<f32>> = self
            .sessions
            .iter()
            .flat_map(|session| session.normalized.iter().map(HsHistogram::flattened))
            .collect();

        let classes = KMeansSegmenter::default().cluster(&features);

        let mut offset = 0;
        for session in &mut self.sessions {
            let count = session.num_superpixels() as usize;
            session.labels = Some(SuperpixelLabels(classes[offset..offset + count].to_vec()));
            offset += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::superpixels::LabelMap;
    use image::{Rgb, RgbImage};

    /// Image of `bands` horizontal stripes, one superpixel per stripe,
    /// with per-stripe colors.
    fn striped_session(name: &str, colors: &[[u8; 3]]) -> ImageSession {
        let bands = colors.len() as u32;
        let height = bands * 2;
        let image = RgbImage::from_fn(4, height, |_, y| Rgb(colors[(y / 2) as usize]));
        let labels = (0..4 * height).map(|i| (i / 4) / 2).collect();
        let map = LabelMap::new(4, height, labels).unwrap();
        ImageSession::new(name.into(), image, map, HistogramBins::default())
    }

    #[test]
    fn pooled_histograms_cover_all_images() {
        let mut first = striped_session("a.png", &[[255, 0, 0], [0, 0, 255]]);
        let mut second = striped_session("b.png", &[[250, 10, 10], [10, 10, 250]]);
        first.hints.set_foreground([0]);
        first.hints.set_background([1]);
        second.hints.set_foreground([0]);
        // Out-of-range hint must be skipped, not panic.
        second.hints.set_background([1, 99]);

        let coseg = Cosegmentation::new(vec![first, second], HistogramBins::default());
        let (fg, bg) = coseg.pool_hint_histograms();
        assert!((fg.sum() - 1.0).abs() < 1e-5);
        assert!((bg.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_hints_pool_to_zero_mass() {
        let coseg = Cosegmentation::new(
            vec![striped_session("a.png", &[[9, 9, 9], [200, 0, 0]])],
            HistogramBins::default(),
        );
        let (fg, bg) = coseg.pool_hint_histograms();
        assert_eq!(fg.sum(), 0.0);
        assert_eq!(bg.sum(), 0.0);
    }

    #[test]
    fn graph_cut_transfers_hints_across_images() {
        // Only the first image carries hints; the second is segmented
        // purely by appearance against the pooled histograms.
        let mut hinted = striped_session("a.png", &[[255, 0, 0], [0, 0, 255]]);
        hinted.hints.set_foreground([0]);
        hinted.hints.set_background([1]);
        let unhinted = striped_session("b.png", &[[250, 5, 5], [5, 5, 250]]);

        let mut coseg =
            Cosegmentation::new(vec![hinted, unhinted], HistogramBins::default());
        coseg.run(SegmentationMode::GraphCut);

        for session in coseg.sessions() {
            let labels = session.labels.as_ref().unwrap();
            assert_eq!(labels.0, vec![true, false], "{}", session.path.display());
        }
    }

    #[test]
    fn graph_cut_masks_cover_every_pixel() {
        let mut session = striped_session("a.png", &[[255, 0, 0], [0, 0, 255]]);
        session.hints.set_foreground([0]);
        session.hints.set_background([1]);

        let mut coseg = Cosegmentation::new(vec![session], HistogramBins::default());
        coseg.run_graph_cut();

        let session = &coseg.sessions()[0];
        let mask = session.pixel_mask().unwrap();
        for (x, y, pixel) in mask.enumerate_pixels() {
            let id = session.label_map.label_at(x, y) as usize;
            let expected = if session.labels.as_ref().unwrap().0[id] { 255 } else { 0 };
            assert_eq!(pixel[0], expected);
        }
    }

    #[test]
    fn graph_cut_runs_are_deterministic() {
        let build = || {
            let mut a = striped_session("a.png", &[[255, 0, 0], [30, 40, 50], [0, 0, 255]]);
            a.hints.set_foreground([0]);
            a.hints.set_background([2]);
            Cosegmentation::new(vec![a], HistogramBins::default())
        };
        let mut first = build();
        let mut second = build();
        first.run_graph_cut();
        second.run_graph_cut();
        assert_eq!(
            first.sessions()[0].labels.as_ref().unwrap().0,
            second.sessions()[0].labels.as_ref().unwrap().0
        );
    }

    #[test]
    fn kmeans_slices_match_image_id_ranges() {
        // K=3 and K=2 superpixels: pooled feature list of 5, sliced
        // back into runs of 3 and 2.
        let three = striped_session("a.png", &[[255, 0, 0], [0, 255, 0], [0, 0, 255]]);
        let two = striped_session("b.png", &[[255, 0, 0], [0, 0, 255]]);

        let mut coseg = Cosegmentation::new(vec![three, two], HistogramBins::default());
        coseg.run(SegmentationMode::KMeans);

        let lengths: Vec<usize> = coseg
            .sessions()
            .iter()
            .map(|s| s.labels.as_ref().unwrap().0.len())
            .collect();
        assert_eq!(lengths, vec![3, 2]);
    }
}
