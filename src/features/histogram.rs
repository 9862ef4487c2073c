use super::hsv::HsPlane;
use ndarray::Array2;

/// Histogram resolution over the hue and saturation channels.
#[derive(Debug, Clone, Copy)]
pub struct HistogramBins {
    pub hue: usize,
    pub sat: usize,
}

impl Default for HistogramBins {
    fn default() -> Self {
        Self { hue: 20, sat: 20 }
    }
}

/// A 2D hue/saturation histogram.
///
/// Bins are laid out `(hue, sat)`. The same type holds raw counts and
/// the normalized (unit mass) form; [`HsHistogram::normalized`] converts
/// between the two.
#[derive(Debug, Clone)]
pub struct HsHistogram {
    bins: Array2<f32>,
}

impl HsHistogram {
    pub fn zeros(bins: HistogramBins) -> Self {
        Self {
            bins: Array2::zeros((bins.hue, bins.sat)),
        }
    }

    /// Histogram of every pixel in the plane.
    pub fn of_plane(plane: &HsPlane, bins: HistogramBins) -> Self {
        let mut hist = Self::zeros(bins);
        for (&h, &s) in plane.hue.iter().zip(&plane.sat) {
            hist.accumulate(h, s);
        }
        hist
    }

    /// One histogram per superpixel, in a single pass over the plane.
    ///
    /// `labels` must be row-major and the same length as the plane;
    /// superpixel `i` counts exactly the pixels labeled `i`.
    pub fn per_superpixel(
        plane: &HsPlane,
        labels: &[u32],
        num_superpixels: u32,
        bins: HistogramBins,
    ) -> Vec<Self> {
        let mut hists = vec![Self::zeros(bins); num_superpixels as usize];
        for ((&h, &s), &label) in plane.hue.iter().zip(&plane.sat).zip(labels) {
            hists[label as usize].accumulate(h, s);
        }
        hists
    }

    /// Count one (hue, saturation) sample.
    pub fn accumulate(&mut self, hue: f32, sat: f32) {
        let (nh, ns) = self.bins.dim();
        let hi = ((hue / 360.0 * nh as f32) as usize).min(nh - 1);
        let si = ((sat * ns as f32) as usize).min(ns - 1);
        self.bins[(hi, si)] += 1.0;
    }

    /// Add another histogram's counts into this one. Used when pooling
    /// hinted superpixels into the cumulative distributions.
    pub fn merge(&mut self, other: &Self) {
        self.bins += &other.bins;
    }

    pub fn sum(&self) -> f32 {
        self.bins.sum()
    }

    /// Normalize to unit mass.
    ///
    /// An all-zero raw histogram (a superpixel whose pixels never hit a
    /// bin cannot occur, but an empty hint pool can) normalizes to
    /// all-zero rather than dividing by zero.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total == 0.0 {
            return Self {
                bins: Array2::zeros(self.bins.raw_dim()),
            };
        }
        Self {
            bins: &self.bins / total,
        }
    }

    /// Flattened bin values, row-major. Feature vector for clustering.
    pub fn flattened(&self) -> Vec<f32> {
        self.bins.iter().copied().collect()
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.bins
    }
}

/// Kullback-Leibler style divergence between two equal-shaped
/// histograms. Lower means more similar; not symmetric.
///
/// Zero bins on the left are skipped; zero bins on the right are
/// floored at 1e-10 so the log stays finite.
pub fn kl_divergence(p: &HsHistogram, q: &HsHistogram) -> f32 {
    p.bins
        .iter()
        .zip(q.bins.iter())
        .filter(|(&pv, _)| pv > f32::EPSILON)
        .map(|(&pv, &qv)| pv * (pv / qv.max(1e-10)).ln())
        .sum()
}
