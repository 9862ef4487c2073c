mod histogram;
mod hsv;

pub use histogram::{kl_divergence, HistogramBins, HsHistogram};
pub use hsv::{rgb_to_hs, HsPlane};
