//! Interactive image co-segmentation.
//!
//! Given a set of images, their superpixel label maps and sparse
//! foreground/background hints, this crate separates foreground from
//! background consistently across the set. Each image becomes a region
//! adjacency graph over its superpixels; hue/saturation histograms
//! provide the appearance model; and the binary assignment is solved as
//! a pairwise energy minimization via max-flow/min-cut. An unsupervised
//! 2-means path over the same histograms is available when no hints
//! exist.
//!
//! ```no_run
//! use coseg::features::HistogramBins;
//! use coseg::cosegmentation::{Cosegmentation, SegmentationMode};
//! use coseg::session::ImageSession;
//! use coseg::superpixels::LabelMap;
//!
//! let image = image::open("scene.png").unwrap().to_rgb8();
//! let labels = LabelMap::new(image.width(), image.height(), /* from a SLIC tool */ vec![]).unwrap();
//! let mut session = ImageSession::new("scene.png".into(), image, labels, HistogramBins::default());
//! session.hints.set_foreground([3, 4]);
//! session.hints.set_background([17]);
//!
//! let mut coseg = Cosegmentation::new(vec![session], HistogramBins::default());
//! coseg.run(SegmentationMode::GraphCut);
//! let mask = coseg.sessions()[0].pixel_mask().unwrap();
//! ```

pub mod cosegmentation;
pub mod error;
pub mod features;
pub mod graph;
pub mod hints;
pub mod output;
pub mod segmentation;
pub mod session;
pub mod superpixels;

pub use cosegmentation::{Cosegmentation, SegmentationMode};
pub use error::CosegError;
pub use session::ImageSession;
