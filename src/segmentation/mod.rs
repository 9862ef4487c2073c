mod energy;
mod graph_cut;
mod kmeans;

pub use energy::{
    EnergyModel, HistogramDistance, PairwiseTerm, UnaryTerm, HINT_CLAMP, SMOOTHNESS_CEILING,
};
pub use graph_cut::GraphCutSegmenter;
pub use kmeans::KMeansSegmenter;
