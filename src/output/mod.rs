mod overlay;
mod writer;

pub use overlay::{apply_markings, boundary_mask, side_by_side, superpixel_overlay};
pub use writer::ArtifactWriter;
