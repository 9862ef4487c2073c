use crate::error::CosegError;
use crate::superpixels::LabelMap;
use image::RgbImage;
use std::collections::BTreeSet;

/// User-provided seed labels for one image.
///
/// Two sets of superpixel ids marked foreground and background. The
/// sets are disjoint in intent but not enforced; a conflicting id is
/// clamped by whichever unary term the energy model applies first.
/// Hints persist across recomputes within a session.
#[derive(Debug, Default, Clone)]
pub struct HintSet {
    foreground: BTreeSet<u32>,
    background: BTreeSet<u32>,
}

impl HintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the foreground hint ids.
    pub fn set_foreground(&mut self, ids: impl IntoIterator<Item = u32>) {
        self.foreground = ids.into_iter().collect();
    }

    /// Replace the background hint ids.
    pub fn set_background(&mut self, ids: impl IntoIterator<Item = u32>) {
        self.background = ids.into_iter().collect();
    }

    pub fn foreground(&self) -> &BTreeSet<u32> {
        &self.foreground
    }

    pub fn background(&self) -> &BTreeSet<u32> {
        &self.background
    }

    pub fn is_empty(&self) -> bool {
        self.foreground.is_empty() && self.background.is_empty()
    }

    /// Extract hints from a marking image aligned with the source image:
    /// white is unmarked, pixels with a non-white red channel mark
    /// foreground and pixels with a non-white blue channel mark
    /// background. Hinted ids are the superpixels touched by marked
    /// pixels.
    pub fn from_marking(marking: &RgbImage, map: &LabelMap) -> Result<Self, CosegError> {
        let (width, height) = marking.dimensions();
        if (width, height) != (map.width(), map.height()) {
            return Err(CosegError::MarkingDimensions {
                expected_w: map.width(),
                expected_h: map.height(),
                found_w: width,
                found_h: height,
            });
        }

        let mut hints = Self::new();
        for (x, y, pixel) in marking.enumerate_pixels() {
            if pixel[0] != 255 {
                hints.foreground.insert(map.label_at(x, y));
            }
            if pixel[2] != 255 {
                hints.background.insert(map.label_at(x, y));
            }
        }
        Ok(hints)
    }
}
