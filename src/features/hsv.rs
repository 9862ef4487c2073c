use image::RgbImage;

/// Hue/saturation plane of an image.
///
/// Hue is in degrees [0, 360), saturation in [0, 1). Both are stored
/// flattened in row-major order, matching the label map layout.
pub struct HsPlane {
    pub width: u32,
    pub height: u32,
    pub hue: Vec<f32>,
    pub sat: Vec<f32>,
}

impl HsPlane {
    /// Convert an RGB frame to its hue/saturation representation.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let len = (width * height) as usize;
        let mut hue = Vec::with_capacity(len);
        let mut sat = Vec::with_capacity(len);

        for pixel in image.pixels() {
            let (h, s) = rgb_to_hs(pixel[0], pixel[1], pixel[2]);
            hue.push(h);
            sat.push(s);
        }

        Self {
            width,
            height,
            hue,
            sat,
        }
    }
}

/// Convert a single RGB pixel to (hue, saturation).
///
/// Standard hexcone formula: hue is the angle on the color wheel in
/// degrees [0, 360), saturation is chroma over value (0 for black).
pub fn rgb_to_hs(r: u8, g: u8, b: u8) -> (f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let mut hue = if chroma == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / chroma)
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }
    // Keep hue strictly below 360 so binning never overflows.
    if hue >= 360.0 {
        hue = 0.0;
    }

    let sat = if max == 0.0 { 0.0 } else { chroma / max };

    (hue, sat)
}
