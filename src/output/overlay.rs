use crate::superpixels::LabelMap;
use image::{GrayImage, Rgb, RgbImage};

/// Boundary pixels of a label map: a pixel is on a boundary when any of
/// its 4-connected neighbors carries a different label. Returned
/// row-major, one flag per pixel.
pub fn boundary_mask(map: &LabelMap) -> Vec<bool> {
    let (width, height) = (map.width(), map.height());
    let mut boundary = vec![false; (width * height) as usize];

    for y in 0..height {
        for x in 0..width {
            let here = map.label_at(x, y);
            let differs = (x > 0 && map.label_at(x - 1, y) != here)
                || (x + 1 < width && map.label_at(x + 1, y) != here)
                || (y > 0 && map.label_at(x, y - 1) != here)
                || (y + 1 < height && map.label_at(x, y + 1) != here);
            boundary[(y * width + x) as usize] = differs;
        }
    }

    boundary
}

/// Source image with superpixel boundaries burned in.
pub fn superpixel_overlay(image: &RgbImage, map: &LabelMap) -> RgbImage {
    const BOUNDARY: Rgb<u8> = Rgb([255, 255, 0]);

    let boundary = boundary_mask(map);
    let mut overlay = image.clone();
    for (x, y, pixel) in overlay.enumerate_pixels_mut() {
        if boundary[(y * map.width() + x) as usize] {
            *pixel = BOUNDARY;
        }
    }
    overlay
}

/// Tint the overlay with the user's markings: any pixel whose marking
/// has a non-white red channel turns red (a foreground stroke), a
/// non-white blue channel turns blue.
pub fn apply_markings(overlay: &mut RgbImage, marking: &RgbImage) {
    for (x, y, pixel) in overlay.enumerate_pixels_mut() {
        let mark = marking.get_pixel(x, y);
        if mark[0] != 255 {
            *pixel = Rgb([255, 0, 0]);
        }
        if mark[2] != 255 {
            *pixel = Rgb([0, 0, 255]);
        }
    }
}

/// Side-by-side review image: the annotated source on the left, the
/// resulting mask rendered as grayscale on the right.
pub fn side_by_side(annotated: &RgbImage, mask: &GrayImage) -> RgbImage {
    let (width, height) = annotated.dimensions();
    RgbImage::from_fn(width * 2, height, |x, y| {
        if x < width {
            *annotated.get_pixel(x, y)
        } else {
            let value = mask.get_pixel(x - width, y)[0];
            Rgb([value, value, value])
        }
    })
}
