//! End-to-end runs over a small synthetic collection: two images of a
//! red subject on a blue background, hints on the first image only.

use coseg::cosegmentation::{Cosegmentation, SegmentationMode};
use coseg::features::HistogramBins;
use coseg::hints::HintSet;
use coseg::output::ArtifactWriter;
use coseg::session::ImageSession;
use coseg::superpixels::LabelMap;
use image::{Rgb, RgbImage};

const SUBJECT: Rgb<u8> = Rgb([220, 30, 30]);
const BACKDROP: Rgb<u8> = Rgb([25, 40, 210]);

/// 8x8 image with a red 4x4 block in one corner over a blue backdrop,
/// oversegmented into 2x2-pixel superpixels (K = 16).
fn synthetic_session(name: &str, corner_x: u32, corner_y: u32) -> ImageSession {
    let image = RgbImage::from_fn(8, 8, |x, y| {
        let inside = (corner_x..corner_x + 4).contains(&x) && (corner_y..corner_y + 4).contains(&y);
        if inside {
            SUBJECT
        } else {
            BACKDROP
        }
    });
    let labels = (0..64).map(|i| {
        let (x, y) = (i % 8, i / 8);
        (y / 2) * 4 + x / 2
    });
    let map = LabelMap::new(8, 8, labels.collect()).unwrap();
    ImageSession::new(name.into(), image, map, HistogramBins::default())
}

/// Superpixel ids fully inside the subject block.
fn subject_ids(corner_x: u32, corner_y: u32) -> Vec<u32> {
    let mut ids = Vec::new();
    for sy in 0..4u32 {
        for sx in 0..4u32 {
            let inside = (sx * 2 >= corner_x && (sx * 2 + 1) < corner_x + 4)
                && (sy * 2 >= corner_y && (sy * 2 + 1) < corner_y + 4);
            if inside {
                ids.push(sy * 4 + sx);
            }
        }
    }
    ids
}

#[test]
fn graph_cut_cosegments_the_collection() {
    // Subject in the top-left of the first image, bottom-right of the
    // second; 2x2 superpixel grids align with both.
    let mut hinted = synthetic_session("first.png", 0, 0);
    let plain = synthetic_session("second.png", 4, 4);

    let mut marking = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
    marking.put_pixel(1, 1, Rgb([0, 255, 255])); // red stroke: foreground
    marking.put_pixel(7, 7, Rgb([255, 255, 0])); // blue stroke: background
    hinted.hints = HintSet::from_marking(&marking, &hinted.label_map).unwrap();
    assert_eq!(
        hinted.hints.foreground().iter().copied().collect::<Vec<_>>(),
        [0]
    );
    assert_eq!(
        hinted.hints.background().iter().copied().collect::<Vec<_>>(),
        [15]
    );

    let mut coseg = Cosegmentation::new(vec![hinted, plain], HistogramBins::default());
    coseg.run(SegmentationMode::GraphCut);

    // Hints on one image carry to the whole collection: the second
    // image's subject block must come out foreground even though it was
    // never marked.
    let corners = [(0, 0), (4, 4)];
    for (session, &(cx, cy)) in coseg.sessions().iter().zip(&corners) {
        let labels = &session.labels.as_ref().unwrap().0;
        assert_eq!(labels.len(), 16);
        for id in 0..16u32 {
            let expected = subject_ids(cx, cy).contains(&id);
            assert_eq!(
                labels[id as usize],
                expected,
                "superpixel {id} of {}",
                session.path.display()
            );
        }

        // Pixel mask agrees with the superpixel labeling everywhere.
        let mask = session.pixel_mask().unwrap();
        for (x, y, pixel) in mask.enumerate_pixels() {
            let id = session.label_map.label_at(x, y) as usize;
            assert_eq!(pixel[0] == 255, labels[id]);
        }
    }
}

#[test]
fn kmeans_separates_the_same_collection_without_hints() {
    let first = synthetic_session("first.png", 0, 0);
    let second = synthetic_session("second.png", 4, 4);

    let mut coseg = Cosegmentation::new(vec![first, second], HistogramBins::default());
    coseg.run(SegmentationMode::KMeans);

    // Cluster identity is arbitrary; pin it to the subject block of the
    // first image and check consistency everywhere else.
    let sessions = coseg.sessions();
    let subject_class = sessions[0].labels.as_ref().unwrap().0[0];
    let corners = [(0, 0), (4, 4)];
    for (session, &(cx, cy)) in sessions.iter().zip(&corners) {
        let labels = &session.labels.as_ref().unwrap().0;
        for id in 0..16u32 {
            let expected = if subject_ids(cx, cy).contains(&id) {
                subject_class
            } else {
                !subject_class
            };
            assert_eq!(labels[id as usize], expected, "superpixel {id}");
        }
    }
}

#[test]
fn artifacts_land_in_the_output_directory() {
    let mut session = synthetic_session("scene.png", 0, 0);
    session.hints.set_foreground([0]);
    session.hints.set_background([15]);

    let mut coseg = Cosegmentation::new(vec![session], HistogramBins::default());
    coseg.run(SegmentationMode::GraphCut);

    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path()).unwrap();
    for session in coseg.sessions() {
        writer.write_superpixel_image(session).unwrap();
        writer.write_segmentation(session, None).unwrap();
    }

    assert!(dir.path().join("superpixel/scene.png").exists());
    assert!(dir.path().join("segmentation/mask_scene.png").exists());
    assert!(dir.path().join("segmentation/scene.png").exists());
}
