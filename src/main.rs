use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use coseg::cosegmentation::{Cosegmentation, SegmentationMode};
use coseg::features::HistogramBins;
use coseg::hints::HintSet;
use coseg::output::ArtifactWriter;
use coseg::session::ImageSession;
use coseg::superpixels::{LabelMapFiles, SuperpixelParams, SuperpixelSource};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of input images; each image needs a <stem>.labels.png
    /// superpixel label map next to it
    images: PathBuf,

    /// Directory of marking images (white = unmarked, red strokes =
    /// foreground, blue strokes = background), matched by file name
    #[arg(short, long)]
    markings: Option<PathBuf>,

    /// Output directory for masks and overlays
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Segmentation mode
    #[arg(long, value_enum, default_value_t = Mode::GraphCut)]
    mode: Mode,

    /// Requested number of superpixels (passed to the superpixel source)
    #[arg(long, default_value_t = 500)]
    segments: u32,

    /// Superpixel shape-regularity parameter
    #[arg(long, default_value_t = 20.0)]
    compactness: f32,

    /// Over-segmentation iteration cap
    #[arg(long, default_value_t = 10)]
    max_iterations: u32,

    /// Pre-smoothing sigma, 0 to disable
    #[arg(long, default_value_t = 0.0)]
    sigma: f32,

    /// Histogram bins over the hue channel
    #[arg(long, default_value_t = 20)]
    bins_hue: usize,

    /// Histogram bins over the saturation channel
    #[arg(long, default_value_t = 20)]
    bins_sat: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    /// Hint-driven graph cut, one min-cut per image
    GraphCut,
    /// Unsupervised 2-means over pooled histograms
    Kmeans,
}

impl From<Mode> for SegmentationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::GraphCut => SegmentationMode::GraphCut,
            Mode::Kmeans => SegmentationMode::KMeans,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("coseg starting");
    tracing::info!("Images: {}", args.images.display());
    tracing::info!("Mode: {:?}", args.mode);

    let bins = HistogramBins {
        hue: args.bins_hue,
        sat: args.bins_sat,
    };
    let params = SuperpixelParams {
        num_segments: args.segments,
        compactness: args.compactness,
        max_iterations: args.max_iterations,
        smoothing_sigma: args.sigma,
    };

    let image_paths = list_images(&args.images)
        .with_context(|| format!("Failed to list images in {}", args.images.display()))?;
    anyhow::ensure!(
        !image_paths.is_empty(),
        "no images found in {}",
        args.images.display()
    );
    tracing::info!("Found {} images", image_paths.len());

    // Build one session per image: decode, label map, histograms, graph.
    let build_start = Instant::now();
    let source = LabelMapFiles;
    let mut sessions = Vec::with_capacity(image_paths.len());
    let mut markings = Vec::with_capacity(image_paths.len());
    for path in &image_paths {
        let image = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .to_rgb8();
        let label_map = source
            .superpixels(&image, path, &params)
            .with_context(|| format!("Failed to get superpixels for {}", path.display()))?;

        let mut session = ImageSession::new(path.clone(), image, label_map, bins);

        let marking = load_marking(args.markings.as_deref(), path, &session)?;
        if let Some(marking) = &marking {
            session.hints = HintSet::from_marking(marking, &session.label_map)
                .with_context(|| format!("Bad marking image for {}", path.display()))?;
            tracing::info!(
                "{}: {} foreground and {} background hint superpixels",
                path.display(),
                session.hints.foreground().len(),
                session.hints.background().len()
            );
        }

        sessions.push(session);
        markings.push(marking);
    }
    tracing::info!(
        "Built {} sessions in {:.1}ms",
        sessions.len(),
        build_start.elapsed().as_secs_f64() * 1000.0
    );

    let writer = ArtifactWriter::new(&args.output)
        .with_context(|| format!("Failed to prepare output directory {}", args.output.display()))?;
    for session in &sessions {
        writer.write_superpixel_image(session)?;
    }

    // Segment the collection.
    let segment_start = Instant::now();
    let mut coseg = Cosegmentation::new(sessions, bins);
    coseg.run(args.mode.into());
    tracing::info!(
        "Segmented in {:.1}ms",
        segment_start.elapsed().as_secs_f64() * 1000.0
    );

    for (session, marking) in coseg.sessions().iter().zip(&markings) {
        writer.write_segmentation(session, marking.as_ref())?;
    }
    tracing::info!("Results written to {}", args.output.display());

    Ok(())
}

/// Image files in the directory, sorted by path so runs are repeatable.
/// Label-map sidecars are not inputs.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        let is_image = matches!(extension.as_deref(), Some("png" | "jpg" | "jpeg" | "bmp"));
        let is_label_map = path.to_string_lossy().ends_with(".labels.png");
        if is_image && !is_label_map {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// The marking image matching `image_path`, if a markings directory was
/// given and contains one. A missing file just means no hints for that
/// image.
fn load_marking(
    markings_dir: Option<&Path>,
    image_path: &Path,
    session: &ImageSession,
) -> Result<Option<RgbImage>> {
    let Some(dir) = markings_dir else {
        return Ok(None);
    };
    let Some(name) = image_path.file_name() else {
        return Ok(None);
    };
    let marking_path = dir.join(name);
    if !marking_path.exists() {
        tracing::debug!("No marking image at {}", marking_path.display());
        return Ok(None);
    }
    let marking = image::open(&marking_path)
        .with_context(|| format!("Failed to open marking image {}", marking_path.display()))?
        .to_rgb8();
    if marking.dimensions() != session.image.dimensions() {
        anyhow::bail!(
            "marking image {} is {}x{}, image is {}x{}",
            marking_path.display(),
            marking.width(),
            marking.height(),
            session.image.width(),
            session.image.height()
        );
    }
    Ok(Some(marking))
}
