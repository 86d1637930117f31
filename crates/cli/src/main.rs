//! Verdant CLI - NDVI change detection from satellite imagery

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use verdant_algorithms::{polygonize, threshold, Connectivity, PolygonizeParams, ThresholdParams};
use verdant_core::io::{read_geotiff, write_geotiff};
use verdant_core::AreaOfInterest;
use verdant_export::{to_geojson_string, write_shapefile_zip, CHANGE_LAYER_NAME};
use verdant_hub::{HubClientBlocking, HubClientOptions, HubConfig, DEFAULT_RESOLUTION_METERS};

mod pipeline;

use pipeline::{detect_changes, ChangeDetectionInputs};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about = "NDVI change detection from satellite imagery", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: fetch two NDVI scenes, detect and export changes
    Run {
        /// GeoJSON file with the area of interest (Feature or Polygon)
        aoi: PathBuf,
        /// Acquisition date of the "before" scene (YYYY-MM-DD)
        #[arg(long)]
        before: NaiveDate,
        /// Acquisition date of the "after" scene (YYYY-MM-DD)
        #[arg(long)]
        after: NaiveDate,
        /// Absolute NDVI difference above which a pixel counts as changed (0..1)
        #[arg(short, long, default_value = "0.2")]
        threshold: f64,
        /// Request resolution in metres per pixel
        #[arg(short, long, default_value_t = DEFAULT_RESOLUTION_METERS)]
        resolution: f64,
        /// Pixel connectivity: 4 or 8
        #[arg(short, long, default_value = "4")]
        connectivity: String,
        /// Directory the exports are written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Also write the raw NDVI difference as a GeoTIFF
        #[arg(long)]
        diff_raster: Option<PathBuf>,
        /// Also write the difference rescaled to [0, 1] as a GeoTIFF
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Vectorize an existing NDVI difference raster into change polygons
    Vectorize {
        /// Input NDVI difference GeoTIFF
        input: PathBuf,
        /// Absolute NDVI difference above which a pixel counts as changed (0..1)
        #[arg(short, long, default_value = "0.2")]
        threshold: f64,
        /// Pixel connectivity: 4 or 8
        #[arg(short, long, default_value = "4")]
        connectivity: String,
        /// Directory the exports are written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn parse_connectivity(s: &str) -> Result<Connectivity> {
    match s.to_lowercase().as_str() {
        "4" | "four" => Ok(Connectivity::Four),
        "8" | "eight" => Ok(Connectivity::Eight),
        _ => anyhow::bail!("Unknown connectivity: {}. Use 4 or 8.", s),
    }
}

fn load_aoi(path: &Path) -> Result<AreaOfInterest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading AOI file {}", path.display()))?;
    AreaOfInterest::from_geojson_str(&text).context("parsing AOI GeoJSON")
}

fn write_exports(changes: &verdant_core::ChangeSet, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let geojson_path = out_dir.join(format!("{CHANGE_LAYER_NAME}.geojson"));
    let geojson = to_geojson_string(changes).context("serializing change polygons")?;
    fs::write(&geojson_path, geojson)
        .with_context(|| format!("writing {}", geojson_path.display()))?;

    let zip_path = out_dir.join(format!("{CHANGE_LAYER_NAME}.zip"));
    write_shapefile_zip(changes, &zip_path).context("writing zipped shapefile")?;

    println!("GeoJSON saved to: {}", geojson_path.display());
    println!("Shapefile archive saved to: {}", zip_path.display());
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Run {
            aoi,
            before,
            after,
            threshold,
            resolution,
            connectivity,
            out_dir,
            diff_raster,
            preview,
        } => {
            let connectivity = parse_connectivity(&connectivity)?;
            let aoi = load_aoi(&aoi)?;
            let bbox = aoi.bounding_box().context("resolving AOI bounding box")?;

            let config = HubConfig::from_env().context("loading provider credentials")?;
            let pb = spinner("Connecting to imagery provider...");
            let mut client = HubClientBlocking::connect(config, HubClientOptions::default())
                .context("connecting to imagery provider")?;
            pb.finish_and_clear();

            let inputs = ChangeDetectionInputs {
                bbox,
                date_before: before,
                date_after: after,
                threshold,
                resolution,
                connectivity,
            };

            let pb = spinner("Detecting changes...");
            let start = Instant::now();
            let outputs = detect_changes(&mut client, &inputs)?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            if let Some(path) = diff_raster {
                write_geotiff(&outputs.diff, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("difference raster saved to {}", path.display());
            }
            if let Some(path) = preview {
                write_geotiff(&outputs.normalized, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("preview raster saved to {}", path.display());
            }

            write_exports(&outputs.changes, &out_dir)?;
            println!("Detected {} change areas", outputs.changes.len());
            println!("  Processing time: {:.2?}", elapsed);
        }

        Commands::Vectorize {
            input,
            threshold: t,
            connectivity,
            out_dir,
        } => {
            let connectivity = parse_connectivity(&connectivity)?;

            let pb = spinner("Reading raster...");
            let diff: verdant_core::Raster<f32> =
                read_geotiff(&input).with_context(|| format!("reading {}", input.display()))?;
            pb.finish_and_clear();
            info!("Input: {} x {}", diff.cols(), diff.rows());

            let start = Instant::now();
            let mask = threshold(&diff, &ThresholdParams { threshold: t })
                .context("thresholding NDVI difference")?;
            let changes = polygonize(&mask, &PolygonizeParams { connectivity })
                .context("extracting change polygons")?;
            let elapsed = start.elapsed();

            write_exports(&changes, &out_dir)?;
            println!("Detected {} change areas", changes.len());
            println!("  Processing time: {:.2?}", elapsed);
        }
    }

    Ok(())
}
