use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stippler::models::RunConfig;
use stippler::services;

#[derive(Parser, Debug)]
#[command(name = "stippler")]
#[command(version)]
#[command(about = "Generate pointillist dot fabrication plans (SVG + STL) from a raster image")]
struct Cli {
    /// Input image (PNG/JPEG)
    #[arg(default_value = "sailboat.jpg")]
    image: PathBuf,

    /// Palette file (.json with name/hex objects, or a Markdown Name|Hex table)
    #[arg(default_value = "bambu-pla-matte-hex-codes.md")]
    palette: PathBuf,

    /// Output directory for artifacts
    #[arg(default_value = "out")]
    out_dir: PathBuf,

    /// Physical width of the print in mm
    #[arg(long, default_value_t = 180.0)]
    width_mm: f64,

    /// Dot center-to-center spacing in mm
    #[arg(long, default_value_t = 0.8)]
    spacing_mm: f64,

    /// Dot diameter in mm
    #[arg(long = "dot-mm", default_value_t = 0.8)]
    dot_diameter_mm: f64,

    /// Dot height above the base in mm
    #[arg(long, default_value_t = 0.4)]
    dot_height_mm: f64,

    /// Base tile thickness in mm
    #[arg(long, default_value_t = 0.6)]
    base_thickness_mm: f64,

    /// Side facets per dot cylinder (lower = fewer triangles, smaller files)
    #[arg(long, default_value_t = 12)]
    segments: u32,

    /// Comma-separated palette color names to use (case-insensitive);
    /// an empty value selects the whole palette file
    #[arg(long, default_value = "Sky Blue,Scarlet Red,Lemon Yellow,Charcoal")]
    colors: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI use; RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stippler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let selection: Vec<String> = cli
        .colors
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let selection = if selection.is_empty() {
        None
    } else {
        Some(selection)
    };

    let config = RunConfig {
        width_mm: cli.width_mm,
        spacing_mm: cli.spacing_mm,
        dot_diameter_mm: cli.dot_diameter_mm,
        dot_height_mm: cli.dot_height_mm,
        base_thickness_mm: cli.base_thickness_mm,
        segments: cli.segments,
    };

    let metadata = services::run(
        &cli.image,
        &cli.palette,
        &cli.out_dir,
        selection.as_deref(),
        &config,
    )?;

    println!(
        "Wrote {} dots across {} parts to {} ({:.1}% coverage)",
        metadata.coverage.total_dots,
        metadata.stl_files.len(),
        cli.out_dir.display(),
        metadata.coverage.coverage_percent,
    );

    Ok(())
}
