//! Run orchestration.
//!
//! The pipeline is a strict sequential chain: load palette → decode and
//! resize image → dither → map to the hex grid → export artifacts. Each
//! stage completes fully before the next begins and nothing is retried.

use std::fs;
use std::path::Path;

use hexdot::{dither, map_hex, render_svg};

use crate::error::PipelineError;
use crate::models::{PixelDimensions, RunConfig, RunMetadata};
use crate::services::{exporter, image_source, palette_source};

/// Execute one fabrication run, writing all artifacts into `out_dir`
/// (created if absent). Returns the metadata record that was written.
pub fn run(
    image_path: &Path,
    palette_path: &Path,
    out_dir: &Path,
    selection: Option<&[String]>,
    config: &RunConfig,
) -> Result<RunMetadata, PipelineError> {
    config.validate()?;

    let palette = palette_source::load_palette(palette_path, selection)?;
    tracing::info!(colors = palette.len(), "Palette loaded");

    let img = image_source::load_rgb(image_path)?;
    let buffer = image_source::resize_to_grid(&img, config.width_mm, config.spacing_mm);
    let pixel_dimensions = PixelDimensions {
        width: buffer.width() as u32,
        height: buffer.height() as u32,
    };
    tracing::info!(
        width = pixel_dimensions.width,
        height = pixel_dimensions.height,
        "Image resized to grid resolution"
    );

    let dithered = dither(buffer, &palette);
    let layout = map_hex(
        &dithered.grid,
        &palette,
        config.spacing_mm,
        config.dot_diameter_mm,
    );
    tracing::info!(dots = layout.total_dots(), "Dot layout mapped");
    if layout.trimmed() > 0 {
        tracing::warn!(
            dropped = layout.trimmed(),
            "Staggered-row dots beyond the print width were dropped"
        );
    }

    fs::create_dir_all(out_dir)?;
    exporter::write_dithered_png(out_dir, &dithered.pixels)?;
    exporter::write_masks(
        out_dir,
        &layout,
        &palette,
        dithered.grid.width(),
        dithered.grid.height(),
    )?;
    exporter::write_svg(out_dir, &render_svg(&layout, &palette))?;
    let stl_files = exporter::write_stl_meshes(out_dir, &layout, &palette, config)?;

    let metadata = RunMetadata::new(
        image_path,
        palette_path,
        selection,
        config,
        pixel_dimensions,
        &layout,
        &palette,
        stl_files,
    );
    exporter::write_metadata(out_dir, &metadata)?;
    tracing::info!(out_dir = %out_dir.display(), "Artifacts written");

    Ok(metadata)
}
