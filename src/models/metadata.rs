//! Run metadata record.
//!
//! One `metadata.json` per run captures everything needed to reproduce the
//! output: parameters, pixel dimensions, grid geometry, coverage figures,
//! the palette, and the part-to-file mapping.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::path::Path;

use chrono::{DateTime, Utc};
use hexdot::{DotLayout, Palette};
use serde::Serialize;

use crate::models::RunConfig;

/// The colors requested on the command line, or `"all"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectedColors {
    /// Explicit selection, in request order.
    Names(Vec<String>),
    /// No selection: the whole palette file (serializes as `"all"`).
    All(&'static str),
}

impl SelectedColors {
    /// Build from the optional CLI selection.
    pub fn from_selection(selection: Option<&[String]>) -> Self {
        match selection {
            Some(names) => SelectedColors::Names(names.to_vec()),
            None => SelectedColors::All("all"),
        }
    }
}

/// Pixel dimensions of the resized working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

/// Physical grid geometry actually used by the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridMetadata {
    /// Always "hex_staggered".
    #[serde(rename = "type")]
    pub grid_type: &'static str,
    pub vertical_pitch_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Dot count and area coverage figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageMetadata {
    pub total_dots: usize,
    pub dot_area_mm2: f64,
    pub coverage_area_mm2: f64,
    pub coverage_fraction: f64,
    pub coverage_percent: f64,
}

impl CoverageMetadata {
    /// Compute coverage from a layout: total dot area over the used print
    /// area. A degenerate zero-size layout divides by 1 instead.
    pub fn from_layout(layout: &DotLayout) -> Self {
        let total_dots = layout.total_dots();
        let radius = layout.radius_mm();
        let dot_area_mm2 = PI * radius * radius;
        let (width_mm, height_mm) = layout.used_extents();
        let used_area = if width_mm > 0.0 && height_mm > 0.0 {
            width_mm * height_mm
        } else {
            1.0
        };
        let coverage_fraction = (total_dots as f64 * dot_area_mm2) / used_area;
        Self {
            total_dots,
            dot_area_mm2,
            coverage_area_mm2: total_dots as f64 * dot_area_mm2,
            coverage_fraction,
            coverage_percent: coverage_fraction * 100.0,
        }
    }
}

/// One palette entry as recorded in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: String,
    pub rgb: [u8; 3],
}

/// The full metadata record serialized to `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub image: String,
    pub palette_file: String,
    pub selected_colors: SelectedColors,
    pub generated_at: DateTime<Utc>,
    pub width_mm: f64,
    pub spacing_mm: f64,
    pub dot_diameter_mm: f64,
    pub dot_height_mm: f64,
    pub base_thickness_mm: f64,
    pub segments: u32,
    pub pixel_dimensions: PixelDimensions,
    pub grid: GridMetadata,
    pub coverage: CoverageMetadata,
    pub palette: Vec<PaletteColor>,
    pub stl_files: BTreeMap<String, String>,
}

impl RunMetadata {
    /// Assemble the record from the run's inputs and outputs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        image_path: &Path,
        palette_path: &Path,
        selection: Option<&[String]>,
        config: &RunConfig,
        pixel_dimensions: PixelDimensions,
        layout: &DotLayout,
        palette: &Palette,
        stl_files: BTreeMap<String, String>,
    ) -> Self {
        let (width_mm, height_mm) = layout.used_extents();
        Self {
            image: image_path.display().to_string(),
            palette_file: palette_path.display().to_string(),
            selected_colors: SelectedColors::from_selection(selection),
            generated_at: Utc::now(),
            width_mm: config.width_mm,
            spacing_mm: config.spacing_mm,
            dot_diameter_mm: config.dot_diameter_mm,
            dot_height_mm: config.dot_height_mm,
            base_thickness_mm: config.base_thickness_mm,
            segments: config.segments,
            pixel_dimensions,
            grid: GridMetadata {
                grid_type: "hex_staggered",
                vertical_pitch_mm: layout.vertical_pitch_mm(),
                width_mm,
                height_mm,
            },
            coverage: CoverageMetadata::from_layout(layout),
            palette: palette
                .entries()
                .iter()
                .map(|e| PaletteColor {
                    name: e.name.clone(),
                    rgb: e.color.channels(),
                })
                .collect(),
            stl_files,
        }
    }
}
