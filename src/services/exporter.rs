//! Artifact writing.
//!
//! Thin adapters between the core's in-memory artifacts (pixel buffers,
//! point lists, meshes, SVG text) and files in the output directory. All
//! geometry decisions happen upstream; this module only encodes and
//! writes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hexdot::{base_slab, dot_part, slugify, DotLayout, Palette, PixelBuffer};
use image::{GrayImage, Luma, RgbImage};

use crate::error::PipelineError;
use crate::models::RunConfig;

/// Write the quantized image as `dithered.png`.
pub fn write_dithered_png(out_dir: &Path, buffer: &PixelBuffer) -> Result<(), PipelineError> {
    let img = RgbImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        image::Rgb(buffer.get(x as usize, y as usize).channels())
    });
    img.save(out_dir.join("dithered.png"))?;
    Ok(())
}

/// Write one binary mask PNG per palette entry (`mask_<slug>.png`):
/// white pixels where that color's dots sit, black elsewhere.
///
/// Masks are reverse-mapped from dot centers back to grid cells (row
/// first, then the row's stagger offset removed), so trimmed dots leave
/// their cells black.
pub fn write_masks(
    out_dir: &Path,
    layout: &DotLayout,
    palette: &Palette,
    grid_width: usize,
    grid_height: usize,
) -> Result<(), PipelineError> {
    let radius = layout.radius_mm();
    let spacing = layout.spacing_mm();
    let pitch = layout.vertical_pitch_mm();

    for (idx, entry) in palette.entries().iter().enumerate() {
        let mut mask = GrayImage::new(grid_width as u32, grid_height as u32);
        for point in layout.points(idx) {
            let py = ((point.y - radius) / pitch).round() as i64;
            let x_offset = if py % 2 == 1 { spacing / 2.0 } else { 0.0 };
            let px = ((point.x - radius - x_offset) / spacing).round() as i64;
            let px = px.clamp(0, grid_width as i64 - 1) as u32;
            let py = py.clamp(0, grid_height as i64 - 1) as u32;
            mask.put_pixel(px, py, Luma([255]));
        }
        mask.save(out_dir.join(format!("mask_{}.png", slugify(&entry.name))))?;
    }
    Ok(())
}

/// Write the vector drawing as `dots.svg`.
pub fn write_svg(out_dir: &Path, svg: &str) -> Result<(), PipelineError> {
    fs::write(out_dir.join("dots.svg"), svg)?;
    Ok(())
}

/// Write `base.stl` plus one STL per palette entry with at least one dot.
///
/// Returns the part-name → filename mapping for the metadata record.
pub fn write_stl_meshes(
    out_dir: &Path,
    layout: &DotLayout,
    palette: &Palette,
    config: &RunConfig,
) -> Result<BTreeMap<String, String>, PipelineError> {
    let (width_mm, height_mm) = layout.used_extents();
    let mut files = BTreeMap::new();

    let base = base_slab(width_mm, height_mm, config.base_thickness_mm);
    fs::write(out_dir.join("base.stl"), base.to_ascii_stl())?;
    files.insert("base".to_string(), "base.stl".to_string());

    let z0 = config.base_thickness_mm;
    let z1 = config.base_thickness_mm + config.dot_height_mm;
    for (idx, entry) in palette.entries().iter().enumerate() {
        let points = layout.points(idx);
        if points.is_empty() {
            continue;
        }
        let part_name = slugify(&entry.name);
        let mesh = dot_part(
            part_name.clone(),
            points,
            layout.radius_mm(),
            z0,
            z1,
            config.segments,
        );
        let filename = format!("{part_name}.stl");
        fs::write(out_dir.join(&filename), mesh.to_ascii_stl())?;
        files.insert(part_name, filename);
    }

    Ok(files)
}

/// Serialize the metadata record to `metadata.json` (pretty-printed).
pub fn write_metadata(
    out_dir: &Path,
    metadata: &crate::models::RunMetadata,
) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(out_dir.join("metadata.json"), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexdot::{dither, map_hex, PaletteEntry, Rgb};
    use tempfile::TempDir;

    fn two_color_fixture() -> (Palette, DotLayout, PixelBuffer, usize, usize) {
        let palette = Palette::new(vec![
            PaletteEntry::new("A", Rgb::new(255, 0, 0)),
            PaletteEntry::new("Unused", Rgb::new(0, 255, 0)),
        ])
        .unwrap();
        let buffer = PixelBuffer::new(2, 1, Rgb::new(255, 0, 0));
        let dithered = dither(buffer, &palette);
        let layout = map_hex(&dithered.grid, &palette, 1.0, 1.0);
        (palette, layout, dithered.pixels, 2, 1)
    }

    #[test]
    fn test_write_dithered_png() {
        let (_, _, pixels, _, _) = two_color_fixture();
        let dir = TempDir::new().unwrap();
        write_dithered_png(dir.path(), &pixels).unwrap();

        let img = image::open(dir.path().join("dithered.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_write_masks_marks_dot_cells() {
        let (palette, layout, _, w, h) = two_color_fixture();
        let dir = TempDir::new().unwrap();
        write_masks(dir.path(), &layout, &palette, w, h).unwrap();

        let mask_a = image::open(dir.path().join("mask_a.png"))
            .unwrap()
            .to_luma8();
        assert_eq!(mask_a.get_pixel(0, 0).0, [255]);
        assert_eq!(mask_a.get_pixel(1, 0).0, [255]);

        // Every entry gets a mask, even with zero dots
        let mask_unused = image::open(dir.path().join("mask_unused.png"))
            .unwrap()
            .to_luma8();
        assert!(mask_unused.pixels().all(|p| p.0 == [0]));
    }

    #[test]
    fn test_write_stl_meshes_skips_empty_colors() {
        let (palette, layout, _, _, _) = two_color_fixture();
        let dir = TempDir::new().unwrap();
        let files =
            write_stl_meshes(dir.path(), &layout, &palette, &RunConfig::default()).unwrap();

        assert_eq!(files.get("base"), Some(&"base.stl".to_string()));
        assert_eq!(files.get("a"), Some(&"a.stl".to_string()));
        assert!(!files.contains_key("unused"), "empty colors emit no part");
        assert!(dir.path().join("base.stl").exists());
        assert!(dir.path().join("a.stl").exists());
        assert!(!dir.path().join("unused.stl").exists());

        let base = fs::read_to_string(dir.path().join("base.stl")).unwrap();
        assert!(base.starts_with("solid base\n"));
        assert_eq!(base.matches("endfacet").count(), 12);
    }
}
