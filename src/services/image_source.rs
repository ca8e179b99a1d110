//! Image decoding and grid-resolution resampling.
//!
//! The core works on a [`PixelBuffer`] where one pixel corresponds to one
//! physical dot, so the source image is resized until its horizontal pixel
//! pitch matches the requested dot spacing.

use std::path::Path;

use hexdot::PixelBuffer;
use image::imageops::FilterType;
use image::RgbImage;

use crate::error::PipelineError;

/// Decode an image file (PNG/JPEG) to an RGB buffer.
pub fn load_rgb(path: &Path) -> Result<RgbImage, PipelineError> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}

/// Resize so one pixel covers one dot of `spacing_mm` horizontally.
///
/// Target width is `round(width_mm / spacing_mm)` pixels (minimum 1),
/// height follows the source aspect ratio (rounded, minimum 1). Resampling
/// uses a Lanczos3 filter; an image already at the target size is passed
/// through untouched.
pub fn resize_to_grid(img: &RgbImage, width_mm: f64, spacing_mm: f64) -> PixelBuffer {
    let target_w = ((width_mm / spacing_mm).round() as u32).max(1);
    let aspect = img.height() as f64 / img.width() as f64;
    let target_h = (((target_w as f64) * aspect).round() as u32).max(1);

    if target_w == img.width() && target_h == img.height() {
        return PixelBuffer::from_raw_rgb(
            img.width() as usize,
            img.height() as usize,
            img.as_raw(),
        );
    }

    let resized = image::imageops::resize(img, target_w, target_h, FilterType::Lanczos3);
    PixelBuffer::from_raw_rgb(target_w as usize, target_h as usize, resized.as_raw())
}
