//! Floyd-Steinberg error diffusion dithering.
//!
//! [`dither`] quantizes a [`PixelBuffer`] to a [`Palette`] while diffusing
//! the per-pixel quantization error to not-yet-visited neighbors. Diffusion
//! writes go straight back into the pixel buffer (not a separate error
//! plane), so each match sees every correction accumulated so far. A single
//! pass is therefore inherently sequential.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at that offset receives
/// `error * weight / divisor`. All offsets point at pixels the row-major
/// scan has not visited yet (`dy > 0`, or `dy == 0` with `dx > 0`).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries.
    pub entries: &'static [(i32, i32, i32)],
    /// Total divisor for normalizing weights.
    pub divisor: i32,
}

/// Floyd-Steinberg diffusion kernel.
///
/// Distributes 100% of the quantization error to 4 neighbors:
///
/// ```text
///        X   7
///    3   5   1      (/16)
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // east
        (-1, 1, 3), // southwest
        (0, 1, 5),  // south
        (1, 1, 1),  // southeast
    ],
    divisor: 16,
};

/// A row-major grid of palette indices, one per pixel.
///
/// Produced by [`dither`] with the same dimensions as the input buffer.
/// Every cell is a valid index into the palette that produced it; entry
/// names are recovered through that palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl IndexGrid {
    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette index at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

/// Output of [`dither`]: the quantized pixels and the matching index grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Dithered {
    /// The input buffer with every pixel replaced by its matched palette
    /// color.
    pub pixels: PixelBuffer,
    /// Which palette entry each pixel was matched to.
    pub grid: IndexGrid,
}

/// Quantize `buffer` to `palette` with Floyd-Steinberg error diffusion.
///
/// Pixels are scanned in row-major order (top row first, left-to-right
/// within a row); the scan order is part of the contract because error
/// diffusion is directional. For each pixel the nearest palette color
/// (squared Euclidean RGB distance, first entry wins ties) replaces the
/// pixel, and the quantization error is spread over the unvisited
/// neighbors with the [`FLOYD_STEINBERG`] weights. Neighbors outside the
/// buffer are skipped; the error lost at edges is not redistributed.
///
/// Every diffusion write clamps each channel into `0..=255` before
/// storing, so accumulated error can never overflow a channel.
///
/// The buffer is consumed and mutated in place; the returned
/// [`Dithered::pixels`] is that same allocation, now palette-exact.
pub fn dither(mut buffer: PixelBuffer, palette: &Palette) -> Dithered {
    let width = buffer.width();
    let height = buffer.height();
    let mut cells = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let old = buffer.get(x, y);
            let (idx, entry) = palette.find_nearest(old);
            buffer.set(x, y, entry.color);
            cells[y * width + x] = idx as u8;

            // Error from the value before overwriting.
            let err_r = old.r as i32 - entry.color.r as i32;
            let err_g = old.g as i32 - entry.color.g as i32;
            let err_b = old.b as i32 - entry.color.b as i32;

            for &(dx, dy, weight) in FLOYD_STEINBERG.entries {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let scale = weight as f64 / FLOYD_STEINBERG.divisor as f64;
                let neighbor = buffer.get(nx as usize, ny as usize);
                buffer.set(
                    nx as usize,
                    ny as usize,
                    Rgb::new(
                        add_clamped(neighbor.r, err_r as f64 * scale),
                        add_clamped(neighbor.g, err_g as f64 * scale),
                        add_clamped(neighbor.b, err_b as f64 * scale),
                    ),
                );
            }
        }
    }

    Dithered {
        pixels: buffer,
        grid: IndexGrid {
            cells,
            width,
            height,
        },
    }
}

/// Add an error delta to a channel, truncating to integer and clamping
/// into `0..=255`.
#[inline]
fn add_clamped(channel: u8, delta: f64) -> u8 {
    ((channel as f64 + delta) as i32).clamp(0, 255) as u8
}
