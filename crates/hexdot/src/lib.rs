//! hexdot: palette-constrained dithering and hexagonal dot geometry
//!
//! This library turns a resized RGB image into a physical dot-pattern plan:
//! it quantizes pixels to a fixed named palette with Floyd-Steinberg error
//! diffusion, places one dot per pixel on a staggered hexagonal lattice in
//! millimeters, and generates per-color circle (SVG) and extruded-cylinder
//! (triangle mesh / ASCII STL) geometry from the resulting layout.
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer (resized RGB)
//!     |
//!     v
//! dither()                  Floyd-Steinberg, nearest palette color per pixel
//!     |
//!     +--> PixelBuffer       every pixel exactly equals a palette color
//!     +--> IndexGrid         one palette index per pixel
//!              |
//!              v
//! map_hex()                  staggered hex lattice, mm coordinates, edge trim
//!              |
//!              v
//! DotLayout                  per-color dot centers in scan order
//!     |                  \
//!     v                   v
//! render_svg()          base_slab() / dot_part()
//! (vector circles)      (triangle meshes, ASCII STL)
//! ```
//!
//! # Example
//!
//! ```
//! use hexdot::{dither, map_hex, Palette, PaletteEntry, PixelBuffer, Rgb};
//!
//! let palette = Palette::new(vec![
//!     PaletteEntry::new("Black", Rgb::new(0, 0, 0)),
//!     PaletteEntry::new("White", Rgb::new(255, 255, 255)),
//! ])
//! .unwrap();
//!
//! let buffer = PixelBuffer::new(4, 4, Rgb::new(128, 128, 128));
//! let dithered = dither(buffer, &palette);
//! let layout = map_hex(&dithered.grid, &palette, 0.8, 0.8);
//!
//! assert!(layout.total_dots() <= 16);
//! ```
//!
//! # Coordinate conventions
//!
//! Pixel grids are row-major with `(0, 0)` at the top-left. Physical
//! coordinates are millimeters, x to the right, y downward (matching the
//! pixel grid), z upward for meshes. Dot centers sit at
//! `radius + x * spacing (+ stagger)` so the layout's bounding box starts
//! at the origin.
//!
//! The crate performs no I/O: every operation is a pure transformation over
//! in-memory buffers, and file writing belongs to the caller.

pub mod buffer;
pub mod color;
pub mod dither;
pub mod geometry;
pub mod grid;
pub mod palette;
pub mod slug;

pub use buffer::PixelBuffer;
pub use color::{ParseColorError, Rgb};
pub use dither::{dither, Dithered, IndexGrid, FLOYD_STEINBERG};
pub use geometry::{base_slab, dot_part, render_svg, Mesh, Triangle};
pub use grid::{map_hex, DotLayout, PointMm};
pub use palette::{Palette, PaletteEntry, PaletteError};
pub use slug::slugify;
