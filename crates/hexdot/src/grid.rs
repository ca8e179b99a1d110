//! Staggered hexagonal lattice mapping.
//!
//! [`map_hex`] converts an [`IndexGrid`] into physical dot centers in
//! millimeters: horizontal pitch equals the requested spacing, vertical
//! pitch is `spacing * sqrt(3)/2` (equilateral-triangle row height), and
//! odd rows shift right by half the spacing. Staggered dots pushed past the
//! intended rectangular print width are dropped, not clamped.

use crate::dither::IndexGrid;
use crate::palette::Palette;

/// A dot center in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMm {
    /// Horizontal position, mm.
    pub x: f64,
    /// Vertical position, mm.
    pub y: f64,
}

/// Physical dot placement for every palette entry.
///
/// Point lists are aligned to palette order; within each list, points
/// appear in scan order (top-to-bottom, left-to-right). The layout also
/// carries the grid parameters the exporters need.
#[derive(Debug, Clone, PartialEq)]
pub struct DotLayout {
    points: Vec<Vec<PointMm>>,
    spacing_mm: f64,
    dot_diameter_mm: f64,
    vertical_pitch_mm: f64,
    width_limit_mm: f64,
    trimmed: usize,
}

impl DotLayout {
    /// Dot centers for the palette entry at `idx`, in scan order.
    #[inline]
    pub fn points(&self, idx: usize) -> &[PointMm] {
        &self.points[idx]
    }

    /// All per-entry point lists, aligned to palette order.
    #[inline]
    pub fn per_entry(&self) -> &[Vec<PointMm>] {
        &self.points
    }

    /// Total number of placed dots across all entries.
    pub fn total_dots(&self) -> usize {
        self.points.iter().map(Vec::len).sum()
    }

    /// Number of grid cells dropped by the width trim.
    ///
    /// Trimming only ever hits odd (staggered) rows; callers that care
    /// about exactness should surface this count instead of ignoring it.
    #[inline]
    pub fn trimmed(&self) -> usize {
        self.trimmed
    }

    /// Horizontal center-to-center spacing, mm.
    #[inline]
    pub fn spacing_mm(&self) -> f64 {
        self.spacing_mm
    }

    /// Dot diameter, mm.
    #[inline]
    pub fn dot_diameter_mm(&self) -> f64 {
        self.dot_diameter_mm
    }

    /// Dot radius, mm.
    #[inline]
    pub fn radius_mm(&self) -> f64 {
        self.dot_diameter_mm / 2.0
    }

    /// Row-to-row vertical pitch, mm (`spacing * sqrt(3)/2`).
    #[inline]
    pub fn vertical_pitch_mm(&self) -> f64 {
        self.vertical_pitch_mm
    }

    /// Nominal rectangle width the trim policy enforces, mm.
    #[inline]
    pub fn width_limit_mm(&self) -> f64 {
        self.width_limit_mm
    }

    /// The extents actually used by the placed dots: `(width, height)` in
    /// mm, measured as the maximum of `x + radius` (floored at the nominal
    /// width limit) and `y + radius` over all points.
    ///
    /// `(0.0, 0.0)` when no dots were placed.
    pub fn used_extents(&self) -> (f64, f64) {
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;
        for set in &self.points {
            for p in set {
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
                any = true;
            }
        }
        if !any {
            return (0.0, 0.0);
        }
        let radius = self.radius_mm();
        (self.width_limit_mm.max(max_x + radius), max_y + radius)
    }
}

/// Place one dot center per grid cell on a staggered hexagonal lattice.
///
/// For the cell at `(x, y)`:
///
/// ```text
/// x_mm = radius + x * spacing + (spacing/2 if y is odd else 0)
/// y_mm = radius + y * spacing * sqrt(3)/2
/// ```
///
/// Dots whose center exceeds `width_limit - radius`, where
/// `width_limit = (grid_width - 1) * spacing + dot_diameter`, overhang the
/// intended rectangle and are dropped entirely (possible on odd rows only,
/// where the stagger pushes the last column rightward). The dropped count
/// is available via [`DotLayout::trimmed`].
///
/// `spacing_mm` and `dot_diameter_mm` must be positive; the configuration
/// layer validates this before any geometry work.
pub fn map_hex(
    grid: &IndexGrid,
    palette: &Palette,
    spacing_mm: f64,
    dot_diameter_mm: f64,
) -> DotLayout {
    debug_assert!(spacing_mm > 0.0, "spacing must be positive");
    debug_assert!(dot_diameter_mm > 0.0, "dot diameter must be positive");

    let vertical_pitch_mm = spacing_mm * 3.0_f64.sqrt() / 2.0;
    let radius = dot_diameter_mm / 2.0;
    let width_limit_mm = (grid.width() - 1) as f64 * spacing_mm + dot_diameter_mm;

    let mut points: Vec<Vec<PointMm>> = vec![Vec::new(); palette.len()];
    let mut trimmed = 0;

    for y in 0..grid.height() {
        let x_offset = if y % 2 == 1 { spacing_mm / 2.0 } else { 0.0 };
        let y_mm = radius + y as f64 * vertical_pitch_mm;
        for x in 0..grid.width() {
            let x_mm = radius + x as f64 * spacing_mm + x_offset;
            if x_mm > width_limit_mm - radius {
                trimmed += 1;
                continue;
            }
            points[grid.get(x, y) as usize].push(PointMm { x: x_mm, y: y_mm });
        }
    }

    DotLayout {
        points,
        spacing_mm,
        dot_diameter_mm,
        vertical_pitch_mm,
        width_limit_mm,
        trimmed,
    }
}
