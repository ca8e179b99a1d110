//! Run configuration.

use crate::error::PipelineError;

/// Physical parameters for one fabrication run.
///
/// All lengths are millimeters. Defaults target a 0.2 mm nozzle on an
/// AMS-style multi-material printer: 180 mm wide print, 0.8 mm dot pitch
/// and diameter, 0.4 mm raised dots on a 0.6 mm base.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Requested physical width of the print.
    pub width_mm: f64,
    /// Horizontal center-to-center dot spacing.
    pub spacing_mm: f64,
    /// Dot diameter.
    pub dot_diameter_mm: f64,
    /// Height of each dot cylinder above the base.
    pub dot_height_mm: f64,
    /// Thickness of the shared base slab.
    pub base_thickness_mm: f64,
    /// Side facets approximating each dot cylinder (at least 3).
    pub segments: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width_mm: 180.0,
            spacing_mm: 0.8,
            dot_diameter_mm: 0.8,
            dot_height_mm: 0.4,
            base_thickness_mm: 0.6,
            segments: 12,
        }
    }
}

impl RunConfig {
    /// Validate the configuration, failing fast before any geometry work.
    ///
    /// Every length must be strictly positive (NaN counts as invalid) and
    /// `segments` must be at least 3 for a non-degenerate cylinder
    /// profile.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let dimensions = [
            ("width-mm", self.width_mm),
            ("spacing-mm", self.spacing_mm),
            ("dot-mm", self.dot_diameter_mm),
            ("dot-height-mm", self.dot_height_mm),
            ("base-thickness-mm", self.base_thickness_mm),
        ];
        for (name, value) in dimensions {
            if !(value > 0.0) {
                return Err(PipelineError::NonPositiveDimension { name, value });
            }
        }
        if self.segments < 3 {
            return Err(PipelineError::TooFewSegments(self.segments));
        }
        Ok(())
    }
}
