use std::path::PathBuf;

use hexdot::{PaletteError, ParseColorError};
use thiserror::Error;

/// Errors surfaced by the fabrication pipeline.
///
/// Configuration problems (bad dimensions, malformed palette files, empty
/// selections) fail before any geometry work begins; the remaining
/// variants wrap collaborator failures. Nothing is retried: the pipeline
/// is deterministic per run, so every failure aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{name} must be positive (got {value})")]
    NonPositiveDimension { name: &'static str, value: f64 },

    #[error("segments must be at least 3 (got {0})")]
    TooFewSegments(u32),

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("invalid palette color: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("palette file {path:?}: no entries left after loading/filtering")]
    EmptyPaletteSelection { path: PathBuf },

    #[error("palette file {path:?}: {message}")]
    PaletteFormat { path: PathBuf, message: String },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("metadata serialization error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_dimension_display() {
        let error = PipelineError::NonPositiveDimension {
            name: "spacing-mm",
            value: -0.5,
        };
        assert_eq!(error.to_string(), "spacing-mm must be positive (got -0.5)");
    }

    #[test]
    fn test_too_few_segments_display() {
        let error = PipelineError::TooFewSegments(2);
        assert_eq!(error.to_string(), "segments must be at least 3 (got 2)");
    }

    #[test]
    fn test_empty_selection_display() {
        let error = PipelineError::EmptyPaletteSelection {
            path: PathBuf::from("colors.md"),
        };
        assert_eq!(
            error.to_string(),
            "palette file \"colors.md\": no entries left after loading/filtering"
        );
    }

    #[test]
    fn test_from_palette_error() {
        let error: PipelineError = PaletteError::Empty.into();
        assert!(matches!(error, PipelineError::Palette(_)));
        assert_eq!(error.to_string(), "palette error: palette cannot be empty");
    }
}
