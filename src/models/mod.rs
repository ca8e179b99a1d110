pub mod config;
pub mod metadata;

pub use config::RunConfig;
pub use metadata::{
    CoverageMetadata, GridMetadata, PaletteColor, PixelDimensions, RunMetadata, SelectedColors,
};
