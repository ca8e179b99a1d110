//! Stippler - pointillist dot fabrication plans
//!
//! Turns a raster image into per-color SVG and STL artifacts for
//! multi-material 3D printing. This library exposes modules for
//! integration testing; the algorithm core lives in the `hexdot` crate.

pub mod error;
pub mod models;
pub mod services;
