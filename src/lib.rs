//! Rendering for 2D Helmholtz scattering solutions.
//!
//! Two independent pipelines: [`visualisation::NearFieldRenderer`] draws a
//! 2x2 figure of a complex field sampled on a grid (real part, imaginary
//! part, modulus, argument, with circular boundary overlays), and
//! [`far_field::FarFieldRenderer`] draws the angular far-field pattern as a
//! polar curve whose stroke color encodes phase. Field values come from an
//! external solver behind the [`solver::FieldSolver`] seam; this crate only
//! presents them.

pub mod colormap;
pub mod config;
pub mod error;
pub mod far_field;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod solver;
pub mod visualisation;

pub use colormap::{ColorMap, ColorScale};
pub use config::PlotConfig;
pub use error::PlotError;
pub use far_field::FarFieldRenderer;
pub use field::{FarFieldSample, FieldKind, FieldSample, Segment};
pub use geometry::{BoundaryGeometry, InnerBoundary};
pub use grid::Grid;
pub use solver::{CoordinateFrame, FieldSolver, PointSource};
pub use visualisation::{NearFieldRenderer, Panel};
