//! Procedural generation of 2D terrain mark maps
//!
//! A map is a [`MarkGrid`] of integer marks where mark 0 is water. Maps are
//! produced either by scattering marks at random or by growing blobs from
//! random seeds ("prolifeway" diffusion), optionally followed by removing
//! land that cannot reach the map border.

pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod isolation;
pub mod options;
pub mod prolifeway;
pub mod scatter;

pub use error::{MapError, MapResult};
pub use generator::{generate, GenerationRequest, MapMode};
pub use grid::{Mark, MarkGrid, WATER};
pub use options::MaskSetting;
pub use prolifeway::DiffusionParameters;
