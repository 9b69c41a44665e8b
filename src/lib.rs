pub mod config;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod pipeline;
pub mod scene;
pub mod types;

pub use config::{LensConfig, LensSplit, ModelConfig, Tessellation};
pub use error::{EyeModelError, Result};
pub use factory::{EyePartFactory, LensShape};
pub use pipeline::{EyeModel, Pipeline};
