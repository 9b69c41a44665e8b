use std::path::PathBuf;

use serde::Serialize;

use crate::error::{EyeModelError, Result};

/// Opaque reference to an externally loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHandle {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Which surface model a renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderModel {
    /// Full principled BSDF (IOR, alpha, roughness, base color).
    Principled,
    /// Lambertian diffuse; only color/texture are meaningful.
    Diffuse,
}

/// Optical appearance parameters for one anatomical part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialDescriptor {
    pub name: String,
    pub shader: ShaderModel,
    /// Index of refraction (> 0).
    pub ior: f32,
    /// 0.0 = fully transparent, 1.0 = opaque.
    pub alpha: f32,
    /// 0.0 = perfect mirror, 1.0 = fully diffuse.
    pub roughness: f32,
    /// Linear RGB in [0, 1].
    pub base_color: [f32; 3],
    pub texture: Option<ImageHandle>,
    /// When false both faces of the surface are drawn.
    pub backface_culling: bool,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            shader: ShaderModel::Principled,
            ior: 1.45,
            alpha: 1.0,
            roughness: 0.5,
            base_color: [0.8, 0.8, 0.8],
            texture: None,
            backface_culling: true,
        }
    }
}

impl MaterialDescriptor {
    /// Reject parameters outside their physical ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.ior.is_finite() && self.ior > 0.0) {
            return Err(EyeModelError::InvalidParameter(format!(
                "{}: IOR must be positive, got {}",
                self.name, self.ior
            )));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.alpha) {
            return Err(EyeModelError::InvalidParameter(format!(
                "{}: alpha must lie in [0, 1], got {}",
                self.name, self.alpha
            )));
        }
        if !unit.contains(&self.roughness) {
            return Err(EyeModelError::InvalidParameter(format!(
                "{}: roughness must lie in [0, 1], got {}",
                self.name, self.roughness
            )));
        }
        if let Some(c) = self.base_color.iter().find(|c| !unit.contains(*c)) {
            return Err(EyeModelError::InvalidParameter(format!(
                "{}: base color channel {c} outside [0, 1]",
                self.name
            )));
        }
        Ok(())
    }
}
