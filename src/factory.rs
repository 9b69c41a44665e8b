use glam::Vec3;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::{LensSplit, ModelConfig, Tessellation};
use crate::error::{EyeModelError, Result};
use crate::geometry::{
    Axis, CutPlane, KeepSide, bisect, build_sphere, first_half, scale_subset, second_half,
    uv_projection,
};
use crate::scene::ImageProvider;
use crate::types::{AnatomicalPart, ImageHandle, MaterialDescriptor, Mesh, PartKind, ShaderModel};

pub const SCLERA_RADIUS: f32 = 12.0;
/// Slightly inside the sclera.
pub const RETINA_RADIUS: f32 = 11.5;
pub const CORNEA_RADIUS: f32 = 7.259;

pub const CORNEA_TRANSLATION: Vec3 = Vec3::new(5.0, 0.0, 0.0);
pub const LENS_TRANSLATION: Vec3 = Vec3::new(7.3, 0.0, 0.0);

pub const CORNEA_IOR: f32 = 1.376;
pub const LENS_IOR: f32 = 1.406;

/// Biconvex lens proportions.
///
/// The ratios are each surface's radius of curvature divided by the lens
/// thickness (anterior 8.672 / 4.979, posterior 6.328 / 4.979).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensShape {
    pub thickness: f32,
    pub anterior_ratio: f32,
    pub posterior_ratio: f32,
}

impl Default for LensShape {
    fn default() -> Self {
        Self {
            thickness: 4.979,
            anterior_ratio: 1.7417,
            posterior_ratio: 1.2709,
        }
    }
}

impl LensShape {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("thickness", self.thickness),
            ("anterior ratio", self.anterior_ratio),
            ("posterior ratio", self.posterior_ratio),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EyeModelError::InvalidParameter(format!(
                    "lens {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Combined radius of curvature `t / (1/a + 1/p)`.
    pub fn combined_radius(&self) -> Result<f32> {
        self.validate()?;
        let r = self.thickness / (1.0 / self.anterior_ratio + 1.0 / self.posterior_ratio);
        if !(r.is_finite() && r > 0.0) {
            return Err(EyeModelError::InvalidParameter(format!(
                "lens combined radius must be positive, got {r}"
            )));
        }
        Ok(r)
    }

    /// X scale applied to the anterior half.
    pub fn anterior_scale(&self) -> f32 {
        1.0 / (self.thickness * self.anterior_ratio)
    }

    /// X scale applied to the posterior half.
    pub fn posterior_scale(&self) -> f32 {
        1.0 / (self.thickness * self.posterior_ratio)
    }
}

/// World-space cut that turns the sclera and retina into posterior shells.
pub fn posterior_cut() -> Result<CutPlane> {
    CutPlane::new(Vec3::ZERO, Vec3::X)
}

/// World-space cut that leaves the corneal cap in front of x = 9.
pub fn cornea_cut() -> Result<CutPlane> {
    CutPlane::new(Vec3::new(9.0, 0.0, 0.0), Vec3::NEG_X)
}

pub fn sclera_material() -> MaterialDescriptor {
    MaterialDescriptor {
        name: "Sclera_Material".into(),
        base_color: [0.9, 0.9, 0.9],
        alpha: 1.0,
        ..Default::default()
    }
}

pub fn retina_material(texture: Option<ImageHandle>) -> MaterialDescriptor {
    MaterialDescriptor {
        name: "Retina_Material".into(),
        shader: ShaderModel::Diffuse,
        roughness: 1.0,
        texture,
        backface_culling: false,
        ..Default::default()
    }
}

pub fn cornea_material() -> MaterialDescriptor {
    MaterialDescriptor {
        name: "Cornea_Material".into(),
        ior: CORNEA_IOR,
        alpha: 0.3,
        roughness: 0.1,
        base_color: [1.0, 1.0, 1.0],
        ..Default::default()
    }
}

pub fn lens_material() -> MaterialDescriptor {
    MaterialDescriptor {
        name: "Lens_Material".into(),
        ior: LENS_IOR,
        alpha: 0.2,
        roughness: 0.1,
        ..Default::default()
    }
}

/// Builds the individual eye parts from a [`ModelConfig`].
pub struct EyePartFactory<'a> {
    config: &'a ModelConfig,
    images: &'a dyn ImageProvider,
}

impl<'a> EyePartFactory<'a> {
    pub fn new(config: &'a ModelConfig, images: &'a dyn ImageProvider) -> Self {
        Self { config, images }
    }

    pub fn build(&self, kind: PartKind) -> Result<AnatomicalPart> {
        let part = match kind {
            PartKind::Sclera => self.sclera(),
            PartKind::Retina => self.retina(),
            PartKind::Cornea => self.cornea(),
            PartKind::Lens => self.lens(),
        }?;

        part.material.validate()?;
        part.mesh.validate()?;

        info!(
            part = %kind,
            vertices = part.mesh.vertex_count(),
            faces = part.mesh.face_count(),
            "Built part"
        );
        Ok(part)
    }

    /// Build all four parts, in [`PartKind::ALL`] order.
    pub fn build_all(&self) -> Result<Vec<AnatomicalPart>> {
        if self.config.parallel {
            PartKind::ALL.par_iter().map(|&k| self.build(k)).collect()
        } else {
            PartKind::ALL.iter().map(|&k| self.build(k)).collect()
        }
    }

    pub fn sclera(&self) -> Result<AnatomicalPart> {
        let mesh = sphere(SCLERA_RADIUS, self.config.tessellation)?;
        let mesh = cut_shell(PartKind::Sclera, &mesh, &posterior_cut()?, Vec3::ZERO)?;
        Ok(placed(PartKind::Sclera, mesh, sclera_material(), Vec3::ZERO))
    }

    pub fn retina(&self) -> Result<AnatomicalPart> {
        let texture = match &self.config.fundus_image {
            Some(path) => Some(self.images.load_image(path)?),
            None => {
                warn!("Fundus texture disabled, retina will be untextured");
                None
            }
        };

        let mut mesh = sphere(RETINA_RADIUS, self.config.tessellation)?;
        // Project while the mesh is still a full sphere.
        uv_projection::apply(&mut mesh, Vec3::ZERO);
        let mesh = cut_shell(PartKind::Retina, &mesh, &posterior_cut()?, Vec3::ZERO)?;

        Ok(placed(
            PartKind::Retina,
            mesh,
            retina_material(texture),
            Vec3::ZERO,
        ))
    }

    pub fn cornea(&self) -> Result<AnatomicalPart> {
        let mesh = sphere(CORNEA_RADIUS, self.config.tessellation)?;
        let mesh = cut_shell(PartKind::Cornea, &mesh, &cornea_cut()?, CORNEA_TRANSLATION)?;
        Ok(placed(
            PartKind::Cornea,
            mesh,
            cornea_material(),
            CORNEA_TRANSLATION,
        ))
    }

    pub fn lens(&self) -> Result<AnatomicalPart> {
        let lens = &self.config.lens;
        let shape = lens.shape;
        let radius = shape.combined_radius()?;
        let mut mesh = sphere(radius, lens.tessellation)?;

        let n = mesh.vertex_count();
        let (anterior, posterior) = match lens.split {
            LensSplit::Geometric => (
                scale_subset(&mut mesh, Axis::X, shape.anterior_scale(), |_, p| p.x > 0.0)?,
                scale_subset(&mut mesh, Axis::X, shape.posterior_scale(), |_, p| {
                    p.x <= 0.0
                })?,
            ),
            LensSplit::VertexOrder => (
                scale_subset(&mut mesh, Axis::X, shape.anterior_scale(), first_half(n))?,
                scale_subset(&mut mesh, Axis::X, shape.posterior_scale(), second_half(n))?,
            ),
        };

        info!(
            radius,
            split = %lens.split,
            anterior,
            posterior,
            "Shaped lens"
        );

        let mut part = placed(PartKind::Lens, mesh, lens_material(), LENS_TRANSLATION);
        part.scale = Vec3::new(shape.thickness, 1.0, 1.0);
        Ok(part)
    }
}

fn sphere(radius: f32, tessellation: Tessellation) -> Result<Mesh> {
    build_sphere(radius, tessellation.segments, tessellation.rings)
}

/// Cut with a world-space plane, expressed in the frame of a part placed at
/// `translation`. An empty result is an error.
fn cut_shell(kind: PartKind, mesh: &Mesh, plane: &CutPlane, translation: Vec3) -> Result<Mesh> {
    let local = plane.translated(translation);
    let shell = bisect(mesh, &local, KeepSide::Negative);
    if shell.is_empty() {
        return Err(EyeModelError::GeometryDegenerate(format!(
            "{kind}: cut plane through {} removed all geometry",
            plane.point()
        )));
    }
    Ok(shell)
}

fn placed(
    kind: PartKind,
    mesh: Mesh,
    material: MaterialDescriptor,
    translation: Vec3,
) -> AnatomicalPart {
    AnatomicalPart {
        kind,
        name: kind.to_string(),
        mesh,
        material,
        translation,
        scale: Vec3::ONE,
    }
}
