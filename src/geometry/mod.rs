pub mod axis_scale;
pub mod bisect;
pub mod sphere;
pub mod uv_projection;

use glam::Vec3;

use crate::error::{EyeModelError, Result};

pub use axis_scale::{first_half, scale_subset, second_half};
pub use bisect::bisect;
pub use sphere::{SphereBuilder, build_sphere};

/// Cartesian axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a position triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which half-space of a [`CutPlane`] survives a bisection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepSide {
    /// Keep `dot(v - point, normal) <= 0`, discard the side the normal points to.
    #[default]
    Negative,
    /// Keep `dot(v - point, normal) >= 0`.
    Positive,
}

/// A cutting plane given by a point on it and a normal.
///
/// The normal is stored normalised so signed distances are metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    point: Vec3,
    normal: Vec3,
}

impl CutPlane {
    pub fn new(point: Vec3, normal: Vec3) -> Result<Self> {
        if !point.is_finite() {
            return Err(EyeModelError::InvalidParameter(format!(
                "cut plane point must be finite, got {point}"
            )));
        }
        let normal = normal.try_normalize().ok_or_else(|| {
            EyeModelError::InvalidParameter(format!(
                "cut plane normal must be non-zero and finite, got {normal}"
            ))
        })?;
        Ok(Self { point, normal })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance of `p`; positive on the side the normal points to.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }

    /// The same plane expressed in a frame whose origin sits at `origin`.
    pub fn translated(&self, origin: Vec3) -> CutPlane {
        CutPlane {
            point: self.point - origin,
            normal: self.normal,
        }
    }
}
