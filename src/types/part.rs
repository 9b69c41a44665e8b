use glam::Vec3;
use serde::Serialize;

use super::{BoundingBox, MaterialDescriptor, Mesh};

/// The four anatomical components of the eye model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Sclera,
    Retina,
    Cornea,
    Lens,
}

impl PartKind {
    /// Every part, in scene hand-off order.
    pub const ALL: [PartKind; 4] = [
        PartKind::Sclera,
        PartKind::Retina,
        PartKind::Cornea,
        PartKind::Lens,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Sclera => "Sclera",
            PartKind::Retina => "Retina",
            PartKind::Cornea => "Cornea",
            PartKind::Lens => "Lens",
        }
    }
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished part: local-space mesh, its material and its world placement.
#[derive(Debug, Clone)]
pub struct AnatomicalPart {
    pub kind: PartKind,
    pub name: String,
    pub mesh: Mesh,
    pub material: MaterialDescriptor,
    pub translation: Vec3,
    /// Object scale; identity for every part but the lens.
    pub scale: Vec3,
}

impl AnatomicalPart {
    /// Mesh bounds after applying scale then translation.
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        self.mesh.bounds().map(|bb| {
            bb.scaled_translated(
                self.scale.as_dvec3().to_array(),
                self.translation.as_dvec3().to_array(),
            )
        })
    }

    /// Map a local mesh position into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local * self.scale + self.translation
    }
}
