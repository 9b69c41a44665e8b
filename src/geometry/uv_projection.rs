use std::f32::consts::{PI, TAU};

use glam::Vec3;
use tracing::debug;

use crate::types::Mesh;

/// Longitude/latitude UV of a point relative to the sphere centre.
///
/// `u = 0.5 + atan2(z, x) / 2pi`, `v = 0.5 - asin(y / |p|) / pi`, so the
/// north pole (+Y) maps to `v = 0` and the south pole to `v = 1`. The
/// radius is taken per point, which tolerates non-spherical meshes.
pub fn spherical_uv(p: Vec3) -> [f32; 2] {
    let r = p.length();
    if r <= f32::EPSILON {
        return [0.5, 0.5];
    }
    // atan2(0, 0) is 0, so poles land on u = 0.5.
    let u = 0.5 + p.z.atan2(p.x) / TAU;
    let v = 0.5 - (p.y / r).clamp(-1.0, 1.0).asin() / PI;
    [u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)]
}

/// Compute interleaved `[u, v, ...]` for every vertex, projecting around
/// `center`.
pub fn project(mesh: &Mesh, center: Vec3) -> Vec<f32> {
    mesh.vertices()
        .iter()
        .flat_map(|&v| spherical_uv(v - center))
        .collect()
}

/// Project and store the UVs on the mesh. Call before cutting or scaling.
pub fn apply(mesh: &mut Mesh, center: Vec3) {
    mesh.uvs = project(mesh, center);
    debug!(vertices = mesh.vertex_count(), "Applied spherical UV projection");
}
