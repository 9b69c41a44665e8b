use std::f32::consts::{PI, TAU};

use glam::Vec3;
use tracing::debug;

use crate::error::{EyeModelError, Result};
use crate::types::Mesh;

pub const MIN_SEGMENTS: u32 = 3;
pub const MIN_RINGS: u32 = 2;

/// Builder for a latitude/longitude sphere centred at the origin.
///
/// Poles lie on the Y axis. Vertex layout is fixed:
///
/// - index 0: north pole `(0, r, 0)`
/// - `rings - 1` latitude bands of `segments` vertices, north to south,
///   each band starting at longitude 0 (+X) and turning towards +Z
/// - last index: south pole `(0, -r, 0)`
///
/// Pole caps are triangle fans, everything in between is quads. All faces
/// wind counter-clockwise seen from outside.
#[derive(Debug, Clone, Copy)]
pub struct SphereBuilder {
    radius: f32,
    segments: u32,
    rings: u32,
}

impl SphereBuilder {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            segments: 32,
            rings: 16,
        }
    }

    /// Number of longitudinal divisions (vertices per band).
    pub fn segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Number of latitudinal divisions (bands between the poles + 1).
    pub fn rings(mut self, rings: u32) -> Self {
        self.rings = rings;
        self
    }

    /// Vertex count a valid builder will produce.
    pub fn vertex_count(&self) -> usize {
        self.segments as usize * (self.rings as usize).saturating_sub(1) + 2
    }

    pub fn build(&self) -> Result<Mesh> {
        let Self {
            radius,
            segments,
            rings,
        } = *self;

        if !(radius.is_finite() && radius > 0.0) {
            return Err(EyeModelError::InvalidParameter(format!(
                "sphere radius must be > 0, got {radius}"
            )));
        }
        if segments < MIN_SEGMENTS {
            return Err(EyeModelError::InvalidParameter(format!(
                "sphere needs at least {MIN_SEGMENTS} segments, got {segments}"
            )));
        }
        if rings < MIN_RINGS {
            return Err(EyeModelError::InvalidParameter(format!(
                "sphere needs at least {MIN_RINGS} rings, got {rings}"
            )));
        }

        let vertex_count = self.vertex_count();
        let mut mesh = Mesh {
            positions: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::new(),
            faces: Vec::with_capacity(segments as usize * rings as usize),
        };

        let north = mesh.push_vertex(Vec3::new(0.0, radius, 0.0));
        for ring in 1..rings {
            let phi = ring as f32 / rings as f32 * PI;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();
            for seg in 0..segments {
                let theta = seg as f32 / segments as f32 * TAU;
                mesh.push_vertex(Vec3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                ));
            }
        }
        let south = mesh.push_vertex(Vec3::new(0.0, -radius, 0.0));

        // First vertex index of latitude band `ring` (1-based).
        let band = |ring: u32| 1 + (ring - 1) * segments;

        for seg in 0..segments {
            let next = (seg + 1) % segments;

            let top = band(1);
            mesh.faces.push(vec![north, top + next, top + seg]);

            for ring in 1..rings - 1 {
                let upper = band(ring);
                let lower = band(ring + 1);
                mesh.faces.push(vec![
                    upper + seg,
                    upper + next,
                    lower + next,
                    lower + seg,
                ]);
            }

            let bottom = band(rings - 1);
            mesh.faces.push(vec![bottom + seg, bottom + next, south]);
        }

        debug!(
            radius,
            segments,
            rings,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Built UV sphere"
        );

        Ok(mesh)
    }
}

/// Build a UV sphere of `radius` with `segments` x `rings` tessellation.
pub fn build_sphere(radius: f32, segments: u32, rings: u32) -> Result<Mesh> {
    SphereBuilder::new(radius)
        .segments(segments)
        .rings(rings)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, face: &[u32]) -> Vec3 {
        let a = mesh.position(face[0] as usize);
        let b = mesh.position(face[1] as usize);
        let c = mesh.position(face[2] as usize);
        (b - a).cross(c - a)
    }

    #[test]
    fn vertex_count_matches_formula() {
        for (segments, rings) in [(3, 2), (4, 3), (8, 5), (32, 16), (128, 64)] {
            let mesh = build_sphere(1.0, segments, rings).unwrap();
            let expected = (segments * (rings - 1) + 2) as usize;
            assert_eq!(mesh.vertex_count(), expected, "{segments}x{rings}");
            assert!(mesh.validate().is_ok(), "{segments}x{rings}");
        }
    }

    #[test]
    fn face_layout() {
        let mesh = build_sphere(2.0, 6, 4).unwrap();
        // Two fans plus (rings - 2) quad bands per segment
        assert_eq!(mesh.face_count(), 6 * 4);
        let triangles = mesh.faces.iter().filter(|f| f.len() == 3).count();
        let quads = mesh.faces.iter().filter(|f| f.len() == 4).count();
        assert_eq!(triangles, 12);
        assert_eq!(quads, 12);
    }

    #[test]
    fn every_face_index_in_range() {
        let mesh = build_sphere(12.0, 128, 64).unwrap();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.faces.iter().flatten().all(|&i| i < n));
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let radius = 11.5;
        let mesh = build_sphere(radius, 24, 12).unwrap();
        for v in mesh.vertices() {
            assert!((v.length() - radius).abs() < 1e-4, "{v} off the sphere");
        }
    }

    #[test]
    fn poles_first_and_last() {
        let mesh = build_sphere(3.0, 5, 4).unwrap();
        assert_eq!(mesh.position(0), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(
            mesh.position(mesh.vertex_count() - 1),
            Vec3::new(0.0, -3.0, 0.0)
        );
        // First band starts at longitude 0 on the +X side
        let first = mesh.position(1);
        assert!(first.x > 0.0 && first.z.abs() < 1e-6);
    }

    #[test]
    fn faces_wind_outward() {
        let mesh = build_sphere(1.0, 16, 8).unwrap();
        for face in &mesh.faces {
            let centroid = face
                .iter()
                .map(|&i| mesh.position(i as usize))
                .sum::<Vec3>()
                / face.len() as f32;
            let n = face_normal(&mesh, face);
            assert!(n.dot(centroid) > 0.0, "face {face:?} winds inward");
        }
    }

    #[test]
    fn invalid_parameters_rejected() {
        for (radius, segments, rings) in [
            (0.0, 8, 4),
            (-1.0, 8, 4),
            (f32::NAN, 8, 4),
            (1.0, 2, 4),
            (1.0, 8, 1),
        ] {
            let err = build_sphere(radius, segments, rings).unwrap_err();
            assert!(
                matches!(err, EyeModelError::InvalidParameter(_)),
                "r={radius} s={segments} r={rings}"
            );
        }
    }

    #[test]
    fn vertex_count_with_zero_rings_does_not_overflow() {
        let builder = SphereBuilder::new(1.0).segments(8).rings(0);
        assert_eq!(builder.vertex_count(), 2);
        assert!(matches!(builder.build(), Err(EyeModelError::InvalidParameter(_))));
    }

    #[test]
    fn builder_is_deterministic() {
        let a = SphereBuilder::new(7.259).segments(20).rings(10).build().unwrap();
        let b = build_sphere(7.259, 20, 10).unwrap();
        assert_eq!(a, b);
    }
}
