use glam::Vec3;

use crate::error::{EyeModelError, Result};

use super::BoundingBox;

/// The fundamental geometry container.
///
/// Positions and UVs are flat `Vec<f32>` buffers; faces are polygons of
/// three or more indices into the vertex list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Interleaved positions: [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Interleaved UVs: [u, v, u, v, ...] or empty
    pub uvs: Vec<f32>,
    /// Polygon faces, each a list of vertex indices
    pub faces: Vec<Vec<u32>>,
}

impl Mesh {
    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of polygon faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after fan-triangulating every face.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Whether UV coordinates are present.
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions viewed as `Vec3`s.
    pub fn vertices(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Mutable positions viewed as `Vec3`s.
    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        bytemuck::cast_slice_mut(&mut self.positions)
    }

    /// Position of vertex `index`.
    pub fn position(&self, index: usize) -> Vec3 {
        self.vertices()[index]
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, p: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
        idx
    }

    /// Bounding box of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices().iter().map(|v| v.as_dvec3().to_array()))
    }

    /// Check the structural invariants: whole position/UV tuples, in-range
    /// face indices and at least three distinct indices per face.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(EyeModelError::GeometryDegenerate(format!(
                "position buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }

        let n = self.vertex_count();
        if self.has_uvs() && self.uvs.len() != n * 2 {
            return Err(EyeModelError::GeometryDegenerate(format!(
                "UV buffer holds {} values for {n} vertices",
                self.uvs.len()
            )));
        }
        if let Some(bad) = self.uvs.iter().find(|c| !(0.0..=1.0).contains(*c)) {
            return Err(EyeModelError::GeometryDegenerate(format!(
                "UV coordinate {bad} outside [0, 1]"
            )));
        }

        for (fi, face) in self.faces.iter().enumerate() {
            if let Some(&idx) = face.iter().find(|&&i| i as usize >= n) {
                return Err(EyeModelError::GeometryDegenerate(format!(
                    "face {fi} references vertex {idx} of {n}"
                )));
            }
            let mut distinct = face.clone();
            distinct.sort_unstable();
            distinct.dedup();
            if distinct.len() < 3 {
                return Err(EyeModelError::GeometryDegenerate(format!(
                    "face {fi} has only {} distinct vertices",
                    distinct.len()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(!mesh.has_uvs());
        assert!(mesh.bounds().is_none());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn quad_counts_as_two_triangles() {
        let mesh = Mesh {
            positions: vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            ],
            faces: vec![vec![0, 1, 2, 3]],
            ..Default::default()
        };

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.position(2), Vec3::new(1.0, 1.0, 0.0));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn push_vertex_returns_sequential_indices() {
        let mut mesh = Mesh::default();
        assert_eq!(mesh.push_vertex(Vec3::X), 0);
        assert_eq!(mesh.push_vertex(Vec3::Y), 1);
        assert_eq!(mesh.vertices(), &[Vec3::X, Vec3::Y]);

        mesh.vertices_mut()[0].x = 3.0;
        assert_eq!(mesh.positions[0], 3.0);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = Mesh {
            positions: vec![-1.0, 0.0, 2.0, 3.0, -4.0, 0.5],
            ..Default::default()
        };
        let bb = mesh.bounds().unwrap();
        assert_eq!(bb.min, [-1.0, -4.0, 0.5]);
        assert_eq!(bb.max, [3.0, 0.0, 2.0]);
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mesh = Mesh {
            positions: vec![0.0; 9],
            faces: vec![vec![0, 1, 3]],
            ..Default::default()
        };
        let err = mesh.validate().unwrap_err();
        assert!(matches!(err, EyeModelError::GeometryDegenerate(_)));
    }

    #[test]
    fn validate_rejects_collapsed_face() {
        let mesh = Mesh {
            positions: vec![0.0; 9],
            faces: vec![vec![0, 1, 1]],
            ..Default::default()
        };
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_rejects_misaligned_uvs() {
        let mesh = Mesh {
            positions: vec![0.0; 9],
            uvs: vec![0.5; 4],
            faces: vec![vec![0, 1, 2]],
        };
        assert!(mesh.validate().is_err());

        let mesh = Mesh {
            positions: vec![0.0; 9],
            uvs: vec![0.5, 0.5, 0.5, 0.5, 0.5, 1.5],
            faces: vec![vec![0, 1, 2]],
        };
        assert!(mesh.validate().is_err());
    }
}
