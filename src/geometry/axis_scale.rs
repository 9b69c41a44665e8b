use glam::Vec3;
use tracing::debug;

use crate::error::{EyeModelError, Result};
use crate::types::Mesh;

use super::Axis;

/// Multiply the `axis` component of every vertex selected by `predicate` by
/// `factor`, in place. Returns the number of vertices scaled.
///
/// The predicate receives `(vertex_index, position)`.
pub fn scale_subset<P>(mesh: &mut Mesh, axis: Axis, factor: f32, predicate: P) -> Result<usize>
where
    P: Fn(usize, Vec3) -> bool,
{
    if !factor.is_finite() || factor == 0.0 {
        return Err(EyeModelError::InvalidParameter(format!(
            "axis scale factor must be finite and non-zero, got {factor}"
        )));
    }

    let component = axis.index();
    let mut scaled = 0;
    for (i, v) in mesh.vertices_mut().iter_mut().enumerate() {
        if predicate(i, *v) {
            v[component] *= factor;
            scaled += 1;
        }
    }

    debug!(?axis, factor, scaled, "Scaled vertex subset");
    Ok(scaled)
}

/// Index predicate for the first `n / 2` vertices.
pub fn first_half(vertex_count: usize) -> impl Fn(usize, Vec3) -> bool {
    let split = vertex_count / 2;
    move |i, _| i < split
}

/// Index predicate for the remaining vertices. With an odd count the
/// unpaired middle vertex lands here.
pub fn second_half(vertex_count: usize) -> impl Fn(usize, Vec3) -> bool {
    let split = vertex_count / 2;
    move |i, _| i >= split
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::build_sphere;

    fn line_mesh(n: usize) -> Mesh {
        let mut mesh = Mesh::default();
        for i in 0..n {
            mesh.push_vertex(Vec3::new(1.0 + i as f32, 2.0, 3.0));
        }
        mesh
    }

    #[test]
    fn scales_only_selected_component() {
        let mut mesh = line_mesh(4);
        let n = scale_subset(&mut mesh, Axis::Y, 3.0, |i, _| i % 2 == 0).unwrap();
        assert_eq!(n, 2);
        assert_eq!(mesh.position(0), Vec3::new(1.0, 6.0, 3.0));
        assert_eq!(mesh.position(1), Vec3::new(2.0, 2.0, 3.0));
        assert_eq!(mesh.position(2), Vec3::new(3.0, 6.0, 3.0));
    }

    #[test]
    fn round_trip_restores_coordinates() {
        let original = build_sphere(5.0, 16, 8).unwrap();
        let mut mesh = original.clone();
        let f = 0.1159_f32;

        scale_subset(&mut mesh, Axis::X, f, |_, _| true).unwrap();
        scale_subset(&mut mesh, Axis::X, 1.0 / f, |_, _| true).unwrap();

        for (a, b) in original.vertices().iter().zip(mesh.vertices()) {
            assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
            assert_eq!(a.y, b.y);
            assert_eq!(a.z, b.z);
        }
    }

    #[test]
    fn halves_partition_even_count() {
        let first = first_half(10);
        let second = second_half(10);
        let firsts: Vec<usize> = (0..10).filter(|&i| first(i, Vec3::ZERO)).collect();
        let seconds: Vec<usize> = (0..10).filter(|&i| second(i, Vec3::ZERO)).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
        assert_eq!(seconds, vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn odd_count_middle_vertex_goes_to_second_half() {
        // 3 segments x 2 rings = 5 vertices
        let mut mesh = build_sphere(1.0, 3, 2).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        let n = mesh.vertex_count();

        let firsts = scale_subset(&mut mesh, Axis::X, 2.0, first_half(n)).unwrap();
        let seconds = scale_subset(&mut mesh, Axis::X, 3.0, second_half(n)).unwrap();
        assert_eq!(firsts, 2);
        assert_eq!(seconds, 3);
        assert!(!first_half(n)(2, Vec3::ZERO));
        assert!(second_half(n)(2, Vec3::ZERO));
    }

    #[test]
    fn rejects_zero_and_non_finite_factor() {
        let mut mesh = line_mesh(2);
        for f in [0.0, f32::INFINITY, f32::NAN] {
            let err = scale_subset(&mut mesh, Axis::X, f, |_, _| true).unwrap_err();
            assert!(matches!(err, EyeModelError::InvalidParameter(_)));
        }
        assert_eq!(mesh, line_mesh(2));
    }
}
