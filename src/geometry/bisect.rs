use std::collections::HashMap;

use glam::Vec2;
use tracing::debug;

use crate::types::Mesh;

use super::{CutPlane, KeepSide};

/// Vertices within this distance of the plane count as lying on it.
pub const PLANE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Kept,
    On,
    Cut,
}

/// Reference to a vertex of the clipped output: either an original vertex or
/// the intersection of the plane with an original edge. Edges are stored
/// with the smaller index first so both faces sharing the edge produce the
/// same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ClipRef {
    Original(u32),
    Edge(u32, u32),
}

impl ClipRef {
    fn edge(a: u32, b: u32) -> Self {
        ClipRef::Edge(a.min(b), a.max(b))
    }
}

/// Sutherland-Hodgman against a single plane, on vertex references.
///
/// Kept and on-plane vertices are emitted as-is; every edge crossing from a
/// kept vertex to a cut one (or back) emits its intersection.
fn clip_face(face: &[u32], sides: &[Side]) -> Vec<ClipRef> {
    let n = face.len();
    let mut output = Vec::with_capacity(n + 2);

    for i in 0..n {
        let current = face[i];
        let next = face[(i + 1) % n];
        let cur_side = sides[current as usize];
        let nxt_side = sides[next as usize];

        if cur_side != Side::Cut {
            output.push(ClipRef::Original(current));
        }
        match (cur_side, nxt_side) {
            (Side::Kept, Side::Cut) | (Side::Cut, Side::Kept) => {
                output.push(ClipRef::edge(current, next));
            }
            _ => {}
        }
    }

    output.dedup();
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    output
}

/// Cut `mesh` with `plane` and return the part on the `keep` side.
///
/// Faces entirely on the kept side (or on the plane) survive unchanged,
/// faces entirely beyond it are dropped and straddling faces are clipped.
/// Edge intersections interpolate position and UV and are shared between
/// the faces meeting at that edge, so the cut leaves one open boundary.
///
/// Output vertex order is: surviving original vertices in their original
/// order, then new boundary vertices in creation order. Vertices no longer
/// referenced by any face are removed. Re-cutting the result with the same
/// plane returns it unchanged.
pub fn bisect(mesh: &Mesh, plane: &CutPlane, keep: KeepSide) -> Mesh {
    let sign = match keep {
        KeepSide::Negative => 1.0,
        KeepSide::Positive => -1.0,
    };

    let distances: Vec<f32> = mesh
        .vertices()
        .iter()
        .map(|&v| sign * plane.signed_distance(v))
        .collect();
    let sides: Vec<Side> = distances
        .iter()
        .map(|&d| {
            if d > PLANE_EPSILON {
                Side::Cut
            } else if d < -PLANE_EPSILON {
                Side::Kept
            } else {
                Side::On
            }
        })
        .collect();

    let mut polygons: Vec<Vec<ClipRef>> = Vec::with_capacity(mesh.face_count());
    let mut clipped_faces = 0usize;
    for face in &mesh.faces {
        let any_cut = face.iter().any(|&i| sides[i as usize] == Side::Cut);
        if !any_cut {
            polygons.push(face.iter().map(|&i| ClipRef::Original(i)).collect());
            continue;
        }
        if !face.iter().any(|&i| sides[i as usize] == Side::Kept) {
            // Nothing strictly inside: at most a sliver lying in the plane.
            continue;
        }

        let polygon = clip_face(face, &sides);
        if polygon.len() >= 3 {
            clipped_faces += 1;
            polygons.push(polygon);
        }
    }

    // Remap surviving originals in original order.
    let mut used = vec![false; mesh.vertex_count()];
    for r in polygons.iter().flatten() {
        if let ClipRef::Original(i) = *r {
            used[i as usize] = true;
        }
    }

    let has_uvs = mesh.has_uvs();
    let mut out = Mesh::default();
    let mut remap = vec![u32::MAX; mesh.vertex_count()];

    for (i, _) in used.iter().enumerate().filter(|(_, u)| **u) {
        remap[i] = out.push_vertex(mesh.position(i));
        if has_uvs {
            out.uvs.extend_from_slice(&mesh.uvs[i * 2..i * 2 + 2]);
        }
    }

    let uv = |i: usize| Vec2::new(mesh.uvs[i * 2], mesh.uvs[i * 2 + 1]);
    let mut boundary: HashMap<(u32, u32), u32> = HashMap::new();

    for polygon in &polygons {
        let mut face = Vec::with_capacity(polygon.len());
        for r in polygon {
            let idx = match *r {
                ClipRef::Original(i) => remap[i as usize],
                ClipRef::Edge(a, b) => *boundary.entry((a, b)).or_insert_with(|| {
                    let (a, b) = (a as usize, b as usize);
                    let (da, db) = (distances[a], distances[b]);
                    let denom = da - db;
                    let t = if denom.abs() < 1e-12 { 0.5 } else { da / denom };

                    let idx = out.push_vertex(mesh.position(a).lerp(mesh.position(b), t));
                    if has_uvs {
                        let uv = uv(a).lerp(uv(b), t).clamp(Vec2::ZERO, Vec2::ONE);
                        out.uvs.extend_from_slice(&[uv.x, uv.y]);
                    }
                    idx
                }),
            };
            face.push(idx);
        }
        out.faces.push(face);
    }

    debug!(
        input_vertices = mesh.vertex_count(),
        input_faces = mesh.face_count(),
        output_vertices = out.vertex_count(),
        output_faces = out.face_count(),
        clipped_faces,
        "Bisected mesh"
    );

    out
}
