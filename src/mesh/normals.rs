use crate::math::{Point3, Vector3, TOLERANCE};

/// Unnormalized normal of a triangle, by the right-hand rule.
#[must_use]
pub(crate) fn triangle_normal(a: &Point3, b: &Point3, c: &Point3) -> Vector3 {
    (b - a).cross(&(c - a))
}

fn indexed_normal(vertices: &[Point3], tri: [u32; 3]) -> Vector3 {
    triangle_normal(
        &vertices[tri[0] as usize],
        &vertices[tri[1] as usize],
        &vertices[tri[2] as usize],
    )
}

/// Unit normal of the first non-degenerate triangle.
///
/// Returns `None` when every triangle has zero area.
#[must_use]
pub(crate) fn face_normal(vertices: &[Point3], triangles: &[[u32; 3]]) -> Option<Vector3> {
    triangles
        .iter()
        .find_map(|&tri| indexed_normal(vertices, tri).try_normalize(TOLERANCE))
}

/// Per-vertex normals: area-weighted sum of incident face normals.
///
/// Vertices with no non-degenerate incident face get `fallback`.
#[must_use]
pub(crate) fn vertex_normals(
    vertices: &[Point3],
    triangles: &[[u32; 3]],
    fallback: Vector3,
) -> Vec<Vector3> {
    let mut sums = vec![Vector3::zeros(); vertices.len()];
    for &tri in triangles {
        let n = indexed_normal(vertices, tri);
        for idx in tri {
            sums[idx as usize] += n;
        }
    }
    sums.into_iter()
        .map(|n| n.try_normalize(TOLERANCE).unwrap_or(fallback))
        .collect()
}
