use crate::error::{Axis, MeshError, Result};
use crate::math::{Point2, Point3, TOLERANCE};

/// Horizontal extents of a vertex set over the world X and Z axes.
#[derive(Debug, Clone, Copy)]
struct Extents {
    min_x: f64,
    max_x: f64,
    min_z: f64,
    max_z: f64,
}

impl Extents {
    fn of(vertices: &[Point3]) -> Self {
        vertices.iter().fold(
            Self {
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                min_z: f64::INFINITY,
                max_z: f64::NEG_INFINITY,
            },
            |e, v| Self {
                min_x: e.min_x.min(v.x),
                max_x: e.max_x.max(v.x),
                min_z: e.min_z.min(v.z),
                max_z: e.max_z.max(v.z),
            },
        )
    }
}

/// Projects vertices onto the XZ plane and maps their bounding rectangle to
/// the unit UV square, adding `pan_offset` to every U.
///
/// The offset is absolute; it is neither wrapped nor accumulated.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateExtent`] if the vertices have no spread
/// along X or Z.
pub fn compute_uv(vertices: &[Point3], pan_offset: f64) -> Result<Vec<Point2>> {
    let e = Extents::of(vertices);
    let width = e.max_x - e.min_x;
    let depth = e.max_z - e.min_z;
    // Also rejects an empty slice, where both spans are -inf.
    if width.is_nan() || width <= TOLERANCE {
        return Err(MeshError::DegenerateExtent { axis: Axis::X }.into());
    }
    if depth.is_nan() || depth <= TOLERANCE {
        return Err(MeshError::DegenerateExtent { axis: Axis::Z }.into());
    }

    Ok(vertices
        .iter()
        .map(|v| {
            Point2::new(
                (v.x - e.min_x) / width + pan_offset,
                (v.z - e.min_z) / depth,
            )
        })
        .collect())
}
