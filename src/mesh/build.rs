use crate::anchor::{MAX_ANCHORS, MIN_POLYGON_POINTS};
use crate::error::{MeshError, Result};
use crate::math::{self, Point3, Vector3, TOLERANCE};

use super::normals::{face_normal, vertex_normals};
use super::uv::compute_uv;
use super::{MeshParams, PolygonMesh, Winding};

/// Builds a centroid-fan mesh over 3 to 5 ordered boundary points.
///
/// The fan is first emitted with [`Winding::Normal`]. If the resulting face
/// normal is at least [`MeshParams::upside_down_threshold`] degrees away from
/// `reference_up`, the winding is flipped once.
pub struct BuildPolygonMesh<'a> {
    points: &'a [Point3],
    reference_up: Vector3,
    params: MeshParams,
}

impl<'a> BuildPolygonMesh<'a> {
    /// Creates a new `BuildPolygonMesh` operation with default parameters.
    #[must_use]
    pub fn new(points: &'a [Point3], reference_up: Vector3) -> Self {
        Self {
            points,
            reference_up,
            params: MeshParams::default(),
        }
    }

    /// Sets custom mesh parameters.
    #[must_use]
    pub fn with_params(mut self, params: MeshParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the build, returning a complete mesh.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidVertexCount`] for fewer than 3 or more than 5 points.
    /// - [`MeshError::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// - [`MeshError::InvalidReferenceUp`] if `reference_up` has zero length.
    /// - [`MeshError::DegenerateExtent`] if the points have no spread along X or Z.
    /// - [`MeshError::DegenerateNormal`] if every fan triangle has zero area.
    pub fn execute(&self) -> Result<PolygonMesh> {
        let n = self.points.len();
        if !(MIN_POLYGON_POINTS..=MAX_ANCHORS).contains(&n) {
            return Err(MeshError::InvalidVertexCount { count: n }.into());
        }
        if let Some(index) = self.points.iter().position(|p| !math::is_finite_point(p)) {
            return Err(MeshError::NonFinitePoint { index }.into());
        }
        let up = self
            .reference_up
            .try_normalize(TOLERANCE)
            .ok_or(MeshError::InvalidReferenceUp)?;
        let Some(center) = math::centroid(self.points) else {
            return Err(MeshError::InvalidVertexCount { count: n }.into());
        };

        let mut vertices = Vec::with_capacity(n + 1);
        vertices.push(center);
        vertices.extend_from_slice(self.points);

        let uvs = compute_uv(&vertices, 0.0)?;

        let mut winding = Winding::Normal;
        let mut triangles = fan(n, winding);
        let mut normal = face_normal(&vertices, &triangles).ok_or(MeshError::DegenerateNormal)?;

        let angle = math::angle_degrees(&normal, &up).ok_or(MeshError::DegenerateNormal)?;
        if angle >= self.params.upside_down_threshold() {
            winding = Winding::Flipped;
            triangles = fan(n, winding);
            normal = face_normal(&vertices, &triangles).ok_or(MeshError::DegenerateNormal)?;
        }

        let normals = vertex_normals(&vertices, &triangles, normal);

        Ok(PolygonMesh {
            vertices,
            triangles,
            uvs,
            normals,
            face_normal: normal,
            winding,
        })
    }
}

/// Fan triangles joining vertex 0 to each boundary edge of `n` points.
#[allow(clippy::cast_possible_truncation)]
fn fan(n: usize, winding: Winding) -> Vec<[u32; 3]> {
    (1..=n)
        .map(|i| {
            let next = if i == n { 1 } else { i + 1 };
            let (i, next) = (i as u32, next as u32);
            match winding {
                Winding::Normal => [0, next, i],
                Winding::Flipped => [0, i, next],
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::math::Point2;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Unit square ordered so the default fan faces +Y.
    fn square_up() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 0.0, 1.0),
        ]
    }

    fn pentagon() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.5, 0.0, 1.5),
            p(1.0, 0.0, 2.5),
            p(-0.5, 0.0, 1.5),
        ]
    }

    #[test]
    fn counts_for_each_valid_size() {
        let pts = pentagon();
        for n in 3..=5 {
            let mesh = BuildPolygonMesh::new(&pts[..n], Vector3::y()).execute().unwrap();
            assert_eq!(mesh.vertices().len(), n + 1);
            assert_eq!(mesh.triangles().len(), n);
            assert_eq!(mesh.uvs().len(), n + 1);
            assert_eq!(mesh.normals().len(), n + 1);
            assert_eq!(mesh.boundary_len(), n);
        }
    }

    #[test]
    fn too_few_or_too_many_points() {
        let two = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let err = BuildPolygonMesh::new(&two, Vector3::y()).execute().unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::InvalidVertexCount { count: 2 }));

        let mut six = pentagon();
        six.push(p(0.0, 0.0, 0.5));
        let err = BuildPolygonMesh::new(&six, Vector3::y()).execute().unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::InvalidVertexCount { count: 6 }));
    }

    #[test]
    fn vertex_layout() {
        let pts = square_up();
        let mesh = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap();
        assert_relative_eq!(mesh.vertices()[0], p(0.5, 0.0, 0.5), epsilon = 1e-12);
        for (v, q) in mesh.vertices()[1..].iter().zip(pts.iter()) {
            assert_relative_eq!(*v, *q);
        }
    }

    #[test]
    fn upright_fan_is_not_flipped() {
        let mesh = BuildPolygonMesh::new(&square_up(), Vector3::y()).execute().unwrap();
        assert_eq!(mesh.winding(), Winding::Normal);
        assert_eq!(
            mesh.triangles(),
            &[[0, 2, 1], [0, 3, 2], [0, 4, 3], [0, 1, 4]]
        );
        assert_relative_eq!(mesh.face_normal(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn inverted_fan_is_flipped() {
        let mut pts = square_up();
        pts.reverse();
        let mesh = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap();
        assert_eq!(mesh.winding(), Winding::Flipped);
        assert_eq!(
            mesh.triangles(),
            &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]]
        );
        assert_relative_eq!(mesh.face_normal(), Vector3::y(), epsilon = 1e-12);
        for n in mesh.normals() {
            assert_relative_eq!(*n, Vector3::y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn flip_is_relative_to_reference_up() {
        let mesh = BuildPolygonMesh::new(&square_up(), -Vector3::y()).execute().unwrap();
        assert_eq!(mesh.winding(), Winding::Flipped);
        assert_relative_eq!(mesh.face_normal(), -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn tilted_within_threshold_is_kept() {
        // Normal is about 100 degrees from +Y: tilted, not inverted.
        let tilt = 100.0_f64.to_radians();
        let up = Vector3::new(tilt.sin(), tilt.cos(), 0.0);
        let mesh = BuildPolygonMesh::new(&square_up(), up).execute().unwrap();
        assert_eq!(mesh.winding(), Winding::Normal);
    }

    #[test]
    fn stricter_threshold_from_params() {
        let tilt = 100.0_f64.to_radians();
        let up = Vector3::new(tilt.sin(), tilt.cos(), 0.0);
        let mesh = BuildPolygonMesh::new(&square_up(), up)
            .with_params(MeshParams::new(90.0).unwrap())
            .execute()
            .unwrap();
        assert_eq!(mesh.winding(), Winding::Flipped);
    }

    #[test]
    fn near_planar_noise() {
        let pts = vec![
            p(0.0, 0.01, 0.0),
            p(1.0, -0.02, 0.0),
            p(1.0, 0.015, 1.0),
            p(0.0, -0.01, 1.0),
        ];
        let mesh = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap();
        assert_eq!(mesh.winding(), Winding::Normal);
        assert!(mesh.face_normal().y > 0.99);
    }

    #[test]
    fn threshold_is_inclusive() {
        // The square faces +Y, so the angle to +X is the threshold itself.
        let threshold = math::angle_degrees(&Vector3::y(), &Vector3::x()).unwrap();
        let mesh = BuildPolygonMesh::new(&square_up(), Vector3::x())
            .with_params(MeshParams::new(threshold).unwrap())
            .execute()
            .unwrap();
        assert_eq!(mesh.winding(), Winding::Flipped);
    }

    #[test]
    fn non_finite_points_fail() {
        let mut pts = square_up();
        pts[2] = p(f64::NAN, 0.0, 1.0);
        let err = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::NonFinitePoint { index: 2 }));

        pts[2] = p(1.0, 0.0, 1.0);
        pts[0] = p(f64::INFINITY, 0.0, 0.0);
        let err = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::NonFinitePoint { index: 0 }));
    }

    #[test]
    fn unnormalized_reference_up() {
        let mesh = BuildPolygonMesh::new(&square_up(), Vector3::new(0.0, 4.0, 0.0))
            .execute()
            .unwrap();
        assert_eq!(mesh.winding(), Winding::Normal);
    }

    #[test]
    fn zero_reference_up_fails() {
        let err = BuildPolygonMesh::new(&square_up(), Vector3::zeros())
            .execute()
            .unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::InvalidReferenceUp));
    }

    #[test]
    fn initial_uvs_have_no_offset() {
        let mesh = BuildPolygonMesh::new(&square_up(), Vector3::y()).execute().unwrap();
        let expected = [
            Point2::new(0.5, 0.5),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        for (uv, e) in mesh.uvs().iter().zip(expected.iter()) {
            assert_relative_eq!(*uv, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn collinear_in_x_fails() {
        let pts = [p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 2.0)];
        let err = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap_err();
        assert!(matches!(
            err.as_mesh(),
            Some(MeshError::DegenerateExtent { .. })
        ));
    }

    #[test]
    fn diagonal_line_has_no_normal() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(2.0, 0.0, 2.0)];
        let err = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::DegenerateNormal));
    }

    #[test]
    fn duplicate_first_point_uses_next_triangle() {
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 0.0, 1.0),
        ];
        let mut reversed = pts.clone();
        reversed.reverse();
        let a = BuildPolygonMesh::new(&pts, Vector3::y()).execute().unwrap();
        let b = BuildPolygonMesh::new(&reversed, Vector3::y()).execute().unwrap();
        assert_ne!(a.winding(), b.winding());
        assert!(a.face_normal().y > 0.0 && b.face_normal().y > 0.0);
    }

    #[test]
    fn fan_orders() {
        assert_eq!(fan(3, Winding::Normal), vec![[0, 2, 1], [0, 3, 2], [0, 1, 3]]);
        assert_eq!(fan(3, Winding::Flipped), vec![[0, 1, 2], [0, 2, 3], [0, 3, 1]]);
    }
}
