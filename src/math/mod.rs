/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Computes the arithmetic mean of a set of points.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Some(Point3::from(sum / n))
}

/// Unsigned angle between two vectors, in degrees.
///
/// Returns `None` when either vector has (near) zero length.
#[must_use]
pub fn angle_degrees(a: &Vector3, b: &Vector3) -> Option<f64> {
    let a = a.try_normalize(TOLERANCE)?;
    let b = b.try_normalize(TOLERANCE)?;
    Some(a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Returns `true` when every coordinate of `p` is finite.
#[must_use]
pub fn is_finite_point(p: &Point3) -> bool {
    p.iter().all(|c| c.is_finite())
}
