mod pointer;

pub use pointer::{HitPose, PlaneId, Pointer};

use crate::error::AnchorError;
use crate::math::{self, Point3};

/// Maximum number of anchors a polygon may have.
pub const MAX_ANCHORS: usize = 5;

/// Minimum number of anchors needed to build a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Ordered, bounded collection of placed anchor positions.
///
/// Insertion order defines the polygon boundary: consecutive points are
/// adjacent, and the last point closes back to the first.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    points: Vec<Point3>,
}

impl AnchorSet {
    /// Creates a new, empty anchor set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(MAX_ANCHORS),
        }
    }

    /// Appends a point and returns the new count.
    ///
    /// `None` stands for "no pointer candidate available".
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::InvalidState`] if no point is given or the point
    /// is not finite, and [`AnchorError::CapacityExceeded`] if the set already
    /// holds [`MAX_ANCHORS`] points.
    pub fn append(&mut self, point: impl Into<Option<Point3>>) -> Result<usize, AnchorError> {
        let Some(point) = point.into() else {
            return Err(AnchorError::InvalidState(
                "no pointer or plane to place an anchor on".into(),
            ));
        };
        if !math::is_finite_point(&point) {
            return Err(AnchorError::InvalidState(format!(
                "non-finite anchor position ({}, {}, {})",
                point.x, point.y, point.z
            )));
        }
        if self.is_full() {
            return Err(AnchorError::CapacityExceeded {
                capacity: MAX_ANCHORS,
            });
        }
        self.points.push(point);
        Ok(self.points.len())
    }

    /// Removes and returns the most recently placed point.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::EmptyState`] if the set is empty.
    pub fn remove_last(&mut self) -> Result<Point3, AnchorError> {
        self.points.pop().ok_or(AnchorError::EmptyState)
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Mean position of the placed points, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::InsufficientPoints`] if the set is empty.
    pub fn centroid(&self) -> Result<Point3, AnchorError> {
        math::centroid(&self.points).ok_or(AnchorError::InsufficientPoints)
    }

    /// Number of placed points, always within `0..=MAX_ANCHORS`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_ANCHORS
    }

    /// Returns `true` once enough points exist to build a polygon.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }

    /// The placed points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Helper line from the second-to-last point to the last one.
    #[must_use]
    pub fn guide_segment(&self) -> Option<(Point3, Point3)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// All helper lines between consecutive points, in placement order.
    ///
    /// The closing edge back to the first point is not included.
    #[must_use]
    pub fn segments(&self) -> Vec<(Point3, Point3)> {
        self.points.windows(2).map(|w| (w[0], w[1])).collect()
    }
}
