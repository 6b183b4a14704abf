use crate::math::Point3;

/// Opaque identifier of a plane reported by the plane-detection subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneId(pub u64);

/// A raycast hit against a detected plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPose {
    /// World-space hit position.
    pub position: Point3,
    /// The plane that was hit.
    pub plane: PlaneId,
}

/// The candidate position the next anchor will be placed at.
///
/// Starts empty; the first hit creates it and later hits move it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    hit: Option<HitPose>,
}

impl Pointer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the pointer to a new hit.
    pub fn update(&mut self, hit: HitPose) {
        self.hit = Some(hit);
    }

    /// The current candidate, if a plane has been hit.
    #[must_use]
    pub fn candidate(&self) -> Option<&HitPose> {
        self.hit.as_ref()
    }

    /// The candidate position, if any.
    #[must_use]
    pub fn position(&self) -> Option<Point3> {
        self.hit.map(|h| h.position)
    }

    pub fn clear(&mut self) {
        self.hit = None;
    }
}
