use slotmap::SlotMap;

use crate::anchor::PlaneId;
use crate::math::Point3;

use super::AnchorTracker;

slotmap::new_key_type! {
    /// Unique identifier for an anchor in an [`InMemoryTracker`].
    pub struct AnchorId;
}

/// Data associated with a tracked anchor.
#[derive(Debug, Clone)]
pub struct TrackedAnchor {
    /// Current world-space position.
    pub position: Point3,
    /// The plane the anchor is attached to.
    pub plane: PlaneId,
}

/// Arena-backed anchor tracker with generational keys.
///
/// Positions only change through [`InMemoryTracker::move_anchor`], which
/// stands in for a tracking system refining its estimate.
#[derive(Debug, Default)]
pub struct InMemoryTracker {
    anchors: SlotMap<AnchorId, TrackedAnchor>,
}

impl InMemoryTracker {
    /// Creates a new, empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Returns the tracked anchor, if it is still attached.
    #[must_use]
    pub fn anchor(&self, id: AnchorId) -> Option<&TrackedAnchor> {
        self.anchors.get(id)
    }

    /// Moves an attached anchor. Returns `false` if `id` is stale.
    pub fn move_anchor(&mut self, id: AnchorId, position: Point3) -> bool {
        match self.anchors.get_mut(id) {
            Some(anchor) => {
                anchor.position = position;
                true
            }
            None => false,
        }
    }

    /// Ids of every attached anchor.
    pub fn ids(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.anchors.keys()
    }
}

impl AnchorTracker for InMemoryTracker {
    type Handle = AnchorId;

    fn attach(&mut self, plane: PlaneId, position: Point3) -> Option<AnchorId> {
        Some(self.anchors.insert(TrackedAnchor { position, plane }))
    }

    fn position(&self, handle: &AnchorId) -> Option<Point3> {
        self.anchors.get(*handle).map(|a| a.position)
    }

    fn detach(&mut self, handle: AnchorId) {
        self.anchors.remove(handle);
    }
}
