//! Drives anchor placement and polygon building from discrete input events.
//!
//! Raycasting and anchor tracking are external; they are reached through
//! [`PlaneRaycaster`] and [`AnchorTracker`].

mod tracker;

pub use tracker::{AnchorId, InMemoryTracker, TrackedAnchor};

use crate::anchor::{AnchorSet, HitPose, PlaneId, Pointer, MAX_ANCHORS};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{AnchorError, ArMeshError, Result};
use crate::math::{Point2, Point3, Vector3};
use crate::mesh::{BuilderState, MaterialId, MeshParams, PolygonMesh, PolygonMeshBuilder, Winding};

/// Turns a screen position into a hit on a detected plane.
pub trait PlaneRaycaster {
    fn raycast(&mut self, screen: Point2) -> Option<HitPose>;
}

impl<F> PlaneRaycaster for F
where
    F: FnMut(Point2) -> Option<HitPose>,
{
    fn raycast(&mut self, screen: Point2) -> Option<HitPose> {
        self(screen)
    }
}

/// External spatial-anchor subsystem.
pub trait AnchorTracker {
    type Handle;

    /// Attaches an anchor to `plane`; `None` if the subsystem refuses.
    fn attach(&mut self, plane: PlaneId, position: Point3) -> Option<Self::Handle>;

    /// Current tracked position, or `None` if tracking is lost.
    fn position(&self, handle: &Self::Handle) -> Option<Point3>;

    /// Releases the anchor.
    fn detach(&mut self, handle: Self::Handle);
}

/// Session-level options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Report a guide segment from the previous anchor on each placement.
    pub guide_lines: bool,
    /// Parameters for the polygon mesh.
    pub mesh_params: MeshParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            guide_lines: true,
            mesh_params: MeshParams::default(),
        }
    }
}

/// Result of a successful [`PlacementSession::place_anchor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Number of anchors after placement.
    pub count: usize,
    /// Position the anchor was placed at.
    pub position: Point3,
    /// Guide line from the previous anchor, when enabled.
    pub guide_segment: Option<(Point3, Point3)>,
    /// Whether enough anchors exist to finish.
    pub can_finish: bool,
}

/// One placement-and-build interaction.
pub struct PlacementSession<R, T: AnchorTracker, S = TracingSink> {
    raycaster: R,
    tracker: T,
    sink: S,
    config: SessionConfig,
    pointer: Pointer,
    anchors: AnchorSet,
    handles: Vec<T::Handle>,
    builder: PolygonMeshBuilder,
}

impl<R, T: AnchorTracker> PlacementSession<R, T, TracingSink> {
    /// Creates a session that reports through `tracing`.
    #[must_use]
    pub fn new(raycaster: R, tracker: T) -> Self {
        Self {
            raycaster,
            tracker,
            sink: TracingSink,
            config: SessionConfig::default(),
            pointer: Pointer::new(),
            anchors: AnchorSet::new(),
            handles: Vec::with_capacity(MAX_ANCHORS),
            builder: PolygonMeshBuilder::new(),
        }
    }
}

impl<R, T, S> PlacementSession<R, T, S>
where
    R: PlaneRaycaster,
    T: AnchorTracker,
    S: DiagnosticSink,
{
    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> PlacementSession<R, T, S2> {
        PlacementSession {
            raycaster: self.raycaster,
            tracker: self.tracker,
            sink,
            config: self.config,
            pointer: self.pointer,
            anchors: self.anchors,
            handles: self.handles,
            builder: self.builder,
        }
    }

    /// Sets session options.
    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self.builder = std::mem::take(&mut self.builder).with_params(config.mesh_params);
        self
    }

    /// Sets the material applied to the built polygon.
    #[must_use]
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.builder = std::mem::take(&mut self.builder).with_material(material);
        self
    }

    /// Handles one tap: raycasts it and moves the pointer on a hit.
    pub fn on_tap_at(&mut self, screen: Point2) -> Option<HitPose> {
        let hit = self.raycaster.raycast(screen)?;
        self.pointer.update(hit);
        Some(hit)
    }

    /// Places an anchor at the pointer.
    ///
    /// # Errors
    ///
    /// - [`AnchorError::InvalidState`] if there is no pointer, or the tracker
    ///   refuses the anchor.
    /// - [`AnchorError::CapacityExceeded`] if five anchors already exist.
    pub fn place_anchor(&mut self) -> Result<Placement> {
        let Some(hit) = self.pointer.candidate().copied() else {
            return Err(self.report(
                AnchorError::InvalidState("no pointer or plane to place an anchor on".into())
                    .into(),
            ));
        };
        if self.anchors.is_full() {
            return Err(self.report(
                AnchorError::CapacityExceeded {
                    capacity: MAX_ANCHORS,
                }
                .into(),
            ));
        }
        let Some(handle) = self.tracker.attach(hit.plane, hit.position) else {
            return Err(self.report(
                AnchorError::InvalidState("anchor tracker refused to attach".into()).into(),
            ));
        };
        let position = self.tracker.position(&handle).unwrap_or(hit.position);
        let count = match self.anchors.append(position) {
            Ok(count) => count,
            Err(e) => {
                self.tracker.detach(handle);
                return Err(self.report(e.into()));
            }
        };
        self.handles.push(handle);

        let guide_segment = if self.config.guide_lines {
            self.anchors.guide_segment()
        } else {
            None
        };
        Ok(Placement {
            count,
            position,
            guide_segment,
            can_finish: self.anchors.can_finish(),
        })
    }

    /// Removes the most recent anchor and detaches it from the tracker.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::EmptyState`] if no anchor exists.
    pub fn remove_last_anchor(&mut self) -> Result<Point3> {
        let point = match self.anchors.remove_last() {
            Ok(point) => point,
            Err(e) => {
                self.sink.info(&e.to_string());
                return Err(e.into());
            }
        };
        if let Some(handle) = self.handles.pop() {
            self.tracker.detach(handle);
        }
        Ok(point)
    }

    /// Whether enough anchors exist to build a polygon.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.anchors.can_finish()
    }

    /// Builds the polygon from the anchors' current tracked positions.
    ///
    /// Anchors whose tracking is lost keep their placed position.
    ///
    /// # Errors
    ///
    /// See [`crate::mesh::BuildPolygonMesh::execute`].
    pub fn finish(&mut self, reference_up: Vector3) -> Result<&PolygonMesh> {
        let points: Vec<Point3> = self
            .anchors
            .points()
            .iter()
            .zip(&self.handles)
            .map(|(placed, handle)| self.tracker.position(handle).unwrap_or(*placed))
            .collect();

        match self.builder.build(&points, reference_up) {
            Ok(mesh) => {
                if mesh.winding() == Winding::Flipped {
                    self.sink.info("polygon was upside down, winding flipped");
                }
                Ok(mesh)
            }
            Err(e) => {
                self.sink.error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Pans the applied material with an absolute offset.
    ///
    /// # Errors
    ///
    /// See [`PolygonMeshBuilder::pan_material`].
    pub fn pan_material(&mut self, offset: f64) -> Result<()> {
        self.builder
            .pan_material(offset)
            .map_err(|e| self.report(e))
    }

    /// Swaps the applied material, returning the previous one.
    pub fn change_material(&mut self, material: MaterialId) -> Option<MaterialId> {
        self.builder.change_material(material)
    }

    /// Detaches every anchor and clears points, pointer and mesh.
    pub fn restart(&mut self) {
        for handle in self.handles.drain(..) {
            self.tracker.detach(handle);
        }
        self.anchors.clear();
        self.pointer.clear();
        self.builder.reset();
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    #[must_use]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&PolygonMesh> {
        self.builder.mesh()
    }

    #[must_use]
    pub fn state(&self) -> BuilderState {
        self.builder.state()
    }

    #[must_use]
    pub fn material(&self) -> Option<MaterialId> {
        self.builder.material()
    }

    #[must_use]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn report(&self, err: ArMeshError) -> ArMeshError {
        self.sink.error(&err.to_string());
        err
    }
}
