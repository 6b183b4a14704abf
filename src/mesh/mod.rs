mod build;
mod builder;
mod normals;
mod pan;
mod uv;

pub use build::BuildPolygonMesh;
pub use builder::{BuilderState, MaterialId, PolygonMeshBuilder};
pub use pan::PanMaterial;
pub use uv::compute_uv;

use crate::error::{ConfigError, Result};
use crate::math::{Point2, Point3, Vector3};

/// Default angle, in degrees, at which a fan is considered upside down.
pub const DEFAULT_UPSIDE_DOWN_THRESHOLD: f64 = 120.0;

/// Parameters controlling polygon mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    upside_down_threshold: f64,
}

impl MeshParams {
    /// Creates mesh parameters with a custom upside-down threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is not within `(0, 180]` degrees.
    pub fn new(upside_down_threshold: f64) -> Result<Self> {
        if !upside_down_threshold.is_finite()
            || upside_down_threshold <= 0.0
            || upside_down_threshold > 180.0
        {
            return Err(ConfigError::InvalidParameter(format!(
                "upside-down threshold must be in (0, 180] degrees, got {upside_down_threshold}"
            ))
            .into());
        }
        Ok(Self {
            upside_down_threshold,
        })
    }

    /// Angle between face normal and reference up, in degrees, at or above
    /// which the winding is flipped.
    #[must_use]
    pub fn upside_down_threshold(&self) -> f64 {
        self.upside_down_threshold
    }
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            upside_down_threshold: DEFAULT_UPSIDE_DOWN_THRESHOLD,
        }
    }
}

/// Which fan winding is stored in a mesh's triangle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// Triangles are `(0, next(i), i)`.
    #[default]
    Normal,
    /// Triangles are `(0, i, next(i))`.
    Flipped,
}

/// A flat polygon as a centroid-fan triangle mesh.
///
/// Vertex 0 is the centroid; vertices `1..=n` are the boundary points in
/// placement order. Only the UV buffer changes after construction.
#[derive(Debug, Clone)]
pub struct PolygonMesh {
    vertices: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
    uvs: Vec<Point2>,
    normals: Vec<Vector3>,
    face_normal: Vector3,
    winding: Winding,
}

impl PolygonMesh {
    /// Vertex positions, centroid first.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangle indices into [`Self::vertices`].
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// One UV coordinate per vertex.
    #[must_use]
    pub fn uvs(&self) -> &[Point2] {
        &self.uvs
    }

    /// One unit normal per vertex.
    #[must_use]
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// Unit normal of the polygon for the stored winding.
    #[must_use]
    pub fn face_normal(&self) -> Vector3 {
        self.face_normal
    }

    #[must_use]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Number of boundary points.
    #[must_use]
    pub fn boundary_len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    fn replace_uvs(&mut self, uvs: Vec<Point2>) {
        debug_assert_eq!(uvs.len(), self.vertices.len());
        self.uvs = uvs;
    }
}
