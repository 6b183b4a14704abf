use crate::error::{ConfigError, Result};

use super::uv::compute_uv;
use super::PolygonMesh;

/// Re-projects a mesh's UVs with a new absolute pan offset.
///
/// Vertices and triangles are untouched; the UV buffer is replaced as a whole.
pub struct PanMaterial {
    offset: f64,
}

impl PanMaterial {
    /// Creates a new `PanMaterial` operation.
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Executes the pan on `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not finite or the mesh's vertices
    /// have a degenerate extent. The mesh is unchanged on error.
    pub fn execute(&self, mesh: &mut PolygonMesh) -> Result<()> {
        if !self.offset.is_finite() {
            return Err(ConfigError::InvalidParameter(format!(
                "pan offset must be finite, got {}",
                self.offset
            ))
            .into());
        }
        let uvs = compute_uv(mesh.vertices(), self.offset)?;
        mesh.replace_uvs(uvs);
        Ok(())
    }
}
