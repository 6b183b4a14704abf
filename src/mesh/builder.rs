use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3};

use super::{BuildPolygonMesh, MeshParams, PanMaterial, PolygonMesh};

/// Opaque handle to a material owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Lifecycle of a [`PolygonMeshBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    Built,
}

/// Owns the most recently built polygon mesh and its applied material.
#[derive(Debug, Default)]
pub struct PolygonMeshBuilder {
    params: MeshParams,
    material: Option<MaterialId>,
    mesh: Option<PolygonMesh>,
}

impl PolygonMeshBuilder {
    /// Creates an empty builder with default parameters and no material.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom mesh parameters.
    #[must_use]
    pub fn with_params(mut self, params: MeshParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the material applied to built meshes.
    #[must_use]
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Builds a mesh from `points`, replacing any previous mesh.
    ///
    /// On error the builder keeps its previous state.
    ///
    /// # Errors
    ///
    /// See [`BuildPolygonMesh::execute`].
    pub fn build(&mut self, points: &[Point3], reference_up: Vector3) -> Result<&PolygonMesh> {
        let mesh = BuildPolygonMesh::new(points, reference_up)
            .with_params(self.params)
            .execute()?;
        Ok(&*self.mesh.insert(mesh))
    }

    /// Regenerates the current mesh's UVs with an absolute pan offset.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NotBuilt`] if no mesh exists, or the error of
    /// [`PanMaterial::execute`].
    pub fn pan_material(&mut self, offset: f64) -> Result<()> {
        let mesh = self.mesh.as_mut().ok_or(MeshError::NotBuilt)?;
        PanMaterial::new(offset).execute(mesh)
    }

    /// Swaps the applied material, returning the previous one.
    pub fn change_material(&mut self, material: MaterialId) -> Option<MaterialId> {
        self.material.replace(material)
    }

    /// Drops the current mesh. The material stays applied.
    pub fn reset(&mut self) {
        self.mesh = None;
    }

    #[must_use]
    pub fn state(&self) -> BuilderState {
        if self.mesh.is_some() {
            BuilderState::Built
        } else {
            BuilderState::Empty
        }
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&PolygonMesh> {
        self.mesh.as_ref()
    }

    #[must_use]
    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    #[must_use]
    pub fn params(&self) -> &MeshParams {
        &self.params
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn lifecycle() {
        let mut builder = PolygonMeshBuilder::new();
        assert_eq!(builder.state(), BuilderState::Empty);
        assert!(builder.mesh().is_none());

        let mesh = builder.build(&triangle(), Vector3::y()).unwrap();
        assert_eq!(mesh.triangles().len(), 3);
        assert_eq!(builder.state(), BuilderState::Built);

        builder.pan_material(0.5).unwrap();
        assert_eq!(builder.state(), BuilderState::Built);
        assert_relative_eq!(builder.mesh().unwrap().uvs()[1].x, 0.5, epsilon = 1e-12);

        builder.reset();
        assert_eq!(builder.state(), BuilderState::Empty);
    }

    #[test]
    fn pan_without_mesh_fails() {
        let mut builder = PolygonMeshBuilder::new();
        let err = builder.pan_material(0.25).unwrap_err();
        assert_eq!(err.as_mesh(), Some(&MeshError::NotBuilt));
    }

    #[test]
    fn failed_build_keeps_previous_mesh() {
        let mut builder = PolygonMeshBuilder::new();
        builder.build(&triangle(), Vector3::y()).unwrap();
        let pts = triangle();
        assert!(builder.build(&pts[..2], Vector3::y()).is_err());
        assert_eq!(builder.state(), BuilderState::Built);
        assert_eq!(builder.mesh().unwrap().boundary_len(), 3);
    }

    #[test]
    fn rebuild_replaces_mesh() {
        let mut builder = PolygonMeshBuilder::new();
        builder.build(&triangle(), Vector3::y()).unwrap();
        builder.pan_material(0.75).unwrap();

        let square = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = builder.build(&square, Vector3::y()).unwrap();
        assert_eq!(mesh.boundary_len(), 4);
        assert_relative_eq!(mesh.uvs()[1].x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn material_survives_reset() {
        let mut builder = PolygonMeshBuilder::new().with_material(MaterialId(1));
        assert_eq!(builder.change_material(MaterialId(2)), Some(MaterialId(1)));
        builder.build(&triangle(), Vector3::y()).unwrap();
        builder.reset();
        assert_eq!(builder.material(), Some(MaterialId(2)));
    }

    #[test]
    fn uses_configured_params() {
        let params = MeshParams::new(150.0).unwrap();
        let builder = PolygonMeshBuilder::new().with_params(params);
        assert_eq!(builder.params(), &params);
    }
}
