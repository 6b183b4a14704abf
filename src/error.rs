use thiserror::Error;

/// Top-level error type for armesh.
#[derive(Debug, Error)]
pub enum ArMeshError {
    #[error(transparent)]
    Anchor(#[from] AnchorError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the anchor set.
#[derive(Debug, Error, PartialEq)]
pub enum AnchorError {
    #[error("anchor set is full ({capacity} points)")]
    CapacityExceeded { capacity: usize },

    #[error("no anchor to remove")]
    EmptyState,

    #[error("at least one point is required")]
    InsufficientPoints,

    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while building or re-texturing a polygon mesh.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("a polygon needs between 3 and 5 points, got {count}")]
    InvalidVertexCount { count: usize },

    #[error("degenerate extent along the {axis} axis")]
    DegenerateExtent { axis: Axis },

    #[error("every triangle of the fan is degenerate")]
    DegenerateNormal,

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("reference up vector has zero length")]
    InvalidReferenceUp,

    #[error("no mesh has been built")]
    NotBuilt,
}

/// Errors related to configuration parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// World axis named in [`MeshError::DegenerateExtent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Z => f.write_str("z"),
        }
    }
}

/// Convenience type alias for results using [`ArMeshError`].
pub type Result<T> = std::result::Result<T, ArMeshError>;

impl ArMeshError {
    /// Returns the anchor error, if this is one.
    #[must_use]
    pub fn as_anchor(&self) -> Option<&AnchorError> {
        match self {
            ArMeshError::Anchor(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the mesh error, if this is one.
    #[must_use]
    pub fn as_mesh(&self) -> Option<&MeshError> {
        match self {
            ArMeshError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}
