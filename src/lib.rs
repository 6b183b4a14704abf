pub mod anchor;
pub mod diagnostics;
pub mod error;
pub mod math;
pub mod mesh;
pub mod session;

pub use error::{ArMeshError, Result};
