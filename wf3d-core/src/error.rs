//! Error types for scene construction.
use thiserror::Error;

/// Construction-time geometry violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three vertices to enclose anything.
    #[error("polygon has {0} vertices, at least 3 are required")]
    DegeneratePolygon(usize),

    /// An entity must reference at least one mesh.
    #[error("entity references no meshes")]
    NoMeshes,
}
