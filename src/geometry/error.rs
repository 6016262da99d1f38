/// Errors from mesh generation. All of these are rejected up front,
/// before any geometry is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("segment counts must be at least 1")]
    ZeroSegments,

    #[error("subdivision depth {depth} exceeds maximum {max}")]
    DepthOutOfRange { depth: u32, max: u32 },

    #[error("{vertices} vertices exceed the 16-bit index limit of {max}")]
    TooManyVertices { vertices: usize, max: usize },
}
