use crate::Semantic;

/// Errors related to [Geometry](crate::Geometry) construction and attribute access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source describes {0} meshes; only single-mesh sources are supported")]
    UnsupportedSource(usize),
    #[error("source does not describe a mesh")]
    EmptySource,
    #[error("primitive index out of range: 0..{len} ∌ {index}")]
    PrimitiveOutOfRange { index: usize, len: usize },
    #[error("primitive {primitive} has no {semantic} attribute, and it cannot be synthesized")]
    UnsupportedAttribute { primitive: usize, semantic: Semantic },
    #[error("cannot synthesize {target} for primitive {primitive}: missing {missing}")]
    MissingPrerequisite {
        primitive: usize,
        target: Semantic,
        missing: Semantic,
    },
    #[error("primitive {0} has no POSITION attribute")]
    MissingPosition(usize),
    #[error("primitive {primitive}: {semantic} has {len} components; expected {expected}")]
    AttributeLength {
        primitive: usize,
        semantic: Semantic,
        len: usize,
        expected: usize,
    },
    #[error("primitive {primitive}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        primitive: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("primitive {primitive}: {count} vertices do not form a triangle list")]
    IncompleteTriangle { primitive: usize, count: usize },
    #[error("primitive {primitive}: {topology} topology is not a triangle list")]
    UnsupportedTopology { primitive: usize, topology: String },
    #[error("submesh {submesh} references vertex bundle {bundle}, which does not exist")]
    MissingBundle { submesh: usize, bundle: usize },
    #[error(transparent)]
    Decode(#[from] interleave::DecodeError),
    #[cfg(feature = "gltf")]
    #[error(transparent)]
    Gltf(#[from] gltf::Error),
}
