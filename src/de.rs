//! Loaders which describe external mesh formats as a [MeshSource](crate::MeshSource).

pub mod engine;
#[cfg(feature = "gltf")]
pub mod gltf;
