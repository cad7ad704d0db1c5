//! The boundary between mesh loaders and [Geometry](crate::Geometry).
//!
//! Loaders describe what they read with these types; attribute keys are the glTF attribute names
//! (see [Semantic::source_key](crate::Semantic::source_key)). Keys which don't name a
//! [Semantic](crate::Semantic) are accepted here and dropped when the geometry is built.

use interleave::AttributeArray;

use crate::bounds::Aabb;

/// Everything a loader read from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSource {
    /// Top-level meshes, in document order
    pub meshes: Vec<SourceMesh>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub name: Option<String>,
    pub primitives: Vec<SourcePrimitive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePrimitive {
    /// Triangle list; if absent, vertices are read in order
    pub indices: Option<Vec<u32>>,
    pub joint_remap: Option<Vec<u32>>,
    /// Raw attribute arrays, keyed by source attribute name
    pub attributes: Vec<(String, AttributeArray)>,
    /// Bounds computed by the source, if it provides them
    pub bounds: Option<Aabb<f32>>,
}

impl MeshSource {
    /// A source describing exactly one mesh.
    #[inline]
    pub fn single(mesh: SourceMesh) -> Self {
        Self { meshes: vec![mesh] }
    }
}

impl SourceMesh {
    pub fn new(primitives: Vec<SourcePrimitive>) -> Self {
        Self {
            name: None,
            primitives,
        }
    }
}

impl SourcePrimitive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        values: impl Into<AttributeArray>,
    ) -> Self {
        self.attributes.push((key.into(), values.into()));
        self
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb<f32>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_joint_remap(mut self, remap: Vec<u32>) -> Self {
        self.joint_remap = Some(remap);
        self
    }
}
