//! Typed schema of the engine's mesh metadata document.
//!
//! The metadata describes where the vertex and index data of each submesh live inside the
//! container's binary buffer. It is read with [serde]; field names follow the engine's
//! camelCase JSON.
//!
//! # Structure
//!
//! * `vertexBundles`: interleaved vertex regions
//!   - `view`(!): `offset`, `length`, `count` (vertices), `stride` (bytes per vertex record)
//!   - `attributes`(!): ordered record layout
//!     * `name`(!): engine attribute name, ex. `a_position`
//!     * `format`(!): [VertexFormat] name, ex. `RGB32F`
//!     * `isNormalized`: force normalization of integer components
//!     * `offset`: byte offset within the record; if absent, the sum of the sizes of the
//!       preceding attributes
//! * `primitives`(!): submeshes
//!   - `vertexBundelIndices`: bundles supplying this submesh's attributes (sic)
//!   - `indexView`: `offset`, `length`, `count` (indices), `stride` (bytes per index)
//!   - `jointMapIndex`: index into `jointMaps`
//! * `jointMaps`: joint remap tables, shared between submeshes
//! * `minPosition`, `maxPosition`: mesh bounds; rewritten after bounds are recomputed

use serde::{Deserialize, Serialize};

use crate::VertexFormat;

/// A window into the container's binary buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    pub count: usize,
    pub stride: usize,
}

/// Index data of a submesh; `stride` is the width of one index in bytes.
pub type IndexView = BufferView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,
    pub format: VertexFormat,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_normalized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, format: VertexFormat) -> Self {
        Self {
            name: name.into(),
            format,
            is_normalized: false,
            offset: None,
        }
    }

    /// The format actually used to decode this attribute.
    #[inline]
    pub fn effective_format(&self) -> VertexFormat {
        if self.is_normalized {
            self.format.normalized()
        } else {
            self.format
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDescriptor {
    pub view: BufferView,
    pub attributes: Vec<AttributeDescriptor>,
}

impl BundleDescriptor {
    /// Byte offset of each attribute within a vertex record, in declaration order.
    ///
    /// Offsets saturate at `usize::MAX`; such an attribute can never fit its record, which
    /// [decode_bundle](crate::decode_bundle) reports as an error.
    pub fn attribute_offsets(&self) -> Vec<usize> {
        let mut running = 0usize;
        self.attributes
            .iter()
            .map(|attr| {
                let offset = attr.offset.unwrap_or(running);
                running = offset.saturating_add(attr.effective_format().size_bytes());
                offset
            })
            .collect()
    }

    /// Size of the record described by `attributes`, ignoring the view's stride.
    pub fn record_size(&self) -> usize {
        self.attributes
            .iter()
            .zip(self.attribute_offsets())
            .map(|(attr, offset)| offset.saturating_add(attr.effective_format().size_bytes()))
            .max()
            .unwrap_or(0)
    }

    /// Bytes between consecutive vertex records. A zero stride in the view means the records are
    /// tightly packed.
    #[inline]
    pub fn stride(&self) -> usize {
        match self.view.stride {
            0 => self.record_size(),
            stride => stride,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmeshDescriptor {
    #[serde(default, rename = "vertexBundelIndices")]
    pub vertex_bundles: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_view: Option<IndexView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_map_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshMetadata {
    pub vertex_bundles: Vec<BundleDescriptor>,
    pub primitives: Vec<SubmeshDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joint_maps: Vec<Vec<u32>>,
    #[serde(default)]
    pub min_position: [f32; 3],
    #[serde(default)]
    pub max_position: [f32; 3],
}

impl MeshMetadata {
    #[inline]
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        (self.min_position, self.max_position)
    }

    /// Overwrite the stored mesh bounds.
    #[inline]
    pub fn set_bounds(&mut self, min: [f32; 3], max: [f32; 3]) {
        self.min_position = min;
        self.max_position = max;
    }

    /// The joint remap table of a submesh, if it has one.
    pub fn joint_map(&self, submesh: &SubmeshDescriptor) -> Option<&[u32]> {
        submesh
            .joint_map_index
            .and_then(|i| self.joint_maps.get(i))
            .map(Vec::as_slice)
    }
}
