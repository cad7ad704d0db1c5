//! Engine mesh containers: a JSON [MeshMetadata] document describing regions of one binary
//! buffer.

use interleave::{
    decode_index_buffer, decode_vertex_bundles, schema::MeshMetadata, VertexBundle,
};

use crate::{
    bounds::Aabb,
    source::{MeshSource, SourceMesh, SourcePrimitive},
    Error, Semantic,
};

/// Map an engine attribute name to its source key. Names without a mapping are returned as-is.
pub fn source_key(name: &str) -> &str {
    let semantic = match name {
        "a_position" => Semantic::Position,
        "a_normal" => Semantic::Normal,
        "a_tangent" => Semantic::Tangent,
        "a_texCoord" => Semantic::TexCoord0,
        "a_texCoord1" => Semantic::TexCoord1,
        "a_texCoord2" => Semantic::TexCoord2,
        "a_color" => Semantic::Color0,
        "a_joints" => Semantic::Joints0,
        "a_weights" => Semantic::Weights0,
        other => return other,
    };
    semantic.source_key()
}

impl MeshSource {
    /// Decode every submesh of an engine container.
    ///
    /// A submesh which lists no vertex bundles uses all of them. RGB colors are widened to RGBA
    /// with an opaque alpha. The container's stored bounds are not read, since they are what
    /// [store_bounds] rewrites.
    ///
    /// # Errors
    ///
    /// * [Error::MissingBundle] if a submesh references a bundle that doesn't exist
    /// * [Error::Decode] if any region lies outside of `buffer` or is malformed
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(bundles = meta.vertex_bundles.len(), submeshes = meta.primitives.len())
    )]
    pub fn from_engine(meta: &MeshMetadata, buffer: &[u8]) -> Result<Self, Error> {
        let bundles = decode_vertex_bundles(buffer, &meta.vertex_bundles)?;
        let primitives = meta
            .primitives
            .iter()
            .enumerate()
            .map(|(submesh, desc)| -> Result<SourcePrimitive, Error> {
                let referenced: Vec<&VertexBundle> = if desc.vertex_bundles.is_empty() {
                    bundles.iter().collect()
                } else {
                    desc.vertex_bundles
                        .iter()
                        .map(|&bundle| {
                            bundles
                                .get(bundle)
                                .ok_or(Error::MissingBundle { submesh, bundle })
                        })
                        .collect::<Result<_, _>>()?
                };

                let mut primitive = SourcePrimitive::new();
                for attr in referenced.into_iter().flat_map(|b| &b.attributes) {
                    let key = source_key(&attr.descriptor.name);
                    let components = attr.descriptor.effective_format().components();
                    let values = if key == Semantic::Color0.source_key() && components == 3 {
                        tracing::trace!(
                            submesh,
                            component = ?attr.values.component_type(),
                            "widening RGB color to RGBA"
                        );
                        attr.values.rgb_to_rgba()
                    } else {
                        attr.values.clone()
                    };
                    primitive = primitive.with_attribute(key, values);
                }
                if let Some(view) = &desc.index_view {
                    primitive = primitive.with_indices(decode_index_buffer(buffer, view)?);
                }
                if let Some(map) = meta.joint_map(desc) {
                    primitive = primitive.with_joint_remap(map.to_vec());
                }
                tracing::trace!(
                    submesh,
                    attributes = primitive.attributes.len(),
                    indexed = primitive.indices.is_some(),
                    "decoded submesh"
                );
                Ok(primitive)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MeshSource::single(SourceMesh::new(primitives)))
    }
}

/// Overwrite the bounds stored in a container's metadata.
pub fn store_bounds(meta: &mut MeshMetadata, bounds: &Aabb<f32>) {
    let (min, max) = bounds.to_arrays();
    meta.set_bounds(min, max);
}
