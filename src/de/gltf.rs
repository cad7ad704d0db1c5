//! Reading glTF documents as a [MeshSource].
//!
//! # Notes
//!
//! * Every top-level mesh of the document is read, in document order; a
//!   [Geometry](crate::Geometry) can only be built from documents holding exactly one.
//! * Only triangle lists are accepted.
//! * The `min`/`max` of each primitive's POSITION accessor, when present, are used as its bounds.
//!
//! # See Also
//!
//! * [glTF 2.0 Spec](https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html)

use std::path::Path;

use gltf::{buffer, mesh::Mode, Document};
use nalgebra::Point3;

use crate::{
    bounds::Aabb,
    source::{MeshSource, SourceMesh, SourcePrimitive},
    Error, Semantic,
};

/// Load a `.gltf` or `.glb` file, along with any buffers it references.
pub fn import(path: impl AsRef<Path>) -> Result<MeshSource, Error> {
    let (document, buffers, _images) = gltf::import(path)?;
    from_document(&document, &buffers)
}

/// Read a `.gltf` or `.glb` document from memory. External buffers can't be resolved; embedded
/// (`data:` URI or binary chunk) buffers can.
pub fn from_slice(bytes: &[u8]) -> Result<MeshSource, Error> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    from_document(&document, &buffers)
}

/// Describe every mesh of an already loaded document.
#[tracing::instrument(level = "debug", skip_all, fields(meshes = document.meshes().len()))]
pub fn from_document(document: &Document, buffers: &[buffer::Data]) -> Result<MeshSource, Error> {
    let meshes = document
        .meshes()
        .map(|mesh| -> Result<SourceMesh, Error> {
            let primitives = mesh
                .primitives()
                .map(|p| read_primitive(&p, buffers))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SourceMesh {
                name: mesh.name().map(str::to_owned),
                primitives,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MeshSource { meshes })
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[buffer::Data],
) -> Result<SourcePrimitive, Error> {
    if primitive.mode() != Mode::Triangles {
        return Err(Error::UnsupportedTopology {
            primitive: primitive.index(),
            topology: format!("{:?}", primitive.mode()),
        });
    }

    let reader = primitive.reader(|b| buffers.get(b.index()).map(|data| data.0.as_slice()));
    let mut out = SourcePrimitive::new();

    if let Some(iter) = reader.read_positions() {
        out = out.with_attribute(key(Semantic::Position), iter.flatten().collect::<Vec<f32>>());
    }
    if let Some(iter) = reader.read_normals() {
        out = out.with_attribute(key(Semantic::Normal), iter.flatten().collect::<Vec<f32>>());
    }
    if let Some(iter) = reader.read_tangents() {
        out = out.with_attribute(key(Semantic::Tangent), iter.flatten().collect::<Vec<f32>>());
    }
    for (set, semantic) in [Semantic::TexCoord0, Semantic::TexCoord1, Semantic::TexCoord2]
        .into_iter()
        .enumerate()
    {
        if let Some(iter) = reader.read_tex_coords(set as u32) {
            out = out.with_attribute(
                key(semantic),
                iter.into_f32().flatten().collect::<Vec<f32>>(),
            );
        }
    }
    if let Some(iter) = reader.read_colors(0) {
        out = out.with_attribute(
            key(Semantic::Color0),
            iter.into_rgba_f32().flatten().collect::<Vec<f32>>(),
        );
    }
    if let Some(iter) = reader.read_joints(0) {
        out = out.with_attribute(
            key(Semantic::Joints0),
            iter.into_u16().flatten().collect::<Vec<u16>>(),
        );
    }
    if let Some(iter) = reader.read_weights(0) {
        out = out.with_attribute(
            key(Semantic::Weights0),
            iter.into_f32().flatten().collect::<Vec<f32>>(),
        );
    }
    for (semantic, _) in primitive.attributes() {
        if attribute_key(&semantic).is_none() {
            tracing::debug!(
                primitive = primitive.index(),
                attribute = ?semantic,
                "skipping unrecognized attribute"
            );
        }
    }

    if let Some(indices) = reader.read_indices() {
        out = out.with_indices(indices.into_u32().collect());
    }
    if let Some(bounds) = accessor_bounds(primitive) {
        out = out.with_bounds(bounds);
    }
    Ok(out)
}

#[inline]
fn key(semantic: Semantic) -> &'static str {
    semantic.source_key()
}

/// The [Semantic] read for a glTF attribute, if any.
pub fn attribute_key(semantic: &gltf::Semantic) -> Option<Semantic> {
    use gltf::Semantic as G;
    Some(match semantic {
        G::Positions => Semantic::Position,
        G::Normals => Semantic::Normal,
        G::Tangents => Semantic::Tangent,
        G::TexCoords(0) => Semantic::TexCoord0,
        G::TexCoords(1) => Semantic::TexCoord1,
        G::TexCoords(2) => Semantic::TexCoord2,
        G::Colors(0) => Semantic::Color0,
        G::Joints(0) => Semantic::Joints0,
        G::Weights(0) => Semantic::Weights0,
        _ => return None,
    })
}

/// Bounds declared by the POSITION accessor.
fn accessor_bounds(primitive: &gltf::Primitive<'_>) -> Option<Aabb<f32>> {
    let accessor = primitive.get(&gltf::Semantic::Positions)?;
    let point = |value: gltf::json::Value| -> Option<Point3<f32>> {
        let v = value.as_array()?;
        let c = |i: usize| v.get(i).and_then(|c| c.as_f64()).map(|c| c as f32);
        Some(Point3::new(c(0)?, c(1)?, c(2)?))
    };
    Some(Aabb::new(point(accessor.min()?)?, point(accessor.max()?)?))
}
