//! Mesh geometry with lazily generated vertex attributes.
//!
//! A [Geometry] is built from a [MeshSource] (see [de] for loaders) and holds every primitive's
//! vertex attributes as dense [AttributeArray]s. Normals and tangents missing from the source are
//! generated on first request and memoized; see [Geometry::attribute].
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod bounds;
pub mod de;
pub mod error;
pub mod geometry;
mod semantic;
pub mod source;
pub mod synthesis;

pub use bounds::Aabb;
pub use error::Error;
pub use geometry::{Geometry, GeometryOptions, Primitive, SynthesisStats};
pub use interleave::AttributeArray;
pub use semantic::*;
pub use source::{MeshSource, SourceMesh, SourcePrimitive};
pub use synthesis::HandednessPolicy;
