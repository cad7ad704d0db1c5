//! In-memory mesh geometry with lazily generated attributes.
//!
//! A [Geometry] is built once from a [MeshSource] and never changes shape afterwards. Attributes
//! the source didn't provide are generated the first time they are requested through
//! [Geometry::attribute] and reused from then on.

mod primitive;
pub use primitive::*;

use std::sync::Arc;

use interleave::AttributeArray;
use nalgebra::Point3;

use crate::{bounds::Aabb, source::MeshSource, synthesis::HandednessPolicy, Error, Semantic};

/// Settings which affect how missing attributes are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryOptions {
    /// Choice of `w` for generated tangents
    pub handedness: HandednessPolicy,
}

impl GeometryOptions {
    #[inline]
    pub fn with_handedness(mut self, handedness: HandednessPolicy) -> Self {
        self.handedness = handedness;
        self
    }
}

/// A single mesh: an ordered list of [Primitive]s.
#[derive(Debug)]
pub struct Geometry {
    name: Option<String>,
    primitives: Vec<Primitive>,
    options: GeometryOptions,
}

impl Geometry {
    /// Build a geometry from a source describing exactly one mesh.
    ///
    /// # Errors
    ///
    /// * [Error::UnsupportedSource] if the source holds more than one mesh
    /// * [Error::EmptySource] if it holds none
    /// * any structural error found while validating a primitive
    #[tracing::instrument(level = "debug", skip_all, fields(meshes = source.meshes.len()))]
    pub fn from_source(source: MeshSource, options: GeometryOptions) -> Result<Self, Error> {
        let mut meshes = source.meshes;
        let mesh = match meshes.len() {
            0 => return Err(Error::EmptySource),
            1 => meshes.remove(0),
            n => return Err(Error::UnsupportedSource(n)),
        };
        let primitives = mesh
            .primitives
            .into_iter()
            .enumerate()
            .map(|(i, p)| Primitive::from_source(i, p))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            name = mesh.name.as_deref(),
            primitives = primitives.len(),
            "built geometry"
        );
        Ok(Self {
            name: mesh.name,
            primitives,
            options,
        })
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn options(&self) -> &GeometryOptions {
        &self.options
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive(&self, index: usize) -> Result<&Primitive, Error> {
        self.primitives.get(index).ok_or(Error::PrimitiveOutOfRange {
            index,
            len: self.primitives.len(),
        })
    }

    /// Number of primitives.
    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Get an attribute of a primitive, generating it if the source didn't provide it.
    ///
    /// Normals are generated from positions; tangents from positions, `TEXCOORD_0`, and normals
    /// (which are resolved first, and so are themselves generated if needed). Each attribute is
    /// generated at most once per primitive, even under concurrent access.
    ///
    /// # Errors
    ///
    /// * [Error::PrimitiveOutOfRange] if `primitive` doesn't exist
    /// * [Error::MissingPrerequisite] if tangents are requested without `TEXCOORD_0`
    /// * [Error::UnsupportedAttribute] if the attribute is absent and can't be generated
    pub fn attribute(
        &self,
        primitive: usize,
        semantic: Semantic,
    ) -> Result<Arc<AttributeArray>, Error> {
        self.primitive(primitive)?
            .resolve(semantic, self.options.handedness)
    }

    /// The bounds of every primitive.
    ///
    /// Bounds supplied by the source are trusted as-is; other primitives are measured from
    /// their positions.
    pub fn bounding_box(&self) -> Aabb<f32> {
        let mut bounds = Aabb::empty();
        for primitive in &self.primitives {
            if let Some(precomputed) = primitive.bounds() {
                bounds.merge(precomputed);
            } else if let Some(positions) = primitive.get(Semantic::Position) {
                for p in positions.to_f32().chunks_exact(3) {
                    bounds.extend(&Point3::new(p[0], p[1], p[2]));
                }
            }
        }
        bounds
    }
}
