use std::{borrow::Cow, sync::Arc};

use interleave::AttributeArray;
use parking_lot::RwLock;

use crate::{
    bounds::Aabb,
    source::SourcePrimitive,
    synthesis::{self, HandednessPolicy},
    Error, Semantic,
};

/// State of one semantic within a primitive.
#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Absent,
    /// Supplied by the mesh source
    Source(Arc<AttributeArray>),
    /// Generated on request
    Computed(Arc<AttributeArray>),
}

impl Slot {
    #[inline]
    fn get(&self) -> Option<&Arc<AttributeArray>> {
        match self {
            Slot::Absent => None,
            Slot::Source(data) | Slot::Computed(data) => Some(data),
        }
    }
}

/// Number of times each attribute was generated for a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    pub normals: usize,
    pub tangents: usize,
}

/// Memoization table of a primitive's attributes, indexed by [Semantic::index].
#[derive(Debug)]
struct AttributeTable {
    slots: [Slot; Semantic::COUNT],
    stats: SynthesisStats,
}

impl AttributeTable {
    #[inline]
    fn get(&self, semantic: Semantic) -> Option<Arc<AttributeArray>> {
        self.slots[semantic.index()].get().cloned()
    }
}

/// One indexed triangle list and its vertex attributes.
#[derive(Debug)]
pub struct Primitive {
    /// Position of this primitive within its geometry
    index: usize,
    vertex_count: usize,
    indices: Option<Vec<u32>>,
    joint_remap: Option<Vec<u32>>,
    bounds: Option<Aabb<f32>>,
    table: RwLock<AttributeTable>,
}

impl Primitive {
    /// Validate and store a primitive read from a mesh source.
    pub(crate) fn from_source(index: usize, source: SourcePrimitive) -> Result<Self, Error> {
        let mut slots: [Slot; Semantic::COUNT] = Default::default();
        for (key, values) in source.attributes {
            let Some(semantic) = Semantic::from_source_key(&key) else {
                tracing::debug!(
                    primitive = index,
                    key = key.as_str(),
                    "dropping unrecognized attribute"
                );
                continue;
            };
            let slot = &mut slots[semantic.index()];
            if slot.get().is_some() {
                tracing::debug!(
                    primitive = index,
                    key = key.as_str(),
                    "ignoring duplicate attribute"
                );
                continue;
            }
            *slot = Slot::Source(Arc::new(values));
        }

        let positions = slots[Semantic::Position.index()]
            .get()
            .ok_or(Error::MissingPosition(index))?;
        let vertex_count = positions.len() / Semantic::Position.component_count();

        for semantic in Semantic::ALL {
            if let Some(values) = slots[semantic.index()].get() {
                let expected = vertex_count * semantic.component_count();
                if values.len() != expected {
                    return Err(Error::AttributeLength {
                        primitive: index,
                        semantic,
                        len: values.len(),
                        expected,
                    });
                }
            }
        }

        match &source.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(Error::IncompleteTriangle {
                        primitive: index,
                        count: indices.len(),
                    });
                }
                if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                    return Err(Error::IndexOutOfRange {
                        primitive: index,
                        index: bad,
                        vertex_count,
                    });
                }
            }
            None if vertex_count % 3 != 0 => {
                return Err(Error::IncompleteTriangle {
                    primitive: index,
                    count: vertex_count,
                })
            }
            None => {}
        }

        Ok(Self {
            index,
            vertex_count,
            indices: source.indices,
            joint_remap: source.joint_remap,
            bounds: source.bounds,
            table: RwLock::new(AttributeTable {
                slots,
                stats: SynthesisStats::default(),
            }),
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The source triangle list, if the primitive is indexed.
    #[inline]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// The triangle list; `[0, 1, 2, ...]` if the primitive is not indexed.
    pub fn triangle_indices(&self) -> Cow<'_, [u32]> {
        match &self.indices {
            Some(indices) => Cow::Borrowed(indices),
            None => Cow::Owned((0..self.vertex_count as u32).collect()),
        }
    }

    #[inline]
    pub fn joint_remap(&self) -> Option<&[u32]> {
        self.joint_remap.as_deref()
    }

    /// Bounds supplied by the mesh source, if any.
    #[inline]
    pub fn bounds(&self) -> Option<&Aabb<f32>> {
        self.bounds.as_ref()
    }

    /// Whether `semantic` is currently available without synthesis.
    pub fn contains(&self, semantic: Semantic) -> bool {
        self.table.read().slots[semantic.index()].get().is_some()
    }

    /// Whether `semantic` was generated rather than supplied by the source.
    pub fn is_synthesized(&self, semantic: Semantic) -> bool {
        matches!(self.table.read().slots[semantic.index()], Slot::Computed(_))
    }

    /// The attribute for `semantic` if it is currently available, without synthesizing it.
    pub fn get(&self, semantic: Semantic) -> Option<Arc<AttributeArray>> {
        self.table.read().get(semantic)
    }

    pub fn synthesis_stats(&self) -> SynthesisStats {
        self.table.read().stats
    }

    /// Get the attribute for `semantic`, generating it first if it is absent and synthesizable.
    pub(crate) fn resolve(
        &self,
        semantic: Semantic,
        policy: HandednessPolicy,
    ) -> Result<Arc<AttributeArray>, Error> {
        if let Some(found) = self.table.read().get(semantic) {
            return Ok(found);
        }
        // check, compute, and store under one write lock so that concurrent requests can't
        // synthesize the same attribute twice
        let mut table = self.table.write();
        self.resolve_locked(&mut table, semantic, policy)
    }

    fn resolve_locked(
        &self,
        table: &mut AttributeTable,
        semantic: Semantic,
        policy: HandednessPolicy,
    ) -> Result<Arc<AttributeArray>, Error> {
        if let Some(found) = table.get(semantic) {
            return Ok(found);
        }
        let positions = table
            .get(Semantic::Position)
            .ok_or(Error::MissingPosition(self.index))?;
        let indices = self.triangle_indices();
        let computed = match semantic {
            Semantic::Normal => {
                tracing::debug!(
                    primitive = self.index,
                    vertices = self.vertex_count,
                    "generating normals"
                );
                table.stats.normals += 1;
                synthesis::generate_normals(&positions.to_f32(), &indices)
            }
            Semantic::Tangent => {
                let texcoords =
                    table
                        .get(Semantic::TexCoord0)
                        .ok_or(Error::MissingPrerequisite {
                            primitive: self.index,
                            target: Semantic::Tangent,
                            missing: Semantic::TexCoord0,
                        })?;
                let normals = self.resolve_locked(table, Semantic::Normal, policy)?;
                tracing::debug!(
                    primitive = self.index,
                    vertices = self.vertex_count,
                    ?policy,
                    "generating tangents"
                );
                table.stats.tangents += 1;
                synthesis::generate_tangents(
                    &positions.to_f32(),
                    &texcoords.to_f32(),
                    &normals.to_f32(),
                    &indices,
                    policy,
                )
            }
            semantic => {
                return Err(Error::UnsupportedAttribute {
                    primitive: self.index,
                    semantic,
                })
            }
        };
        let computed = Arc::new(AttributeArray::F32(computed));
        table.slots[semantic.index()] = Slot::Computed(computed.clone());
        Ok(computed)
    }
}
