use nalgebra::Vector3;

use super::{point2, point3, triangles, vector3};

/// The handedness of a tangent basis
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Negative = -1,
    Positive = 1,
}

impl Handedness {
    /// Convert self to the `w` component of a glTF-style tangent
    #[inline]
    pub fn to_w(self) -> f32 {
        f32::from(self as i8)
    }
}

/// How the `w` component of generated tangents is chosen.
///
/// The handedness of each vertex's basis is always measured, but historically generated
/// tangents carry `w = +1` regardless of the measurement. That remains the default so that
/// output stays identical to earlier exports; [FromBasis](HandednessPolicy::FromBasis) emits the
/// measured sign instead, which is what mirrored UV layouts need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HandednessPolicy {
    #[default]
    AlwaysPositive,
    FromBasis,
}

/// Per-vertex sums of the UV-space tangent (`tan1`) and bitangent (`tan2`) directions of each
/// adjacent triangle.
#[derive(Debug, Clone)]
pub struct TangentAccumulator {
    tan1: Vec<Vector3<f32>>,
    tan2: Vec<Vector3<f32>>,
    skipped: usize,
}

impl TangentAccumulator {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            tan1: vec![Vector3::zeros(); vertex_count],
            tan2: vec![Vector3::zeros(); vertex_count],
            skipped: 0,
        }
    }

    #[inline]
    pub fn tan1(&self) -> &[Vector3<f32>] {
        &self.tan1
    }

    #[inline]
    pub fn tan2(&self) -> &[Vector3<f32>] {
        &self.tan2
    }

    /// Number of triangles which contributed nothing because their UV mapping is degenerate.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Add the contribution of each triangle in `indices`.
    ///
    /// A triangle whose UV edges are parallel (or collapsed) has no defined UV-space direction;
    /// it is skipped entirely.
    ///
    /// # Panics
    ///
    /// * if any index is outside of `positions`, `texcoords`, or the accumulator
    pub fn accumulate(&mut self, positions: &[f32], texcoords: &[f32], indices: &[u32]) {
        for [i0, i1, i2] in triangles(indices) {
            let v0 = point3(positions, i0);
            let dir1 = point3(positions, i1) - v0;
            let dir2 = point3(positions, i2) - v0;

            let t0 = point2(texcoords, i0);
            let uv1 = point2(texcoords, i1) - t0;
            let uv2 = point2(texcoords, i2) - t0;

            let r = (uv1.x * uv2.y - uv2.x * uv1.y).recip();
            if !r.is_finite() {
                self.skipped += 1;
                continue;
            }
            let sdir = (dir1 * uv2.y - dir2 * uv1.y) * r;
            let tdir = (dir2 * uv1.x - dir1 * uv2.x) * r;

            for i in [i0, i1, i2] {
                self.tan1[i] += sdir;
                self.tan2[i] += tdir;
            }
        }
    }

    /// Orthogonalize each accumulated tangent against its vertex normal (Gram-Schmidt) and
    /// produce `[x, y, z, w]` per vertex.
    ///
    /// # Panics
    ///
    /// * if `normals` holds fewer vertices than the accumulator
    pub fn finish(self, normals: &[f32], policy: HandednessPolicy) -> Vec<f32> {
        self.tan1
            .iter()
            .zip(&self.tan2)
            .enumerate()
            .flat_map(|(v, (t1, t2))| {
                let n = vector3(normals, v);
                let t = (t1 - n * n.dot(t1)).normalize();
                let measured = if n.cross(t1).dot(t2) < 0.0 {
                    Handedness::Negative
                } else {
                    Handedness::Positive
                };
                let w = match policy {
                    HandednessPolicy::AlwaysPositive => Handedness::Positive,
                    HandednessPolicy::FromBasis => measured,
                };
                [t.x, t.y, t.z, w.to_w()]
            })
            .collect()
    }
}

/// Generate vertex tangents from positions, texture coordinates, and (already resolved)
/// normals.
///
/// `texcoords` holds 2 components per vertex, `normals` 3; the result holds 4.
pub fn generate_tangents(
    positions: &[f32],
    texcoords: &[f32],
    normals: &[f32],
    indices: &[u32],
    policy: HandednessPolicy,
) -> Vec<f32> {
    let mut acc = TangentAccumulator::new(positions.len() / 3);
    acc.accumulate(positions, texcoords, indices);
    if acc.skipped() > 0 {
        tracing::debug!(
            skipped = acc.skipped(),
            "skipped triangles with degenerate texture coordinates"
        );
    }
    acc.finish(normals, policy)
}
