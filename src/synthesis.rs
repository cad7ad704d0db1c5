//! Generation of per-vertex attributes which a source did not provide.
//!
//! All generators read flat, tightly-packed arrays (see
//! [AttributeArray](interleave::AttributeArray)) and a triangle list, and return a new flat array
//! with one element per vertex, in vertex order.

pub mod normal;
pub mod tangent;

pub use normal::generate_normals;
pub use tangent::{generate_tangents, Handedness, HandednessPolicy, TangentAccumulator};

use nalgebra::{Point2, Point3, Vector3};

#[inline]
fn point3(data: &[f32], vertex: usize) -> Point3<f32> {
    let i = vertex * 3;
    Point3::new(data[i], data[i + 1], data[i + 2])
}

#[inline]
fn vector3(data: &[f32], vertex: usize) -> Vector3<f32> {
    point3(data, vertex).coords
}

#[inline]
fn point2(data: &[f32], vertex: usize) -> Point2<f32> {
    let i = vertex * 2;
    Point2::new(data[i], data[i + 1])
}

/// Iterate over the vertex indices of each triangle in a triangle list. A trailing partial
/// triangle is ignored.
#[inline]
fn triangles(indices: &[u32]) -> impl Iterator<Item = [usize; 3]> + '_ {
    indices
        .chunks_exact(3)
        .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
}
