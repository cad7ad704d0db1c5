use nalgebra::Vector3;

use super::{point3, triangles};

/// Generate area-weighted vertex normals for a triangle list.
///
/// Each triangle's unnormalized face normal `(v1 - v0) × (v2 - v0)`, whose length is twice the
/// triangle's area, is added to each of its vertices; the sums are normalized at the end.
/// Triangles wound counter-clockwise produce normals facing the viewer in a right-handed basis.
///
/// A vertex which no triangle references, or whose face normals cancel exactly, has no defined
/// direction; its normal is not finite.
///
/// # Panics
///
/// * if any index is `>= positions.len() / 3`
pub fn generate_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut sums = vec![Vector3::<f32>::zeros(); positions.len() / 3];
    for [i0, i1, i2] in triangles(indices) {
        let v0 = point3(positions, i0);
        let face = (point3(positions, i1) - v0).cross(&(point3(positions, i2) - v0));
        sums[i0] += face;
        sums[i1] += face;
        sums[i2] += face;
    }
    sums.into_iter()
        .flat_map(|sum| {
            let n = sum.normalize();
            [n.x, n.y, n.z]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    #[test]
    fn unreferenced_vertex_is_not_finite() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
        let normals = generate_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals.len(), 12);
        assert_eq!(&normals[0..3], &[0.0, 0.0, 1.0]);
        assert!(normals[9..12].iter().all(|c| !c.is_finite()));
    }

    #[test]
    fn winding_determines_direction() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = generate_normals(&positions, &[0, 2, 1]);
        assert_eq!(&normals[0..3], &[0.0, 0.0, -1.0]);
    }

    #[quickcheck]
    fn single_triangle_normals_are_unit_and_shared(corners: Vec<(i8, i8, i8)>) -> TestResult {
        if corners.len() < 3 {
            return TestResult::discard();
        }
        let positions: Vec<f32> = corners[..3]
            .iter()
            .flat_map(|&(x, y, z)| [f32::from(x), f32::from(y), f32::from(z)])
            .collect();
        let v0 = point3(&positions, 0);
        let face = (point3(&positions, 1) - v0).cross(&(point3(&positions, 2) - v0));
        if face.norm() < 1e-3 {
            return TestResult::discard();
        }
        let normals = generate_normals(&positions, &[0, 1, 2]);
        let expected = face.normalize();
        TestResult::from_bool(normals.chunks_exact(3).all(|n| {
            let n = Vector3::new(n[0], n[1], n[2]);
            (n.norm() - 1.0).abs() < 1e-5 && (n - expected).norm() < 1e-5
        }))
    }
}
