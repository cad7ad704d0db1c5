use std::sync::Arc;

use facets::{
    Aabb, AttributeArray, Error, Geometry, GeometryOptions, HandednessPolicy, MeshSource,
    Semantic, SourceMesh, SourcePrimitive, SynthesisStats,
};
use nalgebra::{Point3, Vector3};

const QUAD: [f32; 12] = [
    0.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 1.0, 0.0, //
    0.0, 1.0, 0.0,
];
const QUAD_UVS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

fn geometry(primitives: Vec<SourcePrimitive>) -> Geometry {
    geometry_with(primitives, GeometryOptions::default())
}

fn geometry_with(primitives: Vec<SourcePrimitive>, options: GeometryOptions) -> Geometry {
    Geometry::from_source(MeshSource::single(SourceMesh::new(primitives)), options).unwrap()
}

fn textured_quad() -> SourcePrimitive {
    SourcePrimitive::new()
        .with_attribute("POSITION", QUAD.to_vec())
        .with_attribute("TEXCOORD_0", QUAD_UVS.to_vec())
        .with_indices(QUAD_INDICES.to_vec())
}

fn vec3(values: &[f32], vertex: usize) -> Vector3<f32> {
    Vector3::new(values[vertex * 3], values[vertex * 3 + 1], values[vertex * 3 + 2])
}

fn f32s(array: &AttributeArray) -> &[f32] {
    array.as_f32().expect("generated attributes are f32")
}

#[test]
fn resolved_lengths_match_component_counts() {
    let geometry = geometry(vec![
        textured_quad().with_attribute("COLOR_0", vec![255u8; 16]),
        SourcePrimitive::new().with_attribute(
            "POSITION",
            vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        ),
    ]);
    for (p, primitive) in geometry.primitives().iter().enumerate() {
        for semantic in Semantic::ALL {
            if let Ok(values) = geometry.attribute(p, semantic) {
                assert_eq!(
                    values.len(),
                    primitive.vertex_count() * semantic.component_count(),
                    "primitive {p}, {semantic}"
                );
            }
        }
    }
}

#[test]
fn single_triangle_normals_face_up() {
    let geometry = geometry(vec![SourcePrimitive::new()
        .with_attribute(
            "POSITION",
            vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        )
        .with_indices(vec![0, 1, 2])]);
    let normals = geometry.attribute(0, Semantic::Normal).unwrap();
    assert_eq!(f32s(&normals), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    assert!(geometry.primitives()[0].is_synthesized(Semantic::Normal));
}

#[test]
fn shared_edge_normals_sum_both_faces() {
    // two unit right triangles folded along the edge v0-v1: one in XY, one in XZ
    let positions = vec![
        0.0f32, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ];
    let geometry = geometry(vec![SourcePrimitive::new()
        .with_attribute("POSITION", positions)
        .with_indices(vec![0, 1, 2, 0, 3, 1])]);
    let normals = geometry.attribute(0, Semantic::Normal).unwrap();
    let normals = f32s(&normals);

    let shared = Vector3::new(0.0, 1.0, 1.0).normalize();
    for v in [0, 1] {
        assert!((vec3(normals, v) - shared).norm() < 1e-6, "vertex {v}");
    }
    assert_eq!(vec3(normals, 2), Vector3::z());
    assert_eq!(vec3(normals, 3), Vector3::y());
}

#[test]
fn planar_quad_tangents_follow_u() {
    let geometry = geometry(vec![textured_quad()]);
    let tangents = geometry.attribute(0, Semantic::Tangent).unwrap();
    for t in f32s(&tangents).chunks_exact(4) {
        let xyz = Vector3::new(t[0], t[1], t[2]);
        assert!(xyz.cross(&Vector3::x()).norm() < 1e-6);
        assert!(xyz.x > 0.0);
        assert_eq!(t[3], 1.0);
    }
}

#[test]
fn handedness_policy_applies_to_generated_tangents() {
    let mirrored = || {
        SourcePrimitive::new()
            .with_attribute("POSITION", QUAD.to_vec())
            .with_attribute(
                "TEXCOORD_0",
                vec![1.0f32, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            )
            .with_indices(QUAD_INDICES.to_vec())
    };
    let default = geometry(vec![mirrored()]);
    let measured = geometry_with(
        vec![mirrored()],
        GeometryOptions::default().with_handedness(HandednessPolicy::FromBasis),
    );
    let default = default.attribute(0, Semantic::Tangent).unwrap();
    let measured = measured.attribute(0, Semantic::Tangent).unwrap();
    assert!(f32s(&default).chunks_exact(4).all(|t| t[3] == 1.0));
    assert!(f32s(&measured).chunks_exact(4).all(|t| t[3] == -1.0));
}

#[test]
fn bounding_box_merges_precomputed_and_measured() {
    let a = SourcePrimitive::new()
        .with_attribute(
            "POSITION",
            vec![0.0f32, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.5, 0.0],
        )
        .with_bounds(Aabb::new(
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, 1.0),
        ));
    let b = SourcePrimitive::new().with_attribute(
        "POSITION",
        vec![0.0f32, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    );
    let bounds = geometry(vec![a, b]).bounding_box();
    assert_eq!(bounds.mins, Point3::new(-1.0, -1.0, -1.0));
    assert_eq!(bounds.maxs, Point3::new(2.0, 2.0, 2.0));
}

#[test]
fn tangents_are_synthesized_once() {
    let geometry = geometry(vec![textured_quad()]);
    let primitive = &geometry.primitives()[0];
    assert_eq!(primitive.synthesis_stats(), SynthesisStats::default());

    let first = geometry.attribute(0, Semantic::Tangent).unwrap();
    let second = geometry.attribute(0, Semantic::Tangent).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        primitive.synthesis_stats(),
        SynthesisStats {
            normals: 1,
            tangents: 1
        }
    );

    // normals generated on the way to tangents are reused
    let normals = geometry.attribute(0, Semantic::Normal).unwrap();
    assert!(Arc::ptr_eq(
        &normals,
        &primitive.get(Semantic::Normal).unwrap()
    ));
    assert_eq!(primitive.synthesis_stats().normals, 1);
}

#[test]
fn concurrent_requests_synthesize_once() {
    let geometry = geometry(vec![textured_quad()]);
    let results: Vec<Arc<AttributeArray>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| geometry.attribute(0, Semantic::Tangent).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for r in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], r));
    }
    assert_eq!(
        geometry.primitives()[0].synthesis_stats(),
        SynthesisStats {
            normals: 1,
            tangents: 1
        }
    );
}

#[test]
fn source_attributes_are_not_regenerated() {
    let geometry = geometry(vec![textured_quad().with_attribute(
        "NORMAL",
        vec![0.0f32, 0.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0],
    )]);
    let normals = geometry.attribute(0, Semantic::Normal).unwrap();
    assert_eq!(vec3(f32s(&normals), 0), -Vector3::z());
    geometry.attribute(0, Semantic::Tangent).unwrap();
    let primitive = &geometry.primitives()[0];
    assert!(!primitive.is_synthesized(Semantic::Normal));
    assert!(primitive.is_synthesized(Semantic::Tangent));
    assert_eq!(primitive.synthesis_stats().normals, 0);
}

#[test]
fn absent_attributes_which_cannot_be_generated() {
    let geometry = geometry(vec![textured_quad()]);
    assert!(matches!(
        geometry.attribute(0, Semantic::Color0),
        Err(Error::UnsupportedAttribute {
            primitive: 0,
            semantic: Semantic::Color0
        })
    ));
    assert!(matches!(
        geometry.attribute(0, Semantic::Joints0),
        Err(Error::UnsupportedAttribute { .. })
    ));
}

#[test]
fn tangents_require_texcoords() {
    let geometry = geometry(vec![SourcePrimitive::new()
        .with_attribute("POSITION", QUAD.to_vec())
        .with_indices(QUAD_INDICES.to_vec())]);
    assert!(matches!(
        geometry.attribute(0, Semantic::Tangent),
        Err(Error::MissingPrerequisite {
            primitive: 0,
            target: Semantic::Tangent,
            missing: Semantic::TexCoord0
        })
    ));
    let primitive = &geometry.primitives()[0];
    assert!(!primitive.contains(Semantic::Tangent));
    assert_eq!(primitive.synthesis_stats().tangents, 0);
}

#[test]
fn multi_mesh_sources_are_rejected() {
    let source = MeshSource {
        meshes: vec![
            SourceMesh::new(vec![textured_quad()]),
            SourceMesh::new(vec![textured_quad()]),
            SourceMesh::new(vec![textured_quad()]),
        ],
    };
    assert!(matches!(
        Geometry::from_source(source, Default::default()),
        Err(Error::UnsupportedSource(3))
    ));
}

#[test]
fn unrecognized_keys_are_dropped() {
    let geometry = geometry(vec![textured_quad()
        .with_attribute("_BATCHID", vec![0.0f32; 4])
        .with_attribute("TEXCOORD_7", vec![0.0f32; 8])]);
    let primitive = &geometry.primitives()[0];
    for semantic in Semantic::ALL {
        let expected = matches!(semantic, Semantic::Position | Semantic::TexCoord0);
        assert_eq!(primitive.contains(semantic), expected, "{semantic}");
    }
}

#[test]
fn first_duplicate_key_wins() {
    let geometry = geometry(vec![textured_quad().with_attribute("TEXCOORD_0", vec![9.0f32; 8])]);
    let uvs = geometry.attribute(0, Semantic::TexCoord0).unwrap();
    assert_eq!(f32s(&uvs), &QUAD_UVS);
}

#[test]
fn unindexed_primitives_read_vertices_in_order() {
    let geometry = geometry(vec![SourcePrimitive::new().with_attribute(
        "POSITION",
        vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    )]);
    let primitive = &geometry.primitives()[0];
    assert!(primitive.indices().is_none());
    assert_eq!(&*primitive.triangle_indices(), &[0, 1, 2]);
    let normals = geometry.attribute(0, Semantic::Normal).unwrap();
    assert_eq!(vec3(f32s(&normals), 1), Vector3::z());
}

#[test]
fn structural_errors() {
    let build = |p: SourcePrimitive| {
        Geometry::from_source(MeshSource::single(SourceMesh::new(vec![p])), Default::default())
    };

    let missing = SourcePrimitive::new().with_attribute("TEXCOORD_0", QUAD_UVS.to_vec());
    assert!(matches!(build(missing), Err(Error::MissingPosition(0))));

    let short = textured_quad().with_attribute("NORMAL", vec![0.0f32; 6]);
    assert!(matches!(
        build(short),
        Err(Error::AttributeLength {
            semantic: Semantic::Normal,
            len: 6,
            expected: 12,
            ..
        })
    ));

    let out_of_range = textured_quad().with_indices(vec![0, 1, 4]);
    assert!(matches!(
        build(out_of_range),
        Err(Error::IndexOutOfRange {
            index: 4,
            vertex_count: 4,
            ..
        })
    ));

    let partial = textured_quad().with_indices(vec![0, 1, 2, 3]);
    assert!(matches!(
        build(partial),
        Err(Error::IncompleteTriangle { count: 4, .. })
    ));

    let unindexed = SourcePrimitive::new().with_attribute("POSITION", QUAD.to_vec());
    assert!(matches!(
        build(unindexed),
        Err(Error::IncompleteTriangle { count: 4, .. })
    ));
}
