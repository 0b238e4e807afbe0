use approx::assert_abs_diff_eq;
use pawn_core::Validate;
use pawn_geometry::{CubicBezier, DerivativeScaling, JointPolicy, NormalizationPolicy, ProfileConfig};
use pawn_math::{dvec2, dvec3, Vector3};
use pawn_mesh::{build_pawn_mesh, CapConfig, Mesh, PawnMeshConfig, RevolveConfig, TexRegion};

fn degenerate_line_config(resolution: usize, divisions: usize) -> PawnMeshConfig {
    PawnMeshConfig {
        profile: ProfileConfig {
            segments: vec![CubicBezier::new(
                dvec2(1.0, 0.0),
                dvec2(1.0, 0.0),
                dvec2(1.0, 1.0),
                dvec2(1.0, 1.0),
            )],
            resolution,
            joints: JointPolicy::Duplicate,
            normalization: NormalizationPolicy::Linear,
            derivatives: DerivativeScaling::Rescale,
            outline: None,
        },
        revolve: RevolveConfig { divisions },
        cap: None,
    }
}

fn body_triangles(mesh: &Mesh) -> impl Iterator<Item = [u32; 3]> + '_ {
    mesh.triangles().filter(move |tri| {
        tri.iter()
            .all(|&i| mesh.vertices[i as usize].region == TexRegion::Body)
    })
}

#[test]
fn test_degenerate_line_revolves_to_cylinder() {
    let mesh = build_pawn_mesh(&degenerate_line_config(6, 4)).unwrap();
    mesh.validate().unwrap();
    assert_eq!(mesh.vertex_count(), 7 * 5);

    let expected = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
    for row in mesh.vertices.chunks(5) {
        for (vertex, &(x, z)) in row.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(vertex.position.x, x, epsilon = 1e-12);
            assert_abs_diff_eq!(vertex.position.z, z, epsilon = 1e-12);
        }
        for vertex in row {
            let r = dvec2(vertex.position.x, vertex.position.z).length();
            assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(vertex.normal.y, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(vertex.normal.length(), 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_every_index_in_range() {
    let mesh = build_pawn_mesh(&PawnMeshConfig::default()).unwrap();
    let n = mesh.vertex_count() as u32;
    assert_eq!(mesh.indices.len() % 3, 0);
    for &idx in &mesh.indices {
        assert!(idx < n, "index {} out of bounds (n={})", idx, n);
    }
}

#[test]
fn test_default_pawn_normals_face_outward() {
    let mesh = build_pawn_mesh(&PawnMeshConfig::default()).unwrap();
    for v in mesh.vertices.iter().filter(|v| v.region == TexRegion::Body) {
        assert_abs_diff_eq!(v.normal.length(), 1.0, epsilon = 1e-5);
        let radial = dvec3(v.position.x, 0.0, v.position.z);
        if radial.length() > 1e-3 {
            assert!(
                v.normal.dot(radial) > 0.0,
                "inward normal {:?} at {:?}",
                v.normal,
                v.position
            );
        }
    }

    // The head apex sits on the axis at height 0 and faces down.
    let apex = mesh
        .vertices
        .iter()
        .filter(|v| v.region == TexRegion::Body)
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
        .unwrap();
    assert_abs_diff_eq!(apex.position.y, 0.0, epsilon = 1e-12);
    assert!((apex.normal - Vector3::NEG_Y).length() < 1e-9);
}

#[test]
fn test_body_and_cap_share_winding_convention() {
    let mesh = build_pawn_mesh(&PawnMeshConfig::default()).unwrap();

    let mut checked = 0;
    for tri in mesh.triangles() {
        let face = mesh.face_normal(tri);
        if face.length() < 1e-12 {
            // zero-area rows at duplicated segment joints
            continue;
        }
        let corner_normals: Vector3 = tri
            .iter()
            .map(|&i| mesh.vertices[i as usize].normal)
            .sum();
        assert!(face.dot(corner_normals) < 0.0, "triangle {:?}", tri);
        checked += 1;
    }
    assert!(checked > body_triangles(&mesh).count() / 2);
}

#[test]
fn test_cap_sits_inside_base_rim() {
    let config = PawnMeshConfig::default();
    let mesh = build_pawn_mesh(&config).unwrap();
    let cap = config.cap.unwrap_or_default();
    let bounds = mesh.bounding_box();
    assert_abs_diff_eq!(bounds.max.y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(bounds.min.y, 0.0, epsilon = 1e-12);

    let cap_vertices: Vec<_> = mesh
        .vertices
        .iter()
        .filter(|v| v.region == TexRegion::Cap)
        .collect();
    assert_eq!(cap_vertices.len(), 4);
    for v in cap_vertices {
        assert_eq!(v.position.y, cap.height);
        assert_eq!(v.normal, Vector3::Y);
    }
}

#[test]
fn test_cap_indices_offset_by_body_size() {
    let mut config = degenerate_line_config(2, 3);
    config.cap = Some(CapConfig::default());
    let mesh = build_pawn_mesh(&config).unwrap();
    let body_vertices = 3 * 4;
    let cap_indices = &mesh.indices[mesh.indices.len() - 6..];
    let base = body_vertices as u32;
    assert_eq!(cap_indices, &[base, base + 1, base + 2, base + 2, base + 3, base]);
}
