//! End-to-end bake scenarios on small hand-built meshes.

use mesh_color_id::{
    BakeParams, ColorIdError, ColorStrategy, bake_color_id, bake_mesh, bake_mesh_detailed,
    quantize_rgba,
};
use mesh_loops::{
    LoopError, LoopMesh, PolyMesh, Point3, Uv, cube_uvs_cross, cube_uvs_per_face, quad_cube,
    uv_grid, uv_grid_strips,
};

/// Per-loop byte colors of a bake.
fn corner_bytes(colors: &[f32]) -> Vec<[u8; 4]> {
    quantize_rgba(colors)
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect()
}

/// Two triangles sharing the edge (1, 2).
fn two_triangles() -> PolyMesh {
    let mut mesh = PolyMesh::new();
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
        mesh.add_vertex(Point3::new(x, y, 0.0));
    }
    mesh.add_face(&[0, 1, 2]);
    mesh.add_face(&[2, 1, 3]);
    mesh
}

// =============================================================================
// Cube scenarios
// =============================================================================

#[test]
fn continuous_cube_is_one_color() {
    let cube = quad_cube();
    let uvs = cube_uvs_cross();
    let bake = bake_mesh_detailed(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

    assert_eq!(bake.report.island_count, 1);
    let corners = corner_bytes(&bake.colors);
    assert_eq!(corners.len(), 24);
    assert!(corners.iter().all(|c| *c == corners[0]));
    assert_eq!(corners[0][3], 255);
}

#[test]
fn seamed_cube_has_six_distinct_colors() {
    let cube = quad_cube();
    let uvs = cube_uvs_per_face();
    let bake = bake_mesh_detailed(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

    assert_eq!(bake.report.island_count, 6);
    let corners = corner_bytes(&bake.colors);
    assert_eq!(corners.len(), 24);

    let mut face_colors = Vec::new();
    for face in corners.chunks_exact(4) {
        assert!(face.iter().all(|c| *c == face[0]));
        face_colors.push(face[0]);
    }
    face_colors.sort_unstable();
    face_colors.dedup();
    assert_eq!(face_colors.len(), 6);
}

#[test]
fn seamed_cube_with_welsh_powell_uses_three_colors() {
    // The face graph of a cube is an octahedron: 3-colorable
    let cube = quad_cube();
    let uvs = cube_uvs_per_face();
    let params = BakeParams::default().with_strategy(ColorStrategy::LowestFree);
    let bake = bake_mesh_detailed(&cube.view(&uvs).unwrap(), &params).unwrap();

    assert_eq!(bake.report.distinct_colors, 3);
    for &(a, b) in bake.adjacency.pairs() {
        assert_ne!(bake.island_colors.color(a), bake.island_colors.color(b));
    }
}

// =============================================================================
// Degenerate and seam scenarios
// =============================================================================

#[test]
fn collapsed_uv_face_is_its_own_island() {
    let mesh = two_triangles();
    let uvs = [
        Uv::new(0.5, 0.5),
        Uv::new(0.5, 0.5),
        Uv::new(0.5, 0.5), // face 0 collapsed to a point
        Uv::new(0.0, 1.0),
        Uv::new(1.0, 0.0),
        Uv::new(1.0, 1.0),
    ];
    let bake = bake_mesh_detailed(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

    assert_eq!(bake.islands.island_of_face(), &[0, 1]);
    let corners = corner_bytes(&bake.colors);
    assert_ne!(corners[0], corners[3]);
    assert!(corners.iter().all(|c| c[3] == 255));
}

#[test]
fn single_collapsed_quad_bakes() {
    let mut mesh = PolyMesh::new();
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        mesh.add_vertex(Point3::new(x, y, 0.0));
    }
    mesh.add_face(&[0, 1, 2, 3]);
    let uvs = [Uv::new(0.25, 0.25); 4];

    let colors = bake_mesh(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();
    assert_eq!(colors.len(), 16);
}

#[test]
fn seam_gives_two_colors_even_with_two_slots() {
    let mesh = two_triangles();
    let uvs = [
        Uv::new(0.0, 0.0),
        Uv::new(0.4, 0.0),
        Uv::new(0.0, 0.4),
        Uv::new(0.6, 1.0),
        Uv::new(1.0, 0.6),
        Uv::new(1.0, 1.0),
    ];
    for strategy in [ColorStrategy::Hashed, ColorStrategy::LowestFree] {
        let params = BakeParams::default().with_palette_size(2).with_strategy(strategy);
        let bake = bake_mesh_detailed(&mesh.view(&uvs).unwrap(), &params).unwrap();

        assert_eq!(bake.report.island_count, 2);
        assert_eq!(bake.report.adjacency_pair_count, 1);
        let corners = corner_bytes(&bake.colors);
        assert_ne!(corners[0], corners[3], "{strategy:?}");
    }
}

#[test]
fn tolerance_joins_nearly_equal_uvs() {
    let mesh = two_triangles();
    let uvs = [
        Uv::new(0.0, 0.0),
        Uv::new(1.0, 0.0),
        Uv::new(0.0, 1.0),
        Uv::new(0.000_01, 1.0),
        Uv::new(1.0, 0.000_01),
        Uv::new(1.0, 1.0),
    ];
    let view = mesh.view(&uvs).unwrap();

    let loose = bake_mesh_detailed(&view, &BakeParams::default()).unwrap();
    assert_eq!(loose.report.island_count, 1);

    let exact = bake_mesh_detailed(&view, &BakeParams::exact()).unwrap();
    assert_eq!(exact.report.island_count, 2);
}

// =============================================================================
// Stability
// =============================================================================

#[test]
fn rebake_is_byte_identical() {
    let (mesh, uvs) = uv_grid_strips(20, 10);
    let view = mesh.view(&uvs).unwrap();

    let first = quantize_rgba(&bake_mesh(&view, &BakeParams::default()).unwrap());
    let second = quantize_rgba(&bake_mesh(&view, &BakeParams::default()).unwrap());
    assert_eq!(first, second);
}

#[test]
fn splitting_last_island_keeps_other_colors() {
    // Cut the top row of a strip grid in two; only that row's colors may change
    let (mesh, uvs) = uv_grid_strips(6, 4);
    let before = bake_mesh_detailed(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

    let mut cut = uvs.clone();
    let last_row = 3 * 6 * 4;
    for corner in cut.iter_mut().skip(last_row + 3 * 4) {
        corner.u += 10.0;
    }
    let after = bake_mesh_detailed(&mesh.view(&cut).unwrap(), &BakeParams::default()).unwrap();

    assert_eq!(after.report.island_count, before.report.island_count + 1);
    let kept = 3 * 6 * 4 * 4;
    assert_eq!(&before.colors[..kept], &after.colors[..kept]);
}

#[test]
fn large_grid_parallel_matches_serial() {
    let (mesh, uvs) = uv_grid_strips(200, 60);
    let view = mesh.view(&uvs).unwrap();

    let serial = bake_mesh(&view, &BakeParams::default().with_parallel(false)).unwrap();
    let parallel = bake_mesh(&view, &BakeParams::default().with_parallel_threshold(1)).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn continuous_grid_single_island() {
    let (mesh, uvs) = uv_grid(50, 50);
    let bake = bake_mesh_detailed(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();
    assert!(bake.report.is_single_island());
    assert_eq!(bake.report.largest_island, 2500);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn bad_loop_ranges_are_rejected() {
    let err = bake_color_id(
        2,
        &[0, 2],
        &[3, 3],
        &[0, 1, 2, 3],
        &[0.0; 8],
        &BakeParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ColorIdError::Topology(LoopError::LoopRangeOutOfBounds { face: 1, .. })
    ));

    let err = bake_color_id(
        2,
        &[0, 1],
        &[3, 2],
        &[0, 1, 2],
        &[0.0; 6],
        &BakeParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ColorIdError::Topology(LoopError::LoopOverlap { corner: 1, first: 0, second: 1 })
    ));
}

#[test]
fn uncovered_loops_are_rejected() {
    let err = bake_color_id(
        1,
        &[0],
        &[3],
        &[0, 1, 2, 3],
        &[0.0; 8],
        &BakeParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ColorIdError::Topology(LoopError::LoopUncovered { corner: 3 })
    ));
}

#[test]
fn zero_loop_face_is_rejected() {
    let err = bake_color_id(
        2,
        &[0, 3],
        &[3, 0],
        &[0, 1, 2],
        &[0.0; 6],
        &BakeParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ColorIdError::Topology(LoopError::EmptyFace { face: 1 })
    ));
}

#[test]
fn view_rejects_mismatched_vertex_and_uv_counts() {
    let uvs = [Uv::default(); 2];
    let err = LoopMesh::new(1, &[0], &[3], &[0, 1, 2], &uvs).unwrap_err();
    assert!(matches!(err, LoopError::LengthMismatch { array: "uv_coords", .. }));
}
