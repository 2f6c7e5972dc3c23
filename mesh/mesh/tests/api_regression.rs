//! API Regression Tests for the Color-ID crate ecosystem
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable and consistent across the mesh crates. They are organized in
//! 4 tiers of increasing complexity:
//!
//! - Tier 1: Foundation (mesh-loops types, views, fixtures)
//! - Tier 2: Core Operations (segmentation, adjacency, coloring)
//! - Tier 3: Bake Entry Points (flat arrays, views, reports)
//! - Tier 4: Editor Tools (mesh-uv-edit objects and commands)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use mesh::{color_id, loops, prelude::*, uv_edit};

// =============================================================================
// TIER 1: Foundation - Loop Meshes and Colors
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn poly_mesh_construction() {
        let mut mesh = PolyMesh::new();
        assert!(mesh.is_empty());

        let a = mesh.add_vertex(loops::Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(loops::Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(loops::Point3::new(0.0, 1.0, 0.0));
        let face = mesh.add_face(&[a, b, c]);

        assert_eq!(face, 0);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.loop_count(), 3);
        assert_eq!(mesh.face_vertices(0).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn quad_cube_fixture() {
        let cube = quad_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.loop_count(), 24);
        assert_eq!(cube_uvs_per_face().len(), 24);
        assert_eq!(cube_uvs_cross().len(), 24);
    }

    #[test]
    fn flat_uv_buffer_is_borrowed() {
        let flat = [0.0_f32, 0.0, 1.0, 0.0, 0.0, 1.0];
        let uvs = Uv::cast_slice(&flat).unwrap();
        assert_eq!(uvs.len(), 3);
        assert_eq!(uvs[1], Uv::new(1.0, 0.0));
        assert!(Uv::cast_slice(&flat[..5]).is_none());
    }

    #[test]
    fn loop_view_validates_lengths() {
        let uvs = [Uv::default(); 3];
        assert!(LoopMesh::new(1, &[0], &[3], &[0, 1, 2], &uvs).is_ok());
        assert!(LoopMesh::new(2, &[0], &[3], &[0, 1, 2], &uvs).is_err());
    }

    #[test]
    fn uv_tolerance_matching() {
        let a = Uv::new(0.5, 0.5);
        assert!(a.matches(Uv::new(0.5, 0.500_01), 1e-4));
        assert!(!a.matches(Uv::new(0.5, 0.500_01), 0.0));
        assert!(a.matches(a, 0.0));
    }

    #[test]
    fn color_conversions() {
        let red = Rgba::from_hsv(0.0, 1.0, 1.0);
        assert_eq!(red.to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(red.to_bytes(), loops::ByteRgba::new(255, 0, 0, 255));
    }
}

// =============================================================================
// TIER 2: Core Operations - Segmentation, Adjacency, Coloring
// =============================================================================

mod tier2_core_operations {
    use super::*;
    use mesh::color_id::{IslandAdjacency, assign_colors, segment_islands};

    #[test]
    fn bake_params_builder_pattern() {
        let params = BakeParams::default();
        assert_eq!(params.uv_epsilon, 1e-4);
        assert_eq!(params.palette_size, 32);
        assert_eq!(params.strategy, ColorStrategy::Hashed);

        let params = BakeParams::default()
            .with_uv_epsilon(0.0)
            .with_palette_size(8)
            .with_shading(0.5, 0.9)
            .with_strategy(ColorStrategy::LowestFree)
            .with_parallel(false)
            .with_parallel_threshold(1_000);
        assert!(params.validate().is_ok());
        assert!(!params.use_parallel(1_000_000));
    }

    #[test]
    fn bake_params_presets() {
        assert_eq!(BakeParams::exact().uv_epsilon, 0.0);
        assert!(BakeParams::for_large_meshes().use_parallel(1_000_000));
    }

    #[test]
    fn disjoint_set_operations() {
        let mut dsu = color_id::DisjointSet::new(4);
        assert!(dsu.union(0, 1));
        assert!(!dsu.union(1, 0));
        assert!(dsu.same(0, 1));
        assert!(!dsu.same(0, 2));
    }

    #[test]
    fn segmentation_and_adjacency() {
        let cube = quad_cube();
        let uvs = cube_uvs_per_face();
        let view = cube.view(&uvs).unwrap();
        let params = BakeParams::default();

        let segmentation = segment_islands(&view, &params).unwrap();
        assert_eq!(segmentation.islands.island_count(), 6);
        assert_eq!(segmentation.islands.island_of_face(), &[0, 1, 2, 3, 4, 5]);

        let adjacency = IslandAdjacency::build(&segmentation.islands, &segmentation.edges.seams);
        assert_eq!(adjacency.pair_count(), 12);
        assert_eq!(adjacency.max_degree(), 4);
        assert_eq!(
            adjacency,
            IslandAdjacency::from_mesh(&view, &segmentation.islands, &params).unwrap()
        );

        let colors = assign_colors(&segmentation.islands, &adjacency, &params).unwrap();
        for &(a, b) in adjacency.pairs() {
            assert_ne!(colors.slots[a as usize], colors.slots[b as usize]);
        }
    }

    #[test]
    fn palette_is_stable() {
        let a = color_id::slot_color(3, 0.85, 0.95);
        let b = color_id::slot_color(3, 0.85, 0.95);
        assert_eq!(a, b);
        assert_eq!(a.a, 1.0);
        assert_ne!(a, color_id::slot_color(4, 0.85, 0.95));
    }
}

// =============================================================================
// TIER 3: Bake Entry Points
// =============================================================================

mod tier3_bake {
    use super::*;

    #[test]
    fn flat_array_contract() {
        // Two triangles sharing edge (1, 2) with continuous UVs
        let colors = bake_color_id(
            2,
            &[0, 3],
            &[3, 3],
            &[0, 1, 2, 2, 1, 3],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
            &BakeParams::default(),
        )
        .unwrap();

        assert_eq!(colors.len(), 24);
        assert!(colors.chunks_exact(4).all(|c| c == &colors[..4]));
    }

    #[test]
    fn empty_mesh_bakes_to_nothing() {
        let colors = bake_color_id(0, &[], &[], &[], &[], &BakeParams::default()).unwrap();
        assert!(colors.is_empty());
    }

    #[test]
    fn detailed_bake_report() {
        let cube = quad_cube();
        let uvs = cube_uvs_per_face();
        let bake = bake_mesh_detailed(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

        let report: &BakeReport = &bake.report;
        assert_eq!(report.face_count, 6);
        assert_eq!(report.loop_count, 24);
        assert_eq!(report.island_count, 6);
        assert_eq!(report.distinct_colors, 6);
        assert!(report.all_colors_unique());
        assert!(report.to_string().starts_with("Color-ID Bake Report:"));
    }

    #[test]
    fn quantized_output() {
        let cube = quad_cube();
        let uvs = cube_uvs_cross();
        let colors = bake_mesh(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();
        let bytes = quantize_rgba(&colors);

        assert_eq!(bytes.len(), 96);
        assert!(bytes.chunks_exact(4).all(|c| c[3] == 255));
    }

    #[test]
    fn malformed_input_is_an_error() {
        let result = bake_color_id(1, &[0], &[4], &[0, 1, 2], &[0.0; 6], &BakeParams::default());
        assert!(matches!(result, Err(color_id::ColorIdError::Topology(_))));
    }
}

// =============================================================================
// TIER 4: Editor Tools
// =============================================================================

mod tier4_editor_tools {
    use super::*;
    use mesh::uv_edit::{COLOR_ID_ATTRIBUTE, ReportLevel, apply_color_id};

    fn cube_object() -> SceneObject {
        let mut mesh = EditMesh::new(quad_cube());
        mesh.add_uv_layer("UVMap", cube_uvs_per_face()).unwrap();
        SceneObject::mesh("Cube", mesh)
    }

    #[test]
    fn color_id_write_back() {
        let mut object = cube_object();
        let faces = apply_color_id(&mut object, &BakeParams::default()).unwrap();
        assert_eq!(faces, 6);

        let mesh = object.as_mesh().unwrap();
        let attr = mesh.color_attribute(COLOR_ID_ATTRIBUTE).unwrap();
        assert_eq!(attr.domain(), uv_edit::AttributeDomain::Corner);
        assert_eq!(attr.data_type(), uv_edit::ColorDataType::ByteColor);
    }

    #[test]
    fn toolkit_dispatch() {
        let mut scene = Scene::new();
        let index = scene.add_object(cube_object());
        scene.set_active(index);
        let mut toolkit = Toolkit::new(ToolSettings::default());

        let outcome = toolkit.execute(&mut scene, Command::ToggleUvMorph);
        assert!(outcome.is_finished());
        assert_eq!(outcome.report.unwrap().level, ReportLevel::Info);

        let outcome = toolkit.execute(&mut scene, Command::Rectify { keep_bounds: None });
        assert!(!outcome.is_finished());
    }

    #[test]
    fn tool_settings_from_toml() {
        let settings = ToolSettings::from_toml_str("[bake]\nstrategy = \"lowest_free\"").unwrap();
        assert_eq!(settings.bake.strategy, ColorStrategy::LowestFree);
        assert!(settings.auto_switch_view);
    }
}

// =============================================================================
// Error Handling Patterns
// =============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn invalid_params_rejected_before_work() {
        let cube = quad_cube();
        let uvs = cube_uvs_per_face();
        let params = BakeParams::default().with_palette_size(1);
        let result = bake_mesh(&cube.view(&uvs).unwrap(), &params);
        assert!(matches!(
            result,
            Err(color_id::ColorIdError::InvalidParams { .. })
        ));
    }

    #[test]
    fn editor_errors_classify_user_input() {
        let mut camera = SceneObject::camera("Camera");
        let err = uv_edit::apply_color_id(&mut camera, &BakeParams::default()).unwrap_err();
        assert!(err.is_user_error());
    }
}
