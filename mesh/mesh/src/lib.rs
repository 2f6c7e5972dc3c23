//! Color-ID baking and UV editing toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one API. All of
//! them are plain libraries with no engine or GUI dependencies, usable from
//! CLI tools, servers or host-application bindings.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! // A cube with each face unwrapped on its own
//! let cube = quad_cube();
//! let uvs = cube_uvs_per_face();
//! let view = cube.view(&uvs).unwrap();
//!
//! // One RGBA value per loop, one color per UV island
//! let bake = bake_mesh_detailed(&view, &BakeParams::default()).unwrap();
//! assert_eq!(bake.report.island_count, 6);
//!
//! // 8-bit output for a byte color attribute
//! let bytes = quantize_rgba(&bake.colors);
//! assert_eq!(bytes.len(), 4 * cube.loop_count());
//! ```
//!
//! # Module Organization
//!
//! - [`loops`] - Loop-based polygon meshes, UVs, colors and fixtures
//! - [`color_id`] - UV island segmentation, adjacency, coloring and the bake
//! - [`uv_edit`] - Editable meshes, scene objects and the UV tools
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize mesh types and bake parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Loop-based polygon meshes, UVs, colors and fixtures.
pub use mesh_loops as loops;

/// UV island segmentation, adjacency, coloring and the Color-ID bake.
pub use mesh_color_id as color_id;

/// Editable meshes, scene objects and the UV tools.
pub use mesh_uv_edit as uv_edit;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for Color-ID baking and UV editing.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_loops::{
        LoopMesh, LoopTopology, PolyMesh, Rgba, Uv, cube_uvs_cross, cube_uvs_per_face, quad_cube,
    };

    // Bake
    pub use mesh_color_id::{
        BakeParams, BakeReport, ColorStrategy, bake_color_id, bake_mesh, bake_mesh_detailed,
        quantize_rgba,
    };

    // Editor tools
    pub use mesh_uv_edit::{Command, EditMesh, Scene, SceneObject, ToolSettings, Toolkit};
}

// =============================================================================
// Tests
// =============================================================================
