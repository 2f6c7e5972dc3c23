//! Color-ID baking: one stable, distinguishable color per UV island.
//!
//! Given a mesh's loop topology and its active UV layer, this crate:
//! - Splits the faces into UV islands (faces joined by edges whose UVs agree)
//! - Finds which islands touch across a UV seam
//! - Colors the islands so touching islands never share a color
//! - Expands the island colors into one RGBA value per loop
//!
//! Colors depend only on the mesh and UVs. Baking an unchanged mesh twice
//! gives byte-identical output, and with the default
//! [`ColorStrategy::Hashed`] an island keeps its color when unrelated parts
//! of the mesh change.
//!
//! # Performance
//!
//! Edge lookup goes through a hash map keyed by vertex pair, so the bake is
//! near-linear in the loop count. Above [`BakeParams::parallel_threshold`]
//! faces, the edge scan and the corner writer run on the rayon pool.
//!
//! # Example
//!
//! ```
//! use mesh_color_id::{bake_mesh_detailed, BakeParams};
//! use mesh_loops::{cube_uvs_per_face, quad_cube};
//!
//! let cube = quad_cube();
//! let uvs = cube_uvs_per_face();
//! let view = cube.view(&uvs).unwrap();
//!
//! let bake = bake_mesh_detailed(&view, &BakeParams::default()).unwrap();
//! assert_eq!(bake.report.island_count, 6);
//! assert_eq!(bake.colors.len(), 4 * 24);
//! println!("{}", bake.report);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod bake;
mod coloring;
mod dsu;
pub mod edges;
mod error;
pub mod palette;
mod params;
mod report;
mod segment;
mod writer;

pub use adjacency::IslandAdjacency;
pub use bake::{ColorIdBake, bake_color_id, bake_mesh, bake_mesh_detailed};
pub use coloring::{IslandColors, assign_colors};
pub use dsu::DisjointSet;
pub use edges::{EdgeKey, EdgeRef, EdgeScan, scan_edges};
pub use error::{ColorIdError, ColorIdResult};
pub use palette::slot_color;
pub use params::{BakeParams, ColorStrategy};
pub use report::BakeReport;
pub use segment::{IslandMap, Segmentation, segment_islands};
pub use writer::{CHANNELS, quantize_rgba, write_corner_colors};
