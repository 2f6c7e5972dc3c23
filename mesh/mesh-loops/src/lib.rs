//! Loop-based polygon mesh types for UV tooling.
//!
//! This crate provides the data model every UV tool in the workspace reads:
//!
//! - [`Uv`] - A per-corner texture coordinate
//! - [`Rgba`] / [`ByteRgba`] - Per-corner colors, float and 8-bit
//! - [`LoopMesh`] - A borrowed view over flat loop arrays plus one UV layer
//! - [`PolyMesh`] - An owned polygon mesh with positions and loop topology
//! - [`LoopTopology`] - The read-only topology interface both share
//!
//! # Loop Layout
//!
//! A mesh is described by four flat arrays, the way a host editor exports it:
//!
//! - `loop_starts[face]` - first loop of each face
//! - `loop_totals[face]` - number of loops of each face
//! - `vertex_indices[loop]` - vertex referenced by each loop
//! - `uvs[loop]` - UV coordinate of each loop (interleaved `u, v` when flat)
//!
//! A loop (corner) is one vertex-in-a-face incidence. Two faces sharing a
//! vertex each have their own loop there, and each loop carries its own UV.
//!
//! # Example
//!
//! ```
//! use mesh_loops::{quad_cube, cube_uvs_cross, LoopTopology};
//!
//! let cube = quad_cube();
//! let uvs = cube_uvs_cross();
//! let view = cube.view(&uvs).unwrap();
//!
//! assert_eq!(view.face_count(), 6);
//! assert_eq!(view.corner_owners().unwrap().len(), 24);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod mesh;
mod traits;
mod uv;
mod view;

pub use error::{LoopError, LoopResult};
pub use mesh::{PolyMesh, cube_uvs_cross, cube_uvs_per_face, quad_cube, uv_grid, uv_grid_strips};
pub use traits::LoopTopology;
pub use uv::{ByteRgba, Rgba, Uv, quantize_channel};
pub use view::{FaceLoops, LoopMesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
