//! Top-level Color-ID bake.

use mesh_loops::{LoopMesh, LoopTopology};
use tracing::{debug, info};

use crate::adjacency::IslandAdjacency;
use crate::coloring::{IslandColors, assign_colors};
use crate::error::ColorIdResult;
use crate::params::BakeParams;
use crate::report::BakeReport;
use crate::segment::{IslandMap, segment_checked};
use crate::writer::write_corner_colors;

/// Everything a bake computes.
#[derive(Debug, Clone)]
pub struct ColorIdBake {
    /// Flat RGBA output, four floats per loop, in loop order.
    pub colors: Vec<f32>,
    /// Face-to-island assignment.
    pub islands: IslandMap,
    /// Islands touching across seams.
    pub adjacency: IslandAdjacency,
    /// Slot and color of every island.
    pub island_colors: IslandColors,
    /// Summary statistics.
    pub report: BakeReport,
    /// Wall-clock time of the bake in milliseconds.
    pub compute_time_ms: f64,
}

/// Bake Color-ID colors from flat host arrays.
///
/// `uv_coords` is the interleaved `[u, v, u, v, ...]` buffer; it is viewed
/// in place, never copied. Returns `4 * vertex_indices.len()` floats.
///
/// # Errors
///
/// Fails as a whole, with no partial output, when the arrays break the
/// loop contract ([`ColorIdError::Topology`](crate::ColorIdError::Topology)),
/// when `params` is invalid, or on an internal inconsistency.
///
/// # Example
///
/// ```
/// use mesh_color_id::{bake_color_id, BakeParams};
///
/// // Two triangles that share the edge (1, 2) with matching UVs
/// let colors = bake_color_id(
///     2,
///     &[0, 3],
///     &[3, 3],
///     &[0, 1, 2, 2, 1, 3],
///     &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
///     &BakeParams::default(),
/// )
/// .unwrap();
///
/// assert_eq!(colors.len(), 24);
/// // One island: every loop has the same color
/// assert!(colors.chunks(4).all(|c| c == &colors[..4]));
/// ```
pub fn bake_color_id(
    face_count: usize,
    loop_starts: &[u32],
    loop_totals: &[u32],
    vertex_indices: &[u32],
    uv_coords: &[f32],
    params: &BakeParams,
) -> ColorIdResult<Vec<f32>> {
    let mesh = LoopMesh::from_flat(
        face_count,
        loop_starts,
        loop_totals,
        vertex_indices,
        uv_coords,
    )?;
    bake_mesh(&mesh, params)
}

/// Bake Color-ID colors for a mesh view.
///
/// # Errors
///
/// See [`bake_color_id`].
pub fn bake_mesh(mesh: &LoopMesh<'_>, params: &BakeParams) -> ColorIdResult<Vec<f32>> {
    bake_mesh_detailed(mesh, params).map(|bake| bake.colors)
}

/// Bake Color-ID colors and keep the intermediate results.
///
/// # Errors
///
/// See [`bake_color_id`].
pub fn bake_mesh_detailed(mesh: &LoopMesh<'_>, params: &BakeParams) -> ColorIdResult<ColorIdBake> {
    let start = std::time::Instant::now();
    params.validate()?;
    let owners = mesh.corner_owners()?;
    let parallel = params.use_parallel(mesh.face_count());

    info!(
        faces = mesh.face_count(),
        loops = mesh.loop_count(),
        parallel,
        "Baking Color-ID"
    );

    let segmentation = segment_checked(mesh, params);
    let adjacency = IslandAdjacency::build(&segmentation.islands, &segmentation.edges.seams);
    debug!(
        pairs = adjacency.pair_count(),
        max_degree = adjacency.max_degree(),
        "Built island adjacency"
    );

    let island_colors = assign_colors(&segmentation.islands, &adjacency, params)?;
    let colors = write_corner_colors(&owners, &segmentation.islands, &island_colors, parallel)?;

    let edges = &segmentation.edges;
    let report = BakeReport {
        face_count: mesh.face_count(),
        loop_count: mesh.loop_count(),
        edge_count: edges.edge_count,
        island_count: segmentation.islands.island_count(),
        largest_island: segmentation.islands.largest_island(),
        seam_pair_count: edges.seams.len(),
        adjacency_pair_count: adjacency.pair_count(),
        max_degree: adjacency.max_degree(),
        distinct_colors: island_colors.distinct_slots(),
        boundary_edge_count: edges.boundary_edge_count,
        non_manifold_edge_count: edges.non_manifold_edge_count,
        parallel,
    };

    let compute_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        islands = report.island_count,
        colors = report.distinct_colors,
        time_ms = compute_time_ms,
        "Color-ID bake complete"
    );

    Ok(ColorIdBake {
        colors,
        islands: segmentation.islands,
        adjacency,
        island_colors,
        report,
        compute_time_ms,
    })
}
