//! Straight: flatten selected UV corners onto one line.

use hashbrown::HashSet;
use mesh_loops::Uv;
use tracing::debug;

use crate::edit_mesh::EditMesh;
use crate::error::{EditError, EditResult};

/// Which coordinate was made constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StraightAxis {
    /// The selection spread horizontally; every `v` is now the mean `v`.
    Horizontal,
    /// The selection spread vertically; every `u` is now the mean `u`.
    Vertical,
}

/// Align the selected UV corners of the active layer along their dominant
/// axis. Ties go to [`StraightAxis::Horizontal`].
///
/// # Errors
///
/// Returns [`EditError::InvalidTarget`] without an active UV layer and
/// [`EditError::Selection`] if fewer than two distinct mesh vertices have a
/// selected corner.
///
/// # Example
///
/// ```
/// use mesh_loops::uv_grid;
/// use mesh_uv_edit::{EditMesh, StraightAxis, straighten_selection};
///
/// let (grid, uvs) = uv_grid(2, 2);
/// let mut mesh = EditMesh::new(grid);
/// mesh.add_uv_layer("UVMap", uvs).unwrap();
/// mesh.select_uv_vertex(0);
/// mesh.select_uv_vertex(2);
///
/// assert_eq!(straighten_selection(&mut mesh).unwrap(), StraightAxis::Horizontal);
/// ```
pub fn straighten_selection(mesh: &mut EditMesh) -> EditResult<StraightAxis> {
    let corners = mesh.selected_uv_corners();
    let vertices: HashSet<u32> = corners
        .iter()
        .map(|&c| mesh.mesh().vertex_indices[c])
        .collect();
    if vertices.len() < 2 {
        return Err(EditError::selection("Select at least 2 UV vertices."));
    }

    let layer = mesh.active_uv_layer_mut().ok_or(EditError::InvalidTarget {
        reason: "No UV Map found",
    })?;
    let uvs = &mut layer.uvs;

    let (mut min, mut max, mut sum) = (uvs[corners[0]], uvs[corners[0]], [0.0_f64; 2]);
    for &c in &corners {
        let uv = uvs[c];
        min = Uv::new(min.u.min(uv.u), min.v.min(uv.v));
        max = Uv::new(max.u.max(uv.u), max.v.max(uv.v));
        sum[0] += f64::from(uv.u);
        sum[1] += f64::from(uv.v);
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    // Corner counts are far below 2^52; the mean is narrowed back to UV precision
    let mean = [
        (sum[0] / corners.len() as f64) as f32,
        (sum[1] / corners.len() as f64) as f32,
    ];

    let axis = if max.u - min.u >= max.v - min.v {
        StraightAxis::Horizontal
    } else {
        StraightAxis::Vertical
    };
    for &c in &corners {
        match axis {
            StraightAxis::Horizontal => uvs[c].v = mean[1],
            StraightAxis::Vertical => uvs[c].u = mean[0],
        }
    }

    debug!(corners = corners.len(), ?axis, "UV straighten");
    Ok(axis)
}
