//! Corner color writer: scatter island colors to per-loop RGBA.

use mesh_loops::{Rgba, quantize_channel};
use rayon::prelude::*;

use crate::coloring::IslandColors;
use crate::error::{ColorIdError, ColorIdResult};
use crate::segment::IslandMap;

/// Channels per output color.
pub const CHANNELS: usize = 4;

/// Expand island colors into one RGBA quadruple per loop.
///
/// `corner_owners` is the loop-to-face table from
/// [`LoopMesh::corner_owners`](mesh_loops::LoopMesh::corner_owners). The
/// output has `4 * corner_owners.len()` floats in loop order.
///
/// # Errors
///
/// Returns [`ColorIdError::Inconsistent`] if the tables disagree with each
/// other, and [`ColorIdError::Overflow`] if the output length overflows.
pub fn write_corner_colors(
    corner_owners: &[u32],
    islands: &IslandMap,
    colors: &IslandColors,
    parallel: bool,
) -> ColorIdResult<Vec<f32>> {
    let face_colors = face_colors(islands, colors)?;
    if let Some(&owner) = corner_owners
        .iter()
        .find(|&&face| face as usize >= face_colors.len())
    {
        return Err(ColorIdError::inconsistent(format!(
            "loop owned by face {owner}, mesh has {} faces",
            face_colors.len()
        )));
    }

    let len = corner_owners
        .len()
        .checked_mul(CHANNELS)
        .ok_or(ColorIdError::Overflow {
            what: "output buffer length",
        })?;
    let mut out = vec![0.0_f32; len];

    let fill = |(slot, &face): (&mut [f32], &u32)| {
        slot.copy_from_slice(&face_colors[face as usize]);
    };
    if parallel {
        out.par_chunks_exact_mut(CHANNELS)
            .zip(corner_owners.par_iter())
            .for_each(fill);
    } else {
        out.chunks_exact_mut(CHANNELS)
            .zip(corner_owners.iter())
            .for_each(fill);
    }

    Ok(out)
}

fn face_colors(islands: &IslandMap, colors: &IslandColors) -> ColorIdResult<Vec<[f32; 4]>> {
    islands
        .island_of_face()
        .iter()
        .map(|&island| {
            colors
                .color(island)
                .map(Rgba::to_array)
                .ok_or_else(|| {
                    ColorIdError::inconsistent(format!(
                        "island {island} has no color ({} colors)",
                        colors.colors.len()
                    ))
                })
        })
        .collect()
}

/// Quantize a float RGBA buffer to bytes, rounding each channel to nearest.
///
/// # Example
///
/// ```
/// use mesh_color_id::quantize_rgba;
///
/// assert_eq!(quantize_rgba(&[1.0, 0.5, 0.0, 1.0]), vec![255, 128, 0, 255]);
/// ```
#[must_use]
pub fn quantize_rgba(colors: &[f32]) -> Vec<u8> {
    colors.iter().copied().map(quantize_channel).collect()
}
