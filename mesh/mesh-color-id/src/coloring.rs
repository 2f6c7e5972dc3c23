//! Adjacency-aware color assignment.
//!
//! Both strategies produce a proper coloring of the island graph: no two
//! adjacent islands share a palette slot. The palette grows past
//! `palette_size` only when an island's neighbors already occupy every slot.

use mesh_loops::Rgba;
use smallvec::SmallVec;
use tracing::debug;

use crate::adjacency::IslandAdjacency;
use crate::error::{ColorIdError, ColorIdResult};
use crate::palette::{preferred_slot, slot_color};
use crate::params::{BakeParams, ColorStrategy};
use crate::segment::IslandMap;

const UNSET: u32 = u32::MAX;

type UsedSlots = SmallVec<[u32; 16]>;

/// Palette slot and color of every island.
#[derive(Debug, Clone, PartialEq)]
pub struct IslandColors {
    /// Palette slot per island.
    pub slots: Vec<u32>,
    /// Color per island, alpha always 1.0.
    pub colors: Vec<Rgba>,
}

impl IslandColors {
    /// Number of distinct slots in use.
    #[must_use]
    pub fn distinct_slots(&self) -> usize {
        let mut slots = self.slots.clone();
        slots.sort_unstable();
        slots.dedup();
        slots.len()
    }

    /// Color of one island.
    #[must_use]
    pub fn color(&self, island: u32) -> Option<Rgba> {
        self.colors.get(island as usize).copied()
    }
}

/// Assign a color to every island so adjacent islands differ.
///
/// # Errors
///
/// Returns [`ColorIdError::InvalidParams`] for invalid params,
/// [`ColorIdError::Inconsistent`] if the graph and island map disagree on
/// the island count, and [`ColorIdError::Overflow`] if a slot index would
/// leave the `u32` range.
///
/// # Example
///
/// ```
/// use mesh_color_id::{assign_colors, segment_islands, BakeParams, IslandAdjacency};
/// use mesh_loops::{cube_uvs_per_face, quad_cube};
///
/// let cube = quad_cube();
/// let uvs = cube_uvs_per_face();
/// let view = cube.view(&uvs).unwrap();
/// let params = BakeParams::default();
/// let seg = segment_islands(&view, &params).unwrap();
/// let adjacency = IslandAdjacency::build(&seg.islands, &seg.edges.seams);
///
/// let colors = assign_colors(&seg.islands, &adjacency, &params).unwrap();
/// for &(a, b) in adjacency.pairs() {
///     assert_ne!(colors.slots[a as usize], colors.slots[b as usize]);
/// }
/// ```
pub fn assign_colors(
    islands: &IslandMap,
    adjacency: &IslandAdjacency,
    params: &BakeParams,
) -> ColorIdResult<IslandColors> {
    params.validate()?;
    if adjacency.island_count() != islands.island_count() {
        return Err(ColorIdError::inconsistent(format!(
            "adjacency covers {} islands, segmentation produced {}",
            adjacency.island_count(),
            islands.island_count()
        )));
    }

    let slots = match params.strategy {
        ColorStrategy::Hashed => hashed_slots(islands, adjacency, params.palette_size)?,
        ColorStrategy::LowestFree => lowest_free_slots(adjacency)?,
    };
    let colors = slots
        .iter()
        .map(|&slot| slot_color(slot, params.saturation, params.value))
        .collect();

    let result = IslandColors { slots, colors };
    debug!(
        islands = islands.island_count(),
        strategy = ?params.strategy,
        distinct = result.distinct_slots(),
        "Assigned island colors"
    );
    Ok(result)
}

/// Islands in id order; each starts at its hashed slot and steps forward
/// past slots used by lower-id neighbors.
#[allow(clippy::cast_possible_truncation)]
// Island ids fit in u32, and slot arithmetic is reduced modulo a u32 palette size
fn hashed_slots(
    islands: &IslandMap,
    adjacency: &IslandAdjacency,
    palette_size: u32,
) -> ColorIdResult<Vec<u32>> {
    let mut slots = Vec::with_capacity(islands.island_count());

    for (island, &first_face) in islands.first_faces().iter().enumerate() {
        let island = island as u32;
        let used: UsedSlots = sorted(
            adjacency
                .neighbors(island)
                .iter()
                .take_while(|&&n| n < island)
                .map(|&n| slots[n as usize]),
        );

        let start = preferred_slot(first_face, palette_size);
        let in_palette = (0..palette_size)
            .map(|step| ((u64::from(start) + u64::from(step)) % u64::from(palette_size)) as u32)
            .find(|slot| used.binary_search(slot).is_err());

        let slot = match in_palette {
            Some(slot) => slot,
            None => first_free_from(&used, palette_size)?,
        };
        slots.push(slot);
    }

    Ok(slots)
}

/// Welsh-Powell: highest degree first (ties by id), lowest free slot.
#[allow(clippy::cast_possible_truncation)]
// Island ids are dense and the island count fits in u32
fn lowest_free_slots(adjacency: &IslandAdjacency) -> ColorIdResult<Vec<u32>> {
    let count = adjacency.island_count();
    let mut order: Vec<u32> = (0..count as u32).collect();
    order.sort_by(|&a, &b| {
        adjacency
            .degree(b)
            .cmp(&adjacency.degree(a))
            .then(a.cmp(&b))
    });

    let mut slots = vec![UNSET; count];
    for island in order {
        let used: UsedSlots = sorted(
            adjacency
                .neighbors(island)
                .iter()
                .map(|&n| slots[n as usize])
                .filter(|&slot| slot != UNSET),
        );
        slots[island as usize] = first_free_from(&used, 0)?;
    }

    Ok(slots)
}

fn sorted(slots: impl Iterator<Item = u32>) -> UsedSlots {
    let mut used: UsedSlots = slots.collect();
    used.sort_unstable();
    used.dedup();
    used
}

/// Smallest slot `>= from` not in the sorted `used` list.
fn first_free_from(used: &[u32], from: u32) -> ColorIdResult<u32> {
    let mut slot = from;
    for &taken in used.iter().skip_while(|&&s| s < from) {
        if taken != slot {
            break;
        }
        slot = slot
            .checked_add(1)
            .filter(|&s| s != UNSET)
            .ok_or(ColorIdError::Overflow {
                what: "palette slot",
            })?;
    }
    Ok(slot)
}
