//! Island adjacency graph.
//!
//! Two islands are adjacent when some mesh edge has a face from each on its
//! two sides. Such an edge is always a seam, since a UV-continuous edge would
//! have merged the islands.

use mesh_loops::{LoopMesh, LoopTopology};

use crate::edges::scan_edges;
use crate::error::{ColorIdError, ColorIdResult};
use crate::params::BakeParams;
use crate::segment::IslandMap;

/// Undirected graph over island ids.
///
/// Stores each adjacent pair once as `(a, b)` with `a < b`, sorted, plus
/// compressed per-island neighbor lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IslandAdjacency {
    pairs: Vec<(u32, u32)>,
    offsets: Vec<usize>,
    neighbors: Vec<u32>,
}

impl IslandAdjacency {
    /// Build the graph from the seam face pairs of an edge scan.
    ///
    /// Seams inside one island (possible when the island is connected around
    /// the seam through other faces) add nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_color_id::{segment_islands, BakeParams, IslandAdjacency};
    /// use mesh_loops::{cube_uvs_per_face, quad_cube};
    ///
    /// let cube = quad_cube();
    /// let uvs = cube_uvs_per_face();
    /// let view = cube.view(&uvs).unwrap();
    /// let seg = segment_islands(&view, &BakeParams::default()).unwrap();
    ///
    /// let adjacency = IslandAdjacency::build(&seg.islands, &seg.edges.seams);
    /// // Every cube face touches four others
    /// assert_eq!(adjacency.pair_count(), 12);
    /// assert_eq!(adjacency.max_degree(), 4);
    /// ```
    #[must_use]
    pub fn build(islands: &IslandMap, seams: &[(u32, u32)]) -> Self {
        let island_of = islands.island_of_face();
        let mut pairs: Vec<(u32, u32)> = seams
            .iter()
            .filter_map(|&(fa, fb)| {
                let a = *island_of.get(fa as usize)?;
                let b = *island_of.get(fb as usize)?;
                match a.cmp(&b) {
                    std::cmp::Ordering::Less => Some((a, b)),
                    std::cmp::Ordering::Greater => Some((b, a)),
                    std::cmp::Ordering::Equal => None,
                }
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();

        Self::from_sorted_pairs(islands.island_count(), pairs)
    }

    /// Rebuild the graph by scanning the mesh edges again.
    ///
    /// Gives the same graph as [`IslandAdjacency::build`] on the seams found
    /// during segmentation.
    ///
    /// # Errors
    ///
    /// Returns [`ColorIdError::Topology`] when the loop ranges do not
    /// partition the loop arrays, and [`ColorIdError::Inconsistent`] when
    /// `islands` was built for a different face count.
    pub fn from_mesh(
        mesh: &LoopMesh<'_>,
        islands: &IslandMap,
        params: &BakeParams,
    ) -> ColorIdResult<Self> {
        if islands.face_count() != mesh.face_count() {
            return Err(ColorIdError::inconsistent(format!(
                "island map covers {} faces, mesh has {}",
                islands.face_count(),
                mesh.face_count()
            )));
        }
        let parallel = params.use_parallel(mesh.face_count());
        let scan = scan_edges(mesh, params.uv_epsilon, parallel)?;
        Ok(Self::build(islands, &scan.seams))
    }

    fn from_sorted_pairs(island_count: usize, pairs: Vec<(u32, u32)>) -> Self {
        let mut degree = vec![0_usize; island_count];
        for &(a, b) in &pairs {
            degree[a as usize] += 1;
            degree[b as usize] += 1;
        }

        let mut offsets = Vec::with_capacity(island_count + 1);
        offsets.push(0);
        let mut total = 0;
        for d in &degree {
            total += d;
            offsets.push(total);
        }

        // Filling in pair order keeps every neighbor list ascending
        let mut cursor = offsets[..island_count].to_vec();
        let mut neighbors = vec![0; total];
        for &(a, b) in &pairs {
            neighbors[cursor[a as usize]] = b;
            cursor[a as usize] += 1;
            neighbors[cursor[b as usize]] = a;
            cursor[b as usize] += 1;
        }
        for island in 0..island_count {
            neighbors[offsets[island]..offsets[island + 1]].sort_unstable();
        }

        Self {
            pairs,
            offsets,
            neighbors,
        }
    }

    /// Number of islands (graph nodes).
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// All adjacent pairs, `a < b`, ascending.
    #[must_use]
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Number of adjacent pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Neighbors of an island, ascending. Empty for unknown ids.
    #[must_use]
    pub fn neighbors(&self, island: u32) -> &[u32] {
        let island = island as usize;
        if island >= self.island_count() {
            return &[];
        }
        &self.neighbors[self.offsets[island]..self.offsets[island + 1]]
    }

    /// Number of neighbors of an island.
    #[must_use]
    pub fn degree(&self, island: u32) -> usize {
        self.neighbors(island).len()
    }

    /// Largest degree in the graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }

    /// Whether two islands are adjacent.
    #[must_use]
    pub fn contains(&self, a: u32, b: u32) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.pairs.binary_search(&key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsu::DisjointSet;
    use crate::segment::segment_islands;
    use mesh_loops::uv_grid_strips;

    fn islands(len: usize, unions: &[(u32, u32)]) -> IslandMap {
        let mut dsu = DisjointSet::new(len);
        for &(a, b) in unions {
            dsu.union(a, b);
        }
        IslandMap::from_disjoint_set(&mut dsu)
    }

    #[test]
    fn pairs_are_deduplicated() {
        // Faces 0,1 -> island 0; faces 2,3 -> island 1
        let map = islands(4, &[(0, 1), (2, 3)]);
        let adjacency = IslandAdjacency::build(&map, &[(0, 2), (1, 3), (3, 0), (1, 2)]);

        assert_eq!(adjacency.pairs(), &[(0, 1)]);
        assert_eq!(adjacency.neighbors(0), &[1]);
        assert_eq!(adjacency.neighbors(1), &[0]);
    }

    #[test]
    fn seam_inside_island_is_ignored() {
        let map = islands(3, &[(0, 1), (1, 2)]);
        let adjacency = IslandAdjacency::build(&map, &[(0, 2)]);
        assert_eq!(adjacency.pair_count(), 0);
        assert_eq!(adjacency.degree(0), 0);
    }

    #[test]
    fn neighbor_lists_are_sorted() {
        let map = islands(5, &[]);
        let adjacency = IslandAdjacency::build(&map, &[(4, 2), (2, 0), (3, 2), (2, 1)]);

        assert_eq!(adjacency.neighbors(2), &[0, 1, 3, 4]);
        assert_eq!(adjacency.max_degree(), 4);
        assert!(adjacency.contains(4, 2));
        assert!(adjacency.contains(2, 4));
        assert!(!adjacency.contains(0, 1));
    }

    #[test]
    fn unknown_island_has_no_neighbors() {
        let adjacency = IslandAdjacency::build(&islands(2, &[]), &[(0, 1)]);
        assert!(adjacency.neighbors(7).is_empty());
        assert_eq!(adjacency.island_count(), 2);
    }

    #[test]
    fn strips_form_a_path() {
        let (mesh, uvs) = uv_grid_strips(5, 4);
        let view = mesh.view(&uvs).unwrap();
        let params = BakeParams::default();
        let seg = segment_islands(&view, &params).unwrap();

        let adjacency = IslandAdjacency::build(&seg.islands, &seg.edges.seams);
        assert_eq!(adjacency.pairs(), &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(adjacency, IslandAdjacency::from_mesh(&view, &seg.islands, &params).unwrap());
    }

    #[test]
    fn empty_graph() {
        let adjacency = IslandAdjacency::default();
        assert_eq!(adjacency.island_count(), 0);
        assert_eq!(adjacency.max_degree(), 0);
    }

    #[test]
    fn rescan_rejects_bad_input() {
        let mesh = LoopMesh::from_flat(1, &[0], &[4], &[0, 1, 2], &[0.0; 6]).unwrap();
        let result = IslandAdjacency::from_mesh(&mesh, &islands(1, &[]), &BakeParams::default());
        assert!(matches!(result, Err(ColorIdError::Topology(_))));

        // Island map built for another mesh
        let (grid, uvs) = uv_grid_strips(2, 2);
        let view = grid.view(&uvs).unwrap();
        let result = IslandAdjacency::from_mesh(&view, &islands(3, &[]), &BakeParams::default());
        assert!(matches!(result, Err(ColorIdError::Inconsistent { .. })));
    }
}
