//! UV island segmentation.
//!
//! Faces start as singleton islands and are merged across every shared edge
//! whose UVs agree on both ends. Island ids are then compacted to `0..k` in
//! order of each island's first (smallest) face, so an unchanged mesh always
//! gets the same ids.

use mesh_loops::{LoopMesh, LoopTopology};
use tracing::debug;

use crate::dsu::DisjointSet;
use crate::edges::{EdgeScan, scan_checked};
use crate::error::ColorIdResult;
use crate::params::BakeParams;

/// Face-to-island assignment with dense island ids.
///
/// # Example
///
/// ```
/// use mesh_color_id::{segment_islands, BakeParams};
/// use mesh_loops::{cube_uvs_per_face, quad_cube};
///
/// let cube = quad_cube();
/// let uvs = cube_uvs_per_face();
/// let view = cube.view(&uvs).unwrap();
///
/// let segmentation = segment_islands(&view, &BakeParams::default()).unwrap();
/// assert_eq!(segmentation.islands.island_count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandMap {
    island_of_face: Vec<u32>,
    first_face: Vec<u32>,
    face_counts: Vec<u32>,
}

impl IslandMap {
    /// Compact a union-find forest into dense ids in first-face order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Island count never exceeds the face count, which fits in u32
    pub fn from_disjoint_set(dsu: &mut DisjointSet) -> Self {
        const UNASSIGNED: u32 = u32::MAX;
        let face_count = dsu.len();
        let mut label_of_root = vec![UNASSIGNED; face_count];
        let mut island_of_face = Vec::with_capacity(face_count);
        let mut first_face = Vec::new();
        let mut face_counts = Vec::new();

        for face in 0..face_count as u32 {
            let root = dsu.find(face) as usize;
            let mut label = label_of_root[root];
            if label == UNASSIGNED {
                label = first_face.len() as u32;
                label_of_root[root] = label;
                first_face.push(face);
                face_counts.push(0);
            }
            face_counts[label as usize] += 1;
            island_of_face.push(label);
        }

        Self {
            island_of_face,
            first_face,
            face_counts,
        }
    }

    /// Number of islands.
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.first_face.len()
    }

    /// Number of faces covered.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.island_of_face.len()
    }

    /// Island id of every face.
    #[must_use]
    pub fn island_of_face(&self) -> &[u32] {
        &self.island_of_face
    }

    /// Island id of one face.
    #[must_use]
    pub fn island_of(&self, face: usize) -> Option<u32> {
        self.island_of_face.get(face).copied()
    }

    /// Smallest face index of every island. Strictly increasing.
    #[must_use]
    pub fn first_faces(&self) -> &[u32] {
        &self.first_face
    }

    /// Number of faces in an island.
    #[must_use]
    pub fn island_size(&self, island: usize) -> Option<usize> {
        self.face_counts.get(island).map(|&n| n as usize)
    }

    /// Size of the largest island, or 0 for an empty mesh.
    #[must_use]
    pub fn largest_island(&self) -> usize {
        self.face_counts.iter().max().map_or(0, |&n| n as usize)
    }

    /// Face indices of one island, ascending.
    pub fn faces_of(&self, island: u32) -> impl Iterator<Item = usize> + '_ {
        self.island_of_face
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| id == island)
            .map(|(face, _)| face)
    }
}

/// Result of segmenting a mesh: the islands plus the seam edges found on
/// the way, which the adjacency builder consumes.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Face-to-island assignment.
    pub islands: IslandMap,
    /// Resolved shared edges.
    pub edges: EdgeScan,
}

/// Group the faces of `mesh` into UV islands.
///
/// # Errors
///
/// Returns [`ColorIdError::Topology`](crate::ColorIdError::Topology) when
/// the loop ranges do not partition the loop arrays.
pub fn segment_islands(mesh: &LoopMesh<'_>, params: &BakeParams) -> ColorIdResult<Segmentation> {
    mesh.corner_owners()?;
    Ok(segment_checked(mesh, params))
}

/// [`segment_islands`] for a mesh whose loop ranges passed
/// [`LoopMesh::corner_owners`].
pub(crate) fn segment_checked(mesh: &LoopMesh<'_>, params: &BakeParams) -> Segmentation {
    let parallel = params.use_parallel(mesh.face_count());
    let edges = scan_checked(mesh, params.uv_epsilon, parallel);

    let mut dsu = DisjointSet::new(mesh.face_count());
    for &(a, b) in &edges.joins {
        dsu.union(a, b);
    }
    let islands = IslandMap::from_disjoint_set(&mut dsu);

    debug!(
        faces = mesh.face_count(),
        edges = edges.edge_count,
        joins = edges.joins.len(),
        seams = edges.seams.len(),
        islands = islands.island_count(),
        parallel,
        "Segmented UV islands"
    );

    Segmentation { islands, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorIdError;
    use mesh_loops::{
        LoopError, cube_uvs_cross, cube_uvs_per_face, quad_cube, uv_grid, uv_grid_strips,
    };

    #[test]
    fn compaction_follows_first_face_order() {
        let mut dsu = DisjointSet::new(5);
        dsu.union(4, 1);
        dsu.union(3, 0);
        let islands = IslandMap::from_disjoint_set(&mut dsu);

        assert_eq!(islands.island_of_face(), &[0, 1, 2, 0, 1]);
        assert_eq!(islands.first_faces(), &[0, 1, 2]);
        assert_eq!(islands.island_size(1), Some(2));
        assert_eq!(islands.faces_of(1).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(islands.largest_island(), 2);
    }

    #[test]
    fn cross_cube_is_one_island() {
        let cube = quad_cube();
        let uvs = cube_uvs_cross();
        let seg = segment_islands(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

        assert_eq!(seg.islands.island_count(), 1);
        assert!(seg.islands.island_of_face().iter().all(|&id| id == 0));
    }

    #[test]
    fn per_face_cube_is_six_islands() {
        let cube = quad_cube();
        let uvs = cube_uvs_per_face();
        let seg = segment_islands(&cube.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

        assert_eq!(seg.islands.island_of_face(), &[0, 1, 2, 3, 4, 5]);
        // Closed cube: 12 edges, all seams
        assert_eq!(seg.edges.seams.len(), 12);
    }

    #[test]
    fn strips_split_by_row() {
        let (mesh, uvs) = uv_grid_strips(4, 3);
        let seg = segment_islands(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();

        assert_eq!(seg.islands.island_count(), 3);
        assert_eq!(
            seg.islands.island_of_face(),
            &[0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]
        );
    }

    #[test]
    fn parallel_matches_serial() {
        let (mesh, uvs) = uv_grid_strips(150, 100);
        let view = mesh.view(&uvs).unwrap();
        let serial = segment_islands(&view, &BakeParams::default().with_parallel(false)).unwrap();
        let parallel =
            segment_islands(&view, &BakeParams::default().with_parallel_threshold(1)).unwrap();

        assert_eq!(serial.islands, parallel.islands);
        assert_eq!(serial.islands.island_count(), 100);
    }

    #[test]
    fn continuous_grid_is_one_island() {
        let (mesh, uvs) = uv_grid(10, 10);
        let seg = segment_islands(&mesh.view(&uvs).unwrap(), &BakeParams::default()).unwrap();
        assert_eq!(seg.islands.island_count(), 1);
        assert_eq!(seg.islands.largest_island(), 100);
    }

    #[test]
    fn loop_range_past_arrays_is_an_error() {
        // Lengths agree, but the face claims four loops out of three
        let mesh = LoopMesh::from_flat(1, &[0], &[4], &[0, 1, 2], &[0.0; 6]).unwrap();
        let err = segment_islands(&mesh, &BakeParams::default()).unwrap_err();

        assert!(matches!(
            err,
            ColorIdError::Topology(LoopError::LoopRangeOutOfBounds { face: 0, .. })
        ));
    }

    #[test]
    fn overlapping_faces_are_an_error() {
        let mesh = LoopMesh::from_flat(2, &[0, 1], &[3, 3], &[0, 1, 2, 3], &[0.0; 8]).unwrap();
        assert!(matches!(
            segment_islands(&mesh, &BakeParams::default().with_parallel_threshold(1)),
            Err(ColorIdError::Topology(LoopError::LoopOverlap { .. }))
        ));
    }
}
