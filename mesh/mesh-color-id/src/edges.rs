//! Shared-edge scan.
//!
//! Every face edge is keyed by its two vertex indices (order-independent).
//! When a key is seen again, the new sighting is resolved against every
//! earlier sighting of the same key: if both faces agree on the UV at each
//! end of the edge the faces are joined, otherwise the edge is a seam.
//! Boundary edges (one sighting) resolve to nothing.

use std::ops::Range;

use hashbrown::HashMap;
use mesh_loops::{LoopMesh, LoopTopology, Uv};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::ColorIdResult;

/// Faces per work unit when bucketing edges in parallel.
const PARALLEL_CHUNK_FACES: usize = 8_192;

/// An undirected mesh edge, normalized so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    /// Smaller vertex index.
    pub min: u32,
    /// Larger vertex index.
    pub max: u32,
}

impl EdgeKey {
    /// Create a key from two vertex indices in either order.
    #[inline]
    #[must_use]
    pub fn new(v0: u32, v1: u32) -> Self {
        if v0 < v1 {
            Self { min: v0, max: v1 }
        } else {
            Self { min: v1, max: v0 }
        }
    }

    /// Whether both ends are the same vertex.
    #[inline]
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    #[inline]
    fn shard(self, shard_bits: u32) -> usize {
        let packed = (u64::from(self.min) << 32) | u64::from(self.max);
        // Fibonacci hashing; the top bits are the best mixed
        #[allow(clippy::cast_possible_truncation)]
        let shard = (packed.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> (64 - shard_bits)) as usize;
        shard
    }
}

/// One face's sighting of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    /// The face the edge belongs to.
    pub face: u32,
    /// The face's loop at the edge's `min` vertex.
    pub lo_corner: u32,
    /// The face's loop at the edge's `max` vertex.
    pub hi_corner: u32,
}

/// Resolved shared edges of a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeScan {
    /// Face pairs sharing an edge with matching UVs on both ends.
    pub joins: Vec<(u32, u32)>,
    /// Face pairs sharing an edge whose UVs differ (seams).
    pub seams: Vec<(u32, u32)>,
    /// Number of distinct non-degenerate edges.
    pub edge_count: usize,
    /// Edges seen by exactly one face.
    pub boundary_edge_count: usize,
    /// Edges seen by more than two faces.
    pub non_manifold_edge_count: usize,
}

impl EdgeScan {
    fn absorb(&mut self, other: Self) {
        self.joins.extend(other.joins);
        self.seams.extend(other.seams);
        self.edge_count += other.edge_count;
        self.boundary_edge_count += other.boundary_edge_count;
        self.non_manifold_edge_count += other.non_manifold_edge_count;
    }
}

/// Scan all edges of `mesh`, comparing UVs with `epsilon`.
///
/// With `parallel`, edges are bucketed into shards by key hash and each
/// shard is resolved on its own thread; the result holds the same pairs as
/// the serial scan, possibly in a different order.
///
/// # Errors
///
/// Returns [`ColorIdError::Topology`](crate::ColorIdError::Topology) when
/// the loop ranges do not partition the loop arrays.
pub fn scan_edges(mesh: &LoopMesh<'_>, epsilon: f32, parallel: bool) -> ColorIdResult<EdgeScan> {
    mesh.corner_owners()?;
    Ok(scan_checked(mesh, epsilon, parallel))
}

/// [`scan_edges`] for a mesh whose loop ranges passed
/// [`LoopMesh::corner_owners`].
pub(crate) fn scan_checked(mesh: &LoopMesh<'_>, epsilon: f32, parallel: bool) -> EdgeScan {
    if parallel && mesh.face_count() > PARALLEL_CHUNK_FACES {
        scan_sharded(mesh, epsilon)
    } else {
        resolve(face_edges(mesh, 0..mesh.face_count()), mesh.uvs(), epsilon)
    }
}

/// Iterate over the non-degenerate edges of a range of faces.
fn face_edges<'m>(
    mesh: &'m LoopMesh<'_>,
    faces: Range<usize>,
) -> impl Iterator<Item = (EdgeKey, EdgeRef)> + 'm {
    let verts = mesh.vertex_indices();
    faces
        .filter_map(move |face| mesh.face_loops(face))
        .flat_map(|loops| loops.edges().map(move |edge| (loops.face, edge)))
        .filter_map(move |(face, (curr, next))| {
            let (v_curr, v_next) = (verts[curr], verts[next]);
            let key = EdgeKey::new(v_curr, v_next);
            if key.is_degenerate() {
                return None;
            }
            let (lo, hi) = if v_curr < v_next { (curr, next) } else { (next, curr) };
            #[allow(clippy::cast_possible_truncation)]
            // Face and loop counts were checked against the u32 range
            let edge = EdgeRef {
                face: face as u32,
                lo_corner: lo as u32,
                hi_corner: hi as u32,
            };
            Some((key, edge))
        })
}

/// Resolve a stream of edge sightings with a local edge map.
fn resolve(
    sightings: impl IntoIterator<Item = (EdgeKey, EdgeRef)>,
    uvs: &[Uv],
    epsilon: f32,
) -> EdgeScan {
    let sightings = sightings.into_iter();
    let mut edge_map: HashMap<EdgeKey, SmallVec<[EdgeRef; 2]>> =
        HashMap::with_capacity(sightings.size_hint().0 / 2);
    let mut scan = EdgeScan::default();

    for (key, edge) in sightings {
        let seen = edge_map.entry(key).or_default();
        // Manifold edges compare once; non-manifold edges compare all pairs
        for prior in seen.iter() {
            if prior.face == edge.face {
                continue;
            }
            if edge_uvs_match(prior, &edge, uvs, epsilon) {
                scan.joins.push((prior.face, edge.face));
            } else {
                scan.seams.push((prior.face, edge.face));
            }
        }
        seen.push(edge);
    }

    scan.edge_count = edge_map.len();
    for seen in edge_map.values() {
        match seen.len() {
            1 => scan.boundary_edge_count += 1,
            n if n > 2 => scan.non_manifold_edge_count += 1,
            _ => {}
        }
    }
    scan
}

#[inline]
fn edge_uvs_match(a: &EdgeRef, b: &EdgeRef, uvs: &[Uv], epsilon: f32) -> bool {
    let uv = |corner: u32| uvs[corner as usize];
    uv(a.lo_corner).matches(uv(b.lo_corner), epsilon)
        && uv(a.hi_corner).matches(uv(b.hi_corner), epsilon)
}

/// Parallel scan: bucket sightings by key hash, resolve shards independently,
/// then concatenate the shard results in shard order.
fn scan_sharded(mesh: &LoopMesh<'_>, epsilon: f32) -> EdgeScan {
    let shard_bits = (rayon::current_num_threads() * 4)
        .next_power_of_two()
        .trailing_zeros()
        .max(1);
    let shard_count = 1_usize << shard_bits;
    let face_count = mesh.face_count();

    let chunks: Vec<Range<usize>> = (0..face_count)
        .step_by(PARALLEL_CHUNK_FACES)
        .map(|start| start..(start + PARALLEL_CHUNK_FACES).min(face_count))
        .collect();

    // Phase 1: every chunk sorts its own sightings into shard buckets
    let buckets: Vec<Vec<Vec<(EdgeKey, EdgeRef)>>> = chunks
        .into_par_iter()
        .map(|faces| {
            let mut local = vec![Vec::new(); shard_count];
            for (key, edge) in face_edges(mesh, faces) {
                local[key.shard(shard_bits)].push((key, edge));
            }
            local
        })
        .collect();

    // Phase 2: every shard owns a disjoint key set and resolves it alone
    let shard_scans: Vec<EdgeScan> = (0..shard_count)
        .into_par_iter()
        .map(|shard| {
            let sightings = buckets
                .iter()
                .flat_map(|chunk| chunk[shard].iter().copied());
            resolve(sightings, mesh.uvs(), epsilon)
        })
        .collect();

    // Phase 3: serial reconciliation
    let mut scan = EdgeScan::default();
    for shard_scan in shard_scans {
        scan.absorb(shard_scan);
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_loops::uv_grid_strips;

    fn two_triangles(uvs: &[f32]) -> EdgeScan {
        let mesh = LoopMesh::from_flat(2, &[0, 3], &[3, 3], &[0, 1, 2, 2, 1, 3], uvs).unwrap();
        scan_edges(&mesh, 1e-4, false).unwrap()
    }

    #[test]
    fn edge_direction_normalization() {
        let k1 = EdgeKey::new(10, 20);
        let k2 = EdgeKey::new(20, 10);
        assert_eq!(k1, k2);
        assert_eq!(k1.min, 10);
        assert_eq!(k1.max, 20);
    }

    #[test]
    fn degenerate_key() {
        assert!(EdgeKey::new(3, 3).is_degenerate());
        assert!(!EdgeKey::new(3, 4).is_degenerate());
    }

    #[test]
    fn continuous_shared_edge_joins() {
        let scan = two_triangles(&[
            0.0, 0.0, 1.0, 0.0, 0.0, 1.0, // face 0 (v0, v1, v2)
            0.0, 1.0, 1.0, 0.0, 1.0, 1.0, // face 1 (v2, v1, v3)
        ]);
        assert_eq!(scan.joins, vec![(0, 1)]);
        assert!(scan.seams.is_empty());
        assert_eq!(scan.edge_count, 5);
        assert_eq!(scan.boundary_edge_count, 4);
    }

    #[test]
    fn split_shared_edge_is_seam() {
        let scan = two_triangles(&[
            0.0, 0.0, 0.1, 0.0, 0.0, 0.1, // face 0
            0.8, 0.8, 0.9, 0.8, 0.8, 0.9, // face 1, far away
        ]);
        assert!(scan.joins.is_empty());
        assert_eq!(scan.seams, vec![(0, 1)]);
    }

    #[test]
    fn one_matching_end_is_still_a_seam() {
        // v1 agrees, v2 does not
        let scan = two_triangles(&[
            0.0, 0.0, 1.0, 0.0, 0.0, 1.0, // face 0
            0.5, 0.5, 1.0, 0.0, 1.0, 1.0, // face 1
        ]);
        assert_eq!(scan.seams, vec![(0, 1)]);
    }

    #[test]
    fn non_manifold_edge_compares_all_pairs() {
        // Three triangles on edge (0, 1); faces 1 and 2 agree, face 0 does not
        let uvs = [
            0.0, 0.0, 1.0, 0.0, 0.0, 1.0, // face 0
            5.0, 5.0, 6.0, 5.0, 5.0, 6.0, // face 1
            5.0, 5.0, 6.0, 5.0, 6.0, 6.0, // face 2
        ];
        let mesh =
            LoopMesh::from_flat(3, &[0, 3, 6], &[3, 3, 3], &[0, 1, 2, 0, 1, 3, 0, 1, 4], &uvs)
                .unwrap();
        let scan = scan_edges(&mesh, 1e-4, false).unwrap();

        assert_eq!(scan.non_manifold_edge_count, 1);
        assert_eq!(scan.joins, vec![(1, 2)]);
        assert_eq!(scan.seams.len(), 2);
    }

    #[test]
    fn degenerate_edges_are_skipped() {
        // Face with a repeated vertex: loops (0, 0, 1)
        let uvs = [0.0; 6];
        let mesh = LoopMesh::from_flat(1, &[0], &[3], &[0, 0, 1], &uvs).unwrap();
        let scan = scan_edges(&mesh, 1e-4, false).unwrap();

        assert_eq!(scan.edge_count, 1);
        assert!(scan.joins.is_empty());
    }

    #[test]
    fn sharded_scan_matches_serial() {
        let (mesh, uvs) = uv_grid_strips(160, 120);
        let view = mesh.view(&uvs).unwrap();

        let serial = scan_edges(&view, 1e-4, false).unwrap();
        let sharded = scan_sharded(&view, 1e-4);

        let normalize = |pairs: &[(u32, u32)]| {
            let mut pairs: Vec<_> = pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
            pairs.sort_unstable();
            pairs
        };
        assert_eq!(normalize(&serial.joins), normalize(&sharded.joins));
        assert_eq!(normalize(&serial.seams), normalize(&sharded.seams));
        assert_eq!(serial.edge_count, sharded.edge_count);
        assert_eq!(serial.boundary_edge_count, sharded.boundary_edge_count);
        assert_eq!(serial.seams.len(), 160 * 119);
    }

    #[test]
    fn out_of_range_face_fails_instead_of_reading_past_the_end() {
        let mesh = LoopMesh::from_flat(1, &[0], &[4], &[0, 1, 2], &[0.0; 6]).unwrap();
        assert!(scan_edges(&mesh, 1e-4, false).is_err());
        assert!(scan_edges(&mesh, 1e-4, true).is_err());
    }
}
