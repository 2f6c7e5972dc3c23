//! Borrowed view over flat loop arrays.
//!
//! A [`LoopMesh`] is the snapshot a host hands over for one call: per-face
//! loop ranges, per-loop vertex indices and per-loop UVs, all borrowed. No
//! data is copied when the view is built from slices the host already owns.

use std::ops::Range;

use crate::error::{LoopError, LoopResult};
use crate::traits::LoopTopology;
use crate::uv::Uv;

/// Sentinel owner for a loop not yet claimed by any face.
const UNOWNED: u32 = u32::MAX;

/// The loop range of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceLoops {
    /// Face index.
    pub face: usize,
    /// First loop of the face.
    pub start: usize,
    /// Number of loops in the face.
    pub count: usize,
}

impl FaceLoops {
    /// Loop indices of this face, in winding order.
    #[inline]
    #[must_use]
    pub fn corners(self) -> Range<usize> {
        self.start..self.start + self.count
    }

    /// The loop that follows `corner` around this face.
    ///
    /// `corner` must be one of this face's loops.
    #[inline]
    #[must_use]
    pub fn next_corner(self, corner: usize) -> usize {
        self.start + (corner - self.start + 1) % self.count
    }

    /// Iterate over the directed edges of this face as `(loop, next_loop)` pairs.
    pub fn edges(self) -> impl Iterator<Item = (usize, usize)> {
        self.corners().map(move |corner| (corner, self.next_corner(corner)))
    }
}

/// Read-only view of one mesh and one UV layer as flat arrays.
///
/// Construction checks array lengths only. Call [`LoopMesh::corner_owners`]
/// to check that the loop ranges are in bounds and partition the loop set.
///
/// # Example
///
/// ```
/// use mesh_loops::{LoopMesh, LoopTopology};
///
/// // Two triangles sharing the edge (1, 2)
/// let starts = [0, 3];
/// let totals = [3, 3];
/// let verts = [0, 1, 2, 2, 1, 3];
/// let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0];
///
/// let mesh = LoopMesh::from_flat(2, &starts, &totals, &verts, &uvs).unwrap();
/// assert_eq!(mesh.face_count(), 2);
/// assert_eq!(mesh.loop_count(), 6);
/// assert!(mesh.corner_owners().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoopMesh<'a> {
    loop_starts: &'a [u32],
    loop_totals: &'a [u32],
    vertex_indices: &'a [u32],
    uvs: &'a [Uv],
}

impl<'a> LoopMesh<'a> {
    /// Build a view, checking that every array has the length the face
    /// count and loop count imply.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::LengthMismatch`] when an array has the wrong
    /// length, or [`LoopError::TooLarge`] when the counts do not fit in
    /// 32-bit indices.
    pub fn new(
        face_count: usize,
        loop_starts: &'a [u32],
        loop_totals: &'a [u32],
        vertex_indices: &'a [u32],
        uvs: &'a [Uv],
    ) -> LoopResult<Self> {
        check_len("loop_starts", face_count, loop_starts.len())?;
        check_len("loop_totals", face_count, loop_totals.len())?;
        check_len("uv_coords", vertex_indices.len(), uvs.len())?;
        check_index_range("face", face_count)?;
        check_index_range("loop", vertex_indices.len())?;

        Ok(Self {
            loop_starts,
            loop_totals,
            vertex_indices,
            uvs,
        })
    }

    /// Build a view from an interleaved `[u, v, u, v, ...]` UV buffer.
    ///
    /// The buffer is reinterpreted in place, not copied.
    ///
    /// # Errors
    ///
    /// Same as [`LoopMesh::new`]; a UV buffer whose length is not exactly
    /// twice the loop count is a [`LoopError::LengthMismatch`].
    pub fn from_flat(
        face_count: usize,
        loop_starts: &'a [u32],
        loop_totals: &'a [u32],
        vertex_indices: &'a [u32],
        uv_coords: &'a [f32],
    ) -> LoopResult<Self> {
        let expected = vertex_indices.len().saturating_mul(2);
        let uvs = Uv::cast_slice(uv_coords)
            .filter(|_| uv_coords.len() == expected)
            .ok_or(LoopError::LengthMismatch {
                array: "uv_coords",
                expected,
                actual: uv_coords.len(),
            })?;
        Self::new(face_count, loop_starts, loop_totals, vertex_indices, uvs)
    }

    /// Per-face first loop indices.
    #[inline]
    #[must_use]
    pub fn loop_starts(&self) -> &'a [u32] {
        self.loop_starts
    }

    /// Per-face loop counts.
    #[inline]
    #[must_use]
    pub fn loop_totals(&self) -> &'a [u32] {
        self.loop_totals
    }

    /// Per-loop vertex indices.
    #[inline]
    #[must_use]
    pub fn vertex_indices(&self) -> &'a [u32] {
        self.vertex_indices
    }

    /// Per-loop UV coordinates.
    #[inline]
    #[must_use]
    pub fn uvs(&self) -> &'a [Uv] {
        self.uvs
    }

    /// UV coordinate of one loop.
    #[inline]
    #[must_use]
    pub fn uv(&self, corner: usize) -> Option<Uv> {
        self.uvs.get(corner).copied()
    }

    /// Check the loop ranges and return the owning face of every loop.
    ///
    /// Every face must have at least one loop, every range must lie inside
    /// the loop arrays, and the ranges must partition the loop set: each
    /// loop is owned by exactly one face.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning faces in order.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::{LoopError, LoopMesh, Uv};
    ///
    /// let uvs = [Uv::default(); 3];
    /// let mesh = LoopMesh::new(1, &[0], &[4], &[0, 1, 2], &uvs).unwrap();
    /// assert!(matches!(
    ///     mesh.corner_owners(),
    ///     Err(LoopError::LoopRangeOutOfBounds { face: 0, .. })
    /// ));
    /// ```
    pub fn corner_owners(&self) -> LoopResult<Vec<u32>> {
        let loop_count = self.vertex_indices.len();
        let mut owners = vec![UNOWNED; loop_count];

        for (face, (&start, &total)) in self.loop_starts.iter().zip(self.loop_totals).enumerate() {
            if total == 0 {
                return Err(LoopError::EmptyFace { face });
            }
            let begin = start as usize;
            let end = begin + total as usize;
            if end > loop_count {
                return Err(LoopError::LoopRangeOutOfBounds {
                    face,
                    start,
                    total,
                    loop_count,
                });
            }

            #[allow(clippy::cast_possible_truncation)]
            // Face count was checked against the 32-bit range in `new`
            let owner = face as u32;
            for (offset, slot) in owners[begin..end].iter_mut().enumerate() {
                if *slot != UNOWNED {
                    return Err(LoopError::LoopOverlap {
                        corner: begin + offset,
                        first: *slot as usize,
                        second: face,
                    });
                }
                *slot = owner;
            }
        }

        if let Some(corner) = owners.iter().position(|&owner| owner == UNOWNED) {
            return Err(LoopError::LoopUncovered { corner });
        }

        Ok(owners)
    }
}

impl LoopTopology for LoopMesh<'_> {
    fn face_count(&self) -> usize {
        self.loop_starts.len()
    }

    fn loop_count(&self) -> usize {
        self.vertex_indices.len()
    }

    fn face_loops(&self, face: usize) -> Option<FaceLoops> {
        let start = *self.loop_starts.get(face)?;
        let count = *self.loop_totals.get(face)?;
        Some(FaceLoops {
            face,
            start: start as usize,
            count: count as usize,
        })
    }

    fn corner_vertex(&self, corner: usize) -> Option<u32> {
        self.vertex_indices.get(corner).copied()
    }
}

fn check_len(array: &'static str, expected: usize, actual: usize) -> LoopResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LoopError::LengthMismatch {
            array,
            expected,
            actual,
        })
    }
}

fn check_index_range(what: &'static str, count: usize) -> LoopResult<()> {
    // u32::MAX itself is reserved as the "unowned" sentinel
    if count < UNOWNED as usize {
        Ok(())
    } else {
        Err(LoopError::TooLarge { what, count })
    }
}
