//! Traits for loop-based meshes.

use crate::FaceLoops;

/// Trait for types that expose polygon loop topology.
///
/// This is the minimal read-only interface shared by the borrowed
/// [`LoopMesh`](crate::LoopMesh) view and the owned
/// [`PolyMesh`](crate::PolyMesh), so that topology helpers work on either.
pub trait LoopTopology {
    /// Get the number of faces.
    fn face_count(&self) -> usize;

    /// Get the number of loops (corners).
    fn loop_count(&self) -> usize;

    /// Check if the mesh has no faces.
    fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Get the loop range of a face.
    ///
    /// Returns `None` if the face index is out of bounds.
    fn face_loops(&self, face: usize) -> Option<FaceLoops>;

    /// Get the vertex referenced by a loop.
    ///
    /// Returns `None` if the loop index is out of bounds.
    fn corner_vertex(&self, corner: usize) -> Option<u32>;

    /// Iterate over the loop ranges of all faces, in face order.
    fn faces(&self) -> impl Iterator<Item = FaceLoops> {
        (0..self.face_count()).filter_map(|face| self.face_loops(face))
    }

    /// Iterate over the vertex indices of one face in loop order.
    ///
    /// Yields nothing for an out-of-range face.
    fn face_vertices(&self, face: usize) -> impl Iterator<Item = u32> {
        self.face_loops(face)
            .into_iter()
            .flat_map(FaceLoops::corners)
            .filter_map(|corner| self.corner_vertex(corner))
    }
}
