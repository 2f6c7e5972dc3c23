//! Error types for loop mesh construction and validation.

use thiserror::Error;

/// Result type for loop mesh operations.
pub type LoopResult<T> = Result<T, LoopError>;

/// Violations of the flat loop-array contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoopError {
    /// An input array does not have the length the other arrays imply.
    #[error("{array} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        array: &'static str,
        /// Length implied by the face or loop count.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// A face has no loops.
    #[error("face {face} has no loops")]
    EmptyFace {
        /// Index of the empty face.
        face: usize,
    },

    /// A face's loop range runs past the end of the loop arrays.
    #[error("face {face} loops out of bounds: start {start} + total {total} > {loop_count} loops")]
    LoopRangeOutOfBounds {
        /// Index of the face.
        face: usize,
        /// First loop of the face.
        start: u32,
        /// Number of loops in the face.
        total: u32,
        /// Total number of loops in the mesh.
        loop_count: usize,
    },

    /// Two faces claim the same loop.
    #[error("loop {corner} is claimed by faces {first} and {second}")]
    LoopOverlap {
        /// The shared loop index.
        corner: usize,
        /// The face that claimed the loop first.
        first: usize,
        /// The face that claimed it again.
        second: usize,
    },

    /// A loop belongs to no face.
    #[error("loop {corner} is not part of any face")]
    LoopUncovered {
        /// The orphaned loop index.
        corner: usize,
    },

    /// The mesh has more elements than 32-bit indices can address.
    #[error("{what} count {count} exceeds the 32-bit index range")]
    TooLarge {
        /// What overflowed (faces, loops).
        what: &'static str,
        /// The offending count.
        count: usize,
    },
}
