//! Bake statistics.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Summary of one Color-ID bake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BakeReport {
    /// Number of faces.
    pub face_count: usize,
    /// Number of loops (corners).
    pub loop_count: usize,
    /// Number of distinct mesh edges.
    pub edge_count: usize,

    /// Number of UV islands.
    pub island_count: usize,
    /// Faces in the largest island.
    pub largest_island: usize,
    /// Face pairs split by a UV seam.
    pub seam_pair_count: usize,
    /// Island pairs that touch across a seam.
    pub adjacency_pair_count: usize,
    /// Most neighbors any island has.
    pub max_degree: usize,
    /// Palette slots in use.
    pub distinct_colors: usize,

    /// Edges used by exactly one face.
    pub boundary_edge_count: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edge_count: usize,
    /// Whether the parallel code paths ran.
    pub parallel: bool,
}

impl BakeReport {
    /// Whether every island got its own color.
    #[must_use]
    pub fn all_colors_unique(&self) -> bool {
        self.distinct_colors == self.island_count
    }

    /// Whether the mesh is one UV island.
    #[must_use]
    pub fn is_single_island(&self) -> bool {
        self.island_count == 1
    }
}

impl std::fmt::Display for BakeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Color-ID Bake Report:")?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Loops: {}", self.loop_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f)?;
        writeln!(f, "  Islands:")?;
        writeln!(f, "    Count: {}", self.island_count)?;
        writeln!(f, "    Largest: {} faces", self.largest_island)?;
        writeln!(f, "    Seam face pairs: {}", self.seam_pair_count)?;
        writeln!(f, "    Adjacent island pairs: {}", self.adjacency_pair_count)?;
        writeln!(f, "    Max neighbors: {}", self.max_degree)?;
        writeln!(f, "    Distinct colors: {}", self.distinct_colors)?;

        if self.boundary_edge_count > 0 || self.non_manifold_edge_count > 0 {
            writeln!(f)?;
            writeln!(f, "  Topology:")?;
            if self.boundary_edge_count > 0 {
                writeln!(f, "    Boundary edges: {}", self.boundary_edge_count)?;
            }
            if self.non_manifold_edge_count > 0 {
                writeln!(
                    f,
                    "    Non-manifold edges: {}",
                    self.non_manifold_edge_count
                )?;
            }
        }

        write!(
            f,
            "  Mode: {}",
            if self.parallel { "Parallel" } else { "Serial" }
        )
    }
}
