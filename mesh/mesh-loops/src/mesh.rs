//! Owned polygon mesh with loop topology.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LoopResult;
use crate::traits::LoopTopology;
use crate::uv::Uv;
use crate::view::{FaceLoops, LoopMesh};

/// An owned polygon mesh stored as flat loop arrays.
///
/// Faces are arbitrary polygons. Face `f` owns the loops
/// `loop_starts[f] .. loop_starts[f] + loop_totals[f]`, and every loop
/// references one vertex. UV layers live outside the mesh, one `Uv` per
/// loop, and are paired with it through [`PolyMesh::view`].
///
/// # Example
///
/// ```
/// use mesh_loops::{LoopTopology, PolyMesh, Point3};
///
/// let mut mesh = PolyMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[a, b, c]);
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.loop_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// First loop of each face.
    pub loop_starts: Vec<u32>,
    /// Number of loops of each face.
    pub loop_totals: Vec<u32>,
    /// Vertex index of each loop.
    pub vertex_indices: Vec<u32>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            loop_starts: Vec::new(),
            loop_totals: Vec::new(),
            vertex_indices: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize, loop_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            loop_starts: Vec::with_capacity(face_count),
            loop_totals: Vec::with_capacity(face_count),
            vertex_indices: Vec::with_capacity(loop_count),
        }
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)]
    // Meshes beyond u32::MAX vertices are rejected by LoopMesh::new
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Append a polygon given its vertex indices in winding order and
    /// return the new face index.
    ///
    /// The face's loops are appended contiguously after the existing ones.
    #[allow(clippy::cast_possible_truncation)]
    // Meshes beyond u32::MAX loops are rejected by LoopMesh::new
    pub fn add_face(&mut self, vertices: &[u32]) -> usize {
        self.loop_starts.push(self.vertex_indices.len() as u32);
        self.loop_totals.push(vertices.len() as u32);
        self.vertex_indices.extend_from_slice(vertices);
        self.loop_starts.len() - 1
    }

    /// Pair this mesh with a per-loop UV layer.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::LengthMismatch`](crate::LoopError::LengthMismatch)
    /// if `uvs` does not have one entry per loop.
    pub fn view<'a>(&'a self, uvs: &'a [Uv]) -> LoopResult<LoopMesh<'a>> {
        LoopMesh::new(
            self.loop_starts.len(),
            &self.loop_starts,
            &self.loop_totals,
            &self.vertex_indices,
            uvs,
        )
    }

    /// Position of the vertex referenced by a loop.
    #[must_use]
    pub fn corner_position(&self, corner: usize) -> Option<Point3<f64>> {
        let vertex = *self.vertex_indices.get(corner)?;
        self.positions.get(vertex as usize).copied()
    }
}

impl LoopTopology for PolyMesh {
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

/// Create a unit cube built from six quads.
///
/// The cube spans from (0, 0, 0) to (1, 1, 1). Faces are ordered bottom,
/// top, front, back, left, right, each with four loops and CCW winding
/// seen from outside, for 24 loops in total.
///
/// # Example
///
/// ```
/// use mesh_loops::{quad_cube, LoopTopology};
///
/// let cube = quad_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 6);
/// assert_eq!(cube.loop_count(), 24);
/// ```
#[must_use]
pub fn quad_cube() -> PolyMesh {
    let mut mesh = PolyMesh::with_capacity(8, 6, 24);

    for (x, y, z) in [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ] {
        mesh.add_vertex(Point3::new(x, y, z));
    }

    for face in CUBE_QUADS {
        mesh.add_face(&face);
    }

    mesh
}

const CUBE_QUADS: [[u32; 4]; 6] = [
    [0, 3, 2, 1], // bottom (z=0)
    [4, 5, 6, 7], // top (z=1)
    [0, 1, 5, 4], // front (y=0)
    [3, 7, 6, 2], // back (y=1)
    [0, 4, 7, 3], // left (x=0)
    [1, 2, 6, 5], // right (x=1)
];

/// UV layout for [`quad_cube`] with every face on its own tile.
///
/// Faces are packed into a 3 x 2 atlas with a margin between tiles, so no
/// two faces share a UV coordinate and the cube has six islands.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cube_uvs_per_face() -> Vec<Uv> {
    const MARGIN: f32 = 0.02;
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

    (0..6_u32)
        .flat_map(|face| {
            let col = (face % 3) as f32;
            let row = (face / 3) as f32;
            corners.iter().map(move |&(cu, cv): &(f32, f32)| {
                let u = (col + MARGIN + cu * (1.0 - 2.0 * MARGIN)) / 3.0;
                let v = (row + MARGIN + cv * (1.0 - 2.0 * MARGIN)) / 2.0;
                Uv::new(u, v)
            })
        })
        .collect()
}

/// UV layout for [`quad_cube`] as a single cross-shaped unfolding.
///
/// The front face sits in the middle, top and back are stacked above it,
/// bottom below, left and right beside it. Every face stays connected to
/// the front face through shared UV edges, so the cube is one island.
#[must_use]
pub fn cube_uvs_cross() -> Vec<Uv> {
    // Grid units, in each face's loop order (see CUBE_QUADS)
    const CROSS: [[(f32, f32); 4]; 6] = [
        [(1.0, 1.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)], // bottom
        [(1.0, 2.0), (2.0, 2.0), (2.0, 3.0), (1.0, 3.0)], // top
        [(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)], // front
        [(1.0, 4.0), (1.0, 3.0), (2.0, 3.0), (2.0, 4.0)], // back
        [(1.0, 1.0), (1.0, 2.0), (0.0, 2.0), (0.0, 1.0)], // left
        [(2.0, 1.0), (3.0, 1.0), (3.0, 2.0), (2.0, 2.0)], // right
    ];

    CROSS
        .iter()
        .flatten()
        .map(|&(u, v)| Uv::new(u * 0.25, v * 0.25))
        .collect()
}

/// Create a flat `nx` x `ny` quad grid with one continuous UV layout.
///
/// Vertices lie on the z=0 plane at integer coordinates; UVs map the grid
/// onto the unit square. Quads are emitted row by row.
///
/// # Example
///
/// ```
/// use mesh_loops::{uv_grid, LoopTopology};
///
/// let (mesh, uvs) = uv_grid(4, 3);
/// assert_eq!(mesh.face_count(), 12);
/// assert_eq!(uvs.len(), 48);
/// ```
#[must_use]
pub fn uv_grid(nx: u32, ny: u32) -> (PolyMesh, Vec<Uv>) {
    build_grid(nx, ny, |_| 0.0)
}

/// Create a flat `nx` x `ny` quad grid where every row is its own island.
///
/// Each row's UVs are shifted upward by its row index, so the edges
/// between rows are seams and the grid has `ny` islands forming a chain.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn uv_grid_strips(nx: u32, ny: u32) -> (PolyMesh, Vec<Uv>) {
    build_grid(nx, ny, |row| row as f32)
}

#[allow(clippy::cast_precision_loss)]
fn build_grid(nx: u32, ny: u32, row_offset: impl Fn(u32) -> f32) -> (PolyMesh, Vec<Uv>) {
    let stride = nx + 1;
    let face_count = (nx as usize) * (ny as usize);
    let mut mesh = PolyMesh::with_capacity(
        (stride as usize) * (ny as usize + 1),
        face_count,
        face_count * 4,
    );
    let mut uvs = Vec::with_capacity(face_count * 4);

    for y in 0..=ny {
        for x in 0..=nx {
            mesh.add_vertex(Point3::new(f64::from(x), f64::from(y), 0.0));
        }
    }

    let (fx, fy) = (nx.max(1) as f32, ny.max(1) as f32);
    for row in 0..ny {
        let offset = row_offset(row);
        for col in 0..nx {
            let corners = [(col, row), (col + 1, row), (col + 1, row + 1), (col, row + 1)];
            let verts = corners.map(|(x, y)| y * stride + x);
            mesh.add_face(&verts);
            uvs.extend(
                corners
                    .iter()
                    .map(|&(x, y)| Uv::new(x as f32 / fx, y as f32 / fy + offset)),
            );
        }
    }

    (mesh, uvs)
}
