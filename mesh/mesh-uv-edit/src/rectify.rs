//! Rectify: square up a selection of quads in UV space.
//!
//! The active face is pinned to the unit square (or the lower-left half of
//! it for a triangle). The layout then spreads to edge-connected selected
//! quads: each neighbor copies the shared edge and mirrors the active
//! side's far edge across it, so a strip of quads unrolls into a regular
//! grid with every cell the same size. Finally the whole selection,
//! including faces the layout never reached, is scaled to fill `0..1` or
//! its original bounding box.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use mesh_color_id::EdgeKey;
use mesh_loops::{LoopTopology, PolyMesh, Uv};
use smallvec::SmallVec;
use tracing::debug;

use crate::edit_mesh::EditMesh;
use crate::error::{EditError, EditResult};

const QUAD_PIN: [Uv; 4] = [
    Uv { u: 0.0, v: 0.0 },
    Uv { u: 1.0, v: 0.0 },
    Uv { u: 1.0, v: 1.0 },
    Uv { u: 0.0, v: 1.0 },
];

const TRIANGLE_PIN: [Uv; 3] = [
    Uv { u: 0.0, v: 0.0 },
    Uv { u: 1.0, v: 0.0 },
    Uv { u: 0.0, v: 1.0 },
];

/// Result of a rectify run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectifyOutcome {
    /// The face the layout was anchored on.
    pub active_face: usize,
    /// Faces whose UVs were rewritten, in visit order.
    pub rectified: Vec<usize>,
    /// Selected faces the layout could not reach.
    pub skipped: usize,
}

/// Axis-aligned UV bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UvBounds {
    min: Uv,
    max: Uv,
}

impl UvBounds {
    fn of(uvs: impl IntoIterator<Item = Uv>) -> Option<Self> {
        uvs.into_iter().fold(None, |bounds, uv| {
            let Some(b) = bounds else {
                return Some(Self { min: uv, max: uv });
            };
            Some(Self {
                min: Uv::new(b.min.u.min(uv.u), b.min.v.min(uv.v)),
                max: Uv::new(b.max.u.max(uv.u), b.max.v.max(uv.v)),
            })
        })
    }

    /// Width and height, with a collapsed axis counted as 1.
    fn span(self) -> (f32, f32) {
        let nonzero = |d: f32| if d > 0.0 { d } else { 1.0 };
        (nonzero(self.max.u - self.min.u), nonzero(self.max.v - self.min.v))
    }
}

/// Rectify the selected faces of the active UV layer.
///
/// With `keep_bounds` the result is fitted to the bounding box the
/// selection had before, instead of `0..1`.
///
/// # Errors
///
/// - [`EditError::InvalidTarget`] if the mesh has no active UV layer
/// - [`EditError::Selection`] if no face is selected
/// - [`EditError::UnsupportedFace`] if the active face is neither a quad
///   nor a triangle
///
/// # Example
///
/// ```
/// use mesh_loops::uv_grid;
/// use mesh_uv_edit::{EditMesh, rectify_selection};
///
/// let (grid, uvs) = uv_grid(3, 1);
/// let mut mesh = EditMesh::new(grid);
/// mesh.add_uv_layer("UVMap", uvs).unwrap();
/// mesh.select_all_faces();
///
/// let outcome = rectify_selection(&mut mesh, false).unwrap();
/// assert_eq!(outcome.rectified.len(), 3);
/// ```
pub fn rectify_selection(mesh: &mut EditMesh, keep_bounds: bool) -> EditResult<RectifyOutcome> {
    let selected = mesh.selected_faces();
    let active_face = pick_active_face(mesh, &selected)?;

    let (poly, uvs) = mesh.active_uvs_mut().ok_or(EditError::InvalidTarget {
        reason: "No UV Map found",
    })?;

    let corners = poly.face_loops(active_face).map_or(0, |f| f.count);
    let rectified = match corners {
        4 => {
            let original = face_bounds(poly, uvs, &selected);
            pin(poly, uvs, active_face, &QUAD_PIN);
            let visited = follow_quads(poly, uvs, active_face, &selected);
            normalize(poly, uvs, &selected, keep_bounds.then_some(original).flatten());
            visited
        }
        3 => {
            let original = face_bounds(poly, uvs, &selected);
            pin(poly, uvs, active_face, &TRIANGLE_PIN);
            normalize(poly, uvs, &selected, keep_bounds.then_some(original).flatten());
            vec![active_face]
        }
        _ => {
            return Err(EditError::UnsupportedFace {
                face: active_face,
                corners,
            });
        }
    };

    let skipped = selected.len().saturating_sub(rectified.len());
    debug!(
        active_face,
        rectified = rectified.len(),
        skipped,
        keep_bounds,
        "UV rectify"
    );
    Ok(RectifyOutcome {
        active_face,
        rectified,
        skipped,
    })
}

/// The active face if it is a selected quad, else the first selected quad,
/// else the active or first selected face.
fn pick_active_face(mesh: &EditMesh, selected: &[usize]) -> EditResult<usize> {
    let is_quad = |face: usize| mesh.mesh().face_loops(face).is_some_and(|f| f.count == 4);
    let active = mesh.active_face().filter(|&f| mesh.is_face_selected(f));

    active
        .filter(|&f| is_quad(f))
        .or_else(|| selected.iter().copied().find(|&f| is_quad(f)))
        .or(active)
        .or_else(|| selected.first().copied())
        .ok_or_else(|| EditError::selection("Select connected Quad faces."))
}

fn face_bounds(poly: &PolyMesh, uvs: &[Uv], faces: &[usize]) -> Option<UvBounds> {
    UvBounds::of(
        faces
            .iter()
            .filter_map(|&face| poly.face_loops(face))
            .flat_map(|f| f.corners())
            .map(|corner| uvs[corner]),
    )
}

fn pin(poly: &PolyMesh, uvs: &mut [Uv], face: usize, shape: &[Uv]) {
    if let Some(loops) = poly.face_loops(face) {
        for (corner, &uv) in loops.corners().zip(shape) {
            uvs[corner] = uv;
        }
    }
}

/// Breadth-first walk over edge-connected selected quads, laying each one
/// out from the face it was reached through. Returns the faces in visit
/// order, starting with `start`.
fn follow_quads(poly: &PolyMesh, uvs: &mut [Uv], start: usize, selected: &[usize]) -> Vec<usize> {
    let quads: Vec<usize> = selected
        .iter()
        .copied()
        .filter(|&f| poly.face_loops(f).is_some_and(|l| l.count == 4))
        .collect();

    let mut edge_faces: HashMap<EdgeKey, SmallVec<[usize; 2]>> = HashMap::new();
    for &face in &quads {
        for (a, b) in poly.face_loops(face).into_iter().flat_map(|f| f.edges()) {
            let key = EdgeKey::new(poly.vertex_indices[a], poly.vertex_indices[b]);
            if !key.is_degenerate() {
                edge_faces.entry(key).or_default().push(face);
            }
        }
    }

    let mut visited = vec![start];
    let mut seen: HashSet<usize> = std::iter::once(start).collect();
    let mut queue = VecDeque::from([start]);

    while let Some(face) = queue.pop_front() {
        let Some(loops) = poly.face_loops(face) else {
            continue;
        };
        let base = loops.start;
        for i in 0..4 {
            let (pa, pb) = (base + i, base + (i + 1) % 4);
            let (pfa, pfb) = (base + (i + 3) % 4, base + (i + 2) % 4);
            let (va, vb) = (poly.vertex_indices[pa], poly.vertex_indices[pb]);

            let Some(neighbors) = edge_faces.get(&EdgeKey::new(va, vb)) else {
                continue;
            };
            for &next in neighbors {
                if !seen.insert(next) {
                    continue;
                }
                let Some(q) = poly.face_loops(next) else {
                    continue;
                };
                let local = |v: u32| q.corners().position(|c| poly.vertex_indices[c] == v);
                let (Some(ja), Some(jb)) = (local(va), local(vb)) else {
                    continue;
                };
                let far = |j: usize, other: usize| {
                    if (j + 1) % 4 == other {
                        (j + 3) % 4
                    } else {
                        (j + 1) % 4
                    }
                };
                let (jfa, jfb) = (far(ja, jb), far(jb, ja));

                let (a, b) = (uvs[pa], uvs[pb]);
                uvs[q.start + ja] = a;
                uvs[q.start + jb] = b;
                uvs[q.start + jfa] = reflect(uvs[pfa], a);
                uvs[q.start + jfb] = reflect(uvs[pfb], b);

                visited.push(next);
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Mirror `point` through `pivot`.
fn reflect(point: Uv, pivot: Uv) -> Uv {
    Uv::new(2.0 * pivot.u - point.u, 2.0 * pivot.v - point.v)
}

/// Scale the faces' UVs to fill `target`, or `0..1` when there is none.
fn normalize(poly: &PolyMesh, uvs: &mut [Uv], faces: &[usize], target: Option<UvBounds>) {
    let Some(current) = face_bounds(poly, uvs, faces) else {
        return;
    };
    let target = target.unwrap_or(UvBounds {
        min: Uv::new(0.0, 0.0),
        max: Uv::new(1.0, 1.0),
    });
    let (cw, ch) = current.span();
    let (tw, th) = (target.max.u - target.min.u, target.max.v - target.min.v);

    for corner in faces
        .iter()
        .filter_map(|&face| poly.face_loops(face))
        .flat_map(|f| f.corners())
    {
        let uv = uvs[corner];
        uvs[corner] = Uv::new(
            target.min.u + (uv.u - current.min.u) / cw * tw,
            target.min.v + (uv.v - current.min.v) / ch * th,
        );
    }
}
