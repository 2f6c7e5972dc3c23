//! Editable mesh: geometry plus UV layers, color attributes and selection.

use mesh_loops::{LoopMesh, LoopTopology, Point3, PolyMesh, Uv};
use serde::{Deserialize, Serialize};

use crate::attribute::ColorAttribute;
use crate::error::{EditError, EditResult};

/// A named per-corner UV map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    /// Layer name.
    pub name: String,
    /// One coordinate per loop.
    pub uvs: Vec<Uv>,
}

/// A named set of alternative vertex positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKey {
    /// Key name.
    pub name: String,
    /// One position per vertex.
    pub positions: Vec<Point3<f64>>,
}

/// A polygon mesh as an editor holds it.
///
/// Topology and positions live in a [`PolyMesh`]; everything per-loop
/// (UV layers, corner colors, UV selection) is sized to its loop count.
///
/// # Example
///
/// ```
/// use mesh_loops::{cube_uvs_per_face, quad_cube};
/// use mesh_uv_edit::EditMesh;
///
/// let mut mesh = EditMesh::new(quad_cube());
/// mesh.add_uv_layer("UVMap", cube_uvs_per_face()).unwrap();
///
/// assert_eq!(mesh.active_uv_layer().unwrap().name, "UVMap");
/// assert!(mesh.loop_view().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EditMesh {
    mesh: PolyMesh,
    uv_layers: Vec<UvLayer>,
    active_uv: Option<usize>,
    color_attributes: Vec<ColorAttribute>,
    active_color: Option<usize>,
    face_selected: Vec<bool>,
    active_face: Option<usize>,
    uv_selected: Vec<bool>,
    shape_keys: Vec<ShapeKey>,
}

impl EditMesh {
    /// Wrap a mesh with no UV layers, no attributes and nothing selected.
    #[must_use]
    pub fn new(mesh: PolyMesh) -> Self {
        let face_count = mesh.face_count();
        let loop_count = mesh.loop_count();
        Self {
            mesh,
            uv_layers: Vec::new(),
            active_uv: None,
            color_attributes: Vec::new(),
            active_color: None,
            face_selected: vec![false; face_count],
            active_face: None,
            uv_selected: vec![false; loop_count],
            shape_keys: Vec::new(),
        }
    }

    /// The underlying geometry.
    #[must_use]
    pub fn mesh(&self) -> &PolyMesh {
        &self.mesh
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Number of loops.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.mesh.loop_count()
    }

    // ------------------------------------------------------------------
    // UV layers
    // ------------------------------------------------------------------

    /// Add a UV layer. The first layer added becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AttributeLength`] if `uvs` does not have one
    /// entry per loop.
    pub fn add_uv_layer(&mut self, name: impl Into<String>, uvs: Vec<Uv>) -> EditResult<usize> {
        let name = name.into();
        if uvs.len() != self.loop_count() {
            return Err(EditError::AttributeLength {
                name,
                expected: self.loop_count(),
                actual: uvs.len(),
            });
        }
        self.uv_layers.push(UvLayer { name, uvs });
        let index = self.uv_layers.len() - 1;
        self.active_uv.get_or_insert(index);
        Ok(index)
    }

    /// Remove a UV layer by name. The active layer falls back to the first
    /// remaining one.
    pub fn remove_uv_layer(&mut self, name: &str) -> Option<UvLayer> {
        let index = self.uv_layers.iter().position(|layer| layer.name == name)?;
        let removed = self.uv_layers.remove(index);
        self.active_uv = match self.active_uv {
            _ if self.uv_layers.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(0),
            other => other,
        };
        Some(removed)
    }

    /// All UV layers.
    #[must_use]
    pub fn uv_layers(&self) -> &[UvLayer] {
        &self.uv_layers
    }

    /// A UV layer by name.
    #[must_use]
    pub fn uv_layer(&self, name: &str) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|layer| layer.name == name)
    }

    /// The active UV layer.
    #[must_use]
    pub fn active_uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layers.get(self.active_uv?)
    }

    /// The active UV layer, mutably.
    pub fn active_uv_layer_mut(&mut self) -> Option<&mut UvLayer> {
        self.uv_layers.get_mut(self.active_uv?)
    }

    /// The geometry together with the active layer's coordinates, mutably.
    pub fn active_uvs_mut(&mut self) -> Option<(&PolyMesh, &mut [Uv])> {
        let layer = self.uv_layers.get_mut(self.active_uv?)?;
        Some((&self.mesh, layer.uvs.as_mut_slice()))
    }

    /// Make a UV layer active by name.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UvLayerNotFound`] if no layer has that name.
    pub fn set_active_uv_layer(&mut self, name: &str) -> EditResult<()> {
        let index = self
            .uv_layers
            .iter()
            .position(|layer| layer.name == name)
            .ok_or_else(|| EditError::UvLayerNotFound {
                name: name.to_string(),
            })?;
        self.active_uv = Some(index);
        Ok(())
    }

    /// Borrow the topology and one UV layer as flat loop arrays.
    ///
    /// Nothing is copied: the view points into this mesh's storage.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UvLayerNotFound`] if there is no such layer.
    pub fn loop_view_of(&self, uv_layer: &str) -> EditResult<LoopMesh<'_>> {
        let layer = self
            .uv_layer(uv_layer)
            .ok_or_else(|| EditError::UvLayerNotFound {
                name: uv_layer.to_string(),
            })?;
        Ok(self.mesh.view(&layer.uvs)?)
    }

    /// Borrow the topology and the active UV layer as flat loop arrays.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidTarget`] if there is no active UV layer.
    pub fn loop_view(&self) -> EditResult<LoopMesh<'_>> {
        let layer = self.active_uv_layer().ok_or(EditError::InvalidTarget {
            reason: "Active UV layer is required.",
        })?;
        Ok(self.mesh.view(&layer.uvs)?)
    }

    // ------------------------------------------------------------------
    // Color attributes
    // ------------------------------------------------------------------

    /// All color attributes, in creation order.
    #[must_use]
    pub fn color_attributes(&self) -> &[ColorAttribute] {
        &self.color_attributes
    }

    /// Index of a color attribute by name.
    #[must_use]
    pub fn find_color_attribute(&self, name: &str) -> Option<usize> {
        self.color_attributes.iter().position(|attr| attr.name() == name)
    }

    /// A color attribute by name.
    #[must_use]
    pub fn color_attribute(&self, name: &str) -> Option<&ColorAttribute> {
        self.color_attributes.iter().find(|attr| attr.name() == name)
    }

    /// A color attribute by index, mutably.
    pub fn color_attribute_mut(&mut self, index: usize) -> Option<&mut ColorAttribute> {
        self.color_attributes.get_mut(index)
    }

    /// Append a color attribute and return its index.
    pub fn add_color_attribute(&mut self, attribute: ColorAttribute) -> usize {
        self.color_attributes.push(attribute);
        self.color_attributes.len() - 1
    }

    /// Index of the active color attribute.
    #[must_use]
    pub fn active_color_index(&self) -> Option<usize> {
        self.active_color
    }

    /// Make a color attribute active. Out-of-range indices are ignored.
    pub fn set_active_color_index(&mut self, index: usize) {
        if index < self.color_attributes.len() {
            self.active_color = Some(index);
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select or deselect a face. Out-of-range faces are ignored.
    pub fn select_face(&mut self, face: usize, selected: bool) {
        if let Some(slot) = self.face_selected.get_mut(face) {
            *slot = selected;
        }
    }

    /// Select every face.
    pub fn select_all_faces(&mut self) {
        self.face_selected.fill(true);
    }

    /// Whether a face is selected.
    #[must_use]
    pub fn is_face_selected(&self, face: usize) -> bool {
        self.face_selected.get(face).copied().unwrap_or(false)
    }

    /// Indices of the selected faces, ascending.
    #[must_use]
    pub fn selected_faces(&self) -> Vec<usize> {
        self.face_selected
            .iter()
            .enumerate()
            .filter_map(|(face, &selected)| selected.then_some(face))
            .collect()
    }

    /// The active face, if any.
    #[must_use]
    pub fn active_face(&self) -> Option<usize> {
        self.active_face
    }

    /// Set or clear the active face.
    pub fn set_active_face(&mut self, face: Option<usize>) {
        self.active_face = face.filter(|&f| f < self.face_count());
    }

    /// Select or deselect one UV corner.
    pub fn select_uv_corner(&mut self, corner: usize, selected: bool) {
        if let Some(slot) = self.uv_selected.get_mut(corner) {
            *slot = selected;
        }
    }

    /// Select every UV corner that uses `vertex`.
    pub fn select_uv_vertex(&mut self, vertex: u32) {
        for (corner, &v) in self.mesh.vertex_indices.iter().enumerate() {
            if v == vertex {
                self.uv_selected[corner] = true;
            }
        }
    }

    /// Whether a UV corner is selected.
    #[must_use]
    pub fn is_uv_selected(&self, corner: usize) -> bool {
        self.uv_selected.get(corner).copied().unwrap_or(false)
    }

    /// Indices of the selected UV corners, ascending.
    #[must_use]
    pub fn selected_uv_corners(&self) -> Vec<usize> {
        self.uv_selected
            .iter()
            .enumerate()
            .filter_map(|(corner, &selected)| selected.then_some(corner))
            .collect()
    }

    // ------------------------------------------------------------------
    // Shape keys
    // ------------------------------------------------------------------

    /// Add a shape key.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AttributeLength`] if `positions` does not have
    /// one entry per vertex.
    pub fn add_shape_key(
        &mut self,
        name: impl Into<String>,
        positions: Vec<Point3<f64>>,
    ) -> EditResult<()> {
        let name = name.into();
        if positions.len() != self.mesh.vertex_count() {
            return Err(EditError::AttributeLength {
                name,
                expected: self.mesh.vertex_count(),
                actual: positions.len(),
            });
        }
        self.shape_keys.push(ShapeKey { name, positions });
        Ok(())
    }

    /// All shape keys, in creation order.
    #[must_use]
    pub fn shape_keys(&self) -> &[ShapeKey] {
        &self.shape_keys
    }

    /// A shape key by name.
    #[must_use]
    pub fn shape_key(&self, name: &str) -> Option<&ShapeKey> {
        self.shape_keys.iter().find(|key| key.name == name)
    }
}
