//! Color-ID bake integration: pack the active UV layer, run the engine and
//! store the result as a corner color attribute.

use mesh_color_id::{BakeParams, bake_mesh};
use mesh_loops::LoopTopology;
use tracing::info;

use crate::attribute::{AttributeDomain, ColorAttribute, ColorDataType};
use crate::error::{EditError, EditResult};
use crate::scene::SceneObject;

/// Name of the attribute the bake writes to.
pub const COLOR_ID_ATTRIBUTE: &str = "Color_ID";

/// Bake Color-ID colors onto a mesh object.
///
/// The object must be a mesh with an active UV layer. The bake runs on
/// borrowed loop arrays; the [`COLOR_ID_ATTRIBUTE`] corner attribute is
/// created or reused only after the bake succeeded, then made active.
///
/// Returns the number of faces processed.
///
/// # Errors
///
/// Returns [`EditError::InvalidTarget`] for non-mesh objects or a missing
/// active UV layer, and [`EditError::Bake`] if the engine fails. The mesh
/// is unchanged on error.
///
/// # Example
///
/// ```
/// use mesh_color_id::BakeParams;
/// use mesh_loops::{cube_uvs_per_face, quad_cube};
/// use mesh_uv_edit::{EditMesh, SceneObject, apply_color_id};
///
/// let mut mesh = EditMesh::new(quad_cube());
/// mesh.add_uv_layer("UVMap", cube_uvs_per_face()).unwrap();
/// let mut object = SceneObject::mesh("Cube", mesh);
///
/// let faces = apply_color_id(&mut object, &BakeParams::default()).unwrap();
/// assert_eq!(faces, 6);
/// assert!(object.as_mesh().unwrap().color_attribute("Color_ID").is_some());
/// ```
pub fn apply_color_id(object: &mut SceneObject, params: &BakeParams) -> EditResult<usize> {
    let name = object.name.clone();
    let mesh = object.as_mesh_mut().ok_or(EditError::InvalidTarget {
        reason: "Target object must be a MESH.",
    })?;
    if mesh.active_uv_layer().is_none() {
        return Err(EditError::InvalidTarget {
            reason: "Active UV layer is required.",
        });
    }

    let (face_count, colors) = {
        let view = mesh.loop_view()?;
        (view.face_count(), bake_mesh(&view, params)?)
    };

    let index = match mesh.find_color_attribute(COLOR_ID_ATTRIBUTE) {
        Some(index) => index,
        None => mesh.add_color_attribute(ColorAttribute::new(
            COLOR_ID_ATTRIBUTE,
            AttributeDomain::Corner,
            ColorDataType::ByteColor,
            mesh.loop_count(),
        )),
    };
    if let Some(attribute) = mesh.color_attribute_mut(index) {
        attribute.write_rgba(&colors)?;
    }
    mesh.set_active_color_index(index);

    info!(object = %name, faces = face_count, "Color-ID baked");
    Ok(face_count)
}
