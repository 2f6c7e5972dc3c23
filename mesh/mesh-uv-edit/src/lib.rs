//! UV editing tools and Color-ID bake integration for editable meshes.
//!
//! This crate models the editor side of the Color-ID workflow:
//! - [`EditMesh`]: geometry with named UV layers, color attributes,
//!   selection and shape keys
//! - [`Scene`] and [`SceneObject`]: objects with modifier stacks
//! - [`apply_color_id`]: bake island colors into the `Color_ID` attribute
//! - [`rectify_selection`] and [`straighten_selection`]: UV layout tools
//! - UV Morph: a node-group modifier blending 3D positions toward the UV
//!   layout, with [`bake_uv_morph`] to freeze it into shape keys
//! - [`Toolkit`]: runs a [`Command`] and reports the outcome
//!
//! # Example
//!
//! ```
//! use mesh_loops::{cube_uvs_per_face, quad_cube};
//! use mesh_uv_edit::{Command, EditMesh, ReportLevel, Scene, SceneObject, Toolkit};
//!
//! let mut mesh = EditMesh::new(quad_cube());
//! mesh.add_uv_layer("UVMap", cube_uvs_per_face()).unwrap();
//!
//! let mut scene = Scene::new();
//! let cube = scene.add_object(SceneObject::mesh("Cube", mesh));
//! scene.set_active(cube);
//!
//! let mut toolkit = Toolkit::default();
//! let outcome = toolkit.execute(&mut scene, Command::BakeColorId { auto_switch_view: None });
//!
//! let report = outcome.report.unwrap();
//! assert_eq!(report.level, ReportLevel::Info);
//! assert_eq!(report.message, "Color ID Baked: 6 faces processed.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod attribute;
mod color_id;
mod command;
mod edit_mesh;
mod error;
pub mod morph;
mod rectify;
mod scene;
mod settings;
mod straight;

pub use attribute::{AttributeDomain, ColorAttribute, ColorData, ColorDataType};
pub use color_id::{COLOR_ID_ATTRIBUTE, apply_color_id};
pub use command::{Command, CommandOutcome, Report, ReportLevel, Status, Toolkit};
pub use edit_mesh::{EditMesh, ShapeKey, UvLayer};
pub use error::{EditError, EditResult};
pub use morph::{
    MorphGraph, MorphToggle, TemplateRegistry, UV_MORPH_GROUP, bake_uv_morph, evaluate_uv_morph,
    set_morph_factor, toggle_uv_morph,
};
pub use rectify::{RectifyOutcome, rectify_selection};
pub use scene::{
    ColorType, InputValue, Modifier, ObjectData, Scene, SceneObject, Shading, Viewport,
};
pub use settings::ToolSettings;
pub use straight::{StraightAxis, straighten_selection};
