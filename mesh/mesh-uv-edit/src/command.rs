//! Tool commands and their dispatcher.

use tracing::{info, warn};

use crate::color_id::apply_color_id;
use crate::edit_mesh::EditMesh;
use crate::error::{EditError, EditResult};
use crate::morph::{MorphToggle, TemplateRegistry, bake_uv_morph, toggle_uv_morph};
use crate::rectify::rectify_selection;
use crate::scene::{ColorType, Scene, SceneObject, Shading};
use crate::settings::ToolSettings;
use crate::straight::straighten_selection;

/// Every tool the toolkit can run on the active object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Square up the selected quads.
    Rectify {
        /// Override [`ToolSettings::rectify_keep_bounds`].
        keep_bounds: Option<bool>,
    },
    /// Align the selected UV corners.
    Straight,
    /// Bake island colors into the `Color_ID` attribute.
    BakeColorId {
        /// Override [`ToolSettings::auto_switch_view`].
        auto_switch_view: Option<bool>,
    },
    /// Add or remove the UV Morph modifier.
    ToggleUvMorph,
    /// Freeze UV Morph into a new object.
    BakeUvMorph,
}

/// Severity of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Normal completion.
    Info,
    /// The command could not run on the current input.
    Warning,
    /// The command failed.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Severity.
    pub level: ReportLevel,
    /// Text.
    pub message: String,
}

/// Whether a command changed the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The command ran and its changes stand.
    Finished,
    /// The command stopped without changing the scene.
    Cancelled,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Completion status.
    pub status: Status,
    /// Message to show, if any.
    pub report: Option<Report>,
}

impl CommandOutcome {
    fn finished(message: Option<String>) -> Self {
        Self {
            status: Status::Finished,
            report: message.map(|message| Report {
                level: ReportLevel::Info,
                message,
            }),
        }
    }

    fn cancelled(error: &EditError) -> Self {
        let level = if error.is_user_error() {
            ReportLevel::Warning
        } else {
            ReportLevel::Error
        };
        Self {
            status: Status::Cancelled,
            report: Some(Report {
                level,
                message: error.to_string(),
            }),
        }
    }

    /// Whether the command finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }
}

/// Runs commands against a scene with shared settings and node groups.
///
/// # Example
///
/// ```
/// use mesh_loops::{cube_uvs_per_face, quad_cube};
/// use mesh_uv_edit::{Command, EditMesh, Scene, SceneObject, Toolkit};
///
/// let mut mesh = EditMesh::new(quad_cube());
/// mesh.add_uv_layer("UVMap", cube_uvs_per_face()).unwrap();
/// let mut scene = Scene::new();
/// let cube = scene.add_object(SceneObject::mesh("Cube", mesh));
/// scene.set_active(cube);
///
/// let mut toolkit = Toolkit::default();
/// let outcome = toolkit.execute(&mut scene, Command::BakeColorId { auto_switch_view: None });
/// assert!(outcome.is_finished());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    /// Defaults for command options.
    pub settings: ToolSettings,
    /// Shared node groups.
    pub registry: TemplateRegistry,
}

impl Toolkit {
    /// Create a toolkit with the given settings.
    #[must_use]
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            settings,
            registry: TemplateRegistry::new(),
        }
    }

    /// Run one command on the scene's active object.
    ///
    /// Failures never propagate: they come back as a cancelled outcome
    /// with a warning for unusable input or an error for engine failures.
    pub fn execute(&mut self, scene: &mut Scene, command: Command) -> CommandOutcome {
        match self.run(scene, command) {
            Ok(message) => {
                if let Some(message) = &message {
                    info!(?command, "{message}");
                }
                CommandOutcome::finished(message)
            }
            Err(error) => {
                warn!(?command, %error, "command cancelled");
                CommandOutcome::cancelled(&error)
            }
        }
    }

    fn run(&mut self, scene: &mut Scene, command: Command) -> EditResult<Option<String>> {
        let object = scene.active_object_mut().ok_or(EditError::InvalidTarget {
            reason: "No active object.",
        })?;

        match command {
            Command::Rectify { keep_bounds } => {
                let mesh = mesh_of(object)?;
                let keep = keep_bounds.unwrap_or(self.settings.rectify_keep_bounds);
                rectify_selection(mesh, keep)?;
                Ok(None)
            }
            Command::Straight => {
                straighten_selection(mesh_of(object)?)?;
                Ok(None)
            }
            Command::BakeColorId { auto_switch_view } => {
                let faces = apply_color_id(object, &self.settings.bake)?;
                if auto_switch_view.unwrap_or(self.settings.auto_switch_view) {
                    scene.viewport.shading = Shading::Solid;
                    scene.viewport.color_type = ColorType::Vertex;
                }
                Ok(Some(format!("Color ID Baked: {faces} faces processed.")))
            }
            Command::ToggleUvMorph => match toggle_uv_morph(object, &mut self.registry)? {
                MorphToggle::On => Ok(Some("UV Morph: ON".to_string())),
                MorphToggle::Off => Ok(Some("UV Morph: OFF".to_string())),
            },
            Command::BakeUvMorph => {
                let baked = bake_uv_morph(object)?;
                let name = baked.name.clone();
                let index = scene.add_object(baked);
                scene.set_active(index);
                Ok(Some(format!("Baked UV Morph to {name}")))
            }
        }
    }
}

fn mesh_of(object: &mut SceneObject) -> EditResult<&mut EditMesh> {
    object.as_mesh_mut().ok_or(EditError::InvalidTarget {
        reason: "Target object must be a MESH.",
    })
}
