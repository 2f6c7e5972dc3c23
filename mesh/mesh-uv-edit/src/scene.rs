//! Scene objects, modifiers and viewport state.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::edit_mesh::EditMesh;
use crate::morph::MorphGraph;

/// What an object holds.
#[derive(Debug, Clone)]
pub enum ObjectData {
    /// Editable polygon mesh.
    Mesh(Box<EditMesh>),
    /// A camera; carries no geometry.
    Camera,
    /// An empty transform.
    Empty,
}

/// Value bound to a modifier input socket.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Numeric input.
    Float(f32),
    /// Name input, such as an attribute or UV layer name.
    Text(String),
}

/// A node-group modifier instance on an object.
#[derive(Debug, Clone)]
pub struct Modifier {
    /// Instance name, unique per object.
    pub name: String,
    /// Shared node group.
    pub node_group: Arc<MorphGraph>,
    /// Values for the group's interface inputs, by socket name.
    pub inputs: HashMap<String, InputValue>,
    /// Display on the edit cage.
    pub show_on_cage: bool,
    /// Display while in edit mode.
    pub show_in_editmode: bool,
}

impl Modifier {
    /// Instantiate a node group with its interface defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, node_group: Arc<MorphGraph>) -> Self {
        let inputs = node_group
            .inputs()
            .iter()
            .filter_map(|socket| Some((socket.name.to_string(), socket.default.clone()?)))
            .collect();
        Self {
            name: name.into(),
            node_group,
            inputs,
            show_on_cage: false,
            show_in_editmode: false,
        }
    }

    /// Numeric input by socket name.
    #[must_use]
    pub fn float_input(&self, socket: &str) -> Option<f32> {
        match self.inputs.get(socket)? {
            InputValue::Float(value) => Some(*value),
            InputValue::Text(_) => None,
        }
    }

    /// Text input by socket name.
    #[must_use]
    pub fn text_input(&self, socket: &str) -> Option<&str> {
        match self.inputs.get(socket)? {
            InputValue::Text(value) => Some(value),
            InputValue::Float(_) => None,
        }
    }

    /// Bind a value to an input socket.
    pub fn set_input(&mut self, socket: impl Into<String>, value: InputValue) {
        self.inputs.insert(socket.into(), value);
    }
}

/// One object in a scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Object name.
    pub name: String,
    /// Object payload.
    pub data: ObjectData,
    /// Modifier stack, evaluated in order.
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    /// Create a mesh object.
    #[must_use]
    pub fn mesh(name: impl Into<String>, mesh: EditMesh) -> Self {
        Self::with_data(name, ObjectData::Mesh(Box::new(mesh)))
    }

    /// Create a camera object.
    #[must_use]
    pub fn camera(name: impl Into<String>) -> Self {
        Self::with_data(name, ObjectData::Camera)
    }

    /// Create an empty object.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_data(name, ObjectData::Empty)
    }

    fn with_data(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
            modifiers: Vec::new(),
        }
    }

    /// The mesh, if this is a mesh object.
    #[must_use]
    pub fn as_mesh(&self) -> Option<&EditMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh.as_ref()),
            ObjectData::Camera | ObjectData::Empty => None,
        }
    }

    /// The mesh, mutably, if this is a mesh object.
    pub fn as_mesh_mut(&mut self) -> Option<&mut EditMesh> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Some(mesh.as_mut()),
            ObjectData::Camera | ObjectData::Empty => None,
        }
    }

    /// Index of a modifier by name.
    #[must_use]
    pub fn find_modifier(&self, name: &str) -> Option<usize> {
        self.modifiers.iter().position(|m| m.name == name)
    }

    /// A modifier by name.
    #[must_use]
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    /// A modifier by name, mutably.
    pub fn modifier_mut(&mut self, name: &str) -> Option<&mut Modifier> {
        self.modifiers.iter_mut().find(|m| m.name == name)
    }

    /// Remove a modifier by name.
    pub fn remove_modifier(&mut self, name: &str) -> Option<Modifier> {
        let index = self.find_modifier(name)?;
        Some(self.modifiers.remove(index))
    }
}

/// Viewport shading mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Flat solid shading.
    #[default]
    Solid,
    /// Material preview.
    Material,
}

/// What the solid shading colors surfaces by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    /// Material base color.
    #[default]
    Material,
    /// Single object color.
    Object,
    /// Active color attribute.
    Vertex,
}

/// Viewport display state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Shading mode.
    pub shading: Shading,
    /// Surface color source in solid mode.
    pub color_type: ColorType,
}

/// A flat collection of objects with one active object.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// All objects; names are expected to be unique.
    pub objects: Vec<SceneObject>,
    /// Index of the active object.
    pub active: Option<usize>,
    /// Viewport state.
    pub viewport: Viewport,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Make an object active. Out-of-range indices clear the active object.
    pub fn set_active(&mut self, index: usize) {
        self.active = (index < self.objects.len()).then_some(index);
    }

    /// The active object.
    #[must_use]
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.objects.get(self.active?)
    }

    /// The active object, mutably.
    pub fn active_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.get_mut(self.active?)
    }

    /// An object by name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}
