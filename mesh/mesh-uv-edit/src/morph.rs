//! UV Morph: blend a mesh between its 3D shape and its UV layout.
//!
//! The blend is described by a small node graph, shared between objects
//! through a [`TemplateRegistry`] and instanced per object as a
//! [`Modifier`]. [`evaluate_uv_morph`] runs the graph on the CPU, and
//! [`bake_uv_morph`] freezes it into a new object with shape keys.

use std::sync::Arc;

use hashbrown::HashMap;
use mesh_loops::{LoopTopology, Point3, PolyMesh};
use tracing::info;

use crate::attribute::AttributeDomain;
use crate::edit_mesh::{EditMesh, UvLayer};
use crate::error::{EditError, EditResult};
use crate::scene::{InputValue, Modifier, SceneObject};

/// Name of the shared node group and of the modifier that instances it.
pub const UV_MORPH_GROUP: &str = "NT_UV_Morph";

/// Blend input socket.
pub const FACTOR_SOCKET: &str = "Factor";

/// UV layer name input socket.
pub const UV_MAP_SOCKET: &str = "UV Map";

/// Data carried by a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Mesh geometry.
    Geometry,
    /// Scalar.
    Float,
    /// Text, used for attribute names.
    String,
}

/// An interface socket of a node group.
#[derive(Debug, Clone, PartialEq)]
pub struct Socket {
    /// Socket name.
    pub name: &'static str,
    /// Socket data type.
    pub socket_type: SocketType,
    /// Value used when the modifier does not bind one.
    pub default: Option<InputValue>,
}

/// The node types a morph graph is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Exposes the group inputs.
    GroupInput,
    /// Receives the group outputs.
    GroupOutput,
    /// Splits every edge so corners become separate vertices.
    SplitEdges,
    /// Reads a named attribute.
    NamedAttribute,
    /// Reads vertex positions.
    Position,
    /// Linear blend of two vectors.
    Mix,
    /// Writes vertex positions.
    SetPosition,
}

impl NodeKind {
    /// Host type identifier of the node.
    #[must_use]
    pub fn bl_idname(self) -> &'static str {
        match self {
            Self::GroupInput => "NodeGroupInput",
            Self::GroupOutput => "NodeGroupOutput",
            Self::SplitEdges => "GeometryNodeSplitEdges",
            Self::NamedAttribute => "GeometryNodeInputNamedAttribute",
            Self::Position => "GeometryNodeInputPosition",
            Self::Mix => "ShaderNodeMix",
            Self::SetPosition => "GeometryNodeSetPosition",
        }
    }
}

/// A connection from one node's output socket to another's input socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Source node index.
    pub from: usize,
    /// Source socket name.
    pub from_socket: &'static str,
    /// Target node index.
    pub to: usize,
    /// Target socket name.
    pub to_socket: &'static str,
}

/// Declarative description of the UV Morph node group.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphGraph {
    name: String,
    inputs: Vec<Socket>,
    outputs: Vec<Socket>,
    nodes: Vec<NodeKind>,
    links: Vec<Link>,
}

impl MorphGraph {
    /// Build the split-edges, named UV attribute, mix, set-position graph.
    #[must_use]
    pub fn uv_morph() -> Self {
        use NodeKind::{
            GroupInput, GroupOutput, Mix, NamedAttribute, Position, SetPosition, SplitEdges,
        };

        let nodes = vec![
            GroupInput,
            SplitEdges,
            NamedAttribute,
            Position,
            Mix,
            SetPosition,
            GroupOutput,
        ];
        let at = |kind: NodeKind| nodes.iter().position(|&n| n == kind).unwrap_or(0);
        let link = |from: NodeKind,
                    from_socket: &'static str,
                    to: NodeKind,
                    to_socket: &'static str| Link {
            from: at(from),
            from_socket,
            to: at(to),
            to_socket,
        };
        let links = vec![
            link(GroupInput, "Geometry", SplitEdges, "Mesh"),
            link(SplitEdges, "Mesh", SetPosition, "Geometry"),
            link(SetPosition, "Geometry", GroupOutput, "Geometry"),
            link(GroupInput, UV_MAP_SOCKET, NamedAttribute, "Name"),
            link(GroupInput, FACTOR_SOCKET, Mix, "Factor"),
            link(Position, "Position", Mix, "A"),
            link(NamedAttribute, "Attribute", Mix, "B"),
            link(Mix, "Result", SetPosition, "Position"),
        ];

        Self {
            name: UV_MORPH_GROUP.to_string(),
            inputs: vec![
                Socket {
                    name: "Geometry",
                    socket_type: SocketType::Geometry,
                    default: None,
                },
                Socket {
                    name: FACTOR_SOCKET,
                    socket_type: SocketType::Float,
                    default: Some(InputValue::Float(1.0)),
                },
                Socket {
                    name: UV_MAP_SOCKET,
                    socket_type: SocketType::String,
                    default: Some(InputValue::Text("UVMap".to_string())),
                },
            ],
            outputs: vec![Socket {
                name: "Geometry",
                socket_type: SocketType::Geometry,
                default: None,
            }],
            nodes,
            links,
        }
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interface inputs.
    #[must_use]
    pub fn inputs(&self) -> &[Socket] {
        &self.inputs
    }

    /// Interface outputs.
    #[must_use]
    pub fn outputs(&self) -> &[Socket] {
        &self.outputs
    }

    /// Nodes, indexed by [`Link::from`] and [`Link::to`].
    #[must_use]
    pub fn nodes(&self) -> &[NodeKind] {
        &self.nodes
    }

    /// All links.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Whether any link runs from a `from` node to a `to` node.
    #[must_use]
    pub fn has_link(&self, from: NodeKind, to: NodeKind) -> bool {
        self.links
            .iter()
            .any(|l| self.nodes.get(l.from) == Some(&from) && self.nodes.get(l.to) == Some(&to))
    }
}

/// Shared node groups, by name.
///
/// Passed explicitly to the tools that need it; each group is built once.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    groups: HashMap<String, Arc<MorphGraph>>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The UV Morph group, built on first use.
    pub fn ensure_uv_morph(&mut self) -> Arc<MorphGraph> {
        Arc::clone(
            self.groups
                .entry(UV_MORPH_GROUP.to_string())
                .or_insert_with(|| Arc::new(MorphGraph::uv_morph())),
        )
    }

    /// A group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<MorphGraph>> {
        self.groups.get(name)
    }

    /// Number of registered groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// State of the UV Morph modifier after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphToggle {
    /// The modifier was added.
    On,
    /// The modifier was removed.
    Off,
}

/// Add the UV Morph modifier to a mesh object, or remove it if present.
///
/// A new modifier shows in edit mode and on the cage, and reads the
/// object's active UV layer.
///
/// # Errors
///
/// Returns [`EditError::InvalidTarget`] if the object is not a mesh.
pub fn toggle_uv_morph(
    object: &mut SceneObject,
    registry: &mut TemplateRegistry,
) -> EditResult<MorphToggle> {
    let active_uv = object
        .as_mesh()
        .ok_or(EditError::InvalidTarget {
            reason: "Target object must be a MESH.",
        })?
        .active_uv_layer()
        .map(|layer| layer.name.clone());
    if object.remove_modifier(UV_MORPH_GROUP).is_some() {
        return Ok(MorphToggle::Off);
    }

    let mut modifier = Modifier::new(UV_MORPH_GROUP, registry.ensure_uv_morph());
    modifier.show_on_cage = true;
    modifier.show_in_editmode = true;
    if let Some(name) = active_uv {
        modifier.set_input(UV_MAP_SOCKET, InputValue::Text(name));
    }
    object.modifiers.push(modifier);
    Ok(MorphToggle::On)
}

/// Set the blend factor of a UV Morph modifier, clamped to `[0, 1]`.
pub fn set_morph_factor(modifier: &mut Modifier, factor: f32) {
    modifier.set_input(FACTOR_SOCKET, InputValue::Float(factor.clamp(0.0, 1.0)));
}

/// The UV layer a modifier reads, falling back to the active layer.
fn morph_layer<'a>(mesh: &'a EditMesh, modifier: Option<&Modifier>) -> EditResult<&'a UvLayer> {
    match modifier.and_then(|m| m.text_input(UV_MAP_SOCKET)) {
        Some(name) => mesh
            .uv_layer(name)
            .or_else(|| mesh.active_uv_layer())
            .ok_or_else(|| EditError::UvLayerNotFound {
                name: name.to_string(),
            }),
        None => mesh.active_uv_layer().ok_or(EditError::InvalidTarget {
            reason: "No UV Map found",
        }),
    }
}

/// Per-corner positions with the modifier applied.
///
/// Each corner moves from its vertex position toward `(u, v, 0)` by the
/// modifier's factor. Corners are independent, so UV seams tear apart.
///
/// # Errors
///
/// Returns [`EditError::UvLayerNotFound`] if the mesh has neither the named
/// UV layer nor an active one.
pub fn evaluate_uv_morph(mesh: &EditMesh, modifier: &Modifier) -> EditResult<Vec<Point3<f64>>> {
    let layer = morph_layer(mesh, Some(modifier))?;
    let factor = f64::from(modifier.float_input(FACTOR_SOCKET).unwrap_or(1.0));
    let poly = mesh.mesh();

    Ok((0..poly.loop_count())
        .filter_map(|corner| {
            let position = poly.corner_position(corner)?;
            let uv = layer.uvs[corner];
            let flat = Point3::new(f64::from(uv.u), f64::from(uv.v), 0.0);
            Some(position.lerp(&flat, factor))
        })
        .collect())
}

/// Freeze UV Morph into a new object named `<name>_Baked`.
///
/// The copy has one vertex per corner and two shape keys: `Basis` holds the
/// 3D shape and `UV_Morph` the flat UV layout. UV layers and corner color
/// attributes carry over. The source object is not modified.
///
/// # Errors
///
/// Returns [`EditError::InvalidTarget`] if the object is not a mesh or has
/// no UV layer to read.
pub fn bake_uv_morph(object: &SceneObject) -> EditResult<SceneObject> {
    let mesh = object.as_mesh().ok_or(EditError::InvalidTarget {
        reason: "Target object must be a MESH.",
    })?;
    let layer = morph_layer(mesh, object.modifier(UV_MORPH_GROUP))?;
    let poly = mesh.mesh();

    let mut split =
        PolyMesh::with_capacity(poly.loop_count(), poly.face_count(), poly.loop_count());
    for corner in 0..poly.loop_count() {
        split.add_vertex(poly.corner_position(corner).unwrap_or_else(Point3::origin));
    }
    for face in poly.faces() {
        #[allow(clippy::cast_possible_truncation)]
        // Loop indices already fit in u32 in the source mesh
        let corners: Vec<u32> = face.corners().map(|c| c as u32).collect();
        split.add_face(&corners);
    }

    let basis = split.positions.clone();
    let flat = layer
        .uvs
        .iter()
        .map(|uv| Point3::new(f64::from(uv.u), f64::from(uv.v), 0.0))
        .collect();

    let mut baked = EditMesh::new(split);
    for uv_layer in mesh.uv_layers() {
        baked.add_uv_layer(uv_layer.name.clone(), uv_layer.uvs.clone())?;
    }
    if let Some(active) = mesh.active_uv_layer() {
        baked.set_active_uv_layer(&active.name)?;
    }
    for attribute in mesh.color_attributes() {
        if attribute.domain() == AttributeDomain::Corner {
            baked.add_color_attribute(attribute.clone());
        }
    }
    // Point attributes are dropped, so the active one is found again by name
    let active_color = mesh
        .active_color_index()
        .and_then(|index| mesh.color_attributes().get(index))
        .and_then(|active| baked.find_color_attribute(active.name()));
    if let Some(index) = active_color {
        baked.set_active_color_index(index);
    }
    baked.add_shape_key("Basis", basis)?;
    baked.add_shape_key("UV_Morph", flat)?;

    let name = format!("{}_Baked", object.name);
    info!(object = %name, vertices = poly.loop_count(), "UV Morph baked");
    Ok(SceneObject::mesh(name, baked))
}
