//! Object graph data model: objects, components and their introspectable fields.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, GraphError, ScanError};
use crate::host::{FieldIntrospector, Hierarchy};

/// Identifier for objects within a host hierarchy.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of a single serialized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A field that refers to another object.
    ObjectReference {
        /// The object the field currently resolves to, if any.
        #[serde(default)]
        resolved: Option<ObjectId>,
        /// Whether the field was ever bound to a concrete instance id.
        ///
        /// `true` with `resolved == None` means the target vanished.
        #[serde(default)]
        had_assigned_identity: bool,
    },
    /// Scalars, strings, structs and anything else that cannot dangle.
    Other,
}

/// One introspectable property of a resolved component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Serialized field name.
    pub name: String,
    /// Field classification.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// A non-reference field.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Other,
        }
    }

    /// A reference field pointing at a live object.
    pub fn reference(name: impl Into<String>, target: ObjectId) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ObjectReference {
                resolved: Some(target),
                had_assigned_identity: true,
            },
        }
    }

    /// A reference field that was never assigned.
    pub fn empty_reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ObjectReference {
                resolved: None,
                had_assigned_identity: false,
            },
        }
    }

    /// A reference field whose assigned target can no longer be resolved.
    pub fn dangling_reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ObjectReference {
                resolved: None,
                had_assigned_identity: true,
            },
        }
    }

    /// Whether the field once pointed at an object that is now gone.
    pub fn is_dangling(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::ObjectReference {
                resolved: None,
                had_assigned_identity: true,
            }
        )
    }

    /// Whether the field is a reference that currently points at nothing.
    pub fn is_empty_reference(&self) -> bool {
        matches!(self.kind, FieldKind::ObjectReference { resolved: None, .. })
    }
}

/// One component slot attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentHandle<C> {
    /// A live component whose fields can be enumerated.
    Resolved(C),
    /// Placeholder for a component whose backing type no longer resolves.
    Missing,
}

/// Component representation used by [`ObjectGraph`]: a type name and its recorded fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentData {
    /// Name of the component's type.
    pub type_name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ComponentData {
    /// Create a component with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// A node of the object graph: a scene object or an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Parent object, `None` for top-level objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ObjectId>,
    /// Children in hierarchy order, derived from parent links.
    #[serde(skip)]
    pub children: Vec<ObjectId>,
    /// Attached components in attachment order.
    #[serde(default)]
    pub components: Vec<ComponentHandle<ComponentData>>,
}

/// In-memory object hierarchy.
///
/// Serializes as a flat list of objects; child lists are rebuilt from parent links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<SceneObject>", into = "Vec<SceneObject>")]
pub struct ObjectGraph {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    /// `None` once every id up to `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
            next_id: Some(0),
        }
    }
}

impl ObjectGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the graph.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Insert a new object under `parent` (or at top level) and return its id.
    ///
    /// Fails once the id space is exhausted, which can only happen after
    /// loading a graph that already uses ids near `u64::MAX`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        parent: Option<ObjectId>,
    ) -> Result<ObjectId, GraphError> {
        let id = ObjectId(self.next_id.ok_or(GraphError::IdsExhausted)?);
        self.next_id = id.0.checked_add(1);

        if let Some(parent_idx) = parent.and_then(|p| self.index.get(&p).copied()) {
            self.objects[parent_idx].children.push(id);
        }

        self.index.insert(id, self.objects.len());
        self.objects.push(SceneObject {
            id,
            name: name.into(),
            parent,
            children: Vec::new(),
            components: Vec::new(),
        });
        Ok(id)
    }

    /// Attach a component to an object. Unknown ids are ignored.
    pub fn attach(&mut self, id: ObjectId, component: ComponentHandle<ComponentData>) {
        if let Some(object) = self.get_mut(id) {
            object.components.push(component);
        }
    }

    /// Re-point an object's parent link without touching child lists.
    ///
    /// Allows constructing inconsistent hierarchies, e.g. to exercise cycle handling.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) {
        if let Some(object) = self.get_mut(id) {
            object.parent = parent;
        }
    }

    /// Look up an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&idx| &self.objects[idx])
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let idx = *self.index.get(&id)?;
        self.objects.get_mut(idx)
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects without a parent, in insertion order.
    pub fn top_level(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| o.parent.is_none())
            .map(|o| o.id)
            .collect()
    }

    /// `root` followed by all of its descendants, depth-first pre-order.
    ///
    /// Each object is yielded at most once even if child links loop.
    pub fn descendants(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        self.collect_subtree(root, &mut HashSet::new(), &mut out);
        out
    }

    /// Every object in the graph, each exactly once.
    ///
    /// Top-level subtrees come first in insertion order; objects that cannot
    /// be reached from the top level (e.g. caught in a parent loop) follow in
    /// insertion order.
    pub fn walk(&self) -> Vec<ObjectId> {
        let mut out = Vec::with_capacity(self.objects.len());
        let mut visited = HashSet::new();
        let starts = self
            .top_level()
            .into_iter()
            .chain(self.objects.iter().map(|o| o.id));

        for start in starts {
            self.collect_subtree(start, &mut visited, &mut out);
        }
        out
    }

    fn collect_subtree(
        &self,
        root: ObjectId,
        visited: &mut HashSet<ObjectId>,
        out: &mut Vec<ObjectId>,
    ) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            out.push(id);
            if let Some(object) = self.get(id) {
                stack.extend(object.children.iter().rev().copied());
            }
        }
    }

    /// Find an object by its `/`-joined hierarchy path.
    pub fn find_by_path(&self, path: &str) -> Option<ObjectId> {
        let mut segments = path.split(crate::PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self
            .objects
            .iter()
            .find(|o| o.parent.is_none() && o.name == first)?;

        for segment in segments {
            current = current
                .children
                .iter()
                .filter_map(|&c| self.get(c))
                .find(|c| c.name == segment)?;
        }

        Some(current.id)
    }
}

impl From<Vec<SceneObject>> for ObjectGraph {
    fn from(objects: Vec<SceneObject>) -> Self {
        let mut graph = ObjectGraph {
            next_id: match objects.iter().map(|o| o.id.0).max() {
                Some(max) => max.checked_add(1),
                None => Some(0),
            },
            index: HashMap::with_capacity(objects.len()),
            objects,
        };

        for (idx, object) in graph.objects.iter_mut().enumerate() {
            object.children.clear();
            graph.index.insert(object.id, idx);
        }

        let links: Vec<(ObjectId, ObjectId)> = graph
            .objects
            .iter()
            .filter_map(|o| o.parent.map(|p| (p, o.id)))
            .collect();
        for (parent, child) in links {
            if let Some(object) = graph.get_mut(parent) {
                object.children.push(child);
            }
        }

        graph
    }
}

impl From<ObjectGraph> for Vec<SceneObject> {
    fn from(graph: ObjectGraph) -> Self {
        graph.objects
    }
}

impl Hierarchy for ObjectGraph {
    type Component = ComponentData;

    fn name(&self, id: ObjectId) -> CoreResult<&str> {
        self.get(id)
            .map(|o| o.name.as_str())
            .ok_or(ScanError::UnknownObject { object: id })
    }

    fn parent(&self, id: ObjectId) -> CoreResult<Option<ObjectId>> {
        self.get(id)
            .map(|o| o.parent)
            .ok_or(ScanError::UnknownObject { object: id })
    }

    fn components(&self, id: ObjectId) -> CoreResult<&[ComponentHandle<ComponentData>]> {
        self.get(id)
            .map(|o| o.components.as_slice())
            .ok_or(ScanError::UnknownObject { object: id })
    }
}

/// Introspector for [`ComponentData`]: returns the fields recorded on the component.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedFields;

impl FieldIntrospector<ComponentData> for RecordedFields {
    fn fields(&self, component: &ComponentData) -> CoreResult<Vec<FieldDescriptor>> {
        Ok(component.fields.clone())
    }
}
