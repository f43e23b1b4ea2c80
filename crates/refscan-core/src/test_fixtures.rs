//! Minimal fixtures for scanner tests.
//!
//! Builds isolated, in-memory object graphs without going through a host.

use crate::model::{ComponentData, ComponentHandle, ObjectGraph, ObjectId};

/// Builder for small test scenes.
#[derive(Default)]
pub struct TestSceneBuilder {
    graph: ObjectGraph,
}

impl TestSceneBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level object.
    pub fn object(&mut self, name: &str) -> ObjectId {
        self.graph.insert(name, None).unwrap()
    }

    /// Add an object under `parent`.
    pub fn child(&mut self, name: &str, parent: ObjectId) -> ObjectId {
        self.graph.insert(name, Some(parent)).unwrap()
    }

    /// Attach a resolved component.
    pub fn component(&mut self, id: ObjectId, component: ComponentData) {
        self.graph.attach(id, ComponentHandle::Resolved(component));
    }

    /// Attach a component slot whose type no longer resolves.
    pub fn missing(&mut self, id: ObjectId) {
        self.graph.attach(id, ComponentHandle::Missing);
    }

    /// Finish building.
    pub fn build(self) -> ObjectGraph {
        self.graph
    }
}
