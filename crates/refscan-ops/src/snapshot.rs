//! Snapshot host: a project described by a JSON document.
//!
//! The snapshot stands in for a live editor. It knows a set of scenes, which
//! one is open, and an asset library addressed by asset paths.

use std::path::Path;

use refscan_core::{
    CoreResult, HostError, Navigator, ObjectGraph, ObjectId, RecordedFields, ScanError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{OpsError, OpsResult};
use crate::host::{Enumeration, HostEnumerator, PROJECT_CONTEXT};

/// Errors raised by the snapshot host.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The project contains no scenes.
    #[error("Project has no scenes")]
    NoScenes,

    /// A scene name that is not part of the project.
    #[error("Unknown scene: {name}")]
    UnknownScene { name: String },

    /// A path that no longer resolves to an object.
    #[error("No object at {path} in {context}")]
    ObjectNotFound { context: String, path: String },
}

/// One scene of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Scene name, used as the scan context label.
    pub name: String,
    /// Objects living in the scene.
    #[serde(default)]
    pub objects: ObjectGraph,
}

impl SceneSnapshot {
    fn enumerate(&self) -> Enumeration<'_, ObjectGraph> {
        Enumeration::new(self.name.clone(), &self.objects, self.objects.walk())
    }
}

/// An addressable asset: a path and the root object it loads as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Asset path, e.g. `Assets/Prefabs/Player.prefab`.
    pub path: String,
    /// Root object of the asset within the library graph.
    pub root: ObjectId,
}

/// All project assets sharing one object graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetLibrary {
    /// Objects of every asset.
    #[serde(default)]
    pub objects: ObjectGraph,
    /// Asset entries in project order.
    #[serde(default)]
    pub entries: Vec<AssetEntry>,
}

/// A whole project: scenes plus assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project name.
    pub name: String,
    /// Scene open in the editor; defaults to the first scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_scene: Option<String>,
    /// Scenes in build order.
    #[serde(default)]
    pub scenes: Vec<SceneSnapshot>,
    /// Project assets.
    #[serde(default)]
    pub assets: AssetLibrary,
}

impl ProjectSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> OpsResult<Self> {
        if !path.exists() {
            return Err(OpsError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;
        debug!(
            name = %snapshot.name,
            scenes = snapshot.scenes.len(),
            assets = snapshot.assets.entries.len(),
            "Loaded project snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> OpsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a scene by name.
    pub fn scene(&self, name: &str) -> Option<&SceneSnapshot> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// The scene currently open.
    pub fn active(&self) -> Result<&SceneSnapshot, SnapshotError> {
        match &self.active_scene {
            Some(name) => self
                .scene(name)
                .ok_or_else(|| SnapshotError::UnknownScene { name: name.clone() }),
            None => self.scenes.first().ok_or(SnapshotError::NoScenes),
        }
    }

    /// Open a different scene.
    pub fn open_scene(&mut self, name: &str) -> Result<(), SnapshotError> {
        if self.scene(name).is_none() {
            return Err(SnapshotError::UnknownScene {
                name: name.to_string(),
            });
        }
        self.active_scene = Some(name.to_string());
        Ok(())
    }
}

impl HostEnumerator for ProjectSnapshot {
    type Graph = ObjectGraph;
    type Introspector = RecordedFields;

    fn introspector(&self) -> &RecordedFields {
        &RecordedFields
    }

    fn active_context(&self) -> Result<Enumeration<'_, ObjectGraph>, HostError> {
        Ok(self.active()?.enumerate())
    }

    fn all_contexts(&self) -> Result<Vec<Enumeration<'_, ObjectGraph>>, HostError> {
        Ok(self.scenes.iter().map(SceneSnapshot::enumerate).collect())
    }

    fn assets(&self, path_prefix: &str) -> Result<Enumeration<'_, ObjectGraph>, HostError> {
        let roots = self
            .assets
            .entries
            .iter()
            .filter(|entry| entry.path.starts_with(path_prefix))
            .flat_map(|entry| self.assets.objects.descendants(entry.root))
            .collect();
        Ok(Enumeration::new(PROJECT_CONTEXT, &self.assets.objects, roots))
    }
}

/// Navigator over a snapshot: tracks the open scene and the selected object.
#[derive(Debug)]
pub struct SnapshotNavigator<'a> {
    snapshot: &'a ProjectSnapshot,
    open_scene: Option<String>,
    selection: Option<(String, ObjectId)>,
}

impl<'a> SnapshotNavigator<'a> {
    /// Start with the snapshot's active scene open.
    pub fn new(snapshot: &'a ProjectSnapshot) -> Self {
        Self {
            snapshot,
            open_scene: snapshot.active().ok().map(|s| s.name.clone()),
            selection: None,
        }
    }

    /// Scene currently open.
    pub fn open_scene(&self) -> Option<&str> {
        self.open_scene.as_deref()
    }

    /// Context and id of the object last focused.
    pub fn selection(&self) -> Option<(&str, ObjectId)> {
        self.selection.as_ref().map(|(c, id)| (c.as_str(), *id))
    }
}

impl Navigator for SnapshotNavigator<'_> {
    fn focus(&mut self, context: &str, full_path: &str) -> CoreResult<()> {
        let graph = if context == PROJECT_CONTEXT {
            &self.snapshot.assets.objects
        } else {
            let scene = self.snapshot.scene(context).ok_or_else(|| {
                ScanError::host(SnapshotError::UnknownScene {
                    name: context.to_string(),
                })
            })?;
            if self.open_scene.as_deref() != Some(context) {
                info!(scene = %context, "Opening scene");
                self.open_scene = Some(context.to_string());
            }
            &scene.objects
        };

        let id = graph.find_by_path(full_path).ok_or_else(|| {
            ScanError::host(SnapshotError::ObjectNotFound {
                context: context.to_string(),
                path: full_path.to_string(),
            })
        })?;

        debug!(context, path = full_path, object = %id, "Focused object");
        self.selection = Some((context.to_string(), id));
        Ok(())
    }
}
