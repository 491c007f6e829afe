//! In-memory object store backed by a JSON project snapshot
//!
//! A snapshot lists the project's scenes (with their objects) and its assets. Each
//! object carries a tree of serialized properties, which the adapter maps onto
//! [`Field`] variants:
//!
//! - `object_reference` properties become reference slots; an id missing from the
//!   snapshot reads as an empty slot
//! - `event` properties become callback lists, reading entries from the `calls`
//!   child and each entry's bound target from its `target` child
//! - `generic` properties are flattened, so their children are scanned in place
//! - everything else is opaque

use crate::config::SearchScope;
use crate::host::{ObjectStore, ObjectSummary};
use crate::model::InspectableObject;
use crate::types::{CallbackEntry, Field, FinderError, Handle, ObjectKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Location name used for everything stored as a project asset
pub const PROJECT_LOCATION: &str = "Project Assets";

/// Serialized form of a whole project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub scenes: Vec<SceneSnapshot>,
    #[serde(default)]
    pub assets: Vec<NativeObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub name: String,
    /// Unloaded scenes are known but never searched
    #[serde(default = "default_true")]
    pub loaded: bool,
    #[serde(default)]
    pub objects: Vec<NativeObject>,
}

fn default_true() -> bool {
    true
}

/// A host object as stored in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeObject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// One serialized property, possibly with nested children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub reference: Option<u64>,
    #[serde(default)]
    pub children: Vec<Property>,
}

impl Property {
    fn child(&self, name: &str) -> Option<&Property> {
        self.children.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    ObjectReference,
    Event,
    Generic,
    Integer,
    Float,
    String,
    Boolean,
}

/// Object store over a loaded [`ProjectSnapshot`]
#[derive(Debug)]
pub struct SnapshotStore {
    snapshot: ProjectSnapshot,
    index: HashMap<u64, ObjectSummary>,
}

impl SnapshotStore {
    /// Index a snapshot, rejecting duplicate object ids
    pub fn from_snapshot(snapshot: ProjectSnapshot) -> Result<Self> {
        let mut index = HashMap::new();
        let all = snapshot
            .scenes
            .iter()
            .flat_map(|scene| scene.objects.iter())
            .chain(snapshot.assets.iter());

        for object in all {
            let summary = ObjectSummary {
                handle: Handle::new(object.id),
                name: object.name.clone(),
                kind: object.kind,
            };
            if index.insert(object.id, summary).is_some() {
                return Err(FinderError::DuplicateObject(object.id));
            }
        }

        log::debug!(
            "Indexed {} objects across {} scenes",
            index.len(),
            snapshot.scenes.len()
        );
        Ok(Self { snapshot, index })
    }

    /// Parse and index a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ProjectSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading project snapshot: {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Objects whose name matches exactly, in snapshot order
    pub fn find_by_name(&self, name: &str) -> Vec<ObjectSummary> {
        self.snapshot
            .scenes
            .iter()
            .flat_map(|scene| scene.objects.iter())
            .chain(self.snapshot.assets.iter())
            .filter(|object| object.name == name)
            .filter_map(|object| self.index.get(&object.id).cloned())
            .collect()
    }

    /// Number of objects in the snapshot
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Handle for a referenced id; an id missing from the snapshot reads as an empty slot
    fn resolve(&self, owner: Handle, property: &str, id: u64) -> Option<Handle> {
        if self.index.contains_key(&id) {
            Some(Handle::new(id))
        } else {
            log::debug!(
                "Object {} has a missing reference in '{}' (id {})",
                owner,
                property,
                id
            );
            None
        }
    }

    /// Map one property (and, for generic properties, its children) onto fields
    fn adapt_property(
        &self,
        owner: Handle,
        prefix: &str,
        property: &Property,
        out: &mut Vec<Field>,
    ) -> Result<()> {
        let name = if prefix.is_empty() {
            property.name.clone()
        } else {
            format!("{}.{}", prefix, property.name)
        };

        if property.reference.is_some() && property.property_type != PropertyType::ObjectReference {
            return Err(FinderError::InvalidProperty {
                object: owner,
                property: name,
                reason: format!("{:?} property carries a reference", property.property_type),
            });
        }

        match property.property_type {
            PropertyType::ObjectReference => {
                let target = property
                    .reference
                    .and_then(|id| self.resolve(owner, &name, id));
                out.push(Field::reference(name, target));
            }
            PropertyType::Event => {
                let calls = match property.child("calls") {
                    Some(list) => Some(self.adapt_calls(owner, list)?),
                    None => None,
                };
                out.push(Field::CallbackList { name, calls });
            }
            PropertyType::Generic => {
                out.push(Field::opaque(name.clone()));
                for child in &property.children {
                    self.adapt_property(owner, &name, child, out)?;
                }
            }
            _ => out.push(Field::opaque(name)),
        }
        Ok(())
    }

    fn adapt_calls(&self, owner: Handle, list: &Property) -> Result<Vec<CallbackEntry>> {
        let mut calls = Vec::with_capacity(list.children.len());
        for entry in &list.children {
            let target = match entry.child("target") {
                Some(target) => {
                    let mut fields = Vec::new();
                    self.adapt_property(owner, "", target, &mut fields)?;
                    // The bound target is the first field; flattened children are not part of it
                    fields.into_iter().next().map(Box::new)
                }
                None => None,
            };
            calls.push(CallbackEntry { target });
        }
        Ok(calls)
    }
}

impl ObjectStore for SnapshotStore {
    type Native = NativeObject;
    type Object = InspectableObject;

    fn enumerate_candidates(&self, scope: SearchScope) -> Vec<(String, NativeObject)> {
        let mut candidates = Vec::new();

        if scope.searches_scenes() {
            for scene in self.snapshot.scenes.iter().filter(|s| s.loaded) {
                for object in &scene.objects {
                    candidates.push((scene.name.clone(), object.clone()));
                }
            }
        }

        for asset in &self.snapshot.assets {
            if scope.includes(asset.kind) {
                candidates.push((PROJECT_LOCATION.to_string(), asset.clone()));
            }
        }

        candidates
    }

    fn adapt_to_inspectable(&self, native: NativeObject) -> Result<InspectableObject> {
        let handle = Handle::new(native.id);
        let mut fields = Vec::with_capacity(native.properties.len());
        for property in &native.properties {
            self.adapt_property(handle, "", property, &mut fields)?;
        }

        Ok(InspectableObject {
            handle,
            name: native.name,
            kind: native.kind,
            fields,
        })
    }

    fn locations(&self, scope: SearchScope) -> Vec<String> {
        let mut locations: Vec<String> = Vec::new();
        if scope.searches_scenes() {
            locations.extend(
                self.snapshot
                    .scenes
                    .iter()
                    .filter(|s| s.loaded)
                    .map(|s| s.name.clone()),
            );
        }
        locations.push(PROJECT_LOCATION.to_string());
        locations
    }

    fn describe(&self, handle: Handle) -> Option<ObjectSummary> {
        self.index.get(&handle.id()).cloned()
    }
}
