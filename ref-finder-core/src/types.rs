//! Core types for the reference finder library
//!
//! This module defines the values the scanner walks over: opaque object handles,
//! the tagged field variants exposed by an inspectable object, and the error type
//! used at the collaborator boundary. The scanner itself is infallible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for reference finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Opaque identity of a referenceable object instance.
///
/// Handles are minted by the object store, one per instance. Two handles are equal
/// only when they name the same instance; the contents of the objects never take
/// part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
    /// Create a handle from a store-assigned instance id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Store-assigned instance id behind this handle
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a host object, used to infer the search scope for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Object living in a scene hierarchy
    GameObject,
    /// Game object stored as a project asset
    Prefab,
    /// Data asset stored in the project
    ScriptableObject,
    /// Anything else (materials, textures, ...)
    #[default]
    Other,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::GameObject => write!(f, "GameObject"),
            ObjectKind::Prefab => write!(f, "Prefab"),
            ObjectKind::ScriptableObject => write!(f, "ScriptableObject"),
            ObjectKind::Other => write!(f, "Object"),
        }
    }
}

/// A single inspectable slot on an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    /// A direct reference slot, empty when nothing is assigned
    ObjectReference {
        name: String,
        target: Option<Handle>,
    },

    /// An event-style list of registered callbacks.
    ///
    /// `calls` is `None` when the callback metadata could not be found on a field that
    /// looks like an event; the scanner treats that the same as an empty list.
    CallbackList {
        name: String,
        calls: Option<Vec<CallbackEntry>>,
    },

    /// Any other slot (numbers, strings, plain structs); never a reference candidate
    Opaque { name: String },
}

impl Field {
    /// Build a reference slot
    pub fn reference(name: impl Into<String>, target: Option<Handle>) -> Self {
        Field::ObjectReference {
            name: name.into(),
            target,
        }
    }

    /// Build a callback list with the given entries
    pub fn callbacks(name: impl Into<String>, calls: Vec<CallbackEntry>) -> Self {
        Field::CallbackList {
            name: name.into(),
            calls: Some(calls),
        }
    }

    /// Build an opaque slot
    pub fn opaque(name: impl Into<String>) -> Self {
        Field::Opaque { name: name.into() }
    }

    /// Serialized name of the slot
    pub fn name(&self) -> &str {
        match self {
            Field::ObjectReference { name, .. } => name,
            Field::CallbackList { name, .. } => name,
            Field::Opaque { name } => name,
        }
    }
}

/// One registered callback binding within a callback list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackEntry {
    /// Bound target of the callback; `None` when the entry carries no target slot
    pub target: Option<Box<Field>>,
}

impl CallbackEntry {
    /// Entry bound to the given field
    pub fn new(target: Field) -> Self {
        Self {
            target: Some(Box::new(target)),
        }
    }

    /// Entry bound to a plain reference slot named `target`
    pub fn to(target: Option<Handle>) -> Self {
        Self::new(Field::reference("target", target))
    }

    /// Entry without a target slot
    pub fn detached() -> Self {
        Self { target: None }
    }
}

/// Errors raised at the object store / adapter boundary
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("Failed to parse project snapshot: {0}")]
    SnapshotParseError(#[from] serde_json::Error),

    #[error("Duplicate object id {0} in project snapshot")]
    DuplicateObject(u64),

    #[error("Object not found: {0}")]
    ObjectNotFound(Handle),

    #[error("Invalid property '{property}' on object {object}: {reason}")]
    InvalidProperty {
        object: Handle,
        property: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
