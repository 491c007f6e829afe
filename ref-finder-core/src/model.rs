//! Object graph model
//!
//! An [`Inspectable`] is the scan-time view of a host object: an identity plus an
//! ordered sequence of [`Field`]s. Nested structures are exposed one level deep;
//! the scanner recurses into callback entries itself.

use crate::types::{Field, Handle, ObjectKind};
use serde::{Deserialize, Serialize};

/// Capability set every scannable object representation provides
pub trait Inspectable {
    /// Identity of the underlying object instance
    fn handle(&self) -> Handle;

    /// Display name of the object
    fn name(&self) -> &str;

    /// Kind of the object, used for scope inference
    fn kind(&self) -> ObjectKind {
        ObjectKind::Other
    }

    /// Every inspectable field, in a stable order
    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_>;
}

impl<T: Inspectable + ?Sized> Inspectable for &T {
    fn handle(&self) -> Handle {
        (**self).handle()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> ObjectKind {
        (**self).kind()
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        (**self).fields()
    }
}

/// Owned field view of one object, as produced by an adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectableObject {
    pub handle: Handle,
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl InspectableObject {
    /// Create an object view with no fields
    pub fn new(handle: Handle, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Builder method: append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

impl Inspectable for InspectableObject {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        Box::new(self.fields.iter())
    }
}
