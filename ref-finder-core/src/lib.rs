//! Reference Finder Library
//!
//! A stateless library that answers one question: which objects in a project hold a
//! reference to a given target object?
//!
//! # Architecture
//!
//! - [`model`] exposes an object as an ordered sequence of typed [`Field`]s
//! - [`scanner`] walks those fields, recursing into callback lists, and reports
//!   whether (and where) the target is referenced
//! - [`host`] defines the [`ObjectStore`] a host application implements to supply
//!   candidates, plus the [`search`] driver that groups matches by location
//! - [`snapshot`] is a ready-made store over a JSON project snapshot
//!
//! The library does NOT:
//! - Render results
//! - Cache or index anything between searches
//! - Mutate the objects it scans
//!
//! # Example Usage
//!
//! ```
//! use ref_finder_core::{CallbackEntry, Field, Handle, InspectableObject, ObjectKind, ReferenceScanner};
//!
//! let target = Handle::new(1);
//! let button = InspectableObject::new(Handle::new(2), "Button", ObjectKind::GameObject)
//!     .with_field(Field::reference("m_Image", None))
//!     .with_field(Field::callbacks("onClick", vec![CallbackEntry::to(Some(target))]));
//!
//! let scanner = ReferenceScanner::new();
//! assert!(scanner.has_reference(&button, Some(target)));
//! ```

// Public modules
pub mod config;
pub mod host;
pub mod model;
pub mod scanner;
pub mod snapshot;
pub mod types;

// Re-export main types for convenience
pub use config::{NullTargetPolicy, ScanConfig, SearchScope};
pub use host::{search, ObjectStore, ObjectSummary, SearchOutcome};
pub use model::{Inspectable, InspectableObject};
pub use scanner::{FieldPath, Match, ReferenceScanner};
pub use snapshot::{ProjectSnapshot, SnapshotStore, PROJECT_LOCATION};
pub use types::{CallbackEntry, Field, FinderError, Handle, ObjectKind, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
