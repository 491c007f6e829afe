//! Host collaborator interface and the search driver
//!
//! The library never owns the project's object registry. A host implements
//! [`ObjectStore`] to enumerate candidates per location and to adapt its native
//! objects into [`Inspectable`] views; [`search`] ties that to the scanner.

use crate::config::{ScanConfig, SearchScope};
use crate::model::Inspectable;
use crate::scanner::{Match, ReferenceScanner};
use crate::types::{FinderError, Handle, ObjectKind, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identity, name and kind of an object known to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub handle: Handle,
    pub name: String,
    pub kind: ObjectKind,
}

/// Object registry supplied by the host application
pub trait ObjectStore {
    /// Host-native object representation
    type Native;

    /// Field view produced by [`adapt_to_inspectable`](Self::adapt_to_inspectable)
    type Object: Inspectable;

    /// Every candidate in `scope`, paired with the location it lives in
    fn enumerate_candidates(&self, scope: SearchScope) -> Vec<(String, Self::Native)>;

    /// Convert a native object into its field view
    fn adapt_to_inspectable(&self, native: Self::Native) -> Result<Self::Object>;

    /// Locations that belong to `scope`, including ones holding no candidates
    fn locations(&self, _scope: SearchScope) -> Vec<String> {
        Vec::new()
    }

    /// Look up an object by handle
    fn describe(&self, handle: Handle) -> Option<ObjectSummary>;
}

/// Result of one search over a store
#[derive(Debug, Clone)]
pub struct SearchOutcome<O> {
    /// Scope that was actually enumerated
    pub scope: SearchScope,
    /// Target that was searched for
    pub target: Option<ObjectSummary>,
    /// Matches per location, in enumeration order
    pub locations: IndexMap<String, Vec<Match<O>>>,
    /// Number of candidates that were scanned
    pub scanned: usize,
    /// Number of candidates skipped because adaptation failed
    pub skipped: usize,
}

impl<O> SearchOutcome<O> {
    /// Total number of matching objects across all locations
    pub fn total_matches(&self) -> usize {
        self.locations.values().map(Vec::len).sum()
    }
}

/// Find every object in `store` that references `target`.
///
/// A non-empty target must be known to the store; its kind drives scope inference
/// when the configuration does not pin a scope. Objects that fail to adapt are
/// logged and skipped without failing the search.
pub fn search<S: ObjectStore>(
    store: &S,
    target: Option<Handle>,
    config: &ScanConfig,
) -> Result<SearchOutcome<S::Object>> {
    let summary = match target {
        Some(handle) => Some(store.describe(handle).ok_or(FinderError::ObjectNotFound(handle))?),
        None => None,
    };
    let kind = summary.as_ref().map(|s| s.kind).unwrap_or_default();
    let scope = config.resolve_scope(kind);
    let scanner = ReferenceScanner::with_config(config);

    log::info!(
        "Searching for references to {} (scope: {})",
        summary.as_ref().map(|s| s.name.as_str()).unwrap_or("<none>"),
        scope
    );

    // Seed every location up front so ones whose candidates all fail still show up
    let mut locations: IndexMap<String, Vec<Match<S::Object>>> = store
        .locations(scope)
        .into_iter()
        .map(|location| (location, Vec::new()))
        .collect();

    let mut adapted = Vec::new();
    let mut skipped = 0;
    for (location, native) in store.enumerate_candidates(scope) {
        locations.entry(location.clone()).or_default();
        match store.adapt_to_inspectable(native) {
            Ok(object) => adapted.push((location, object)),
            Err(e) => {
                log::warn!("Skipping object in {}: {}", location, e);
                skipped += 1;
            }
        }
    }

    let scanned = adapted.len();
    for (location, matches) in scanner.find_all_matches(adapted, target) {
        locations.entry(location).or_default().extend(matches);
    }

    let outcome = SearchOutcome {
        scope,
        target: summary,
        locations,
        scanned,
        skipped,
    };
    log::info!(
        "Scanned {} objects in {} locations, {} references found, {} skipped",
        outcome.scanned,
        outcome.locations.len(),
        outcome.total_matches(),
        outcome.skipped
    );
    Ok(outcome)
}
