//! Reference scanner
//!
//! Walks the field sequence of a candidate object and decides whether any slot,
//! directly or through a callback binding, points at the target instance.
//!
//! The walk is read-only and short-circuits on the first match. Callback lists are
//! handled by recursing into each entry's bound field, so nested callback shapes need
//! no special casing.

use crate::config::{NullTargetPolicy, ScanConfig};
use crate::model::Inspectable;
use crate::types::{Field, Handle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Path from an object's top-level field to the slot that matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum PathSegment {
    Field(String),
    Call(usize),
}

impl FieldPath {
    fn leaf(name: &str) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.to_string())],
        }
    }

    fn under_call(mut self, list: &str, index: usize) -> Self {
        self.segments.insert(0, PathSegment::Call(index));
        self.segments.insert(0, PathSegment::Field(list.to_string()));
        self
    }

    /// Name of the top-level field the match was found under
    pub fn root(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Number of callback entries traversed to reach the slot
    pub fn call_depth(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Call(_)))
            .count()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Call(index) => write!(f, ".calls[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// A candidate that holds a reference, with where the reference was found
#[derive(Debug, Clone, PartialEq)]
pub struct Match<O> {
    pub object: O,
    pub path: FieldPath,
}

/// Stateless reference scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceScanner {
    null_target: NullTargetPolicy,
}

impl ReferenceScanner {
    /// Create a scanner with the default policy (empty targets never match)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner from a scan configuration
    pub fn with_config(config: &ScanConfig) -> Self {
        Self {
            null_target: config.null_target,
        }
    }

    /// Whether any field of `candidate` refers to `target`
    pub fn has_reference<O>(&self, candidate: &O, target: Option<Handle>) -> bool
    where
        O: Inspectable + ?Sized,
    {
        self.find_reference(candidate, target).is_some()
    }

    /// Path of the first field of `candidate` that refers to `target`
    pub fn find_reference<O>(&self, candidate: &O, target: Option<Handle>) -> Option<FieldPath>
    where
        O: Inspectable + ?Sized,
    {
        if target.is_none() && self.null_target == NullTargetPolicy::NeverMatch {
            return None;
        }

        candidate
            .fields()
            .find_map(|field| self.match_field(field, target))
    }

    fn match_field(&self, field: &Field, target: Option<Handle>) -> Option<FieldPath> {
        match field {
            // Handle equality is instance identity
            Field::ObjectReference { name, target: slot } => {
                (*slot == target).then(|| FieldPath::leaf(name))
            }
            Field::CallbackList { name, calls } => {
                let calls = calls.as_deref().unwrap_or_default();
                calls.iter().enumerate().find_map(|(index, call)| {
                    let bound = call.target.as_deref()?;
                    self.match_field(bound, target)
                        .map(|path| path.under_call(name, index))
                })
            }
            Field::Opaque { .. } => None,
        }
    }

    /// Scan every candidate and group the matching ones by key.
    ///
    /// Every key seen in the input gets an entry, in first-seen order, even when none
    /// of its candidates match. Matches keep their input order and are not deduplicated.
    pub fn find_all_matches<K, O, I>(
        &self,
        candidates: I,
        target: Option<Handle>,
    ) -> IndexMap<K, Vec<Match<O>>>
    where
        I: IntoIterator<Item = (K, O)>,
        K: Hash + Eq,
        O: Inspectable,
    {
        let mut groups: IndexMap<K, Vec<Match<O>>> = IndexMap::new();
        for (key, candidate) in candidates {
            let found = self.find_reference(&candidate, target);
            let group = groups.entry(key).or_default();
            if let Some(path) = found {
                log::debug!("{} references target via {}", candidate.name(), path);
                group.push(Match {
                    object: candidate,
                    path,
                });
            }
        }
        groups
    }

    /// Like [`find_all_matches`](Self::find_all_matches) but keeps only the objects
    pub fn find_all_references<K, O, I>(
        &self,
        candidates: I,
        target: Option<Handle>,
    ) -> IndexMap<K, Vec<O>>
    where
        I: IntoIterator<Item = (K, O)>,
        K: Hash + Eq,
        O: Inspectable,
    {
        self.find_all_matches(candidates, target)
            .into_iter()
            .map(|(key, matches)| (key, matches.into_iter().map(|m| m.object).collect()))
            .collect()
    }
}
