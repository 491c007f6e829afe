//! Scanner configuration types
//!
//! This module defines the small set of knobs the scanner and the search driver
//! understand. Presentation settings (output format, verbosity) belong to the
//! application layer.

use crate::types::ObjectKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of the project a search enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Objects of every loaded scene plus prefab objects
    GameObject,
    /// Scriptable-object assets only
    ScriptableObject,
    /// Everything the store knows about
    #[default]
    Any,
}

impl SearchScope {
    /// Scope a "find references" request on an object of this kind should use
    pub fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::GameObject | ObjectKind::Prefab => SearchScope::GameObject,
            ObjectKind::ScriptableObject => SearchScope::ScriptableObject,
            ObjectKind::Other => SearchScope::Any,
        }
    }

    /// Whether objects of `kind` are part of this scope
    pub fn includes(self, kind: ObjectKind) -> bool {
        match self {
            SearchScope::GameObject => matches!(kind, ObjectKind::GameObject | ObjectKind::Prefab),
            SearchScope::ScriptableObject => kind == ObjectKind::ScriptableObject,
            SearchScope::Any => true,
        }
    }

    /// Whether scene contents are enumerated for this scope
    pub fn searches_scenes(self) -> bool {
        !matches!(self, SearchScope::ScriptableObject)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::GameObject => write!(f, "game_object"),
            SearchScope::ScriptableObject => write!(f, "scriptable_object"),
            SearchScope::Any => write!(f, "any"),
        }
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "game_object" | "gameobject" => Ok(SearchScope::GameObject),
            "scriptable_object" | "scriptableobject" => Ok(SearchScope::ScriptableObject),
            "any" => Ok(SearchScope::Any),
            other => Err(format!("unknown search scope: {other}")),
        }
    }
}

/// How an empty target is matched against empty reference slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullTargetPolicy {
    /// An empty target never matches anything
    #[default]
    NeverMatch,
    /// An empty target matches every empty reference slot
    MatchEmptySlots,
}

/// Configuration for the reference scanner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Scope to enumerate; `None` infers it from the target's kind
    #[serde(default)]
    pub scope: Option<SearchScope>,

    /// Treatment of empty targets
    #[serde(default)]
    pub null_target: NullTargetPolicy,
}

impl ScanConfig {
    /// Create a new scan configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: pin the search scope
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Builder method: set the empty-target policy
    pub fn with_null_target_policy(mut self, policy: NullTargetPolicy) -> Self {
        self.null_target = policy;
        self
    }

    /// Scope to use for a target of the given kind
    pub fn resolve_scope(&self, target_kind: ObjectKind) -> SearchScope {
        self.scope.unwrap_or_else(|| SearchScope::for_kind(target_kind))
    }
}
