//! Shared marker definitions and the per-surface container holding them.
//!
//! Markers (arrowheads, dots) are named renderable fragments referenced
//! indirectly by view-node styles via `url(#id)`. One [`Defs`] container
//! exists per drawing surface; definitions are consumed by reference and
//! never mutated after insertion.

use std::collections::HashMap;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::ViewNode;

/// Suffix appended to a marker id to derive its preview clone's id.
pub const CLONE_SUFFIX: &str = "-clone";

/// The three decoration slots a node's style can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerSlot {
    Start,
    Mid,
    End,
}

impl MarkerSlot {
    /// All slots, in style-set order.
    pub const ALL: [MarkerSlot; 3] = [MarkerSlot::Start, MarkerSlot::Mid, MarkerSlot::End];

    /// Canonical slot name, also used as the default definition id by
    /// renderers that create one shared marker per slot kind.
    pub fn name(self) -> &'static str {
        match self {
            MarkerSlot::Start => "marker-start",
            MarkerSlot::Mid => "marker-mid",
            MarkerSlot::End => "marker-end",
        }
    }
}

/// A reusable decoration fragment referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerDef {
    /// Identifier, unique within one [`Defs`] container.
    pub id: String,
    /// Style class tagging this definition (e.g. as a dragger clone).
    pub class: Option<String>,
    /// Local coordinate system of the fragment.
    pub view_box: Rect,
    /// Reference point the fragment is anchored at.
    pub ref_x: f64,
    pub ref_y: f64,
    /// The renderable fragment itself.
    pub content: ViewNode,
}

impl MarkerDef {
    /// Create a definition with no class tag.
    pub fn new(id: impl Into<String>, view_box: Rect, ref_x: f64, ref_y: f64, content: ViewNode) -> Self {
        Self {
            id: id.into(),
            class: None,
            view_box,
            ref_x,
            ref_y,
            content,
        }
    }

    /// Check whether this definition is a preview clone.
    pub fn is_clone(&self) -> bool {
        self.id.ends_with(CLONE_SUFFIX)
    }
}

/// Container of marker definitions for one drawing surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defs {
    markers: HashMap<String, MarkerDef>,
}

impl Defs {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any existing one under the same id.
    pub fn insert(&mut self, def: MarkerDef) {
        self.markers.insert(def.id.clone(), def);
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&MarkerDef> {
        self.markers.get(id)
    }

    /// Remove a definition by id.
    pub fn remove(&mut self, id: &str) -> Option<MarkerDef> {
        self.markers.remove(id)
    }

    /// Check whether a definition exists.
    pub fn contains(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerDef> {
        self.markers.values()
    }

    /// Number of definitions, clones included.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if the container is empty.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of preview clones currently held.
    pub fn clone_count(&self) -> usize {
        self.markers.values().filter(|m| m.is_clone()).count()
    }
}

/// Error for indirect references that do not match the `url(#id)` syntax.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed marker reference: `{0}`")]
pub struct MalformedRef(pub String);

/// Extract the referenced id from an indirect reference.
///
/// Only the exact `url(#id)` form is accepted; anything else is a broken
/// caller invariant and is reported, never defaulted.
pub fn parse_marker_ref(value: &str) -> Result<&str, MalformedRef> {
    value
        .strip_prefix("url(#")
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| MalformedRef(value.to_owned()))
}

/// Format an indirect reference to the given marker id.
pub fn marker_ref(id: &str) -> String {
    format!("url(#{id})")
}
