//! Registry mapping diagram elements to their rendered representations.

use std::collections::HashMap;

use crate::element::ElementId;
use crate::view::ViewNode;

/// Holds the rendered representation of every element on a surface.
///
/// Renderers register the subtree they produced for an element; the
/// preview layer looks representations up by element id to clone them.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    rendered: HashMap<ElementId, ViewNode>,
}

impl ElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element's rendered representation, replacing any
    /// previous one.
    pub fn set_rendered(&mut self, element: ElementId, node: ViewNode) {
        self.rendered.insert(element, node);
    }

    /// Get an element's rendered representation.
    pub fn rendered(&self, element: ElementId) -> Option<&ViewNode> {
        self.rendered.get(&element)
    }

    /// Remove an element's rendered representation.
    pub fn remove(&mut self, element: ElementId) -> Option<ViewNode> {
        self.rendered.remove(&element)
    }

    /// Number of registered representations.
    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}
