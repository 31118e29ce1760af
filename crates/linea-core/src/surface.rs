//! Per-diagram drawing surface state shared by renderers and previews.

use serde::{Deserialize, Serialize};

use crate::marker::{Defs, MarkerDef};

/// One drawing surface per open diagram.
///
/// Holds the marker definition container. The container is created lazily
/// on first use so a surface that never renders decorated elements never
/// carries one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Surface {
    defs: Option<Defs>,
}

impl Surface {
    /// Create a surface with no definition container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the definition container, if one has been created.
    pub fn defs(&self) -> Option<&Defs> {
        self.defs.as_ref()
    }

    /// Get the definition container, creating it if missing.
    pub fn defs_mut(&mut self) -> &mut Defs {
        self.defs.get_or_insert_with(Defs::new)
    }

    /// Remove a definition by id from the container, if present.
    pub fn remove_def(&mut self, id: &str) -> Option<MarkerDef> {
        self.defs.as_mut()?.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewNode;
    use kurbo::{Circle, Rect};

    #[test]
    fn test_defs_created_lazily() {
        let mut surface = Surface::new();
        assert!(surface.defs().is_none());

        surface.defs_mut().insert(MarkerDef::new(
            "dot",
            Rect::new(0.0, 0.0, 10.0, 10.0),
            5.0,
            5.0,
            ViewNode::circle(Circle::new((5.0, 5.0), 5.0)),
        ));

        assert_eq!(surface.defs().map(Defs::len), Some(1));
    }

    #[test]
    fn test_remove_def_without_container() {
        let mut surface = Surface::new();
        assert!(surface.remove_def("dot").is_none());
        assert!(surface.defs().is_none());
    }
}
