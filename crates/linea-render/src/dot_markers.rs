//! Connection renderer that decorates polylines with shared dot markers.
//!
//! For each decoration slot a connection requests, this renderer lazily
//! creates one shared dot definition in the surface's defs container and
//! writes the slot's indirect reference on the polyline node. The preview
//! layer later clones exactly these definitions when a decorated
//! connection is dragged.

use kurbo::{Circle, Rect};
use linea_core::{
    marker_ref, Element, ElementKind, MarkerDef, MarkerSlot, NodeId, Rgba, Surface, ViewNode,
};
use peniko::Color;

use crate::renderer::{RenderError, RenderResult, Renderer};

/// Priority of the dot-marker renderer; beats the outline fallback.
pub const DOT_MARKER_PRIORITY: i32 = 3000;

/// High-priority renderer for decorated connections.
#[derive(Debug, Clone)]
pub struct DotMarkerRenderer {
    stroke: Rgba,
    dot_fill: Rgba,
}

impl DotMarkerRenderer {
    /// Create a dot-marker renderer with the default palette.
    pub fn new() -> Self {
        Self {
            stroke: Color::from_rgba8(255, 0, 255, 255).into(),
            dot_fill: Color::from_rgba8(255, 0, 255, 255).into(),
        }
    }

    /// Get the shared dot definition for a slot, creating it on first use.
    ///
    /// The definition id is the slot name, so all connections on the
    /// surface share one definition per slot kind.
    fn ensure_marker(&self, surface: &mut Surface, slot: MarkerSlot) -> String {
        let id = slot.name();
        if !surface.defs().is_some_and(|defs| defs.contains(id)) {
            let mut dot = ViewNode::circle(Circle::new((5.0, 5.0), 5.0));
            dot.style.fill = Some(self.dot_fill);

            surface.defs_mut().insert(MarkerDef::new(
                id,
                Rect::new(0.0, 0.0, 10.0, 10.0),
                5.0,
                5.0,
                dot,
            ));
        }
        id.to_owned()
    }
}

impl Default for DotMarkerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DotMarkerRenderer {
    fn priority(&self) -> i32 {
        DOT_MARKER_PRIORITY
    }

    fn can_render(&self, element: &Element) -> bool {
        element.is_connection()
    }

    fn draw_shape(
        &mut self,
        _parent: &mut ViewNode,
        element: &Element,
        _surface: &mut Surface,
    ) -> RenderResult<NodeId> {
        Err(RenderError::Unsupported(element.id))
    }

    fn draw_connection(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        surface: &mut Surface,
    ) -> RenderResult<NodeId> {
        let ElementKind::Connection { waypoints, .. } = &element.kind else {
            return Err(RenderError::Unsupported(element.id));
        };

        let mut node = ViewNode::polyline(waypoints.clone()).for_element(element.id);
        node.style.stroke = Some(self.stroke);
        node.style.stroke_width = Some(5.0);

        for slot in MarkerSlot::ALL {
            if element.has_marker(slot) {
                let id = self.ensure_marker(surface, slot);
                node.style.set_marker(slot, marker_ref(&id));
            }
        }

        Ok(parent.append(node).id)
    }
}
