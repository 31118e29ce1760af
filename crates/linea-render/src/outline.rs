//! Fallback renderer drawing plain outlines.

use linea_core::{Element, ElementKind, NodeId, Rgba, Surface, ViewNode};
use peniko::Color;

use crate::renderer::{RenderError, RenderResult, Renderer};

/// Lowest-priority renderer that accepts every element.
///
/// Shapes become rectangle outlines, connections become bare polylines.
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    stroke: Rgba,
    stroke_width: f64,
}

impl OutlineRenderer {
    /// Create an outline renderer with the default stroke.
    pub fn new() -> Self {
        Self {
            stroke: Color::from_rgba8(0, 0, 0, 255).into(),
            stroke_width: 2.0,
        }
    }

    fn apply_stroke(&self, node: &mut ViewNode) {
        node.style.stroke = Some(self.stroke);
        node.style.stroke_width = Some(self.stroke_width);
    }
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for OutlineRenderer {
    fn can_render(&self, _element: &Element) -> bool {
        true
    }

    fn draw_shape(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        _surface: &mut Surface,
    ) -> RenderResult<NodeId> {
        let ElementKind::Shape { bounds } = &element.kind else {
            return Err(RenderError::Unsupported(element.id));
        };

        let mut node = ViewNode::rect(*bounds).for_element(element.id);
        self.apply_stroke(&mut node);

        Ok(parent.append(node).id)
    }

    fn draw_connection(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        _surface: &mut Surface,
    ) -> RenderResult<NodeId> {
        let ElementKind::Connection { waypoints, .. } = &element.kind else {
            return Err(RenderError::Unsupported(element.id));
        };

        let mut node = ViewNode::polyline(waypoints.clone()).for_element(element.id);
        self.apply_stroke(&mut node);

        Ok(parent.append(node).id)
    }
}
