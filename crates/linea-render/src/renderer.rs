//! Renderer trait abstraction and priority-ordered selection.

use linea_core::{Element, ElementId, NodeId, Surface, ViewNode};
use log::debug;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no renderer accepts element {0}")]
    NoRenderer(ElementId),
    #[error("renderer does not support element {0}")]
    Unsupported(ElementId),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Priority of fallback renderers. Specialized renderers register with a
/// higher value to be consulted first.
pub const DEFAULT_RENDERER_PRIORITY: i32 = 1000;

/// Draws diagram elements into the retained view tree.
///
/// Implementations append their output to the parent node handed in and
/// may create shared marker definitions on the surface.
pub trait Renderer {
    /// Higher-priority renderers are consulted first.
    fn priority(&self) -> i32 {
        DEFAULT_RENDERER_PRIORITY
    }

    /// Whether this renderer can draw the given element.
    fn can_render(&self, element: &Element) -> bool;

    /// Draw a shape element into `parent`.
    fn draw_shape(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        surface: &mut Surface,
    ) -> RenderResult<NodeId>;

    /// Draw a connection element into `parent`.
    fn draw_connection(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        surface: &mut Surface,
    ) -> RenderResult<NodeId>;
}

/// Ordered collection of renderers, consulted by descending priority.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer. Renderers with equal priority keep their
    /// registration order.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        debug!("registering renderer with priority {}", renderer.priority());
        self.renderers.push(renderer);
        self.renderers.sort_by_key(|r| std::cmp::Reverse(r.priority()));
    }

    /// Draw an element with the first renderer that accepts it.
    pub fn draw(
        &mut self,
        parent: &mut ViewNode,
        element: &Element,
        surface: &mut Surface,
    ) -> RenderResult<NodeId> {
        let renderer = self
            .renderers
            .iter_mut()
            .find(|r| r.can_render(element))
            .ok_or(RenderError::NoRenderer(element.id))?;

        if element.is_connection() {
            renderer.draw_connection(parent, element, surface)
        } else {
            renderer.draw_shape(parent, element, surface)
        }
    }

    /// Number of registered renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Check if no renderers are registered.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}
