//! Linea Render Library
//!
//! Renderer abstraction for the Linea diagram editor. Renderers draw
//! diagram elements into the retained view tree; a registry picks the
//! renderer for each element by priority and capability.

mod dot_markers;
mod outline;
mod renderer;

pub use dot_markers::{DotMarkerRenderer, DOT_MARKER_PRIORITY};
pub use outline::OutlineRenderer;
pub use renderer::{RenderError, RenderResult, Renderer, RendererRegistry, DEFAULT_RENDERER_PRIORITY};
