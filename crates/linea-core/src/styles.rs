//! Semantic style classes mapped to concrete style attributes.

use std::collections::HashMap;

use crate::view::{NodeStyle, Rgba};

/// Class applied to draggers and to marker definitions cloned for them.
pub const CLS_DRAGGER: &str = "linea-dragger";

/// Class applied to resize frames.
pub const CLS_RESIZE_OVERLAY: &str = "linea-resize-overlay";

/// Maps semantic class names to the concrete attributes they imply.
///
/// Callers pass extra attributes (e.g. the dragger positioning offsets)
/// which overlay the class defaults.
#[derive(Debug, Clone)]
pub struct Styles {
    defaults: HashMap<&'static str, NodeStyle>,
}

impl Styles {
    /// Create the style table with defaults for the preview classes.
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert(
            CLS_DRAGGER,
            NodeStyle {
                stroke: Some(Rgba::new(85, 85, 221, 255)),
                fill: Some(Rgba::transparent()),
                stroke_width: Some(1.0),
                ..NodeStyle::default()
            },
        );
        defaults.insert(
            CLS_RESIZE_OVERLAY,
            NodeStyle {
                stroke: Some(Rgba::new(51, 51, 51, 255)),
                fill: Some(Rgba::transparent()),
                stroke_width: Some(1.0),
                ..NodeStyle::default()
            },
        );
        Self { defaults }
    }

    /// Resolve a class name to its attributes, overlaid with `extra`.
    ///
    /// Unknown class names resolve to `extra` alone.
    pub fn cls(&self, name: &str, extra: NodeStyle) -> NodeStyle {
        let mut style = self.defaults.get(name).cloned().unwrap_or_default();
        style.merge(&extra);
        style
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}
