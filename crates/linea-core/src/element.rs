//! Minimal diagram element model consumed by the rendering layer.
//!
//! The full editor model (parents, attachment, modeling rules) lives
//! outside this crate. Renderers and preview composition only need an
//! element's geometry and its decoration flags, so that is all this
//! surface exposes.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::marker::MarkerSlot;

/// Unique identifier for diagram elements.
pub type ElementId = Uuid;

/// The two element families the rendering layer distinguishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElementKind {
    /// A box-geometry element.
    Shape {
        /// Bounding geometry in world coordinates.
        bounds: Rect,
    },
    /// A waypoint-routed connection.
    Connection {
        /// Route in world coordinates, start to end.
        waypoints: Vec<Point>,
        /// Whether a renderer should decorate the route start.
        marker_start: bool,
        /// Whether a renderer should decorate intermediate waypoints.
        marker_mid: bool,
        /// Whether a renderer should decorate the route end.
        marker_end: bool,
    },
}

/// A diagram element as seen by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element family and geometry.
    pub kind: ElementKind,
}

impl Element {
    /// Create a shape element with the given bounds.
    pub fn shape(bounds: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ElementKind::Shape { bounds },
        }
    }

    /// Create a connection element with the given route and no decorations.
    pub fn connection(waypoints: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ElementKind::Connection {
                waypoints,
                marker_start: false,
                marker_mid: false,
                marker_end: false,
            },
        }
    }

    /// Set the decoration flags of a connection. No-op for shapes.
    pub fn with_markers(mut self, start: bool, mid: bool, end: bool) -> Self {
        if let ElementKind::Connection {
            marker_start,
            marker_mid,
            marker_end,
            ..
        } = &mut self.kind
        {
            *marker_start = start;
            *marker_mid = mid;
            *marker_end = end;
        }
        self
    }

    /// Check if this element is a connection.
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, ElementKind::Connection { .. })
    }

    /// Check whether the given decoration slot is requested on this element.
    pub fn has_marker(&self, slot: MarkerSlot) -> bool {
        match &self.kind {
            ElementKind::Shape { .. } => false,
            ElementKind::Connection {
                marker_start,
                marker_mid,
                marker_end,
                ..
            } => match slot {
                MarkerSlot::Start => *marker_start,
                MarkerSlot::Mid => *marker_mid,
                MarkerSlot::End => *marker_end,
            },
        }
    }

    /// Get the bounding box in world coordinates.
    ///
    /// For connections this is the bounding box of the route.
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ElementKind::Shape { bounds } => *bounds,
            ElementKind::Connection { waypoints, .. } => {
                let mut iter = waypoints.iter();
                let Some(first) = iter.next() else {
                    return Rect::ZERO;
                };
                let mut bounds = Rect::from_points(*first, *first);
                for p in iter {
                    bounds = bounds.union_pt(*p);
                }
                bounds
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_bounds() {
        let shape = Element::shape(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(shape.bounds(), Rect::new(10.0, 20.0, 110.0, 70.0));
        assert!(!shape.is_connection());
    }

    #[test]
    fn test_connection_bounds() {
        let connection = Element::connection(vec![
            Point::new(100.0, 50.0),
            Point::new(200.0, 50.0),
            Point::new(200.0, 150.0),
        ]);
        assert_eq!(connection.bounds(), Rect::new(100.0, 50.0, 200.0, 150.0));
        assert!(connection.is_connection());
    }

    #[test]
    fn test_empty_connection_bounds() {
        let connection = Element::connection(Vec::new());
        assert_eq!(connection.bounds(), Rect::ZERO);
    }

    #[test]
    fn test_marker_flags() {
        let connection = Element::connection(vec![Point::ZERO, Point::new(10.0, 0.0)])
            .with_markers(true, false, true);

        assert!(connection.has_marker(MarkerSlot::Start));
        assert!(!connection.has_marker(MarkerSlot::Mid));
        assert!(connection.has_marker(MarkerSlot::End));
    }

    #[test]
    fn test_marker_flags_on_shape_are_noop() {
        let shape = Element::shape(Rect::new(0.0, 0.0, 10.0, 10.0)).with_markers(true, true, true);
        assert!(!shape.has_marker(MarkerSlot::Start));
    }
}
