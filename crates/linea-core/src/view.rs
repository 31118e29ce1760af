//! Retained view tree produced by renderers and consumed by previews.
//!
//! A [`ViewNode`] is an element's rendered representation: a typed node
//! with a shape, a style set, and child nodes. The preview layer clones
//! these subtrees wholesale, so everything on a node is plain owned data.

use kurbo::{BezPath, Circle, Point, Rect, Shape as _};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::ElementId;
use crate::marker::MarkerSlot;

/// Unique identifier for view nodes.
pub type NodeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style attributes of a view node.
///
/// The three marker slots hold raw indirect references (`url(#id)`); the
/// `x`/`y` pair is the positioning offset previews use to pin a dragger at
/// its source's bounding-box origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub stroke: Option<Rgba>,
    pub fill: Option<Rgba>,
    pub stroke_width: Option<f64>,
    pub marker_start: Option<String>,
    pub marker_mid: Option<String>,
    pub marker_end: Option<String>,
}

impl NodeStyle {
    /// Get the raw reference stored in a marker slot.
    pub fn marker(&self, slot: MarkerSlot) -> Option<&str> {
        match slot {
            MarkerSlot::Start => self.marker_start.as_deref(),
            MarkerSlot::Mid => self.marker_mid.as_deref(),
            MarkerSlot::End => self.marker_end.as_deref(),
        }
    }

    /// Store a raw reference in a marker slot.
    pub fn set_marker(&mut self, slot: MarkerSlot, value: impl Into<String>) {
        let value = Some(value.into());
        match slot {
            MarkerSlot::Start => self.marker_start = value,
            MarkerSlot::Mid => self.marker_mid = value,
            MarkerSlot::End => self.marker_end = value,
        }
    }

    /// Overlay the set attributes of `other` onto this style.
    pub fn merge(&mut self, other: &NodeStyle) {
        if other.x.is_some() {
            self.x = other.x;
        }
        if other.y.is_some() {
            self.y = other.y;
        }
        if other.stroke.is_some() {
            self.stroke = other.stroke;
        }
        if other.fill.is_some() {
            self.fill = other.fill;
        }
        if other.stroke_width.is_some() {
            self.stroke_width = other.stroke_width;
        }
        if other.marker_start.is_some() {
            self.marker_start = other.marker_start.clone();
        }
        if other.marker_mid.is_some() {
            self.marker_mid = other.marker_mid.clone();
        }
        if other.marker_end.is_some() {
            self.marker_end = other.marker_end.clone();
        }
    }
}

/// Geometry carried by a view node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeShape {
    /// Pure container, no geometry of its own.
    Group,
    Rect(Rect),
    Polyline(Vec<Point>),
    Circle(Circle),
    Path(BezPath),
}

/// A node in the retained view tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    /// Unique identifier.
    pub id: NodeId,
    /// Diagram element this node renders, if any.
    pub element: Option<ElementId>,
    /// Style classes applied to this node.
    classes: Vec<String>,
    /// Style attributes.
    pub style: NodeStyle,
    /// Geometry.
    pub shape: NodeShape,
    /// Child nodes.
    children: Vec<ViewNode>,
}

impl ViewNode {
    /// Create a node with the given geometry and no children.
    pub fn new(shape: NodeShape) -> Self {
        Self {
            id: Uuid::new_v4(),
            element: None,
            classes: Vec::new(),
            style: NodeStyle::default(),
            shape,
            children: Vec::new(),
        }
    }

    /// Create an empty container node.
    pub fn group() -> Self {
        Self::new(NodeShape::Group)
    }

    /// Create a rectangle node.
    pub fn rect(rect: Rect) -> Self {
        Self::new(NodeShape::Rect(rect))
    }

    /// Create a polyline node.
    pub fn polyline(points: Vec<Point>) -> Self {
        Self::new(NodeShape::Polyline(points))
    }

    /// Create a circle node.
    pub fn circle(circle: Circle) -> Self {
        Self::new(NodeShape::Circle(circle))
    }

    /// Create a path node.
    pub fn path(path: BezPath) -> Self {
        Self::new(NodeShape::Path(path))
    }

    /// Tag this node with the element it renders.
    pub fn for_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Add a style class. Adding an already-present class is a no-op.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Check whether a style class is set.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Get the style classes.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Get the child nodes.
    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// Get mutable access to the child nodes.
    pub fn children_mut(&mut self) -> &mut Vec<ViewNode> {
        &mut self.children
    }

    /// Append a child node and return a reference to it.
    pub fn append(&mut self, child: ViewNode) -> &mut ViewNode {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Find the first node in this subtree tagged with the given element.
    pub fn find_by_element(&self, element: ElementId) -> Option<&ViewNode> {
        if self.element == Some(element) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_element(element))
    }

    /// Get the bounding box of this node's geometry and all its children.
    ///
    /// An empty container has zero bounds.
    pub fn bounds(&self) -> Rect {
        let own = match &self.shape {
            NodeShape::Group => None,
            NodeShape::Rect(rect) => Some(*rect),
            NodeShape::Polyline(points) => {
                let mut iter = points.iter();
                iter.next().map(|first| {
                    let mut bounds = Rect::from_points(*first, *first);
                    for p in iter {
                        bounds = bounds.union_pt(*p);
                    }
                    bounds
                })
            }
            NodeShape::Circle(circle) => Some(circle.bounding_box()),
            NodeShape::Path(path) => {
                if path.elements().is_empty() {
                    None
                } else {
                    Some(path.bounding_box())
                }
            }
        };

        let mut bounds = own;
        for child in &self.children {
            let child_bounds = child.bounds();
            bounds = Some(match bounds {
                Some(b) => b.union(child_bounds),
                None => child_bounds,
            });
        }
        bounds.unwrap_or(Rect::ZERO)
    }

    /// Clone this subtree with fresh node identifiers throughout.
    ///
    /// Classes, styles, geometry, and element tags are copied by value, so
    /// the clone shares nothing with the original and can be restyled
    /// freely.
    pub fn deep_clone(&self) -> ViewNode {
        ViewNode {
            id: Uuid::new_v4(),
            element: self.element,
            classes: self.classes.clone(),
            style: self.style.clone(),
            shape: self.shape.clone(),
            children: self.children.iter().map(ViewNode::deep_clone).collect(),
        }
    }
}
