//! Composition of draggers and resize frames.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{Element, ElementId};
use crate::event::{EventBus, Lifecycle};
use crate::registry::ElementRegistry;
use crate::styles::{Styles, CLS_DRAGGER, CLS_RESIZE_OVERLAY};
use crate::surface::Surface;
use crate::view::{NodeId, NodeStyle, ViewNode};

use super::{MarkerPreviews, PreviewError};

/// Produces lightweight visual copies of elements for interactive
/// manipulation.
///
/// One instance lives per surface, sharing the element registry and the
/// surface itself with the rest of the editor (single-threaded, hence
/// `Rc<RefCell<_>>`). Construction wires marker release to the
/// [`Lifecycle::DragCleanup`] signal, so controllers only have to fire
/// that signal once per finished or cancelled gesture.
#[derive(Debug)]
pub struct PreviewSupport {
    registry: Rc<RefCell<ElementRegistry>>,
    surface: Rc<RefCell<Surface>>,
    styles: Styles,
    markers: Rc<RefCell<MarkerPreviews>>,
}

impl PreviewSupport {
    /// Create preview support for a surface and subscribe its marker
    /// release to the cleanup signal.
    pub fn new(
        registry: Rc<RefCell<ElementRegistry>>,
        event_bus: &mut EventBus,
        surface: Rc<RefCell<Surface>>,
        styles: Styles,
    ) -> Self {
        let markers = Rc::new(RefCell::new(MarkerPreviews::new()));

        let release_markers = Rc::clone(&markers);
        let release_surface = Rc::clone(&surface);
        event_bus.on(Lifecycle::DragCleanup, move || {
            release_markers
                .borrow_mut()
                .release_all(&mut release_surface.borrow_mut());
        });

        Self {
            registry,
            surface,
            styles,
            markers,
        }
    }

    /// Snapshot of an element's rendered representation.
    ///
    /// Exposed for callers composing custom previews (e.g. a
    /// connection-creation preview) that need the rendered form directly.
    pub fn rendered(&self, element: ElementId) -> Option<ViewNode> {
        self.registry.borrow().rendered(element).cloned()
    }

    /// Add a move preview of an element to the given layer.
    ///
    /// The dragger is a deep clone of the element's rendered subtree,
    /// pinned at the subtree's bounding-box origin, tagged with the
    /// dragger class, and fully independent of the original: every marker
    /// reference inside it is rewritten to a cloned definition.
    ///
    /// Returns the id of the appended node. Fails if the element has no
    /// registered representation or a marker reference cannot be
    /// resolved; both are broken caller invariants.
    pub fn create_dragger(
        &self,
        element: ElementId,
        layer: &mut ViewNode,
    ) -> Result<NodeId, PreviewError> {
        let mut dragger = {
            let registry = self.registry.borrow();
            let gfx = registry
                .rendered(element)
                .ok_or(PreviewError::MissingRepresentation(element))?;
            gfx.deep_clone()
        };

        self.markers
            .borrow_mut()
            .resolve(&mut dragger, &mut self.surface.borrow_mut())?;

        let bounds = dragger.bounds();
        dragger.add_class(CLS_DRAGGER);
        dragger.style.merge(&self.styles.cls(
            CLS_DRAGGER,
            NodeStyle {
                x: Some(bounds.x0),
                y: Some(bounds.y0),
                ..NodeStyle::default()
            },
        ));

        Ok(layer.append(dragger).id)
    }

    /// Add a resize preview of a shape to the given layer.
    ///
    /// The frame is a fresh rectangle with exactly the shape's geometry,
    /// tagged with the resize overlay class. It is built from scratch:
    /// no cloning, no marker resolution.
    pub fn create_frame(&self, shape: &Element, layer: &mut ViewNode) -> NodeId {
        let mut frame = ViewNode::rect(shape.bounds()).for_element(shape.id);
        frame.add_class(CLS_RESIZE_OVERLAY);
        frame
            .style
            .merge(&self.styles.cls(CLS_RESIZE_OVERLAY, NodeStyle::default()));

        layer.append(frame).id
    }
}
