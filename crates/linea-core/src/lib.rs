//! Linea Core Library
//!
//! Core data structures and preview-composition logic for the Linea
//! diagram editor. The heart of this crate is the preview layer: cloning
//! rendered elements into independent "draggers" while an interactive
//! gesture is in flight, and tracking the marker definitions those clones
//! share so they can be released in one sweep when the gesture ends.

pub mod element;
pub mod event;
pub mod marker;
pub mod preview;
pub mod registry;
pub mod styles;
pub mod surface;
pub mod view;

pub use element::{Element, ElementId, ElementKind};
pub use event::{EventBus, Lifecycle};
pub use marker::{marker_ref, parse_marker_ref, Defs, MalformedRef, MarkerDef, MarkerSlot, CLONE_SUFFIX};
pub use preview::{MarkerPreviews, PreviewError, PreviewSupport};
pub use registry::ElementRegistry;
pub use styles::{Styles, CLS_DRAGGER, CLS_RESIZE_OVERLAY};
pub use surface::Surface;
pub use view::{NodeId, NodeShape, NodeStyle, Rgba, ViewNode};
