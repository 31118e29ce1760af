//! Cloning and lifetime tracking for markers referenced by previews.

use std::collections::HashMap;

use log::{debug, warn};

use crate::marker::{marker_ref, parse_marker_ref, CLONE_SUFFIX, MarkerSlot};
use crate::styles::CLS_DRAGGER;
use crate::surface::Surface;
use crate::view::ViewNode;

use super::PreviewError;

/// Tracks every marker definition cloned for previews during one
/// interactive operation.
///
/// The map is keyed by the original definition's id, so any number of
/// cloned subtrees referencing the same original resolve to a single
/// clone. The map's contents are scoped to one gesture: [`release_all`]
/// must run once per completed or cancelled gesture (the preview layer
/// wires it to the cleanup signal), after which the next gesture starts
/// from an empty map.
///
/// [`release_all`]: MarkerPreviews::release_all
#[derive(Debug, Default)]
pub struct MarkerPreviews {
    cloned: HashMap<String, String>,
}

impl MarkerPreviews {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite every marker reference in `node`'s subtree to point at a
    /// cloned definition.
    ///
    /// Children are visited before the node's own slots; full-subtree
    /// coverage is what matters, since deduplication is keyed by the
    /// referenced id, not by traversal order.
    pub fn resolve(&mut self, node: &mut ViewNode, surface: &mut Surface) -> Result<(), PreviewError> {
        for child in node.children_mut() {
            self.resolve(child, surface)?;
        }

        for slot in MarkerSlot::ALL {
            let Some(value) = node.style.marker(slot) else {
                continue;
            };
            let id = parse_marker_ref(value)?.to_owned();
            let clone_id = self.clone_marker(&id, surface)?;
            node.style.set_marker(slot, marker_ref(&clone_id));
        }

        Ok(())
    }

    /// Resolve a single referenced definition to its clone's id, cloning
    /// on first sight.
    fn clone_marker(&mut self, id: &str, surface: &mut Surface) -> Result<String, PreviewError> {
        if let Some(existing) = self.cloned.get(id) {
            return Ok(existing.clone());
        }

        let Some(mut clone) = surface.defs().and_then(|defs| defs.get(id)).cloned() else {
            return Err(PreviewError::UnknownMarker(id.to_owned()));
        };

        clone.id = format!("{id}{CLONE_SUFFIX}");
        clone.class = Some(CLS_DRAGGER.to_owned());

        let clone_id = clone.id.clone();
        debug!("cloned marker `{id}` as `{clone_id}`");

        surface.defs_mut().insert(clone);
        self.cloned.insert(id.to_owned(), clone_id.clone());

        Ok(clone_id)
    }

    /// Remove every tracked clone from the surface and empty the map.
    ///
    /// All-or-nothing and idempotent: running with an empty map is a
    /// no-op, and a second run in a row changes nothing.
    pub fn release_all(&mut self, surface: &mut Surface) {
        for (original, clone_id) in self.cloned.drain() {
            if surface.remove_def(&clone_id).is_none() {
                warn!("cloned marker `{clone_id}` (for `{original}`) was already removed");
            }
        }
    }

    /// The clone id registered for an original definition, if any.
    pub fn clone_id(&self, original: &str) -> Option<&str> {
        self.cloned.get(original).map(String::as_str)
    }

    /// Number of clones tracked for the current gesture.
    pub fn len(&self) -> usize {
        self.cloned.len()
    }

    /// Check if no clones are tracked.
    pub fn is_empty(&self) -> bool {
        self.cloned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{Defs, MarkerDef};
    use kurbo::{Circle, Point, Rect};

    fn dot(id: &str) -> MarkerDef {
        MarkerDef::new(
            id,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            5.0,
            5.0,
            ViewNode::circle(Circle::new((5.0, 5.0), 5.0)),
        )
    }

    fn surface_with(ids: &[&str]) -> Surface {
        let mut surface = Surface::new();
        for id in ids {
            surface.defs_mut().insert(dot(id));
        }
        surface
    }

    fn connection(start: Option<&str>, mid: Option<&str>, end: Option<&str>) -> ViewNode {
        let mut node = ViewNode::polyline(vec![Point::ZERO, Point::new(100.0, 0.0)]);
        if let Some(id) = start {
            node.style.set_marker(MarkerSlot::Start, marker_ref(id));
        }
        if let Some(id) = mid {
            node.style.set_marker(MarkerSlot::Mid, marker_ref(id));
        }
        if let Some(id) = end {
            node.style.set_marker(MarkerSlot::End, marker_ref(id));
        }
        node
    }

    #[test]
    fn test_resolve_rewrites_slots() {
        let mut surface = surface_with(&["m1", "m2"]);
        let mut previews = MarkerPreviews::new();
        let mut node = connection(Some("m1"), None, Some("m2"));

        previews.resolve(&mut node, &mut surface).unwrap();

        assert_eq!(node.style.marker(MarkerSlot::Start), Some("url(#m1-clone)"));
        assert_eq!(node.style.marker(MarkerSlot::End), Some("url(#m2-clone)"));
        assert_eq!(surface.defs().map(Defs::clone_count), Some(2));
    }

    #[test]
    fn test_no_slot_references_original_after_resolve() {
        let mut surface = surface_with(&["m1", "m2", "m3"]);
        let mut previews = MarkerPreviews::new();
        let mut node = connection(Some("m1"), Some("m2"), Some("m3"));

        previews.resolve(&mut node, &mut surface).unwrap();

        for slot in MarkerSlot::ALL {
            let id = parse_marker_ref(node.style.marker(slot).unwrap()).unwrap();
            assert!(id.ends_with(CLONE_SUFFIX));
        }
    }

    #[test]
    fn test_shared_marker_cloned_once() {
        // Element A references m1/m2, element B references m1/m3: three
        // clones total, and both start slots point at the same clone.
        let mut surface = surface_with(&["m1", "m2", "m3"]);
        let mut previews = MarkerPreviews::new();

        let mut a = connection(Some("m1"), None, Some("m2"));
        let mut b = connection(Some("m1"), Some("m3"), None);

        previews.resolve(&mut a, &mut surface).unwrap();
        previews.resolve(&mut b, &mut surface).unwrap();

        assert_eq!(previews.len(), 3);
        assert_eq!(surface.defs().map(Defs::clone_count), Some(3));

        assert_eq!(a.style.marker(MarkerSlot::Start), Some("url(#m1-clone)"));
        assert_eq!(b.style.marker(MarkerSlot::Start), Some("url(#m1-clone)"));
        assert_eq!(a.style.marker(MarkerSlot::End), Some("url(#m2-clone)"));
        assert_eq!(b.style.marker(MarkerSlot::Mid), Some("url(#m3-clone)"));
    }

    #[test]
    fn test_resolve_recurses_into_children() {
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();

        let mut root = ViewNode::group();
        let mut inner = ViewNode::group();
        inner.append(connection(None, None, Some("m1")));
        root.append(inner);

        previews.resolve(&mut root, &mut surface).unwrap();

        let leaf = &root.children()[0].children()[0];
        assert_eq!(leaf.style.marker(MarkerSlot::End), Some("url(#m1-clone)"));
    }

    #[test]
    fn test_resolve_without_references_is_noop() {
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();
        let mut node = connection(None, None, None);

        previews.resolve(&mut node, &mut surface).unwrap();

        assert!(previews.is_empty());
        assert_eq!(surface.defs().map(Defs::clone_count), Some(0));
    }

    #[test]
    fn test_unknown_marker_is_an_error() {
        let mut surface = surface_with(&[]);
        let mut previews = MarkerPreviews::new();
        let mut node = connection(Some("missing"), None, None);

        let err = previews.resolve(&mut node, &mut surface).unwrap_err();
        assert!(matches!(err, PreviewError::UnknownMarker(id) if id == "missing"));
    }

    #[test]
    fn test_malformed_reference_is_an_error() {
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();
        let mut node = ViewNode::polyline(vec![Point::ZERO, Point::new(10.0, 0.0)]);
        node.style.set_marker(MarkerSlot::Start, "m1");

        let err = previews.resolve(&mut node, &mut surface).unwrap_err();
        assert!(matches!(err, PreviewError::MalformedReference(_)));
    }

    #[test]
    fn test_release_all_removes_every_clone() {
        // Three elements referencing two distinct markers, then cleanup:
        // the container ends with zero clones.
        let mut surface = surface_with(&["m1", "m2"]);
        let mut previews = MarkerPreviews::new();

        for _ in 0..3 {
            let mut node = connection(Some("m1"), None, Some("m2"));
            previews.resolve(&mut node, &mut surface).unwrap();
        }
        assert_eq!(surface.defs().map(Defs::clone_count), Some(2));

        previews.release_all(&mut surface);

        assert!(previews.is_empty());
        assert_eq!(surface.defs().map(Defs::clone_count), Some(0));
        // Originals stay untouched.
        assert_eq!(surface.defs().map(Defs::len), Some(2));
    }

    #[test]
    fn test_release_all_is_idempotent() {
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();
        let mut node = connection(Some("m1"), None, None);
        previews.resolve(&mut node, &mut surface).unwrap();

        previews.release_all(&mut surface);
        let len_after_first = surface.defs().map(Defs::len);

        previews.release_all(&mut surface);
        assert_eq!(surface.defs().map(Defs::len), len_after_first);
    }

    #[test]
    fn test_sequential_operations_do_not_leak() {
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();

        for _ in 0..3 {
            let mut node = connection(Some("m1"), None, None);
            previews.resolve(&mut node, &mut surface).unwrap();
            assert_eq!(surface.defs().map(Defs::clone_count), Some(1));

            previews.release_all(&mut surface);
            assert_eq!(surface.defs().map(Defs::clone_count), Some(0));
        }
    }

    #[test]
    fn test_re_resolution_without_cleanup_reuses_entry() {
        // A second resolution in the same gesture reuses the registered
        // clone instead of stacking another one.
        let mut surface = surface_with(&["m1"]);
        let mut previews = MarkerPreviews::new();

        let mut first = connection(Some("m1"), None, None);
        previews.resolve(&mut first, &mut surface).unwrap();
        let mut second = connection(Some("m1"), None, None);
        previews.resolve(&mut second, &mut surface).unwrap();

        assert_eq!(previews.len(), 1);
        assert_eq!(surface.defs().map(Defs::clone_count), Some(1));
        assert_eq!(previews.clone_id("m1"), Some("m1-clone"));
    }
}
