//! Preview composition for interactive move/resize/connect gestures.
//!
//! Two pieces cooperate here: [`PreviewSupport`] clones rendered elements
//! into draggers and builds resize frames; [`MarkerPreviews`] makes those
//! clones visually independent by cloning every marker definition they
//! reference, deduplicating shared definitions, and releasing them all
//! when the gesture's cleanup signal fires.

mod markers;
mod support;

pub use markers::MarkerPreviews;
pub use support::PreviewSupport;

use thiserror::Error;

use crate::element::ElementId;
use crate::marker::MalformedRef;

/// Errors surfaced while composing previews.
///
/// Every variant indicates a broken caller invariant, not a transient
/// condition: the gesture in flight should be abandoned, and the cleanup
/// signal still releases whatever was cloned before the failure.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no rendered representation registered for element {0}")]
    MissingRepresentation(ElementId),
    #[error(transparent)]
    MalformedReference(#[from] MalformedRef),
    #[error("marker `{0}` is not present in the surface defs")]
    UnknownMarker(String),
}
