//! Reduced Motion Support
//!
//! prefers-reduced-motion detection and animation suppression for
//! library-marked elements.

use aqua_dom::{property, Document, NodeId};

/// Media query evaluated by [`prefers_reduced_motion`]
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Class substring that marks library elements
pub const AQUA_CLASS_MARKER: &str = "aq-";

/// Motion preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

impl MotionPreference {
    /// Read the preference from the platform. Not cached.
    pub fn from_document(doc: &Document) -> Self {
        if doc.match_media(REDUCED_MOTION_QUERY) {
            Self::Reduce
        } else {
            Self::NoPreference
        }
    }

    pub fn should_reduce(&self) -> bool {
        *self == Self::Reduce
    }
}

/// Whether the user asked for reduced motion
pub fn prefers_reduced_motion(doc: &Document) -> bool {
    MotionPreference::from_document(doc).should_reduce()
}

/// Disable transitions and animations on every element whose `class`
/// attribute contains [`AQUA_CLASS_MARKER`]. Does nothing unless reduced
/// motion is preferred. Returns the number of elements touched.
pub fn suppress_all_animations(doc: &mut Document) -> usize {
    suppress_animations(doc, AQUA_CLASS_MARKER)
}

/// [`suppress_all_animations`] with a custom class marker
pub fn suppress_animations(doc: &mut Document, marker: &str) -> usize {
    if !prefers_reduced_motion(doc) {
        return 0;
    }

    let targets: Vec<NodeId> = doc
        .descendant_elements(doc.root())
        .into_iter()
        .filter(|&node| {
            doc.get_attribute(node, "class")
                .is_some_and(|class| class.contains(marker))
        })
        .collect();

    for &node in &targets {
        doc.set_style(node, property::TRANSITION, "none");
        doc.set_style(node, property::ANIMATION, "none");
    }

    tracing::debug!("Reduced motion: suppressed animations on {} elements", targets.len());
    targets.len()
}
