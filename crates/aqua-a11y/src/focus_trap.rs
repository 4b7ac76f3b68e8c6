//! Focus Trap
//!
//! Keeps Tab / Shift+Tab cycling inside a container, as modal dialogs need.
//! The focusable set is computed once when the trap is bound; elements added
//! or removed later are not picked up.

use std::rc::Rc;

use aqua_dom::{Document, Event, EventKind, ListenerId, NodeId};

use crate::focusable::focusable_descendants;

/// A bound focus trap
#[derive(Debug)]
pub struct FocusTrap {
    container: Option<NodeId>,
    focusables: Rc<[NodeId]>,
    listener: Option<ListenerId>,
}

impl FocusTrap {
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Focusable descendants captured at bind time
    pub fn focusables(&self) -> &[NodeId] {
        &self.focusables
    }

    pub fn first(&self) -> Option<NodeId> {
        self.focusables.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.focusables.last().copied()
    }

    /// Whether a keydown handler is attached
    pub fn is_bound(&self) -> bool {
        self.listener.is_some()
    }

    /// Detach the keydown handler
    pub fn release(&mut self, doc: &mut Document) -> bool {
        match self.listener.take() {
            Some(id) => doc.remove_event_listener(id),
            None => false,
        }
    }
}

/// Element to move focus to when Tab is pressed on `active`, or None to let
/// the key through
pub fn wrap_target(focusables: &[NodeId], active: Option<NodeId>, shift: bool) -> Option<NodeId> {
    let (first, last) = (focusables.first()?, focusables.last()?);
    let active = active?;

    if shift {
        (active == *first).then_some(*last)
    } else {
        (active == *last).then_some(*first)
    }
}

/// Bind a focus trap to `container`. An absent container yields an inert
/// session; a container with no focusable descendants binds a handler that
/// never acts. Binding the same container twice attaches two handlers.
pub fn trap_focus(doc: &mut Document, container: Option<NodeId>) -> FocusTrap {
    let Some(node) = container else {
        tracing::debug!("trap_focus: no container");
        return FocusTrap {
            container: None,
            focusables: Rc::from(Vec::new()),
            listener: None,
        };
    };

    let focusables: Rc<[NodeId]> = focusable_descendants(doc, node).into();
    tracing::debug!("Trapping focus in {:?} ({} focusable)", node, focusables.len());

    let set = focusables.clone();
    let listener = doc.add_event_listener(node, EventKind::KeyDown, move |doc: &mut Document, event: &mut Event| {
        let Some(key) = event.key() else {
            return;
        };
        if key.key != "Tab" {
            return;
        }
        if let Some(target) = wrap_target(&set, doc.active_element(), key.modifiers.shift) {
            doc.focus(target);
            event.prevent_default();
        }
    });

    FocusTrap {
        container: Some(node),
        focusables,
        listener: Some(listener),
    }
}
