//! Ripple effect
//!
//! Material-style ink ripple: a transient span placed under the pointer inside
//! the clicked element, removed again after a fixed duration.

use aqua_dom::{property, Document, Event, EventKind, ListenerId, NodeId};

pub const RIPPLE_CLASS: &str = "aq-ripple";
pub const DEFAULT_RIPPLE_COLOR: &str = "rgba(0,0,0,0.2)";
pub const DEFAULT_RIPPLE_MS: u64 = 600;

/// Ripple appearance
#[derive(Debug, Clone, PartialEq)]
pub struct RippleOptions {
    pub color: String,
    pub duration_ms: u64,
    pub class_name: String,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_RIPPLE_COLOR.to_string(),
            duration_ms: DEFAULT_RIPPLE_MS,
            class_name: RIPPLE_CLASS.to_string(),
        }
    }
}

impl RippleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Spawn a ripple for a pointer event.
///
/// The trigger is the event's current target, falling back to its target.
/// The span sits at the pointer position relative to the trigger's bounding
/// box and is sized to the box's larger side. Events without pointer data or
/// without an element to attach to are ignored.
pub fn emit_ripple(doc: &mut Document, event: &Event, options: &RippleOptions) {
    let Some(trigger) = event
        .current_target
        .or(event.target)
        .filter(|&node| doc.is_element(node))
    else {
        tracing::debug!("emit_ripple: no trigger element");
        return;
    };
    let Some(pointer) = event.pointer() else {
        tracing::debug!("emit_ripple: {} event has no pointer data", event.kind.name());
        return;
    };
    let rect = doc.bounding_client_rect(trigger).unwrap_or_default();

    let ripple = doc.create_element("span");
    doc.add_class(ripple, &options.class_name);
    doc.set_style(ripple, property::BACKGROUND, &options.color);
    doc.set_style(ripple, property::LEFT, &px(pointer.client_x - rect.left()));
    doc.set_style(ripple, property::TOP, &px(pointer.client_y - rect.top()));
    let size = px(rect.max_side());
    doc.set_style(ripple, property::WIDTH, &size);
    doc.set_style(ripple, property::HEIGHT, &size);

    if let Err(err) = doc.append_child(trigger, ripple) {
        tracing::warn!("emit_ripple: cannot attach ripple to {:?}: {}", trigger, err);
        return;
    }

    doc.set_timeout(options.duration_ms, move |doc| {
        // Already gone if the trigger cleared its children
        let _ = doc.remove(ripple);
    });
}

/// Make `element` a ripple host and emit a ripple on every click
pub fn attach_ripple(doc: &mut Document, element: NodeId, options: RippleOptions) -> Option<ListenerId> {
    attach_ripple_on(doc, element, EventKind::Click, options)
}

/// [`attach_ripple`] for another pointer event, e.g. `mousedown`
pub fn attach_ripple_on(
    doc: &mut Document,
    element: NodeId,
    kind: EventKind,
    options: RippleOptions,
) -> Option<ListenerId> {
    if !doc.is_element(element) {
        return None;
    }
    doc.set_style(element, property::POSITION, "relative");
    doc.set_style(element, property::OVERFLOW, "hidden");

    Some(doc.add_event_listener(element, kind, move |doc: &mut Document, event: &mut Event| {
        emit_ripple(doc, event, &options)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_dom::DOMRect;

    fn button_at(doc: &mut Document, rect: DOMRect) -> NodeId {
        let button = doc.create_element("button");
        doc.set_bounding_rect(button, rect);
        let body = doc.body();
        doc.append_child(body, button).unwrap();
        button
    }

    #[test]
    fn test_ripple_geometry() {
        let mut doc = Document::new();
        let button = button_at(&mut doc, DOMRect::from_xywh(10.0, 20.0, 100.0, 40.0));

        let mut event = Event::click(30.0, 25.0);
        event.current_target = Some(button);
        emit_ripple(&mut doc, &event, &RippleOptions::default());

        let ripple = doc.element_children(button)[0];
        assert!(doc.has_class(ripple, RIPPLE_CLASS));
        assert_eq!(doc.get_style(ripple, property::LEFT), Some("20px"));
        assert_eq!(doc.get_style(ripple, property::TOP), Some("5px"));
        assert_eq!(doc.get_style(ripple, property::WIDTH), Some("100px"));
        assert_eq!(doc.get_style(ripple, property::HEIGHT), Some("100px"));
        assert_eq!(doc.get_style(ripple, property::BACKGROUND), Some(DEFAULT_RIPPLE_COLOR));
    }

    #[test]
    fn test_ripple_removed_after_duration() {
        let mut doc = Document::new();
        let button = button_at(&mut doc, DOMRect::from_xywh(0.0, 0.0, 50.0, 50.0));
        let mut event = Event::click(5.0, 5.0);
        event.target = Some(button);

        emit_ripple(&mut doc, &event, &RippleOptions::new().duration(250));
        assert_eq!(doc.element_children(button).len(), 1);
        doc.advance(249);
        assert_eq!(doc.element_children(button).len(), 1);
        doc.advance(1);
        assert!(doc.element_children(button).is_empty());
    }

    #[test]
    fn test_event_without_pointer_is_ignored() {
        let mut doc = Document::new();
        let button = button_at(&mut doc, DOMRect::from_xywh(0.0, 0.0, 50.0, 50.0));
        let mut event = Event::new(EventKind::Click);
        event.current_target = Some(button);

        emit_ripple(&mut doc, &event, &RippleOptions::default());
        assert!(doc.children(button).is_empty());
        assert_eq!(doc.pending_timers(), 0);
    }
}
