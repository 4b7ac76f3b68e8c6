//! Buttons
//!
//! Ripples, attention animations, spinners, toggles and group selection.

use aqua_dom::{Document, DomResult, EventKind, NodeId};
use aqua_motion::{attach_ripple, run_animation, AnimationOptions};

use super::{closest, element_with_class, find, find_all, ComponentEvent, Context};
use crate::registry::Binding;

pub const SHAKE: &str = "aq-btn-shake";
pub const SPINNER: &str = "aq-btn-spinner";

fn looping(doc: &mut Document, element: NodeId, class: &str, duration_ms: u64) {
    run_animation(doc, Some(element), class, AnimationOptions::new().duration(duration_ms).infinite());
}

/// Mark `button` as selected within its `.aq-btn-group`. Returns the group.
pub fn select_in_group(doc: &mut Document, button: NodeId) -> Option<NodeId> {
    let group = closest(doc, button, ".aq-btn-group")?;
    for other in find_all(doc, group, ".aq-btn") {
        doc.remove_class(other, "selected");
    }
    doc.add_class(button, "selected");
    Some(group)
}

/// Toggle the loading state: disables the button and adds a leading spinner
pub fn set_loading(doc: &mut Document, button: NodeId, loading: bool) -> DomResult<()> {
    if loading {
        doc.set_attribute(button, "disabled", "")?;
        doc.add_class(button, "loading");
        if find(doc, button, ".aq-btn-spinner").is_none() {
            let spinner = element_with_class(doc, "span", SPINNER);
            doc.prepend_child(button, spinner)?;
        }
    } else {
        doc.remove_attribute(button, "disabled");
        doc.remove_class(button, "loading");
        if let Some(spinner) = find(doc, button, ".aq-btn-spinner") {
            doc.remove(spinner)?;
        }
    }
    Ok(())
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let ripple = ctx.config.ripple_options();
    let clicked = ctx.events.clone();
    let selected = ctx.events.clone();

    vec![
        Binding::init(".aq-btn.ripple", move |doc, button| {
            attach_ripple(doc, button, ripple.clone());
        }),
        Binding::init(".aq-btn.pulse", |doc, button| looping(doc, button, "aq-btn-pulse", 2000)),
        Binding::init(".aq-btn.bounce", |doc, button| looping(doc, button, "aq-btn-bounce", 2000)),
        Binding::init(".aq-btn .aq-btn-spinner", |doc, spinner| {
            looping(doc, spinner, "aq-btn-spin", 750)
        }),
        Binding::on(".aq-btn.shake", EventKind::Click, |doc, button, _| {
            run_animation(doc, Some(button), SHAKE, AnimationOptions::new().duration(500));
        }),
        Binding::on(".aq-btn.clickable", EventKind::Click, move |doc, button, _| {
            doc.toggle_class(button, "active", None);
            clicked.emit(doc, ComponentEvent::ButtonClicked { button });
        }),
        Binding::on(".aq-btn-group .aq-btn", EventKind::Click, move |doc, button, _| {
            if let Some(group) = select_in_group(doc, button) {
                selected.emit(doc, ComponentEvent::ButtonGroupSelected { group, button });
            }
        }),
        Binding::on(".aq-btn-group .aq-btn", EventKind::Focus, |doc, button, _| {
            doc.add_class(button, "active")
        }),
        Binding::on(".aq-btn-group .aq-btn", EventKind::Blur, |doc, button, _| {
            doc.remove_class(button, "active")
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_loading_round_trip() {
        let mut doc = Document::new();
        let button = element_with_class(&mut doc, "button", "aq-btn");
        let label = doc.create_text("Save");
        doc.append_child(button, label).unwrap();
        let body = doc.body();
        doc.append_child(body, button).unwrap();

        set_loading(&mut doc, button, true).unwrap();
        set_loading(&mut doc, button, true).unwrap();
        assert!(doc.has_attribute(button, "disabled"));
        let spinners = find_all(&doc, button, ".aq-btn-spinner");
        assert_eq!(spinners.len(), 1);
        assert_eq!(doc.children(button)[0], spinners[0]);

        set_loading(&mut doc, button, false).unwrap();
        assert!(!doc.has_attribute(button, "disabled"));
        assert!(!doc.has_class(button, "loading"));
        assert!(find(&doc, button, ".aq-btn-spinner").is_none());
    }

    #[test]
    fn test_select_in_group() {
        let mut doc = Document::new();
        let group = element_with_class(&mut doc, "div", "aq-btn-group");
        let body = doc.body();
        doc.append_child(body, group).unwrap();
        let a = element_with_class(&mut doc, "button", "aq-btn selected");
        let b = element_with_class(&mut doc, "button", "aq-btn");
        doc.append_child(group, a).unwrap();
        doc.append_child(group, b).unwrap();

        assert_eq!(select_in_group(&mut doc, b), Some(group));
        assert!(doc.has_class(b, "selected"));
        assert!(!doc.has_class(a, "selected"));

        let lone = element_with_class(&mut doc, "button", "aq-btn");
        doc.append_child(body, lone).unwrap();
        assert_eq!(select_in_group(&mut doc, lone), None);
    }
}
