//! Navbar

use aqua_dom::{Document, EventKind, NodeId};
use aqua_motion::{attach_ripple, run_animation, AnimationOptions};

use super::{find, ComponentEvent, Context, Notifier};
use crate::registry::Binding;

pub const DROPDOWN_IN: &str = "aq-navbar-scale-in";

/// Flip the mobile menu open or closed. Returns whether it is now expanded.
pub fn toggle(doc: &mut Document, toggle: NodeId, collapse: NodeId) -> bool {
    doc.toggle_class(toggle, "active", None);
    doc.toggle_class(collapse, "active", None)
}

fn bind_toggle(doc: &mut Document, navbar: NodeId, events: &Notifier) {
    let (Some(button), Some(collapse)) = (
        find(doc, navbar, ".aq-navbar-toggle"),
        find(doc, navbar, ".aq-navbar-collapse"),
    ) else {
        tracing::trace!("Navbar {:?} has no toggle/collapse pair", navbar);
        return;
    };

    let events = events.clone();
    doc.add_event_listener(button, EventKind::Click, move |doc, _| {
        let expanded = toggle(doc, button, collapse);
        events.emit(doc, ComponentEvent::NavbarToggled { navbar, expanded });
    });
}

fn bind_dropdown(doc: &mut Document, item: NodeId) {
    let Some(dropdown) = find(doc, item, ".aq-navbar-dropdown") else {
        return;
    };
    doc.add_event_listener(item, EventKind::MouseEnter, move |doc, _| {
        doc.add_class(dropdown, "show");
        run_animation(doc, Some(dropdown), DROPDOWN_IN, AnimationOptions::new().duration(400));
    });
    doc.add_event_listener(item, EventKind::MouseLeave, move |doc, _| {
        doc.remove_class(dropdown, "show");
    });
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let events = ctx.events.clone();
    let ripple = ctx.config.ripple_options();

    vec![
        Binding::init(".aq-navbar", move |doc, navbar| bind_toggle(doc, navbar, &events)),
        Binding::init(".aq-navbar-item", bind_dropdown),
        Binding::init(".aq-navbar-link.ripple", move |doc, link| {
            attach_ripple(doc, link, ripple.clone());
        }),
        Binding::on(".aq-navbar-link.underline", EventKind::MouseEnter, |doc, link, _| {
            doc.add_class(link, "active")
        }),
        Binding::on(".aq-navbar-link.underline", EventKind::MouseLeave, |doc, link, _| {
            doc.remove_class(link, "active")
        }),
    ]
}
