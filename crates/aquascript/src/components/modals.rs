//! Modals
//!
//! [`ModalController`] owns the open-modal stack. Escape and backdrop clicks
//! close the topmost modal; page scrolling stays locked while any is open.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use aqua_a11y::{trap_focus, FocusTrap};
use aqua_dom::{Document, DomResult, EventKind, NodeId};
use aqua_motion::{run_animation, AnimationOptions, Completion};

use super::{closest, element_with_class, find, scroll_lock, ComponentEvent, Context, Notifier};
use crate::registry::Binding;

/// Dialog entrance animation for a modal's modifier class
pub fn entrance_animation(doc: &Document, modal: NodeId) -> Option<(&'static str, u64)> {
    const ENTRANCES: [(&str, &str, u64); 5] = [
        ("scale", "aq-modal-scale", 500),
        ("flip", "aq-modal-flip", 500),
        ("bounce", "aq-modal-bounce-in", 500),
        ("fade", "aq-modal-fade", 600),
        ("slide-top", "aq-modal-slide-in-top", 500),
    ];
    ENTRANCES
        .iter()
        .find(|(modifier, _, _)| doc.has_class(modal, modifier))
        .map(|&(_, class, ms)| (class, ms))
}

/// Run the entrance animation on the modal's `.aq-modal-dialog`
pub fn animate_entrance(doc: &mut Document, modal: NodeId) -> Completion {
    let Some((class, ms)) = entrance_animation(doc, modal) else {
        return Completion::empty();
    };
    let dialog = find(doc, modal, ".aq-modal-dialog");
    run_animation(doc, dialog, class, AnimationOptions::new().duration(ms))
}

#[derive(Debug, Default)]
struct ModalState {
    /// Open modals, most recent last
    stack: Vec<NodeId>,
    traps: HashMap<NodeId, FocusTrap>,
}

/// Open/close state shared by every modal binding
#[derive(Debug, Clone)]
pub struct ModalController {
    state: Rc<RefCell<ModalState>>,
    events: Notifier,
}

impl ModalController {
    pub fn new(events: Notifier) -> Self {
        Self {
            state: Rc::default(),
            events,
        }
    }

    /// Show `modal` as a dialog. Returns false if `modal` is not an element.
    pub fn open(&self, doc: &mut Document, modal: NodeId) -> bool {
        if !doc.is_element(modal) {
            return false;
        }
        doc.add_class(modal, "active");
        // Cannot fail on an element
        let _ = doc.set_attribute(modal, "role", "dialog");
        let _ = doc.set_attribute(modal, "aria-modal", "true");

        {
            let mut state = self.state.borrow_mut();
            if !state.traps.contains_key(&modal) {
                let trap = trap_focus(doc, Some(modal));
                state.traps.insert(modal, trap);
            }
            state.stack.retain(|&m| m != modal);
            state.stack.push(modal);
        }

        scroll_lock(doc, true);
        animate_entrance(doc, modal);
        tracing::debug!("Opened modal {:?}", modal);
        self.events.emit(doc, ComponentEvent::ModalOpened { modal });
        true
    }

    /// Close `modal`, or the topmost open modal when `None`. Returns false if
    /// there was nothing to close.
    pub fn close(&self, doc: &mut Document, modal: Option<NodeId>) -> bool {
        let Some(modal) = modal.or_else(|| self.top()) else {
            return false;
        };

        let was_open = {
            let mut state = self.state.borrow_mut();
            let before = state.stack.len();
            state.stack.retain(|&m| m != modal);
            before != state.stack.len()
        };
        if !was_open && !doc.has_class(modal, "active") {
            return false;
        }

        doc.remove_class(modal, "active");
        if self.state.borrow().stack.is_empty() {
            scroll_lock(doc, false);
        }
        tracing::debug!("Closed modal {:?}", modal);
        self.events.emit(doc, ComponentEvent::ModalClosed { modal });
        true
    }

    /// Most recently opened modal still open
    pub fn top(&self) -> Option<NodeId> {
        self.state.borrow().stack.last().copied()
    }

    pub fn is_open(&self, modal: NodeId) -> bool {
        self.state.borrow().stack.contains(&modal)
    }

    pub fn open_count(&self) -> usize {
        self.state.borrow().stack.len()
    }
}

/// Show or hide the modal's loading overlay, creating it on first use
pub fn set_loading(doc: &mut Document, modal: NodeId, loading: bool) -> DomResult<NodeId> {
    let overlay = match find(doc, modal, ".aq-modal-loading") {
        Some(overlay) => overlay,
        None => {
            let overlay = element_with_class(doc, "div", "aq-modal-loading");
            let spinner = element_with_class(doc, "div", "aq-modal-spinner");
            doc.append_child(overlay, spinner)?;
            doc.append_child(modal, overlay)?;
            overlay
        }
    };
    doc.toggle_class(overlay, "active", Some(loading));
    Ok(overlay)
}

/// Content of a modal built by [`show`]
#[derive(Debug, Clone, Default)]
pub struct ModalOptions {
    pub title: String,
    pub content: String,
    pub footer: Option<String>,
}

impl ModalOptions {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            footer: None,
        }
    }

    pub fn footer(mut self, footer: &str) -> Self {
        self.footer = Some(footer.to_string());
        self
    }
}

fn div(doc: &mut Document, parent: NodeId, class: &str) -> DomResult<NodeId> {
    let el = element_with_class(doc, "div", class);
    doc.append_child(parent, el)?;
    Ok(el)
}

/// Build a modal, append it to `<body>` and open it
pub fn show(doc: &mut Document, ctx: &Context, options: ModalOptions) -> DomResult<NodeId> {
    let modal = element_with_class(doc, "div", "aq-modal");
    doc.set_attribute(modal, "aria-labelledby", "aq-modal-title")?;

    let dialog = div(doc, modal, "aq-modal-dialog")?;
    let header = div(doc, dialog, "aq-modal-header")?;
    let title = element_with_class(doc, "span", "aq-modal-title");
    doc.set_attribute(title, "id", "aq-modal-title")?;
    doc.set_text_content(title, &options.title)?;
    doc.append_child(header, title)?;

    let close_button = element_with_class(doc, "button", "aq-modal-close");
    doc.set_attribute(close_button, "type", "button")?;
    doc.set_attribute(close_button, "aria-label", "Close")?;
    doc.set_text_content(close_button, "\u{00d7}")?;
    doc.append_child(header, close_button)?;

    let content = div(doc, dialog, "aq-modal-content")?;
    let body = div(doc, content, "aq-modal-body")?;
    let body_content = div(doc, body, "aq-modal-body-content")?;
    doc.set_text_content(body_content, &options.content)?;
    if let Some(text) = &options.footer {
        let footer = div(doc, content, "aq-modal-footer")?;
        doc.set_text_content(footer, text)?;
    }

    let page = doc.body();
    doc.append_child(page, modal)?;

    let modals = ctx.modals.clone();
    doc.add_event_listener(close_button, EventKind::Click, move |doc, _| {
        modals.close(doc, Some(modal));
    });
    ctx.modals.open(doc, modal);
    Ok(modal)
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let on_close = ctx.modals.clone();
    let on_self = ctx.modals.clone();
    let on_backdrop = ctx.modals.clone();
    let on_escape = ctx.modals.clone();

    vec![
        Binding::on(".aq-modal-close", EventKind::Click, move |doc, button, _| {
            if let Some(modal) = closest(doc, button, ".aq-modal") {
                on_close.close(doc, Some(modal));
            }
        }),
        Binding::on(".aq-modal", EventKind::Click, move |doc, modal, event| {
            if event.target == Some(modal) {
                on_self.close(doc, Some(modal));
            }
        }),
        Binding::on(".aq-modal-backdrop", EventKind::Click, move |doc, backdrop, _| {
            if let Some(modal) = closest(doc, backdrop, ".aq-modal") {
                on_backdrop.close(doc, Some(modal));
            }
        }),
        Binding::on("html", EventKind::KeyDown, move |doc, _, event| {
            if event.key().is_some_and(|k| k.key == "Escape") {
                on_escape.close(doc, None);
            }
        }),
        Binding::init(".aq-modal.active", |doc, modal| {
            animate_entrance(doc, modal);
        }),
    ]
}
