//! Component wiring
//!
//! Each component contributes rows to the binding table and exposes a few
//! imperative helpers. Component notifications are delivered as typed
//! [`ComponentEvent`]s to subscribers of the shared [`Notifier`].

pub mod alerts;
pub mod badges;
pub mod buttons;
pub mod cards;
pub mod containers;
pub mod forms;
pub mod modals;
pub mod navbar;
pub mod scroll_lock;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use aqua_dom::{Document, NodeId};

use crate::registry::Registry;
use crate::AquaConfig;

pub use modals::ModalController;
pub use scroll_lock::scroll_lock;

/// Notification raised by a component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentEvent {
    AlertShown { alert: NodeId },
    AlertClicked { alert: NodeId },
    AlertClosed { alert: NodeId },
    BadgeClicked { badge: NodeId },
    ButtonClicked { button: NodeId },
    ButtonGroupSelected { group: NodeId, button: NodeId },
    CardClicked { card: NodeId },
    CardDragStart { card: NodeId },
    CardDragEnd { card: NodeId },
    FormCheckChanged { input: NodeId, checked: bool },
    ModalOpened { modal: NodeId },
    ModalClosed { modal: NodeId },
    NavbarToggled { navbar: NodeId, expanded: bool },
    ComponentsInitialized,
}

type Subscriber = Rc<dyn Fn(&mut Document, &ComponentEvent)>;

/// Fan-out of component events to subscribers
#[derive(Clone, Default)]
pub struct Notifier {
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&mut Document, &ComponentEvent) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Deliver `event` to every subscriber registered at the time of the call
    pub fn emit(&self, doc: &mut Document, event: ComponentEvent) {
        tracing::trace!("Component event {:?}", event);
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(doc, &event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Shared state handed to every component
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Rc<AquaConfig>,
    pub events: Notifier,
    pub modals: ModalController,
}

impl Context {
    pub fn new(config: AquaConfig) -> Self {
        let config = Rc::new(config);
        let events = Notifier::new();
        let modals = ModalController::new(events.clone());
        Self {
            config,
            events,
            modals,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(AquaConfig::default())
    }
}

/// The full wiring table, in component order
pub fn registry(ctx: &Context) -> Registry {
    let mut registry = Registry::new();
    registry.extend(alerts::bindings(ctx));
    registry.extend(badges::bindings(ctx));
    registry.extend(buttons::bindings(ctx));
    registry.extend(cards::bindings(ctx));
    registry.extend(containers::bindings(ctx));
    registry.extend(forms::bindings(ctx));
    registry.extend(modals::bindings(ctx));
    registry.extend(navbar::bindings(ctx));
    registry
}

/// First descendant of `root` matching a built-in selector
pub(crate) fn find(doc: &Document, root: NodeId, selector: &str) -> Option<NodeId> {
    doc.query_selector_within(root, selector)
        .unwrap_or_else(|err| {
            tracing::warn!("Bad component selector {:?}: {}", selector, err);
            None
        })
}

/// All descendants of `root` matching a built-in selector
pub(crate) fn find_all(doc: &Document, root: NodeId, selector: &str) -> Vec<NodeId> {
    doc.query_selector_all_within(root, selector)
        .unwrap_or_else(|err| {
            tracing::warn!("Bad component selector {:?}: {}", selector, err);
            Vec::new()
        })
}

/// Nearest inclusive ancestor matching a built-in selector
pub(crate) fn closest(doc: &Document, node: NodeId, selector: &str) -> Option<NodeId> {
    doc.closest(node, selector).unwrap_or_else(|err| {
        tracing::warn!("Bad component selector {:?}: {}", selector, err);
        None
    })
}

/// Create an element with the given classes
pub(crate) fn element_with_class(doc: &mut Document, tag: &str, class: &str) -> NodeId {
    let el = doc.create_element(tag);
    if let Some(classes) = doc.class_list_mut(el) {
        classes.set_value(class);
    }
    el
}
