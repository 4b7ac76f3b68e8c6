//! Declarative component bindings
//!
//! Components describe their wiring as `(selector, trigger, handler)` rows.
//! Applying a registry resolves every selector once against the document and
//! either runs the handler on each match or attaches it as a listener.

use std::fmt;
use std::rc::Rc;

use aqua_dom::{Document, Event, EventKind, NodeId, SelectorList};

use crate::Result;

/// When a binding's handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Once per matching element while the registry is applied
    Init,
    /// Every time the event reaches a matching element
    On(EventKind),
}

type InitHandler = Rc<dyn Fn(&mut Document, NodeId)>;
type EventHandler = Rc<dyn Fn(&mut Document, NodeId, &mut Event)>;

/// A handler together with what triggers it
#[derive(Clone)]
enum Handler {
    Init(InitHandler),
    On(EventKind, EventHandler),
}

/// One row of the wiring table
#[derive(Clone)]
pub struct Binding {
    selector: String,
    handler: Handler,
}

impl Binding {
    /// Run `handler` once for each element matching `selector`
    pub fn init<F>(selector: &str, handler: F) -> Self
    where
        F: Fn(&mut Document, NodeId) + 'static,
    {
        Self {
            selector: selector.to_string(),
            handler: Handler::Init(Rc::new(handler)),
        }
    }

    /// Listen for `kind` on each element matching `selector`. The handler gets
    /// the element it was bound to, which may differ from the event target.
    pub fn on<F>(selector: &str, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut Document, NodeId, &mut Event) + 'static,
    {
        Self {
            selector: selector.to_string(),
            handler: Handler::On(kind, Rc::new(handler)),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn trigger(&self) -> Trigger {
        match self.handler {
            Handler::Init(_) => Trigger::Init,
            Handler::On(kind, _) => Trigger::On(kind),
        }
    }

    fn bind(&self, doc: &mut Document, element: NodeId) {
        match &self.handler {
            Handler::Init(handler) => handler(doc, element),
            Handler::On(kind, handler) => {
                let handler = handler.clone();
                doc.add_event_listener(element, *kind, move |doc: &mut Document, event: &mut Event| {
                    handler(doc, element, event)
                });
            }
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("selector", &self.selector)
            .field("trigger", &self.trigger())
            .finish()
    }
}

/// Ordered table of bindings
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bindings: Vec<Binding>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, binding: Binding) -> &mut Self {
        self.bindings.push(binding);
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Apply every binding in order. All selectors are checked before anything
    /// is bound, so an invalid one leaves the document untouched. Returns the
    /// number of element bindings made.
    pub fn apply(&self, doc: &mut Document) -> Result<usize> {
        let parsed = self
            .bindings
            .iter()
            .map(|b| SelectorList::parse(&b.selector))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut count = 0;
        for (binding, selectors) in self.bindings.iter().zip(&parsed) {
            let matches = doc.select_all(doc.root(), selectors);
            tracing::trace!("{} -> {} elements", binding.selector, matches.len());
            for element in matches {
                binding.bind(doc, element);
                count += 1;
            }
        }

        tracing::debug!("Applied {} bindings ({} element bindings)", self.bindings.len(), count);
        Ok(count)
    }
}

impl Extend<Binding> for Registry {
    fn extend<I: IntoIterator<Item = Binding>>(&mut self, iter: I) {
        self.bindings.extend(iter);
    }
}

impl FromIterator<Binding> for Registry {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AquaError;

    fn doc_with_buttons(n: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.body();
        let buttons = (0..n)
            .map(|_| {
                let b = doc.create_element("button");
                doc.add_class(b, "aq-btn");
                doc.append_child(body, b).unwrap();
                b
            })
            .collect();
        (doc, buttons)
    }

    #[test]
    fn test_init_binding_runs_per_match() {
        let (mut doc, buttons) = doc_with_buttons(3);
        let registry: Registry = [Binding::init(".aq-btn", |doc, el| doc.add_class(el, "ready"))]
            .into_iter()
            .collect();

        assert_eq!(registry.apply(&mut doc).unwrap(), 3);
        assert!(buttons.iter().all(|&b| doc.has_class(b, "ready")));
    }

    #[test]
    fn test_event_binding_attaches_listener() {
        let (mut doc, buttons) = doc_with_buttons(2);
        let mut registry = Registry::new();
        registry.add(Binding::on(".aq-btn", EventKind::Click, |doc, el, _| {
            doc.toggle_class(el, "active", None);
        }));

        assert_eq!(registry.apply(&mut doc).unwrap(), 2);
        doc.dispatch_event(buttons[1], Event::click(0.0, 0.0));
        assert!(doc.has_class(buttons[1], "active"));
        assert!(!doc.has_class(buttons[0], "active"));
    }

    #[test]
    fn test_trigger_follows_constructor() {
        let init = Binding::init(".aq-card", |_, _| {});
        let click = Binding::on(".aq-btn", EventKind::Click, |_, _, _| {});
        assert_eq!(init.trigger(), Trigger::Init);
        assert_eq!(click.trigger(), Trigger::On(EventKind::Click));
        assert_eq!(click.selector(), ".aq-btn");
    }

    #[test]
    fn test_invalid_selector_binds_nothing() {
        let (mut doc, _) = doc_with_buttons(1);
        let mut registry = Registry::new();
        registry
            .add(Binding::init(".aq-btn", |doc, el| doc.add_class(el, "ready")))
            .add(Binding::init(".aq-btn:hover", |_, _| {}));

        assert!(matches!(registry.apply(&mut doc), Err(AquaError::Selector(_))));
        assert_eq!(doc.query_selector_all(".ready").unwrap().len(), 0);
    }
}
