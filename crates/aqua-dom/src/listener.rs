//! Event listener registry
//!
//! Listeners are keyed by (target, event kind). Callbacks receive the
//! document mutably, so dispatch works on a snapshot of the handler list.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, Event, EventKind, NodeId};

/// Event callback
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    /// Remove after the first invocation
    pub once: bool,
}

impl ListenerOptions {
    pub fn once() -> Self {
        Self { once: true }
    }
}

struct Registration {
    id: ListenerId,
    once: bool,
    callback: Listener,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    by_target: HashMap<(NodeId, EventKind), Vec<Registration>>,
    index: HashMap<ListenerId, (NodeId, EventKind)>,
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        callback: Listener,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_target
            .entry((target, kind))
            .or_default()
            .push(Registration {
                id,
                once: options.once,
                callback,
            });
        self.index.insert(id, (target, kind));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let Some(key) = self.index.remove(&id) else {
            return false;
        };
        if let Some(list) = self.by_target.get_mut(&key) {
            list.retain(|r| r.id != id);
            if list.is_empty() {
                self.by_target.remove(&key);
            }
        }
        true
    }

    /// Drop every registration whose target satisfies `doomed`
    pub(crate) fn remove_targets(&mut self, doomed: impl Fn(NodeId) -> bool) -> usize {
        let before = self.index.len();
        self.by_target.retain(|&(target, _), _| !doomed(target));
        self.index.retain(|_, &mut (target, _)| !doomed(target));
        before - self.index.len()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Handlers registered at the moment of the call
    pub(crate) fn snapshot(&self, target: NodeId, kind: EventKind) -> Vec<(ListenerId, bool, Listener)> {
        self.by_target
            .get(&(target, kind))
            .map(|list| {
                list.iter()
                    .map(|r| (r.id, r.once, r.callback.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: NodeId, kind: EventKind) -> usize {
        self.by_target.get(&(target, kind)).map_or(0, Vec::len)
    }

    pub(crate) fn total(&self) -> usize {
        self.index.len()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut registry = ListenerRegistry::default();
        let node = NodeId(3);
        let id = registry.add(node, EventKind::Click, ListenerOptions::default(), Rc::new(|_: &mut Document, _: &mut Event| {}));

        assert_eq!(registry.count(node, EventKind::Click), 1);
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.count(node, EventKind::Click), 0);
    }

    #[test]
    fn test_remove_targets() {
        let mut registry = ListenerRegistry::default();
        let (a, b) = (NodeId(1), NodeId(2));
        let gone = registry.add(a, EventKind::Click, ListenerOptions::default(), Rc::new(|_: &mut Document, _: &mut Event| {}));
        registry.add(a, EventKind::KeyDown, ListenerOptions::default(), Rc::new(|_: &mut Document, _: &mut Event| {}));
        registry.add(b, EventKind::Click, ListenerOptions::default(), Rc::new(|_: &mut Document, _: &mut Event| {}));

        assert_eq!(registry.remove_targets(|t| t == a), 2);
        assert!(!registry.contains(gone));
        assert_eq!(registry.count(b, EventKind::Click), 1);
        assert_eq!(registry.total(), 1);
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let mut registry = ListenerRegistry::default();
        let node = NodeId(1);
        let a = registry.add(node, EventKind::KeyDown, ListenerOptions::default(), Rc::new(|_: &mut Document, _: &mut Event| {}));
        let b = registry.add(node, EventKind::KeyDown, ListenerOptions::once(), Rc::new(|_: &mut Document, _: &mut Event| {}));

        let snapshot = registry.snapshot(node, EventKind::KeyDown);
        let ids: Vec<_> = snapshot.iter().map(|(id, once, _)| (*id, *once)).collect();
        assert_eq!(ids, vec![(a, false), (b, true)]);
    }
}
