//! Document - High-level document API
//!
//! Owns the node arena together with everything the interaction layer needs
//! from the platform: focus, event listeners, timers and media preferences.

use std::collections::HashSet;
use std::rc::Rc;

use crate::listener::ListenerRegistry;
use crate::timers::TimerQueue;
use crate::{
    DOMRect, DOMTokenList, DomError, DomResult, ElementData, Event, EventKind, InlineStyle,
    ListenerId, ListenerOptions, MediaPreferences, Node, NodeData, NodeId, SelectorList, TimerId,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    active_element: Option<NodeId>,
    listeners: ListenerRegistry,
    timers: TimerQueue,
    preferences: MediaPreferences,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new(NodeData::Document)],
            html_element: NodeId::ROOT,
            head_element: NodeId::ROOT,
            body_element: NodeId::ROOT,
            active_element: None,
            listeners: ListenerRegistry::default(),
            timers: TimerQueue::default(),
            preferences: MediaPreferences::default(),
        };

        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.link(NodeId::ROOT, html, None);
        doc.link(html, head, None);
        doc.link(html, body, None);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create a document with the given media preferences
    pub fn with_preferences(preferences: MediaPreferences) -> Self {
        Self {
            preferences,
            ..Self::new()
        }
    }

    // ---- tree ----

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data, or None for text/document nodes and unknown ids
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.node_mut(id).and_then(Node::as_element_mut)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Number of nodes ever created (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text(text.to_string()))
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.link(parent, child, None);
        Ok(())
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.link(parent, child, Some(0));
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.node(child).ok_or(DomError::NotFound(child))?;

        if matches!(parent_node.data, NodeData::Text(_))
            || matches!(child_node.data, NodeData::Document)
            || self.contains(child, parent)
        {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        if let Some(node) = self.node_mut(parent) {
            match position {
                Some(pos) => node.children.insert(pos.min(node.children.len()), child),
                None => node.children.push(child),
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    /// Remove a node from its parent. Focus inside the removed subtree is
    /// dropped along with every listener registered on it, so a removed node
    /// re-inserted later starts without listeners.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        if self.node(id).is_none() {
            return Err(DomError::NotFound(id));
        }
        if id == NodeId::ROOT {
            return Err(DomError::HierarchyRequest);
        }

        if let Some(active) = self.active_element
            && self.contains(id, active)
        {
            self.active_element = None;
        }

        let mut subtree = HashSet::from([id]);
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            for &child in self.children(node) {
                subtree.insert(child);
                stack.push(child);
            }
        }
        let dropped = self.listeners.remove_targets(|node| subtree.contains(&node));

        self.detach(id);
        tracing::trace!("Removed node {:?} ({} listeners dropped)", id, dropped);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Element children in document order
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.children(parent)
            .iter()
            .copied()
            .skip_while(|&c| c != id)
            .skip(1)
            .find(|&c| self.is_element(c))
    }

    /// Element descendants of `root` in pre-order, `root` excluded
    pub fn descendant_elements(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.is_element(id) {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Inclusive ancestry check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is attached to the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.node(id).is_some() && self.contains(NodeId::ROOT, id)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(text) = node.as_text() {
            out.push_str(text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if !self.is_element(id) {
            return Err(DomError::NotAnElement(id));
        }
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.link(id, text_node, None);
        }
        Ok(())
    }

    // ---- attributes, classes, style ----

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)
            .and_then(|e| e.attribute(name))
            .map(|v| v.into_owned())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        element.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|e| e.remove_attribute(name))
    }

    pub fn class_list(&self, id: NodeId) -> Option<&DOMTokenList> {
        self.element(id).map(|e| &e.classes)
    }

    pub fn class_list_mut(&mut self, id: NodeId) -> Option<&mut DOMTokenList> {
        self.element_mut(id).map(|e| &mut e.classes)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).is_some_and(|c| c.contains(class))
    }

    /// Add a class. Non-elements are ignored.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(classes) = self.class_list_mut(id) {
            classes.add(&[class]);
        }
    }

    /// Remove a class. Non-elements are ignored.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(classes) = self.class_list_mut(id) {
            classes.remove(&[class]);
        }
    }

    /// Toggle a class, returning whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        self.class_list_mut(id)
            .is_some_and(|c| c.toggle(class, force))
    }

    pub fn style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.element(id).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut InlineStyle> {
        self.element_mut(id).map(|e| &mut e.style)
    }

    /// Set an inline style property; an empty value removes it.
    /// Non-elements are ignored.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(style) = self.style_mut(id) {
            style.set_property(property, value);
        }
    }

    pub fn get_style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.style(id).and_then(|s| s.get_property(property))
    }

    /// Form control value
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.value.as_str())
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.value = value.to_string();
        }
    }

    pub fn bounding_client_rect(&self, id: NodeId) -> Option<DOMRect> {
        self.element(id).map(|e| e.rect)
    }

    /// Host-supplied layout box
    pub fn set_bounding_rect(&mut self, id: NodeId, rect: DOMRect) {
        if let Some(element) = self.element_mut(id) {
            element.rect = rect;
        }
    }

    // ---- queries ----

    /// First element in document order matching `selectors`
    pub fn query_selector(&self, selectors: &str) -> DomResult<Option<NodeId>> {
        self.query_selector_within(NodeId::ROOT, selectors)
    }

    /// All elements in document order matching `selectors`
    pub fn query_selector_all(&self, selectors: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self.select_all(NodeId::ROOT, &list))
    }

    /// First descendant of `root` matching `selectors`
    pub fn query_selector_within(&self, root: NodeId, selectors: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self
            .descendant_elements(root)
            .into_iter()
            .find(|&id| list.matches(self, id)))
    }

    /// Descendants of `root` matching `selectors`
    pub fn query_selector_all_within(&self, root: NodeId, selectors: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self.select_all(root, &list))
    }

    /// Descendants of `root` matching a parsed list
    pub fn select_all(&self, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.descendant_elements(root)
            .into_iter()
            .filter(|&id| list.matches(self, id))
            .collect()
    }

    pub fn matches(&self, id: NodeId, selectors: &str) -> DomResult<bool> {
        let list = SelectorList::parse(selectors)?;
        Ok(list.matches(self, id))
    }

    /// Nearest inclusive ancestor matching `selectors`
    pub fn closest(&self, id: NodeId, selectors: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        let mut current = Some(id);
        while let Some(node) = current {
            if list.matches(self, node) {
                return Ok(Some(node));
            }
            current = self.parent(node);
        }
        Ok(None)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendant_elements(NodeId::ROOT)
            .into_iter()
            .find(|&node| self.get_attribute(node, "id").as_deref() == Some(id))
    }

    // ---- focus ----

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to an element. Dispatches `blur` on the previously focused
    /// element and `focus` on the new one. Returns false for non-elements.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_element(id) {
            return false;
        }
        let previous = self.active_element.replace(id);
        if previous == Some(id) {
            return true;
        }

        tracing::trace!("Focus moved {:?} -> {:?}", previous, id);
        if let Some(old) = previous {
            self.dispatch_event(old, Event::new(EventKind::Blur));
        }
        self.dispatch_event(id, Event::new(EventKind::Focus));
        true
    }

    /// Drop focus from the active element
    pub fn blur(&mut self) {
        if let Some(old) = self.active_element.take() {
            self.dispatch_event(old, Event::new(EventKind::Blur));
        }
    }

    // ---- events ----

    pub fn add_event_listener<F>(&mut self, target: NodeId, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.add_event_listener_with(target, kind, ListenerOptions::default(), callback)
    }

    pub fn add_event_listener_with<F>(
        &mut self,
        target: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        callback: F,
    ) -> ListenerId
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.listeners.add(target, kind, options, Rc::new(callback))
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self, target: NodeId, kind: EventKind) -> usize {
        self.listeners.count(target, kind)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.total()
    }

    /// Dispatch an event at `target`, bubbling through its ancestors when the
    /// event bubbles. Returns false if a listener prevented the default action.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> bool {
        event.target = Some(target);
        event.timestamp = self.timers.now();

        let mut path = vec![target];
        if event.bubbles {
            let mut current = self.parent(target);
            while let Some(id) = current {
                path.push(id);
                current = self.parent(id);
            }
        }

        for node in path {
            event.current_target = Some(node);
            for (id, once, callback) in self.listeners.snapshot(node, event.kind) {
                // Removed by an earlier handler during this dispatch
                if !self.listeners.contains(id) {
                    continue;
                }
                if once {
                    self.listeners.remove(id);
                }
                callback(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        !event.is_default_prevented()
    }

    // ---- timers ----

    /// Schedule a one-shot callback `delay_ms` after the current virtual time
    pub fn set_timeout<F>(&mut self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnOnce(&mut Document) + 'static,
    {
        self.timers.schedule(delay_ms, Box::new(callback))
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear(id)
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Advance the clock by `ms`, firing due timers in deadline order.
    /// Timers scheduled by callbacks fire too if they fall inside the window.
    /// Returns the number of callbacks run.
    pub fn advance(&mut self, ms: u64) -> usize {
        let until = self.timers.now().saturating_add(ms);
        let mut fired = 0;
        while let Some(callback) = self.timers.pop_due(until) {
            callback(self);
            fired += 1;
        }
        self.timers.settle(until);
        if fired > 0 {
            tracing::trace!("Fired {} timers, clock at {}ms", fired, until);
        }
        fired
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Deadline of the next pending timer
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    // ---- media ----

    pub fn preferences(&self) -> &MediaPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut MediaPreferences {
        &mut self.preferences
    }

    /// `matchMedia(query).matches`
    pub fn match_media(&self, query: &str) -> bool {
        self.preferences.matches(query)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
